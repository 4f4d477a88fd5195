//! # Generation Module
//!
//! The procedural layout pipeline and its input record.
//!
//! Stages run strictly forward: profile resolution, binary space
//! partitioning, room placement, corridor building, door placement, and
//! feature generation, orchestrated per level by the
//! [`DungeonComposer`](composer::DungeonComposer). Every stage draws from an
//! explicitly threaded [`StdRng`](rand::rngs::StdRng), so generation is
//! reproducible for a fixed seed and trivially safe to run concurrently
//! from independent callers.

pub mod composer;
pub mod corridors;
pub mod doors;
pub mod features;
pub mod partition;
pub mod profile;
pub mod rooms;

pub use composer::*;
pub use corridors::*;
pub use doors::*;
pub use features::*;
pub use partition::*;
pub use profile::*;
pub use rooms::*;

use profile::LayoutProfile;
use serde::{Deserialize, Serialize};

/// Coarse difficulty rating supplied by the caller.
///
/// Difficulty scales trap likelihood and the recommended party level; it
/// does not otherwise change geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Deadly,
}

impl Difficulty {
    /// Multiplier applied to the trap weight in the feature tables.
    pub fn trap_multiplier(self) -> f64 {
        match self {
            Difficulty::Easy => 0.7,
            Difficulty::Medium => 1.0,
            Difficulty::Hard => 1.2,
            Difficulty::Deadly => 1.4,
        }
    }

    /// Recommended party level for the assembled dungeon record.
    pub fn recommended_level(self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 3,
            Difficulty::Hard => 7,
            Difficulty::Deadly => 11,
        }
    }

    /// Label used when composing dungeon identity fields.
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Deadly => "deadly",
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "deadly" => Ok(Difficulty::Deadly),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// Input parameter record for one generation call.
///
/// Only the grid dimensions are required; omitted tuning fields fall back
/// to the resolved theme profile's defaults.
///
/// # Examples
///
/// ```
/// use delve::GenerationParams;
///
/// let params = GenerationParams::new(50, 50)
///     .with_theme("forgotten crypt")
///     .with_levels(3);
/// assert_eq!(params.num_levels, Some(3));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Grid width in cells
    pub grid_width: u32,
    /// Grid height in cells
    pub grid_height: u32,
    /// Number of levels to generate (>= 1, default 1)
    pub num_levels: Option<u32>,
    /// Minimum room dimension in cells
    pub min_room_size: Option<u32>,
    /// Maximum room dimension in cells
    pub max_room_size: Option<u32>,
    /// Fraction of partition leaves converted to rooms (0.0 to 1.0)
    pub room_density: Option<f64>,
    /// Fraction of extra non-tree corridor edges (0.0 to 1.0)
    pub extra_connections_ratio: Option<f64>,
    /// Probability that a door is secret (0.0 to 1.0)
    pub secret_door_ratio: Option<f64>,
    /// Free-text theme consumed by the profile resolver
    pub theme: Option<String>,
    /// Difficulty rating (default medium)
    pub difficulty: Option<Difficulty>,
    /// Tiling mode tag, carried through to output verbatim
    pub tile_type: Option<String>,
}

impl GenerationParams {
    /// Creates a parameter record with required grid dimensions and all
    /// tuning fields left to profile defaults.
    pub fn new(grid_width: u32, grid_height: u32) -> Self {
        Self {
            grid_width,
            grid_height,
            num_levels: None,
            min_room_size: None,
            max_room_size: None,
            room_density: None,
            extra_connections_ratio: None,
            secret_door_ratio: None,
            theme: None,
            difficulty: None,
            tile_type: None,
        }
    }

    /// Sets the theme string.
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    /// Sets the number of levels.
    pub fn with_levels(mut self, levels: u32) -> Self {
        self.num_levels = Some(levels);
        self
    }

    /// Sets the difficulty rating.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    /// Sets the room size bounds.
    pub fn with_room_sizes(mut self, min: u32, max: u32) -> Self {
        self.min_room_size = Some(min);
        self.max_room_size = Some(max);
        self
    }
}

/// Fully concrete tuning values for one generation call.
///
/// Built by merging caller overrides over the theme profile, then applying
/// the degeneracy clamps: inconsistent bounds are repaired silently rather
/// than rejected (best-effort policy).
#[derive(Debug, Clone)]
pub struct ResolvedParams {
    pub grid_width: u32,
    pub grid_height: u32,
    pub num_levels: u32,
    pub min_room_size: u32,
    pub max_room_size: u32,
    pub padding: u32,
    pub room_density: f64,
    pub extra_connections_ratio: f64,
    pub secret_door_ratio: f64,
    pub split_ratio: f64,
    pub min_split_size: u32,
    pub tile_span: u32,
    pub difficulty: Difficulty,
    pub tile_type: String,
}

impl ResolvedParams {
    /// Merges caller parameters with a resolved layout profile.
    pub fn new(params: &GenerationParams, profile: &LayoutProfile) -> Self {
        let mut min_room = params.min_room_size.unwrap_or(profile.min_room_size).max(1);
        let mut max_room = params.max_room_size.unwrap_or(profile.max_room_size).max(1);
        // min > max is repaired by swapping, not rejected.
        if min_room > max_room {
            std::mem::swap(&mut min_room, &mut max_room);
        }

        // A tile span wider than the smallest room can never quantize.
        let mut tile_span = profile.tile_span.clamp(1, min_room);
        // Quantization needs a span multiple inside the size bounds;
        // without one, disable it rather than emit out-of-bounds rooms.
        let smallest_multiple =
            (min_room as u64).div_ceil(tile_span as u64) * tile_span as u64;
        if smallest_multiple > max_room as u64 {
            tile_span = 1;
        }

        Self {
            grid_width: params.grid_width,
            grid_height: params.grid_height,
            num_levels: params.num_levels.unwrap_or(1).max(1),
            min_room_size: min_room,
            max_room_size: max_room,
            padding: profile.padding.max(1),
            room_density: params
                .room_density
                .unwrap_or(profile.room_density)
                .clamp(0.0, 1.0),
            extra_connections_ratio: params
                .extra_connections_ratio
                .unwrap_or(profile.extra_connection_ratio)
                .clamp(0.0, 1.0),
            secret_door_ratio: params
                .secret_door_ratio
                .unwrap_or(profile.secret_door_ratio)
                .clamp(0.0, 1.0),
            split_ratio: profile.split_ratio.clamp(0.4, 0.6),
            min_split_size: profile.min_split_size.max(min_room.saturating_add(2)),
            tile_span,
            difficulty: params.difficulty.unwrap_or_default(),
            tile_type: params
                .tile_type
                .clone()
                .unwrap_or_else(|| "square".to_string()),
        }
    }
}

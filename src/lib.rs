//! # Delve
//!
//! Procedural multi-level dungeon layout generation.
//!
//! ## Architecture Overview
//!
//! Delve turns a small parameter record and a free-text theme into a
//! self-contained, serializable dungeon layout: rooms, corridors, doors,
//! and decorative features, with guaranteed connectivity and no geometric
//! overlap. The pipeline runs strictly forward through a fixed set of
//! stages:
//!
//! - **Profile resolution**: theme keywords map to an archetype and a
//!   tuning profile (pure, no randomness)
//! - **Space partitioning**: binary space partitioning of the grid into
//!   disjoint leaves sized for room placement
//! - **Room placement**: leaves become concrete room rectangles with
//!   padding, random offset, and optional tile quantization
//! - **Corridor building**: minimum spanning tree connectivity plus a
//!   controlled fraction of extra loop edges, materialized as L-paths
//! - **Door placement**: doors at room/corridor junctions with material,
//!   state, and difficulty rolls
//! - **Feature generation**: weighted stochastic room decoration
//!
//! The generator performs no persistence, no network calls, and no
//! rendering. All randomness comes from an explicitly threaded [`StdRng`],
//! so a fixed seed yields bit-identical output.
//!
//! ```
//! use delve::{DungeonComposer, GenerationParams};
//!
//! let params = GenerationParams::new(50, 50);
//! let dungeon = DungeonComposer::new()
//!     .generate_with_seed(&params, 42)
//!     .expect("grid is large enough for at least one room");
//! assert!(!dungeon.levels[0].rooms.is_empty());
//! ```
//!
//! [`StdRng`]: rand::rngs::StdRng

pub mod generation;
pub mod geometry;

pub use generation::*;
pub use geometry::*;

/// Core error type for the Delve generator.
#[derive(thiserror::Error, Debug)]
pub enum DelveError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Layout construction failed; no partial result is returned
    #[error("Construction failed: {0}")]
    ConstructionFailed(String),
}

/// Result type used throughout the Delve codebase.
pub type DelveResult<T> = Result<T, DelveError>;

/// Version information for the generator.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Generator configuration constants.
pub mod config {
    /// Default grid width in cells
    pub const DEFAULT_GRID_WIDTH: u32 = 50;

    /// Default grid height in cells
    pub const DEFAULT_GRID_HEIGHT: u32 = 50;

    /// Real-world size of one grid cell, in feet
    pub const CELL_SIZE_FEET: u32 = 5;

    /// Corridors are always one cell wide
    pub const CORRIDOR_WIDTH: u32 = 1;

    /// Room area above which a secondary chest feature may appear
    pub const LARGE_ROOM_AREA: u32 = 80;
}

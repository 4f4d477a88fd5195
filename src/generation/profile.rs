//! # Layout Profiles
//!
//! Theme resolution and per-archetype tuning bundles.
//!
//! A free-text theme string is matched against an ordered keyword list to
//! pick a dungeon archetype; the archetype carries an immutable
//! [`LayoutProfile`] that seeds every downstream stage. Resolution is a
//! pure function with no failure path: anything unrecognized falls back to
//! the generic dungeon profile.

use serde::{Deserialize, Serialize};

/// Dungeon archetype derived from the theme string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    Cave,
    Ruin,
    Fortress,
    Tower,
    Temple,
    Lair,
    Dungeon,
}

impl Archetype {
    /// Noun used in generated dungeon names when the caller supplies no
    /// theme of their own.
    pub fn noun(self) -> &'static str {
        match self {
            Archetype::Cave => "cave",
            Archetype::Ruin => "ruin",
            Archetype::Fortress => "fortress",
            Archetype::Tower => "tower",
            Archetype::Temple => "temple",
            Archetype::Lair => "lair",
            Archetype::Dungeon => "dungeon",
        }
    }
}

/// Weighting category controlling which room decorations an archetype
/// favors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureBias {
    Natural,
    Ancient,
    Martial,
    Arcane,
    Religious,
    Predatory,
    Generic,
}

/// Corridor path style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorridorStyle {
    /// Clean L-shaped elbows between room centers
    Straight,
    /// L-shaped elbows with jittered midpoints for a winding appearance
    Organic,
}

/// Immutable tuning bundle for one archetype.
///
/// Created once per generation call by keyword lookup and never mutated;
/// caller parameters may override individual values during resolution (see
/// [`ResolvedParams`](crate::generation::ResolvedParams)).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutProfile {
    /// Minimum room dimension in cells
    pub min_room_size: u32,
    /// Maximum room dimension in cells
    pub max_room_size: u32,
    /// Minimum interior padding between a room and its leaf, in cells
    pub padding: u32,
    /// Fraction of partition leaves converted to rooms (0.0 to 1.0)
    pub room_density: f64,
    /// Preferred split position along the longer axis (0.4 to 0.6)
    pub split_ratio: f64,
    /// Smallest region the partitioner will still split
    pub min_split_size: u32,
    /// Fraction of extra non-tree corridor edges (0.0 to 1.0)
    pub extra_connection_ratio: f64,
    /// Probability that a door is secret (0.0 to 1.0)
    pub secret_door_ratio: f64,
    /// Decoration weighting category
    pub feature_bias: FeatureBias,
    /// Corridor path style
    pub corridor_style: CorridorStyle,
    /// Quantization unit for room dimensions; 1 disables quantization
    pub tile_span: u32,
}

/// Ordered keyword precedence. Earlier entries win; the scan is a plain
/// case-insensitive substring match, so "ruined cavern" resolves to Cave.
const KEYWORDS: &[(&[&str], Archetype)] = &[
    (&["cave", "grotto", "cavern"], Archetype::Cave),
    (&["ruin", "crypt", "tomb"], Archetype::Ruin),
    (&["fort", "keep", "citadel"], Archetype::Fortress),
    (&["tower", "spire"], Archetype::Tower),
    (&["temple", "cathedral", "shrine"], Archetype::Temple),
    (&["lair", "den", "nest"], Archetype::Lair),
];

/// Maps a free-text theme to an archetype and its tuning profile.
///
/// Pure function: no randomness, no error conditions. A missing or
/// unmatched theme always resolves to the generic dungeon profile.
///
/// # Examples
///
/// ```
/// use delve::{resolve_profile, Archetype};
///
/// let (archetype, profile) = resolve_profile(Some("the sunken grotto"));
/// assert_eq!(archetype, Archetype::Cave);
/// assert!(profile.min_room_size <= profile.max_room_size);
///
/// let (archetype, _) = resolve_profile(None);
/// assert_eq!(archetype, Archetype::Dungeon);
/// ```
pub fn resolve_profile(theme: Option<&str>) -> (Archetype, LayoutProfile) {
    let archetype = theme
        .map(|t| {
            let lower = t.to_lowercase();
            KEYWORDS
                .iter()
                .find(|(words, _)| words.iter().any(|w| lower.contains(w)))
                .map(|(_, archetype)| *archetype)
                .unwrap_or(Archetype::Dungeon)
        })
        .unwrap_or(Archetype::Dungeon);

    (archetype, profile_for(archetype))
}

/// Returns the tuning profile for an archetype.
pub fn profile_for(archetype: Archetype) -> LayoutProfile {
    match archetype {
        Archetype::Cave => LayoutProfile {
            min_room_size: 4,
            max_room_size: 12,
            padding: 1,
            room_density: 0.8,
            split_ratio: 0.5,
            min_split_size: 10,
            extra_connection_ratio: 0.25,
            secret_door_ratio: 0.05,
            feature_bias: FeatureBias::Natural,
            corridor_style: CorridorStyle::Organic,
            tile_span: 1,
        },
        Archetype::Ruin => LayoutProfile {
            min_room_size: 4,
            max_room_size: 10,
            padding: 1,
            room_density: 0.7,
            split_ratio: 0.5,
            min_split_size: 9,
            extra_connection_ratio: 0.2,
            secret_door_ratio: 0.1,
            feature_bias: FeatureBias::Ancient,
            corridor_style: CorridorStyle::Straight,
            tile_span: 1,
        },
        Archetype::Fortress => LayoutProfile {
            min_room_size: 5,
            max_room_size: 12,
            padding: 1,
            room_density: 0.85,
            split_ratio: 0.55,
            min_split_size: 11,
            extra_connection_ratio: 0.15,
            secret_door_ratio: 0.05,
            feature_bias: FeatureBias::Martial,
            corridor_style: CorridorStyle::Straight,
            tile_span: 5,
        },
        Archetype::Tower => LayoutProfile {
            min_room_size: 4,
            max_room_size: 8,
            padding: 1,
            room_density: 0.9,
            split_ratio: 0.45,
            min_split_size: 8,
            extra_connection_ratio: 0.1,
            secret_door_ratio: 0.05,
            feature_bias: FeatureBias::Arcane,
            corridor_style: CorridorStyle::Straight,
            tile_span: 1,
        },
        Archetype::Temple => LayoutProfile {
            min_room_size: 5,
            max_room_size: 12,
            padding: 1,
            room_density: 0.75,
            split_ratio: 0.5,
            min_split_size: 10,
            extra_connection_ratio: 0.15,
            secret_door_ratio: 0.1,
            feature_bias: FeatureBias::Religious,
            corridor_style: CorridorStyle::Straight,
            tile_span: 5,
        },
        Archetype::Lair => LayoutProfile {
            min_room_size: 4,
            max_room_size: 14,
            padding: 1,
            room_density: 0.7,
            split_ratio: 0.5,
            min_split_size: 11,
            extra_connection_ratio: 0.3,
            secret_door_ratio: 0.05,
            feature_bias: FeatureBias::Predatory,
            corridor_style: CorridorStyle::Organic,
            tile_span: 1,
        },
        Archetype::Dungeon => LayoutProfile {
            min_room_size: 4,
            max_room_size: 10,
            padding: 1,
            room_density: 0.8,
            split_ratio: 0.5,
            min_split_size: 9,
            extra_connection_ratio: 0.2,
            secret_door_ratio: 0.08,
            feature_bias: FeatureBias::Generic,
            corridor_style: CorridorStyle::Straight,
            tile_span: 1,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_resolution() {
        assert_eq!(resolve_profile(Some("deep cave")).0, Archetype::Cave);
        assert_eq!(resolve_profile(Some("Sunken Grotto")).0, Archetype::Cave);
        assert_eq!(resolve_profile(Some("haunted crypt")).0, Archetype::Ruin);
        assert_eq!(
            resolve_profile(Some("the iron citadel")).0,
            Archetype::Fortress
        );
        assert_eq!(resolve_profile(Some("wizard's spire")).0, Archetype::Tower);
        assert_eq!(
            resolve_profile(Some("cathedral of bone")).0,
            Archetype::Temple
        );
        assert_eq!(resolve_profile(Some("dragon den")).0, Archetype::Lair);
    }

    #[test]
    fn test_fallback_to_generic() {
        assert_eq!(resolve_profile(None).0, Archetype::Dungeon);
        assert_eq!(resolve_profile(Some("")).0, Archetype::Dungeon);
        assert_eq!(
            resolve_profile(Some("abandoned warehouse")).0,
            Archetype::Dungeon
        );
    }

    #[test]
    fn test_precedence_order() {
        // Earlier keyword groups win over later ones.
        assert_eq!(resolve_profile(Some("cave lair")).0, Archetype::Cave);
        assert_eq!(resolve_profile(Some("ruined keep")).0, Archetype::Ruin);
    }

    #[test]
    fn test_profiles_are_consistent() {
        for archetype in [
            Archetype::Cave,
            Archetype::Ruin,
            Archetype::Fortress,
            Archetype::Tower,
            Archetype::Temple,
            Archetype::Lair,
            Archetype::Dungeon,
        ] {
            let p = profile_for(archetype);
            assert!(p.min_room_size <= p.max_room_size, "{archetype:?}");
            assert!((0.4..=0.6).contains(&p.split_ratio), "{archetype:?}");
            assert!((0.0..=1.0).contains(&p.room_density), "{archetype:?}");
            assert!(p.tile_span >= 1, "{archetype:?}");
        }
    }
}

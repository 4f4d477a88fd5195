//! # Feature Generation
//!
//! Stochastic room decoration weighted by archetype and difficulty.
//!
//! Every room except the entry and exit gets one uniform draw against its
//! archetype's weight table; the draw can land on nothing, so plenty of
//! rooms stay bare. Large rooms roll an independent chance of a secondary
//! chest.

use crate::generation::{Difficulty, FeatureBias, Room, RoomKind};
use rand::{rngs::StdRng, Rng};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Decoration category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    Trap,
    Treasure,
    Encounter,
    Altar,
    Chest,
    Decoration,
}

/// A decorative feature appended to a room. Never removed once placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomFeature {
    pub kind: FeatureKind,
    /// Free-text flavor line for the narrative collaborator
    pub description: String,
    /// Open metadata bag for downstream enrichment
    pub metadata: HashMap<String, String>,
}

impl RoomFeature {
    fn new(kind: FeatureKind, description: &str) -> Self {
        Self {
            kind,
            description: description.to_string(),
            metadata: HashMap::new(),
        }
    }
}

/// Decorates chambers according to the archetype's feature bias.
#[derive(Debug, Clone)]
pub struct FeatureGenerator {
    bias: FeatureBias,
    difficulty: Difficulty,
}

impl FeatureGenerator {
    /// Creates a generator for one archetype bias and difficulty rating.
    pub fn new(bias: FeatureBias, difficulty: Difficulty) -> Self {
        Self { bias, difficulty }
    }

    /// Appends features to every decoratable room.
    ///
    /// Entry and exit rooms are never decorated.
    pub fn decorate(&self, rooms: &mut [Room], rng: &mut StdRng) {
        let table = self.weight_table();

        for room in rooms.iter_mut() {
            if matches!(room.kind, RoomKind::Entry | RoomKind::Exit) {
                continue;
            }

            if let Some(feature) = draw(&table, rng) {
                room.features.push(feature);
            }

            // Spacious rooms may also hold a chest.
            if room.area() > crate::config::LARGE_ROOM_AREA && rng.gen_bool(0.3) {
                room.features.push(RoomFeature::new(
                    FeatureKind::Chest,
                    "A heavy chest sits against the wall",
                ));
            }
        }
    }

    /// Weighted primary-feature table for this bias, with the trap weight
    /// scaled by difficulty. Weights sum below 1.0 so the single uniform
    /// draw can select nothing.
    fn weight_table(&self) -> Vec<(f64, RoomFeature)> {
        let trap = |w: f64| w * self.difficulty.trap_multiplier();

        match self.bias {
            FeatureBias::Natural => vec![
                (trap(0.10), RoomFeature::new(FeatureKind::Trap, "A crevasse hidden under loose gravel")),
                (0.10, RoomFeature::new(FeatureKind::Treasure, "Raw ore glitters in the wall seams")),
                (0.25, RoomFeature::new(FeatureKind::Encounter, "Something nests among the stalagmites")),
                (0.02, RoomFeature::new(FeatureKind::Altar, "A crude cairn of stacked stones")),
                (0.20, RoomFeature::new(FeatureKind::Decoration, "Phosphorescent moss coats the ceiling")),
            ],
            FeatureBias::Ancient => vec![
                (trap(0.20), RoomFeature::new(FeatureKind::Trap, "A collapsed floor section, barely bridged")),
                (0.15, RoomFeature::new(FeatureKind::Treasure, "Grave goods scattered among the rubble")),
                (0.15, RoomFeature::new(FeatureKind::Encounter, "Old bones that do not rest quietly")),
                (0.08, RoomFeature::new(FeatureKind::Altar, "A defaced shrine to a forgotten god")),
                (0.12, RoomFeature::new(FeatureKind::Decoration, "Faded frescoes of a fallen dynasty")),
            ],
            FeatureBias::Martial => vec![
                (trap(0.15), RoomFeature::new(FeatureKind::Trap, "A murder hole covers the doorway")),
                (0.12, RoomFeature::new(FeatureKind::Treasure, "An armory rack, partly looted")),
                (0.25, RoomFeature::new(FeatureKind::Encounter, "A guard post, still manned")),
                (0.02, RoomFeature::new(FeatureKind::Altar, "A regimental standard on the wall")),
                (0.12, RoomFeature::new(FeatureKind::Decoration, "Arrow-scarred training dummies")),
            ],
            FeatureBias::Arcane => vec![
                (trap(0.18), RoomFeature::new(FeatureKind::Trap, "A glyph flickers across the threshold")),
                (0.15, RoomFeature::new(FeatureKind::Treasure, "Reagent jars line a dusty shelf")),
                (0.15, RoomFeature::new(FeatureKind::Encounter, "A bound servitor stirs at your step")),
                (0.08, RoomFeature::new(FeatureKind::Altar, "A summoning circle, recently chalked")),
                (0.15, RoomFeature::new(FeatureKind::Decoration, "Charts of constellations long shifted")),
            ],
            FeatureBias::Religious => vec![
                (trap(0.10), RoomFeature::new(FeatureKind::Trap, "Consecrated flagstones punish the unwary")),
                (0.12, RoomFeature::new(FeatureKind::Treasure, "Votive offerings heaped in a niche")),
                (0.15, RoomFeature::new(FeatureKind::Encounter, "A vigil that has outlasted its keepers")),
                (0.25, RoomFeature::new(FeatureKind::Altar, "An altar dominates the chamber")),
                (0.10, RoomFeature::new(FeatureKind::Decoration, "Censers still sweet with old incense")),
            ],
            FeatureBias::Predatory => vec![
                (trap(0.12), RoomFeature::new(FeatureKind::Trap, "A baited snare of sinew and bone")),
                (0.15, RoomFeature::new(FeatureKind::Treasure, "A victim's belongings, picked clean")),
                (0.30, RoomFeature::new(FeatureKind::Encounter, "The resident is at home")),
                (0.02, RoomFeature::new(FeatureKind::Altar, "A trophy heap of skulls")),
                (0.15, RoomFeature::new(FeatureKind::Decoration, "Claw gouges rake the walls")),
            ],
            FeatureBias::Generic => vec![
                (trap(0.15), RoomFeature::new(FeatureKind::Trap, "A pressure plate sits proud of the floor")),
                (0.15, RoomFeature::new(FeatureKind::Treasure, "A strongbox shoved into a corner")),
                (0.20, RoomFeature::new(FeatureKind::Encounter, "Fresh tracks cross the dust")),
                (0.05, RoomFeature::new(FeatureKind::Altar, "A niche shrine of uncertain devotion")),
                (0.15, RoomFeature::new(FeatureKind::Decoration, "A toppled statue blocks one corner")),
            ],
        }
    }
}

/// One uniform draw against a cumulative weight table; rolls past the
/// total select nothing.
fn draw(table: &[(f64, RoomFeature)], rng: &mut StdRng) -> Option<RoomFeature> {
    let roll = rng.gen::<f64>();
    let mut cumulative = 0.0;

    for (weight, feature) in table {
        cumulative += weight;
        if roll < cumulative {
            return Some(feature.clone());
        }
    }

    None
}

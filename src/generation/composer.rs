//! # Dungeon Composition
//!
//! Runs the full pipeline per level and assembles the final record.
//!
//! Each level is generated independently from scratch: partition, place
//! rooms, connect, attach doors, decorate. The composer marks the first
//! room of each level as the entry and the last as the exit, then wraps
//! the levels in a [`DungeonDetail`] with identity fields and empty
//! history/world-integration stubs for the persistence layer to populate.

use crate::generation::{
    resolve_profile, Archetype, Corridor, CorridorBuilder, Difficulty, Door, DoorPlacer,
    FeatureGenerator, GenerationParams, ResolvedParams, Room, RoomKind, RoomPlacer,
    SpacePartitioner,
};
use crate::geometry::GridPoint;
use crate::{DelveError, DelveResult};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reference to one room on one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRef {
    pub level_index: u32,
    pub room_id: u32,
}

/// One generated dungeon level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DungeonLevel {
    pub level_index: u32,
    pub grid_width: u32,
    pub grid_height: u32,
    /// Real-world size of one cell, in feet
    pub cell_size: u32,
    pub rooms: Vec<Room>,
    pub corridors: Vec<Corridor>,
    /// All door records for the level, referenced by id from rooms and
    /// corridors
    pub doors: Vec<Door>,
    /// Stair cells; empty at generation time, placed by the caller
    pub stairs: Vec<GridPoint>,
    /// Tiling mode tag, carried through from the parameters verbatim
    pub tile_type: String,
    /// Optional texture-set tag for the rendering collaborator
    pub texture_set: Option<String>,
}

/// Narrative history stub, filled in by the enrichment collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DungeonHistory {
    pub founding: Option<String>,
    pub current_state: Option<String>,
    pub notable_events: Vec<String>,
}

/// World-placement stub, filled in by the persistence layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldIntegration {
    pub region: Option<String>,
    pub nearest_settlement: Option<String>,
    pub hooks: Vec<String>,
}

/// The complete generated dungeon: the sole artifact returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DungeonDetail {
    pub id: Uuid,
    pub name: String,
    pub archetype: Archetype,
    pub theme: String,
    pub difficulty: Difficulty,
    pub recommended_level: u32,
    pub levels: Vec<DungeonLevel>,
    /// Entry room on the first level
    pub entry: RoomRef,
    /// Exit room of each level that has one
    pub exits: Vec<RoomRef>,
    pub history: DungeonHistory,
    pub world_integration: WorldIntegration,
}

/// Orchestrates the generation pipeline.
///
/// The composer is stateless; every call builds its working structures
/// fresh and shares nothing, so independent callers may generate
/// concurrently with their own rngs.
#[derive(Debug, Clone, Default)]
pub struct DungeonComposer;

impl DungeonComposer {
    /// Creates a composer.
    pub fn new() -> Self {
        Self
    }

    /// Generates a dungeon with a caller-provided rng.
    ///
    /// Fails with [`DelveError::ConstructionFailed`] when any level yields
    /// zero rooms (grid too small relative to the minimum room size). No
    /// partial result is returned and no retry happens internally; the
    /// caller must relax parameters and call again.
    pub fn generate(
        &self,
        params: &GenerationParams,
        rng: &mut StdRng,
    ) -> DelveResult<DungeonDetail> {
        let (archetype, profile) = resolve_profile(params.theme.as_deref());
        let resolved = ResolvedParams::new(params, &profile);

        log::debug!(
            "generating {} level(s) on a {}x{} grid as {:?}",
            resolved.num_levels,
            resolved.grid_width,
            resolved.grid_height,
            archetype
        );

        let mut levels = Vec::with_capacity(resolved.num_levels as usize);
        for index in 0..resolved.num_levels {
            levels.push(self.generate_level(index, &resolved, &profile, rng)?);
        }

        let entry = RoomRef {
            level_index: 0,
            room_id: entry_room_id(&levels[0]),
        };
        let exits = levels
            .iter()
            .filter_map(|level| {
                level
                    .rooms
                    .iter()
                    .find(|room| room.kind == RoomKind::Exit)
                    .map(|room| RoomRef {
                        level_index: level.level_index,
                        room_id: room.id,
                    })
            })
            .collect();

        let theme = params
            .theme
            .clone()
            .unwrap_or_else(|| archetype.noun().to_string());
        let name = format!("{} {}", theme, rng.gen_range(100..1000));
        let difficulty = resolved.difficulty;

        Ok(DungeonDetail {
            id: Uuid::new_v4(),
            name,
            archetype,
            theme,
            difficulty,
            recommended_level: difficulty.recommended_level(),
            levels,
            entry,
            exits,
            history: DungeonHistory::default(),
            world_integration: WorldIntegration::default(),
        })
    }

    /// Convenience wrapper seeding a [`StdRng`] from a `u64`. A fixed seed
    /// yields a bit-identical layout apart from the dungeon's freshly
    /// minted uuid.
    pub fn generate_with_seed(
        &self,
        params: &GenerationParams,
        seed: u64,
    ) -> DelveResult<DungeonDetail> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.generate(params, &mut rng)
    }

    /// Runs the stage pipeline for one level.
    fn generate_level(
        &self,
        index: u32,
        resolved: &ResolvedParams,
        profile: &crate::generation::LayoutProfile,
        rng: &mut StdRng,
    ) -> DelveResult<DungeonLevel> {
        let tree = SpacePartitioner::new(resolved).partition(
            resolved.grid_width,
            resolved.grid_height,
            rng,
        );
        let leaves = tree.leaves();

        let mut rooms = RoomPlacer::new(resolved).place(&leaves, rng);
        if rooms.is_empty() {
            return Err(DelveError::ConstructionFailed(format!(
                "level {index}: no room fits a {}x{} grid with minimum room size {}",
                resolved.grid_width, resolved.grid_height, resolved.min_room_size
            )));
        }

        rooms[0].kind = RoomKind::Entry;
        if rooms.len() > 1 {
            if let Some(last) = rooms.last_mut() {
                last.kind = RoomKind::Exit;
            }
        }

        let builder = CorridorBuilder::new(resolved, profile.corridor_style);
        let (mut corridors, connections) = builder.build(&mut rooms, rng);

        let doors = DoorPlacer::new(resolved).place(&mut rooms, &mut corridors, rng);

        FeatureGenerator::new(profile.feature_bias, resolved.difficulty)
            .decorate(&mut rooms, rng);

        log::debug!(
            "level {index}: {} leaves, {} rooms, {} corridors ({} connections), {} doors",
            leaves.len(),
            rooms.len(),
            corridors.len(),
            connections.len(),
            doors.len()
        );

        Ok(DungeonLevel {
            level_index: index,
            grid_width: resolved.grid_width,
            grid_height: resolved.grid_height,
            cell_size: crate::config::CELL_SIZE_FEET,
            rooms,
            corridors,
            doors,
            stairs: Vec::new(),
            tile_type: resolved.tile_type.clone(),
            texture_set: None,
        })
    }
}

fn entry_room_id(level: &DungeonLevel) -> u32 {
    level
        .rooms
        .iter()
        .find(|room| room.kind == RoomKind::Entry)
        .map(|room| room.id)
        .unwrap_or(0)
}

//! # Door Placement
//!
//! Attaches doors where corridors meet room boundaries.
//!
//! Each corridor endpoint is matched against nearby room centers; the door
//! sits at the exact cell where the corridor path crosses the room's
//! rectangle ring, falling back to the nearest boundary cell when the path
//! never lands on it. Material, state, and difficulty values are rolled
//! per door.

use crate::generation::{Corridor, ResolvedParams, Room};
use crate::geometry::GridPoint;
use rand::{rngs::StdRng, Rng};
use serde::{Deserialize, Serialize};

/// Rooms whose center lies within this many cells of a corridor endpoint
/// are considered touched by that corridor.
const JUNCTION_RADIUS: u32 = 3;

/// Door construction material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoorMaterial {
    Wood,
    Iron,
    Stone,
    Secret,
    Magical,
    Barred,
}

/// Door state at generation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoorState {
    Open,
    Closed,
    Locked,
    Stuck,
    Broken,
}

/// A placed door. Immutable once emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Door {
    /// Level-unique identifier
    pub id: u32,
    /// Cell the door occupies
    pub position: GridPoint,
    pub material: DoorMaterial,
    pub state: DoorState,
    /// Difficulty class to pick the lock, when present
    pub lock_difficulty: Option<u32>,
    /// Difficulty class to force the door, when present
    pub force_difficulty: Option<u32>,
}

/// Places doors at room/corridor junctions.
#[derive(Debug, Clone)]
pub struct DoorPlacer {
    secret_door_ratio: f64,
}

impl DoorPlacer {
    /// Creates a placer from resolved generation parameters.
    pub fn new(params: &ResolvedParams) -> Self {
        Self {
            secret_door_ratio: params.secret_door_ratio,
        }
    }

    /// Attaches doors to rooms and corridors, returning the door records.
    ///
    /// At most one door is emitted per (corridor endpoint, touching room)
    /// pair, so a corridor never carries more than two doors per room it
    /// touches.
    pub fn place(
        &self,
        rooms: &mut [Room],
        corridors: &mut [Corridor],
        rng: &mut StdRng,
    ) -> Vec<Door> {
        let mut doors = Vec::new();

        for corridor in corridors.iter_mut() {
            let endpoints = match (corridor.path.first(), corridor.path.last()) {
                (Some(&first), Some(&last)) => [first, last],
                _ => continue,
            };

            for endpoint in endpoints {
                for room in rooms.iter_mut() {
                    if room.center().manhattan_distance(endpoint) > JUNCTION_RADIUS {
                        continue;
                    }

                    let position = junction_point(room, &corridor.path, endpoint);
                    let door = self.roll_door(doors.len() as u32, position, rng);

                    room.doors.push(door.id);
                    if corridor.path.contains(&position) {
                        corridor.doors.push(door.id);
                    }
                    doors.push(door);
                }
            }
        }

        // A room reachable only through secret doors is itself secret.
        for room in rooms.iter_mut() {
            if !room.doors.is_empty()
                && room.doors.iter().all(|id| {
                    doors[*id as usize].material == DoorMaterial::Secret
                })
            {
                room.secret = true;
            }
        }

        doors
    }

    /// Rolls material, state, and difficulty values for one door.
    fn roll_door(&self, id: u32, position: GridPoint, rng: &mut StdRng) -> Door {
        let material = if self.secret_door_ratio > 0.0 && rng.gen_bool(self.secret_door_ratio) {
            DoorMaterial::Secret
        } else {
            match rng.gen_range(0..3) {
                0 => DoorMaterial::Wood,
                1 => DoorMaterial::Iron,
                _ => DoorMaterial::Stone,
            }
        };

        // Closed 50%, locked 20%, open 20%, stuck 10%.
        let state = match rng.gen::<f64>() {
            r if r < 0.5 => DoorState::Closed,
            r if r < 0.7 => DoorState::Locked,
            r if r < 0.9 => DoorState::Open,
            _ => DoorState::Stuck,
        };

        let lock_difficulty = if rng.gen_bool(0.3) {
            Some(rng.gen_range(10..=20))
        } else {
            None
        };
        let force_difficulty = if rng.gen_bool(0.2) {
            Some(rng.gen_range(15..=25))
        } else {
            None
        };

        Door {
            id,
            position,
            material,
            state,
            lock_difficulty,
            force_difficulty,
        }
    }
}

/// The cell where a corridor path touches a room's boundary ring, or the
/// nearest boundary cell to the endpoint when the path skirts past it.
fn junction_point(room: &Room, path: &[GridPoint], endpoint: GridPoint) -> GridPoint {
    path.iter()
        .copied()
        .find(|p| room.rect.on_boundary(*p))
        .unwrap_or_else(|| room.rect.nearest_boundary_point(endpoint))
}

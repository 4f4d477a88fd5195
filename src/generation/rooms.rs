//! # Room Placement
//!
//! Converts partition leaves into concrete room rectangles.
//!
//! Each leaf gets a density roll, random interior padding, size clamping,
//! optional tile quantization, and a randomized offset inside the leaf.
//! Leaves whose computed room cannot fit are skipped outright; producing
//! fewer rooms than leaves is expected, and downstream consumers size
//! their content around the resulting count.

use crate::generation::{RoomFeature, ResolvedParams};
use crate::geometry::{GridPoint, Rect};
use rand::{rngs::StdRng, Rng};
use serde::{Deserialize, Serialize};

/// Role a room plays in the level layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomKind {
    /// Ordinary chamber
    Chamber,
    /// Level entry point
    Entry,
    /// Level exit point
    Exit,
    /// Reserved for caller-side special treatment
    Special,
}

/// A placed room.
///
/// Created by the [`RoomPlacer`]; the corridor builder appends connection
/// ids, the door placer appends door ids, and the feature generator
/// appends features. Immutable after the pipeline completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Level-unique identifier
    pub id: u32,
    /// Room rectangle in grid cells
    pub rect: Rect,
    /// Role in the layout
    pub kind: RoomKind,
    /// Ids of doors on this room's boundary
    pub doors: Vec<u32>,
    /// Decorative features
    pub features: Vec<RoomFeature>,
    /// Ids of rooms reachable by a direct corridor
    pub connections: Vec<u32>,
    /// Optional texture tag for the rendering collaborator
    pub texture: Option<String>,
    /// Whether the room is hidden from casual exploration
    pub secret: bool,
}

impl Room {
    /// Creates a plain chamber at the given rectangle.
    pub fn new(id: u32, rect: Rect) -> Self {
        Self {
            id,
            rect,
            kind: RoomKind::Chamber,
            doors: Vec::new(),
            features: Vec::new(),
            connections: Vec::new(),
            texture: None,
            secret: false,
        }
    }

    /// Gets the center cell of the room.
    pub fn center(&self) -> GridPoint {
        self.rect.center()
    }

    /// Gets the room area in cells.
    pub fn area(&self) -> u32 {
        self.rect.area()
    }

    /// Records a direct corridor connection to another room.
    pub fn add_connection(&mut self, room_id: u32) {
        if !self.connections.contains(&room_id) {
            self.connections.push(room_id);
        }
    }
}

/// Places rooms inside partition leaves.
#[derive(Debug, Clone)]
pub struct RoomPlacer {
    min_room_size: u32,
    max_room_size: u32,
    padding: u32,
    room_density: f64,
    tile_span: u32,
}

impl RoomPlacer {
    /// Creates a placer from resolved generation parameters.
    pub fn new(params: &ResolvedParams) -> Self {
        Self {
            min_room_size: params.min_room_size,
            max_room_size: params.max_room_size,
            padding: params.padding,
            room_density: params.room_density,
            tile_span: params.tile_span,
        }
    }

    /// Converts leaves into rooms with sequential ids starting at 0.
    ///
    /// Every emitted room lies fully inside its source leaf; since leaves
    /// are disjoint by construction, no two emitted rooms can overlap.
    pub fn place(&self, leaves: &[Rect], rng: &mut StdRng) -> Vec<Room> {
        let mut rooms = Vec::new();

        for leaf in leaves {
            if !rng.gen_bool(self.room_density) {
                continue;
            }
            if let Some(rect) = self.fit_room(*leaf, rng) {
                rooms.push(Room::new(rooms.len() as u32, rect));
            }
        }

        rooms
    }

    /// Computes a room rectangle for one leaf, or `None` when the padded,
    /// clamped, quantized room cannot fit the leaf.
    fn fit_room(&self, leaf: Rect, rng: &mut StdRng) -> Option<Rect> {
        let padding = rng.gen_range(self.padding..=self.padding.saturating_add(2));

        let mut width = leaf
            .width
            .saturating_sub(padding.saturating_mul(2))
            .clamp(self.min_room_size, self.max_room_size);
        let mut height = leaf
            .height
            .saturating_sub(padding.saturating_mul(2))
            .clamp(self.min_room_size, self.max_room_size);

        if self.tile_span > 1 {
            width = self.quantize(width);
            height = self.quantize(height);
        }

        if width > leaf.width || height > leaf.height {
            return None;
        }

        let x = leaf.x + self.snapped_offset(leaf.width - width, rng);
        let y = leaf.y + self.snapped_offset(leaf.height - height, rng);

        Some(Rect::new(x, y, width, height))
    }

    /// Rounds a dimension down to the nearest tile-span multiple not below
    /// the minimum room size, rounding up instead when rounding down would
    /// land below it.
    fn quantize(&self, dim: u32) -> u32 {
        let down = (dim / self.tile_span) * self.tile_span;
        if down >= self.min_room_size {
            down
        } else {
            down.saturating_add(self.tile_span)
        }
    }

    /// Random offset inside the slack, snapped to the tile span.
    fn snapped_offset(&self, slack: u32, rng: &mut StdRng) -> i32 {
        let offset = if slack == 0 {
            0
        } else {
            rng.gen_range(0..=slack)
        };
        if self.tile_span > 1 {
            ((offset / self.tile_span) * self.tile_span) as i32
        } else {
            offset as i32
        }
    }
}

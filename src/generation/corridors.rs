//! # Corridor Building
//!
//! Room connectivity via minimum spanning tree plus loop edges.
//!
//! All pairwise room-center distances feed Kruskal's algorithm over a
//! union-find structure, guaranteeing every room is reachable with exactly
//! `rooms - 1` edges. A configurable fraction of the shortest remaining
//! edges is then accepted to create cycles and alternate routes. Each
//! accepted edge is materialized as an L-shaped cell path, optionally
//! jittered for organic archetypes.

use crate::generation::{CorridorStyle, ResolvedParams, Room};
use crate::geometry::GridPoint;
use rand::{rngs::StdRng, Rng};
use serde::{Deserialize, Serialize};

/// A corridor edge between two rooms, weighted by Manhattan distance
/// between their centers. Transient: consumed by the spanning-tree pass
/// and by tests, never persisted in the dungeon record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomConnection {
    pub a: u32,
    pub b: u32,
    pub distance: u32,
}

/// A materialized corridor path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Corridor {
    /// Level-unique identifier
    pub id: u32,
    /// Ordered cell path from one room center to the other
    pub path: Vec<GridPoint>,
    /// Corridor width in cells (always 1)
    pub width: u32,
    /// Ids of doors lying on this path
    pub doors: Vec<u32>,
}

/// Disjoint-set forest with path compression, used to reject
/// cycle-forming edges while assembling the spanning tree.
#[derive(Debug)]
struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Merges the sets holding `a` and `b`; returns false when they were
    /// already joined.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        self.parent[rb] = ra;
        true
    }
}

/// Builds the corridor set for one level.
#[derive(Debug, Clone)]
pub struct CorridorBuilder {
    extra_connections_ratio: f64,
    style: CorridorStyle,
}

impl CorridorBuilder {
    /// Creates a builder from resolved parameters and the profile's
    /// corridor style.
    pub fn new(params: &ResolvedParams, style: CorridorStyle) -> Self {
        Self {
            extra_connections_ratio: params.extra_connections_ratio,
            style,
        }
    }

    /// Connects all rooms, mutating their connection lists, and returns
    /// the corridors plus the accepted edge set.
    ///
    /// Zero or one room produces no corridors and no connections; this is
    /// not an error. Room ids must equal their slice index, as the placer
    /// assigns them.
    pub fn build(&self, rooms: &mut [Room], rng: &mut StdRng) -> (Vec<Corridor>, Vec<RoomConnection>) {
        if rooms.len() < 2 {
            return (Vec::new(), Vec::new());
        }

        let mut edges = all_pair_edges(rooms);
        edges.sort_by_key(|e| (e.distance, e.a, e.b));

        // Kruskal: shortest edges first, skipping any that would close a
        // cycle, until every room shares one set.
        let mut sets = DisjointSet::new(rooms.len());
        let mut accepted = Vec::with_capacity(rooms.len() - 1);
        let mut leftover = Vec::new();

        for edge in edges {
            if sets.union(edge.a as usize, edge.b as usize) {
                accepted.push(edge);
            } else {
                leftover.push(edge);
            }
        }

        // Loop edges: the shortest non-tree pairs, proportional to the
        // spanning-tree size.
        let extra_count = (accepted.len() as f64 * self.extra_connections_ratio) as usize;
        accepted.extend(leftover.into_iter().take(extra_count));

        let mut corridors = Vec::with_capacity(accepted.len());
        for edge in &accepted {
            let from = rooms[edge.a as usize].center();
            let to = rooms[edge.b as usize].center();
            let path = self.carve_path(from, to, rng);

            corridors.push(Corridor {
                id: corridors.len() as u32,
                path,
                width: crate::config::CORRIDOR_WIDTH,
                doors: Vec::new(),
            });

            rooms[edge.a as usize].add_connection(edge.b);
            rooms[edge.b as usize].add_connection(edge.a);
        }

        (corridors, accepted)
    }

    /// Synthesizes the cell path for one edge: a random-elbow L between
    /// the centers, with jittered midpoints when the style is organic.
    fn carve_path(&self, from: GridPoint, to: GridPoint, rng: &mut StdRng) -> Vec<GridPoint> {
        let horizontal_first = rng.gen_bool(0.5);
        let elbow = if horizontal_first {
            GridPoint::new(to.x, from.y)
        } else {
            GridPoint::new(from.x, to.y)
        };

        let mut waypoints = vec![from, elbow, to];
        if self.style == CorridorStyle::Organic {
            waypoints = jitter_waypoints(&waypoints, rng);
        }

        rasterize(&waypoints)
    }
}

/// Computes the complete edge set over room centers.
fn all_pair_edges(rooms: &[Room]) -> Vec<RoomConnection> {
    let mut edges = Vec::with_capacity(rooms.len() * (rooms.len() - 1) / 2);
    for i in 0..rooms.len() {
        for j in (i + 1)..rooms.len() {
            edges.push(RoomConnection {
                a: rooms[i].id,
                b: rooms[j].id,
                distance: rooms[i].center().manhattan_distance(rooms[j].center()),
            });
        }
    }
    edges
}

/// Inserts a midpoint jittered by up to one cell between each pair of
/// waypoints, giving the path a winding appearance.
fn jitter_waypoints(waypoints: &[GridPoint], rng: &mut StdRng) -> Vec<GridPoint> {
    let mut out = Vec::with_capacity(waypoints.len() * 2 - 1);
    for pair in waypoints.windows(2) {
        out.push(pair[0]);
        out.push(GridPoint::new(
            (pair[0].x + pair[1].x) / 2 + rng.gen_range(-1..=1),
            (pair[0].y + pair[1].y) / 2 + rng.gen_range(-1..=1),
        ));
    }
    out.push(waypoints[waypoints.len() - 1]);
    out
}

/// Expands waypoints into a contiguous cell path, walking each leg
/// horizontally then vertically.
fn rasterize(waypoints: &[GridPoint]) -> Vec<GridPoint> {
    let mut path = vec![waypoints[0]];

    for pair in waypoints.windows(2) {
        let (mut x, mut y) = (pair[0].x, pair[0].y);
        while x != pair[1].x {
            x += (pair[1].x - x).signum();
            path.push(GridPoint::new(x, y));
        }
        while y != pair[1].y {
            y += (pair[1].y - y).signum();
            path.push(GridPoint::new(x, y));
        }
    }

    path.dedup();
    path
}

//! # Space Partitioning
//!
//! Binary space partitioning of the dungeon grid.
//!
//! The grid is recursively halved along its longer axis into a tree of
//! disjoint sub-rectangles. Nodes live in a flat arena (`Vec` indexed by
//! integer handles) rather than behind owning pointers, and splitting runs
//! off an explicit worklist, so arbitrarily large grids never touch the
//! call stack. Only childless nodes (leaves) are consumed downstream.

use crate::generation::ResolvedParams;
use crate::geometry::Rect;
use rand::{rngs::StdRng, Rng};

/// One node of the partition tree: a rectangle plus optional child
/// handles into the owning arena.
///
/// Invariant: a split node's children tile its rectangle exactly and never
/// overlap.
#[derive(Debug, Clone)]
pub struct SpaceNode {
    pub rect: Rect,
    pub left: Option<usize>,
    pub right: Option<usize>,
}

impl SpaceNode {
    fn new(rect: Rect) -> Self {
        Self {
            rect,
            left: None,
            right: None,
        }
    }

    /// Checks whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Arena-backed binary partition tree. The root is always node 0.
#[derive(Debug, Clone)]
pub struct BspTree {
    nodes: Vec<SpaceNode>,
}

impl BspTree {
    /// Gets a node by arena handle.
    pub fn node(&self, index: usize) -> &SpaceNode {
        &self.nodes[index]
    }

    /// Total node count, split nodes included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the tree is a single unsplit leaf.
    pub fn is_single_leaf(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Collects the rectangles of all childless nodes, in depth-first
    /// order from the root.
    pub fn leaves(&self) -> Vec<Rect> {
        let mut leaves = Vec::new();
        let mut stack = vec![0usize];

        while let Some(index) = stack.pop() {
            let node = &self.nodes[index];
            if node.is_leaf() {
                leaves.push(node.rect);
            } else {
                // Right first so the left child pops first.
                if let Some(right) = node.right {
                    stack.push(right);
                }
                if let Some(left) = node.left {
                    stack.push(left);
                }
            }
        }

        leaves
    }
}

/// Recursive grid splitter.
///
/// Splitting stops once a region is already room-sized (both dimensions at
/// most 1.5x the maximum room size and at least the minimum) or its longer
/// axis can no longer yield two children of the minimum splittable size.
#[derive(Debug, Clone)]
pub struct SpacePartitioner {
    split_ratio: f64,
    min_split_size: u32,
    min_room_size: u32,
    max_room_size: u32,
}

impl SpacePartitioner {
    /// Creates a partitioner from resolved generation parameters.
    pub fn new(params: &ResolvedParams) -> Self {
        Self {
            split_ratio: params.split_ratio,
            min_split_size: params.min_split_size,
            min_room_size: params.min_room_size,
            max_room_size: params.max_room_size,
        }
    }

    /// Builds the full partition tree for a grid.
    ///
    /// A grid smaller than the minimum splittable size yields a
    /// single-leaf tree.
    pub fn partition(&self, width: u32, height: u32, rng: &mut StdRng) -> BspTree {
        let mut nodes = vec![SpaceNode::new(Rect::new(0, 0, width, height))];
        let mut worklist = vec![0usize];

        while let Some(index) = worklist.pop() {
            let rect = nodes[index].rect;
            if self.is_room_sized(rect) || !self.can_split(rect) {
                continue;
            }

            let (a, b) = self.split_rect(rect, rng);

            let left = nodes.len();
            nodes.push(SpaceNode::new(a));
            let right = nodes.len();
            nodes.push(SpaceNode::new(b));

            nodes[index].left = Some(left);
            nodes[index].right = Some(right);
            worklist.push(left);
            worklist.push(right);
        }

        BspTree { nodes }
    }

    /// A region small enough to hold a room directly stops splitting.
    fn is_room_sized(&self, rect: Rect) -> bool {
        let cap = (self.max_room_size as f64 * 1.5) as u32;
        rect.width <= cap
            && rect.height <= cap
            && rect.width >= self.min_room_size
            && rect.height >= self.min_room_size
    }

    /// The longer axis must fit two children of the minimum splittable
    /// size. If the longer axis cannot, neither can the shorter.
    fn can_split(&self, rect: Rect) -> bool {
        rect.width.max(rect.height) >= self.min_split_size.saturating_mul(2)
    }

    /// Splits a rectangle across its longer axis at the profile ratio with
    /// up to 20% jitter, clamped so both children stay splittable-sized.
    fn split_rect(&self, rect: Rect, rng: &mut StdRng) -> (Rect, Rect) {
        let vertical_cut = rect.width >= rect.height;
        let axis_len = if vertical_cut { rect.width } else { rect.height };

        let jitter = rng.gen_range(-0.2..=0.2) * axis_len as f64;
        let raw = axis_len as f64 * self.split_ratio + jitter;
        let split = (raw as u32).clamp(self.min_split_size, axis_len - self.min_split_size);

        if vertical_cut {
            (
                Rect::new(rect.x, rect.y, split, rect.height),
                Rect::new(
                    rect.x + split as i32,
                    rect.y,
                    rect.width - split,
                    rect.height,
                ),
            )
        } else {
            (
                Rect::new(rect.x, rect.y, rect.width, split),
                Rect::new(
                    rect.x,
                    rect.y + split as i32,
                    rect.width,
                    rect.height - split,
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{profile::resolve_profile, GenerationParams};
    use rand::SeedableRng;

    fn partitioner_for(width: u32, height: u32) -> (SpacePartitioner, StdRng) {
        let params = GenerationParams::new(width, height);
        let (_, profile) = resolve_profile(None);
        let resolved = ResolvedParams::new(&params, &profile);
        (SpacePartitioner::new(&resolved), StdRng::seed_from_u64(7))
    }

    #[test]
    fn test_small_grid_is_single_leaf() {
        let (partitioner, mut rng) = partitioner_for(4, 4);
        let tree = partitioner.partition(4, 4, &mut rng);

        assert_eq!(tree.len(), 1);
        assert!(tree.is_single_leaf());
        assert_eq!(tree.leaves(), vec![Rect::new(0, 0, 4, 4)]);
    }

    #[test]
    fn test_children_tile_their_parent() {
        let (partitioner, mut rng) = partitioner_for(60, 50);
        let tree = partitioner.partition(60, 50, &mut rng);

        for i in 0..tree.len() {
            let node = tree.node(i);
            if let (Some(l), Some(r)) = (node.left, node.right) {
                let left = tree.node(l).rect;
                let right = tree.node(r).rect;
                assert_eq!(left.area() + right.area(), node.rect.area());
                assert!(!left.intersects(&right));
                assert!(left.contained_in(&node.rect));
                assert!(right.contained_in(&node.rect));
            }
        }
    }

    #[test]
    fn test_leaves_are_disjoint_and_cover_grid() {
        let (partitioner, mut rng) = partitioner_for(80, 60);
        let tree = partitioner.partition(80, 60, &mut rng);
        let leaves = tree.leaves();

        assert!(leaves.len() > 1);

        let total: u32 = leaves.iter().map(Rect::area).sum();
        assert_eq!(total, 80 * 60);

        for (i, a) in leaves.iter().enumerate() {
            for b in leaves.iter().skip(i + 1) {
                assert!(!a.intersects(b));
            }
        }
    }

    #[test]
    fn test_split_respects_minimum_size() {
        let (partitioner, mut rng) = partitioner_for(100, 100);
        let tree = partitioner.partition(100, 100, &mut rng);

        for rect in tree.leaves() {
            // Any split region kept both halves at the splittable minimum,
            // so no leaf gets thinner than that on its split axis.
            assert!(rect.width >= 1 && rect.height >= 1);
            assert!(rect.contained_in(&Rect::new(0, 0, 100, 100)));
        }
    }

    #[test]
    fn test_same_seed_same_tree() {
        let params = GenerationParams::new(70, 70);
        let (_, profile) = resolve_profile(Some("cavern"));
        let resolved = ResolvedParams::new(&params, &profile);
        let partitioner = SpacePartitioner::new(&resolved);

        let mut rng_a = StdRng::seed_from_u64(99);
        let mut rng_b = StdRng::seed_from_u64(99);
        let leaves_a = partitioner.partition(70, 70, &mut rng_a).leaves();
        let leaves_b = partitioner.partition(70, 70, &mut rng_b).leaves();

        assert_eq!(leaves_a, leaves_b);
    }
}

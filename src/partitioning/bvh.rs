use alloc::vec::Vec;
use core::cmp::Ordering;

use smallvec::SmallVec;

use crate::bounding_volume::Aabb;

const TRAVERSAL_STACK_SIZE: usize = 32;

/// A node of a [`Bvh`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BvhNode {
    /// The AABB enclosing every leaf below this node.
    pub aabb: Aabb,
    kind: BvhNodeKind,
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum BvhNodeKind {
    Leaf(u32),
    Internal(u32, u32),
}

impl BvhNode {
    /// The leaf data if this node is a leaf.
    pub fn leaf_data(&self) -> Option<u32> {
        match self.kind {
            BvhNodeKind::Leaf(data) => Some(data),
            BvhNodeKind::Internal(..) => None,
        }
    }
}

/// A static bounding volume hierarchy over a set of AABBs.
///
/// It is built once, top-down, by median splits along the widest axis of the
/// leaf centers, and never modified afterward.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Bvh {
    nodes: Vec<BvhNode>,
}

impl Bvh {
    /// Builds a hierarchy over leaves given as `(leaf_data, aabb)` pairs.
    pub fn from_leaves(mut leaves: Vec<(u32, Aabb)>) -> Self {
        let mut nodes = Vec::with_capacity(leaves.len() * 2);

        if !leaves.is_empty() {
            let _ = Self::build(&mut nodes, &mut leaves);
        }

        Self { nodes }
    }

    fn build(nodes: &mut Vec<BvhNode>, leaves: &mut [(u32, Aabb)]) -> u32 {
        let aabb = leaves
            .iter()
            .fold(Aabb::new_invalid(), |acc, (_, leaf)| acc.merged(leaf));
        let id = nodes.len() as u32;

        if let [(data, _)] = leaves {
            nodes.push(BvhNode {
                aabb,
                kind: BvhNodeKind::Leaf(*data),
            });
            return id;
        }

        let mut centers = Aabb::new_invalid();
        for (_, leaf) in leaves.iter() {
            centers.take_point(leaf.center());
        }
        let axis = centers.extents().imax();
        let mid = leaves.len() / 2;
        let _ = leaves.select_nth_unstable_by(mid, |(_, a), (_, b)| {
            a.center()[axis]
                .partial_cmp(&b.center()[axis])
                .unwrap_or(Ordering::Equal)
        });

        // Reserve the slot of this node before its children.
        nodes.push(BvhNode {
            aabb,
            kind: BvhNodeKind::Internal(0, 0),
        });
        let (left_leaves, right_leaves) = leaves.split_at_mut(mid);
        let left = Self::build(nodes, left_leaves);
        let right = Self::build(nodes, right_leaves);
        nodes[id as usize].kind = BvhNodeKind::Internal(left, right);
        id
    }

    /// The AABB of the root of this hierarchy, `None` if it is empty.
    pub fn root_aabb(&self) -> Option<Aabb> {
        self.nodes.first().map(|node| node.aabb)
    }

    /// The number of leaves of this hierarchy.
    pub fn leaf_count(&self) -> usize {
        self.nodes.len().div_ceil(2)
    }

    /// Calls `f` with the data of every leaf whose AABB intersects `aabb`.
    ///
    /// The traversal stops as soon as `f` returns `false`. Returns `false` if
    /// the traversal was interrupted that way.
    pub fn intersect_aabb(&self, aabb: &Aabb, mut f: impl FnMut(u32) -> bool) -> bool {
        let mut stack: SmallVec<[u32; TRAVERSAL_STACK_SIZE]> = SmallVec::new();

        if !self.nodes.is_empty() {
            stack.push(0);
        }

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id as usize];

            if !node.aabb.intersects(aabb) {
                continue;
            }

            match node.kind {
                BvhNodeKind::Leaf(data) => {
                    if !f(data) {
                        return false;
                    }
                }
                BvhNodeKind::Internal(left, right) => {
                    // Right first so that the left subtree is visited first.
                    stack.push(right);
                    stack.push(left);
                }
            }
        }

        true
    }
}

#[cfg(test)]
mod test {
    use super::Bvh;
    use crate::bounding_volume::Aabb;
    use crate::math::{Point, Real, Vector};
    use alloc::vec::Vec;

    fn unit_boxes(n: u32) -> Vec<(u32, Aabb)> {
        (0..n)
            .map(|i| {
                let center = Point::new(i as Real * 3.0, 0.0, 0.0);
                (i, Aabb::from_half_extents(center, Vector::repeat(1.0)))
            })
            .collect()
    }

    #[test]
    fn finds_exactly_the_intersecting_leaves() {
        let bvh = Bvh::from_leaves(unit_boxes(100));
        assert_eq!(bvh.leaf_count(), 100);

        let query = Aabb::new(Point::new(8.5, -0.5, -0.5), Point::new(15.5, 0.5, 0.5));
        let mut found = Vec::new();
        assert!(bvh.intersect_aabb(&query, |i| {
            found.push(i);
            true
        }));
        found.sort_unstable();
        assert_eq!(found, [3, 4, 5]);
    }

    #[test]
    fn early_exit_stops_the_traversal() {
        let bvh = Bvh::from_leaves(unit_boxes(10));
        let everything = bvh.root_aabb().unwrap();
        let mut visited = 0;
        assert!(!bvh.intersect_aabb(&everything, |_| {
            visited += 1;
            visited < 2
        }));
        assert_eq!(visited, 2);
    }

    #[test]
    fn empty_hierarchy() {
        let bvh = Bvh::from_leaves(Vec::new());
        assert!(bvh.root_aabb().is_none());
        assert!(bvh.intersect_aabb(&Aabb::new_invalid(), |_| true));
    }
}

use super::{Octree, OctreeNode, OctreeNodeInfo};
use crate::math::NUM_OCTANTS;
use smallvec::SmallVec;

const TRAVERSAL_STACK_SIZE: usize = 32;

/// Controls the execution flow of [`Octree::traverse`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TraversalAction {
    /// The traversal will continue on the children of the tested node.
    Continue,
    /// The traversal will skip all descendants of the tested node.
    Prune,
    /// The traversal will exit immediately.
    EarlyExit,
}

/// Depth-first iterator through the leaves of an [`Octree`].
///
/// Created by [`Octree::leaves`].
pub struct Leaves<'a> {
    tree: &'a Octree,
    stack: SmallVec<[OctreeNodeInfo; TRAVERSAL_STACK_SIZE]>,
}

impl<'a> Leaves<'a> {
    fn new(tree: &'a Octree) -> Self {
        let mut stack = SmallVec::new();
        stack.push(tree.root_info());
        Self { tree, stack }
    }
}

impl<'a> Iterator for Leaves<'a> {
    type Item = (OctreeNodeInfo, &'a OctreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let info = self.stack.pop()?;
            let node = &self.tree.nodes[info.id as usize];

            match *node {
                OctreeNode::Leaf { .. } => return Some((info, node)),
                OctreeNode::Internal { first_child } => {
                    // Reversed so that octant 0 is popped first.
                    for octant in (0..NUM_OCTANTS).rev() {
                        self.stack
                            .push(self.tree.child_info(&info, first_child, octant));
                    }
                }
            }
        }
    }
}

impl Octree {
    /// Iterates depth-first through all the leaves, empty ones included.
    ///
    /// Children are visited in increasing octant order.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves::new(self)
    }

    /// Traverses the tree depth-first, starting with the root.
    ///
    /// `check_node` is called on each visited node together with its placement, and
    /// its return value controls the traversal:
    /// - `Continue`: visit the children of this node (if it is internal).
    /// - `Prune`: skip the descendants of this node.
    /// - `EarlyExit`: stop the traversal immediately.
    ///
    /// Returns `false` if the traversal was interrupted by an `EarlyExit`.
    ///
    /// # Example
    ///
    /// ```
    /// # #[cfg(all(feature = "dim3", feature = "f32"))] {
    /// use voxgrid3d::bounding_volume::Aabb;
    /// use voxgrid3d::math::Point;
    /// use voxgrid3d::partitioning::TraversalAction;
    /// use voxgrid3d::shape::{PointCloud, VoxelGrid};
    ///
    /// let cloud = PointCloud::new((0..8).map(|i| Point::new(i as f32, 0.0, 0.0)).collect());
    /// let octree = VoxelGrid::from_point_cloud(&cloud, 1.0)
    ///     .unwrap()
    ///     .to_octree(8)
    ///     .unwrap();
    ///
    /// // Count the voxels whose center has `x < 2`.
    /// let region = Aabb::new(Point::new(0.0, 0.0, 0.0), Point::new(2.0, 8.0, 8.0));
    /// let mut count = 0;
    /// let _ = octree.traverse(|info, node| {
    ///     if info.aabb.mins.x >= region.maxs.x {
    ///         return TraversalAction::Prune;
    ///     }
    ///
    ///     count += node.num_voxels();
    ///     TraversalAction::Continue
    /// });
    /// assert_eq!(count, 2);
    /// # }
    /// ```
    pub fn traverse(
        &self,
        mut check_node: impl FnMut(&OctreeNodeInfo, &OctreeNode) -> TraversalAction,
    ) -> bool {
        let mut stack: SmallVec<[OctreeNodeInfo; TRAVERSAL_STACK_SIZE]> = SmallVec::new();
        stack.push(self.root_info());

        while let Some(info) = stack.pop() {
            let node = &self.nodes[info.id as usize];

            match check_node(&info, node) {
                TraversalAction::EarlyExit => return false,
                TraversalAction::Prune => {}
                TraversalAction::Continue => {
                    if let OctreeNode::Internal { first_child } = *node {
                        for octant in (0..NUM_OCTANTS).rev() {
                            stack.push(self.child_info(&info, first_child, octant));
                        }
                    }
                }
            }
        }

        true
    }
}

#[cfg(test)]
mod test {
    use super::TraversalAction;
    use crate::math::Point;
    use crate::shape::{PointCloud, VoxelGrid};

    fn diagonal_octree() -> crate::partitioning::Octree {
        let cloud = PointCloud::new((0..4).map(|i| Point::new(i as _, i as _, i as _)).collect());
        VoxelGrid::from_point_cloud(&cloud, 1.0)
            .unwrap()
            .to_octree(8)
            .unwrap()
    }

    #[test]
    fn leaves_are_yielded_depth_first() {
        let octree = diagonal_octree();
        let leaves: Vec<_> = octree.leaves().collect();

        assert_eq!(leaves.len(), octree.num_leaves());
        assert_eq!(
            leaves.iter().map(|(_, node)| node.num_voxels()).sum::<usize>(),
            4
        );

        // The first leaf is the one touching the root origin.
        let (first, _) = leaves[0];
        assert_eq!(first.aabb.mins, octree.origin());
        assert_eq!(first.depth, 2);
    }

    #[test]
    fn traversal_can_be_pruned_and_interrupted() {
        let octree = diagonal_octree();

        let mut visited = 0;
        assert!(octree.traverse(|_, _| {
            visited += 1;
            TraversalAction::Continue
        }));
        assert_eq!(visited, octree.num_nodes());

        let mut visited = 0;
        assert!(octree.traverse(|_, _| {
            visited += 1;
            TraversalAction::Prune
        }));
        assert_eq!(visited, 1);

        let mut visited = 0;
        assert!(!octree.traverse(|_, node| {
            visited += 1;
            if node.num_voxels() > 0 {
                TraversalAction::EarlyExit
            } else {
                TraversalAction::Continue
            }
        }));
        assert!(visited < octree.num_nodes());
    }
}

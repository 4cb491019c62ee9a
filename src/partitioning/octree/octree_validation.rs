use super::{Octree, OctreeNode, OctreeNodeInfo};
use crate::math::NUM_OCTANTS;

impl Octree {
    /// Panics if the tree isn’t well-formed.
    ///
    /// The tree is well-formed if it is topologically correct (every node is reachable exactly
    /// once from the root, and all the indices are valid) and geometrically correct (no leaf is
    /// deeper than [`Octree::max_depth`], and every voxel center lies inside of its leaf).
    /// Leaves are also expected to store their voxels contiguously, in depth-first order.
    ///
    /// This is mostly a utility for debugging.
    pub fn assert_well_formed(&self) {
        assert!(!self.nodes.is_empty(), "an octree has at least a root");
        assert!(self.size > 0.0, "the root must have a positive size");

        let mut visited = vec![false; self.nodes.len()];
        let mut next_voxel = 0;
        self.assert_well_formed_recurse(self.root_info(), &mut visited, &mut next_voxel);

        assert!(visited.iter().all(|v| *v), "unreachable octree node");
        assert_eq!(next_voxel, self.voxels.len(), "unreachable octree voxel");
    }

    fn assert_well_formed_recurse(
        &self,
        info: OctreeNodeInfo,
        visited: &mut [bool],
        next_voxel: &mut usize,
    ) {
        let id = info.id as usize;
        assert!(id < self.nodes.len(), "invalid node index {}", id);
        assert!(!visited[id], "node {} is reachable twice", id);
        assert!(info.depth <= self.max_depth, "node {} is too deep", id);
        visited[id] = true;

        match self.nodes[id] {
            OctreeNode::Internal { first_child } => {
                assert!(info.depth < self.max_depth);
                for octant in 0..NUM_OCTANTS {
                    let child = self.child_info(&info, first_child, octant);
                    self.assert_well_formed_recurse(child, visited, next_voxel);
                }
            }
            OctreeNode::Leaf {
                first_voxel,
                num_voxels,
            } => {
                if num_voxels > 1 {
                    assert_eq!(info.depth, self.max_depth, "leaf {} should be split", id);
                }

                if num_voxels > 0 {
                    assert_eq!(first_voxel as usize, *next_voxel);
                }

                let voxels = self.leaf_voxels(info.id);
                assert_eq!(voxels.len(), num_voxels as usize);
                for voxel in voxels {
                    assert!(
                        info.aabb.contains_local_point(&voxel.center),
                        "voxel {:?} lies outside of leaf {}",
                        voxel.center,
                        id
                    );
                }
                *next_voxel += voxels.len();
            }
        }
    }
}

//! An octree indexing the occupied cells of a voxel grid.

pub use octree_traverse::{Leaves, TraversalAction};
pub use octree_tree::{Octree, OctreeNode, OctreeNodeInfo, OctreeVoxel};

mod octree_build;
mod octree_traverse;
mod octree_tree;
mod octree_validation;

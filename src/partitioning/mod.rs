//! Spatial partitioning tools.

pub use self::octree::{Leaves, Octree, OctreeNode, OctreeNodeInfo, OctreeVoxel, TraversalAction};

pub mod octree;

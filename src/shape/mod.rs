//! Shapes supported by voxgrid.

pub use self::point_cloud::PointCloud;
pub use self::voxel_grid::{Voxel, VoxelGrid, VoxelGridError, VoxelKey};

mod point_cloud;
mod voxel_grid;

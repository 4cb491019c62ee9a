pub use voxel::{Voxel, VoxelKey};
pub use voxel_grid::VoxelGrid;
pub use voxel_grid_error::VoxelGridError;

mod voxel;
mod voxel_grid;
mod voxel_grid_edition;
mod voxel_grid_error;
mod voxel_grid_octree;
#[cfg(feature = "parallel")]
mod voxel_grid_parallel;

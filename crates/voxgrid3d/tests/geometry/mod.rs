mod octree_round_trip;
#[cfg(feature = "parallel")]
mod parallel_voxelization;
mod point_cloud_voxelization;
mod voxel_at_point;
mod voxel_grid_union;

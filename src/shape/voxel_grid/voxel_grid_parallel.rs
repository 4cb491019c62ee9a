use super::voxel::ColorAccumulator;
use super::voxel_grid::check_voxel_size;
use crate::math::{Point, Real};
use crate::shape::{PointCloud, VoxelGrid, VoxelGridError, VoxelKey};
use crate::utils::hashmap::{Entry, HashMap};
use rayon::prelude::*;

/// Number of points voxelized by each task.
const BATCH_SIZE: usize = 4096;

impl VoxelGrid {
    /// Voxelizes a point cloud using multiple threads.
    ///
    /// This gives the same grid as [`VoxelGrid::from_point_cloud`] (up to floating-point
    /// rounding of the averaged colors): each batch of points is accumulated independently,
    /// then the color sums and sample counts of all the batches are added together.
    ///
    /// Fails with the same errors as [`VoxelGrid::from_point_cloud`].
    pub fn par_from_point_cloud(
        cloud: &PointCloud,
        voxel_size: Real,
    ) -> Result<Self, VoxelGridError> {
        check_voxel_size(voxel_size)?;

        let Some(aabb) = cloud.aabb() else {
            return Self::new(Point::origin(), voxel_size);
        };

        let mut result = Self::new(aabb.mins, voxel_size)?;
        let accumulators = cloud
            .points()
            .par_chunks(BATCH_SIZE)
            .enumerate()
            .map(|(batch_id, points)| {
                let offset = batch_id * BATCH_SIZE;
                result.accumulate(
                    points
                        .iter()
                        .enumerate()
                        .map(|(i, pt)| (pt, cloud.color(offset + i))),
                )
            })
            .try_reduce(HashMap::default, |mut acc, batch| {
                merge_accumulators(&mut acc, batch);
                Ok(acc)
            })?;
        result.set_from_accumulators(accumulators);

        log::debug!(
            "Voxelized {} points into {} voxels of size {} in parallel.",
            cloud.len(),
            result.len(),
            voxel_size
        );
        Ok(result)
    }
}

/// Adds the samples of `from` into `into`.
fn merge_accumulators(
    into: &mut HashMap<VoxelKey, ColorAccumulator>,
    from: HashMap<VoxelKey, ColorAccumulator>,
) {
    for (key, acc) in from {
        match into.entry(key) {
            Entry::Occupied(mut entry) => entry.get_mut().merge(&acc),
            Entry::Vacant(entry) => {
                let _ = entry.insert(acc);
            }
        }
    }
}

use super::voxel_grid::check_voxel_size;
use crate::partitioning::Octree;
use crate::shape::{VoxelGrid, VoxelGridError};
use crate::utils::HashMap;

impl VoxelGrid {
    /// Builds an octree indexing all the occupied voxels of this grid.
    ///
    /// The octree stops subdividing a node once it holds at most one voxel, or once it
    /// reaches `max_depth` (or the depth where nodes become as small as the voxels, whichever
    /// comes first). See [`Octree::from_voxel_grid`] for details.
    ///
    /// Fails with [`VoxelGridError::InvalidMaxDepth`] if `max_depth` exceeds
    /// [`Octree::MAX_DEPTH`].
    pub fn to_octree(&self, max_depth: usize) -> Result<Octree, VoxelGridError> {
        Octree::from_voxel_grid(self, max_depth)
    }

    /// Rebuilds a voxel grid from the voxels stored in the leaves of an octree.
    ///
    /// The resulting grid has its origin at [`Octree::origin`], and its voxel size is the edge
    /// length of the octree’s deepest possible cells ([`Octree::finest_cell_size`]). Each stored
    /// voxel is placed in the cell containing its center.
    ///
    /// If the octree was built from a grid with a `max_depth` large enough to separate every
    /// voxel, this gives back the occupied cells of that grid exactly. Otherwise, several voxels
    /// may land in the same cell: they are merged into a single voxel with the mean of their
    /// colors.
    ///
    /// Fails with [`VoxelGridError::InvalidVoxelSize`] if the octree’s finest cell size is not
    /// a strictly positive finite number, and with [`VoxelGridError::PointOutOfRange`] if a
    /// stored voxel center lies outside of the range of keys addressable from the octree origin.
    pub fn from_octree(octree: &Octree) -> Result<Self, VoxelGridError> {
        let voxel_size = octree.finest_cell_size();
        check_voxel_size(voxel_size)?;

        let mut result = Self {
            origin: octree.origin(),
            voxel_size,
            voxels: HashMap::default(),
        };

        let accumulators = result.accumulate(
            octree
                .voxels()
                .iter()
                .map(|voxel| (&voxel.center, voxel.color.as_ref())),
        )?;
        let num_merged = octree.num_voxels() - accumulators.len();
        result.set_from_accumulators(accumulators);

        if num_merged > 0 {
            log::warn!(
                "{} octree voxels were merged into coarser voxels of size {}.",
                num_merged,
                result.voxel_size
            );
        }

        log::debug!(
            "Converted an octree with {} voxels into {} voxels of size {}.",
            octree.num_voxels(),
            result.len(),
            result.voxel_size
        );

        Ok(result)
    }
}

use crate::shape::{Voxel, VoxelGrid, VoxelGridError, VoxelKey};
use core::ops::{Add, AddAssign};

impl VoxelGrid {
    /// Inserts a voxel, replacing the one with the same key, if any.
    ///
    /// Returns the replaced voxel.
    pub fn insert(&mut self, voxel: Voxel) -> Option<Voxel> {
        self.voxels.insert(voxel.key, voxel)
    }

    /// Removes the voxel with the given key.
    ///
    /// Returns the removed voxel, or `None` if that cell was not occupied.
    pub fn remove(&mut self, key: VoxelKey) -> Option<Voxel> {
        self.voxels.remove(&key)
    }

    /// Removes every voxel, keeping the origin and the voxel size.
    pub fn clear(&mut self) {
        self.voxels.clear();
    }

    /// Fails unless `other` has exactly the same voxel size and origin as `self`.
    ///
    /// Keys of grids with different voxel sizes or origins do not designate the same cells, so
    /// such grids cannot be combined without resampling.
    pub fn check_compatible(&self, other: &VoxelGrid) -> Result<(), VoxelGridError> {
        if self.voxel_size != other.voxel_size {
            return Err(VoxelGridError::IncompatibleVoxelSize {
                expected: self.voxel_size,
                found: other.voxel_size,
            });
        }

        if self.origin != other.origin {
            return Err(VoxelGridError::IncompatibleOrigin {
                expected: self.origin,
                found: other.origin,
            });
        }

        Ok(())
    }

    /// Adds all the voxels of `other` into `self`.
    ///
    /// Voxels present in only one grid are kept unchanged. When both grids have a voxel with the
    /// same key, the voxel from `other` replaces the one from `self`.
    ///
    /// Fails, leaving `self` untouched, if the grids don’t have the same voxel size and origin.
    pub fn union_with(&mut self, other: &VoxelGrid) -> Result<(), VoxelGridError> {
        self.check_compatible(other)?;
        self.voxels.reserve(other.voxels.len());

        for (key, voxel) in &other.voxels {
            let _ = self.voxels.insert(*key, *voxel);
        }

        Ok(())
    }

    /// The union of `self` and `other`; see [`VoxelGrid::union_with`].
    pub fn union(&self, other: &VoxelGrid) -> Result<VoxelGrid, VoxelGridError> {
        let mut result = self.clone();
        result.union_with(other)?;
        Ok(result)
    }
}

impl Add<&VoxelGrid> for &VoxelGrid {
    type Output = Result<VoxelGrid, VoxelGridError>;

    fn add(self, rhs: &VoxelGrid) -> Self::Output {
        self.union(rhs)
    }
}

impl Add<VoxelGrid> for VoxelGrid {
    type Output = Result<VoxelGrid, VoxelGridError>;

    fn add(mut self, rhs: VoxelGrid) -> Self::Output {
        self.union_with(&rhs)?;
        Ok(self)
    }
}

/// In-place union.
///
/// # Panics
///
/// Panics if the grids don’t have the same voxel size and origin. Use
/// [`VoxelGrid::union_with`] to handle that case gracefully.
impl AddAssign<&VoxelGrid> for VoxelGrid {
    fn add_assign(&mut self, rhs: &VoxelGrid) {
        if let Err(err) = self.union_with(rhs) {
            panic!("invalid voxel grid union: {err}");
        }
    }
}

/// In-place union.
///
/// # Panics
///
/// Panics if the grids don’t have the same voxel size and origin. Use
/// [`VoxelGrid::union_with`] to handle that case gracefully.
impl AddAssign<VoxelGrid> for VoxelGrid {
    fn add_assign(&mut self, rhs: VoxelGrid) {
        *self += &rhs;
    }
}

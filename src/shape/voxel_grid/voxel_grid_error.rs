use crate::math::{Point, Real};

/// Errors raised while building, merging, or converting voxel grids.
///
/// Every fallible operation of [`VoxelGrid`](crate::shape::VoxelGrid) reports its failure
/// synchronously through this type; nothing is retried or silently ignored.
///
/// # Example
///
/// ```
/// # #[cfg(all(feature = "dim3", feature = "f32"))] {
/// use voxgrid3d::math::Point;
/// use voxgrid3d::shape::{VoxelGrid, VoxelGridError};
///
/// assert_eq!(
///     VoxelGrid::new(Point::origin(), 0.0).unwrap_err(),
///     VoxelGridError::InvalidVoxelSize(0.0)
/// );
///
/// let a = VoxelGrid::new(Point::origin(), 1.0).unwrap();
/// let b = VoxelGrid::new(Point::origin(), 2.0).unwrap();
/// assert!((&a + &b).unwrap_err().is_incompatible_grid());
/// # }
/// ```
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
pub enum VoxelGridError {
    /// The voxel size is zero, negative, or not finite.
    #[error("the voxel size must be strictly positive and finite, got {0}.")]
    InvalidVoxelSize(Real),
    /// Two grids with different voxel sizes were combined.
    #[error("cannot combine voxel grids with different voxel sizes ({expected} and {found}).")]
    IncompatibleVoxelSize {
        /// The voxel size of the grid being combined into.
        expected: Real,
        /// The voxel size of the other grid.
        found: Real,
    },
    /// Two grids with different origins were combined.
    #[error("cannot combine voxel grids with different origins ({expected} and {found}).")]
    IncompatibleOrigin {
        /// The origin of the grid being combined into.
        expected: Point<Real>,
        /// The origin of the other grid.
        found: Point<Real>,
    },
    /// The requested octree depth exceeds the supported limit.
    #[error("the octree depth {max_depth} exceeds the maximum supported depth {limit}.")]
    InvalidMaxDepth {
        /// The requested maximum depth.
        max_depth: usize,
        /// The largest supported depth.
        limit: usize,
    },
    /// The color buffer of a point cloud does not have one color per point.
    #[error("a point cloud with {points} points cannot have {colors} colors.")]
    ColorCountMismatch {
        /// The number of points.
        points: usize,
        /// The number of colors.
        colors: usize,
    },
    /// The bounds given for a bounded voxelization are inverted along some axis.
    #[error("the voxelization bounds must satisfy `mins <= maxs` along every axis.")]
    InvalidBounds,
    /// A point lies too far from the grid origin for its voxel key to fit in an `i32`, or has
    /// non-finite coordinates.
    #[error("the point {0} is out of the range addressable by the voxel grid.")]
    PointOutOfRange(Point<Real>),
    /// A dense grid would contain more than `u32::MAX` voxels, or more than `i32::MAX` voxels
    /// along some axis.
    #[error("the dense grid has too many voxels.")]
    TooManyVoxels,
}

impl VoxelGridError {
    /// Is this error caused by combining two grids that do not share the same voxel size
    /// and origin?
    pub fn is_incompatible_grid(&self) -> bool {
        matches!(
            self,
            Self::IncompatibleVoxelSize { .. } | Self::IncompatibleOrigin { .. }
        )
    }
}

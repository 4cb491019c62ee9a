use super::voxel::ColorAccumulator;
use crate::bounding_volume::Aabb;
use crate::math::{Color, Point, Real, Vector};
use crate::shape::{PointCloud, Voxel, VoxelGridError, VoxelKey};
use crate::utils::hashmap::HashMap;
use crate::utils::{self, hashmap_with_capacity};
use core::fmt;

/// A sparse set of occupied cells of a regular grid.
///
/// All the voxels of a grid share the same `origin` and the same cubic `voxel_size`. The voxel
/// with key `k` covers the cube `[origin + k * voxel_size, origin + (k + 1) * voxel_size)`
/// and its center is `origin + (k + 0.5) * voxel_size`.
///
/// Only occupied cells are stored, in a hash-map keyed by [`VoxelKey`]. The grid exclusively
/// owns its voxels: queries return copies ([`VoxelGrid::get`]) or shared borrows
/// ([`VoxelGrid::voxels`]).
///
/// # Examples
///
/// ## Voxelizing a point cloud
///
/// ```
/// # #[cfg(all(feature = "dim3", feature = "f32"))] {
/// use voxgrid3d::math::{Color, Point};
/// use voxgrid3d::shape::{PointCloud, VoxelGrid, VoxelKey};
///
/// let cloud = PointCloud::with_colors(
///     vec![
///         Point::new(0.0, 0.0, 0.0),
///         Point::new(0.1, 0.0, 0.0),
///         Point::new(5.0, 5.0, 5.0),
///     ],
///     vec![
///         Color::new(1.0, 0.0, 0.0),
///         Color::new(0.0, 0.0, 1.0),
///         Color::new(0.0, 1.0, 0.0),
///     ],
/// )
/// .unwrap();
///
/// let grid = VoxelGrid::from_point_cloud(&cloud, 1.0).unwrap();
/// assert_eq!(grid.len(), 2);
///
/// // The first two points fall into the same voxel: its color is their mean.
/// let voxel = grid.get(VoxelKey::new(0, 0, 0)).unwrap();
/// assert_eq!(voxel.color, Some(Color::new(0.5, 0.0, 0.5)));
/// # }
/// ```
///
/// ## Point queries
///
/// ```
/// # #[cfg(all(feature = "dim3", feature = "f32"))] {
/// use voxgrid3d::math::Point;
/// use voxgrid3d::shape::{Voxel, VoxelGrid, VoxelKey};
///
/// let mut grid = VoxelGrid::new(Point::new(1.0, 1.0, 1.0), 0.5).unwrap();
/// let _ = grid.insert(Voxel::new(VoxelKey::new(0, 0, 0)));
///
/// // Any point maps to a key, occupied or not.
/// assert_eq!(grid.voxel_at_point(Point::new(1.2, 1.2, 1.2)), Some(VoxelKey::new(0, 0, 0)));
/// assert_eq!(grid.voxel_at_point(Point::new(0.9, 2.0, 1.0)), Some(VoxelKey::new(-1, 2, 0)));
/// // Keys are `i32`: points too far from the origin have none.
/// assert_eq!(grid.voxel_at_point(Point::new(3.0e9, 0.0, 0.0)), None);
///
/// assert!(grid.contains_point(Point::new(1.2, 1.4, 1.1)));
/// assert!(!grid.contains_point(Point::new(2.0, 2.0, 2.0)));
/// assert_eq!(grid.voxel_center(VoxelKey::new(0, 0, 0)), Point::new(1.25, 1.25, 1.25));
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct VoxelGrid {
    pub(super) origin: Point<Real>,
    pub(super) voxel_size: Real,
    pub(super) voxels: HashMap<VoxelKey, Voxel>,
}

/// Fails if `voxel_size` is not a strictly positive finite number.
pub(super) fn check_voxel_size(voxel_size: Real) -> Result<(), VoxelGridError> {
    if voxel_size > 0.0 && voxel_size.is_finite() {
        Ok(())
    } else {
        Err(VoxelGridError::InvalidVoxelSize(voxel_size))
    }
}

impl VoxelGrid {
    /// An empty grid with the given origin and voxel size.
    ///
    /// Fails with [`VoxelGridError::InvalidVoxelSize`] if `voxel_size` is not strictly positive
    /// and finite.
    pub fn new(origin: Point<Real>, voxel_size: Real) -> Result<Self, VoxelGridError> {
        check_voxel_size(voxel_size)?;
        Ok(Self {
            origin,
            voxel_size,
            voxels: HashMap::default(),
        })
    }

    /// Voxelizes a point cloud.
    ///
    /// The origin of the grid is set to the minimum corner of the bounding box of the points,
    /// and each point lands in the voxel `floor((point - origin) / voxel_size)`. A voxel holding
    /// several points takes the mean of their colors. If the cloud has no colors, neither have
    /// the voxels.
    ///
    /// An empty cloud yields an empty grid with its origin at `(0, 0, 0)`. Fails with
    /// [`VoxelGridError::PointOutOfRange`] if a point is too far from the others for its key to
    /// fit in an `i32`.
    pub fn from_point_cloud(cloud: &PointCloud, voxel_size: Real) -> Result<Self, VoxelGridError> {
        check_voxel_size(voxel_size)?;

        let Some(aabb) = cloud.aabb() else {
            return Self::new(Point::origin(), voxel_size);
        };

        let mut result = Self::new(aabb.mins, voxel_size)?;
        let accumulators = result.accumulate(cloud.iter())?;
        result.set_from_accumulators(accumulators);

        log::debug!(
            "Voxelized {} points into {} voxels of size {}.",
            cloud.len(),
            result.len(),
            voxel_size
        );
        Ok(result)
    }

    /// Voxelizes the points of a cloud lying inside of the given bounds.
    ///
    /// Unlike [`VoxelGrid::from_point_cloud`], the origin of the grid is `bounds.mins`
    /// regardless of the actual point positions, so grids voxelized with the same bounds and
    /// voxel size can be merged. Points outside of `bounds` are ignored.
    pub fn from_point_cloud_within_bounds(
        cloud: &PointCloud,
        voxel_size: Real,
        bounds: &Aabb,
    ) -> Result<Self, VoxelGridError> {
        check_voxel_size(voxel_size)?;

        if !bounds.is_valid() {
            return Err(VoxelGridError::InvalidBounds);
        }

        let mut result = Self::new(bounds.mins, voxel_size)?;
        let accumulators =
            result.accumulate(cloud.iter().filter(|(pt, _)| bounds.contains_local_point(pt)))?;
        let num_used: u32 = accumulators
            .values()
            .map(ColorAccumulator::num_samples)
            .sum();
        result.set_from_accumulators(accumulators);

        log::trace!(
            "Ignored {} points lying outside of the voxelization bounds.",
            cloud.len() - num_used as usize
        );
        log::debug!(
            "Voxelized {} points into {} voxels of size {}.",
            num_used,
            result.len(),
            voxel_size
        );
        Ok(result)
    }

    /// A grid where every cell of the box `[origin, origin + extents]` is occupied.
    ///
    /// The number of voxels along each axis is `extents / voxel_size`, rounded to the nearest
    /// integer. All the voxels are given the same `color`.
    ///
    /// Fails with [`VoxelGridError::InvalidBounds`] if some extent is negative or not finite, and
    /// with [`VoxelGridError::TooManyVoxels`] if the grid would contain more than `u32::MAX`
    /// voxels or more than `i32::MAX` voxels along some axis.
    pub fn dense(
        origin: Point<Real>,
        voxel_size: Real,
        extents: Vector<Real>,
        color: Option<Color>,
    ) -> Result<Self, VoxelGridError> {
        check_voxel_size(voxel_size)?;

        if extents.iter().any(|e| !e.is_finite() || *e < 0.0) {
            return Err(VoxelGridError::InvalidBounds);
        }

        let mut dims = [0i32; 3];
        let mut num_voxels = 1u32;
        for i in 0..3 {
            let dim = (extents[i] / voxel_size).round();
            if dim > i32::MAX as Real {
                return Err(VoxelGridError::TooManyVoxels);
            }
            dims[i] = dim as i32;
            num_voxels = num_voxels
                .checked_mul(dims[i] as u32)
                .ok_or(VoxelGridError::TooManyVoxels)?;
        }

        let mut result = Self::new(origin, voxel_size)?;
        if num_voxels == 0 {
            return Ok(result);
        }
        result.voxels.reserve(num_voxels as usize);

        for x in 0..dims[0] {
            for y in 0..dims[1] {
                for z in 0..dims[2] {
                    let key = VoxelKey::new(x, y, z);
                    let _ = result.voxels.insert(key, Voxel { key, color });
                }
            }
        }

        Ok(result)
    }

    /// The world-space position of the minimum corner of the voxel with key `(0, 0, 0)`.
    #[inline]
    pub fn origin(&self) -> Point<Real> {
        self.origin
    }

    /// The edge length of each voxel.
    #[inline]
    pub fn voxel_size(&self) -> Real {
        self.voxel_size
    }

    /// The number of occupied voxels.
    #[inline]
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    /// Is this grid empty?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Does this grid contain at least one voxel?
    #[inline]
    pub fn has_voxels(&self) -> bool {
        !self.voxels.is_empty()
    }

    /// Does this grid contain voxels, all of them carrying a color?
    ///
    /// An empty grid has no colors.
    pub fn has_colors(&self) -> bool {
        self.has_voxels() && self.voxels.values().all(Voxel::has_color)
    }

    /// A copy of the voxel with the given key, if it is occupied.
    #[inline]
    pub fn get(&self, key: VoxelKey) -> Option<Voxel> {
        self.voxels.get(&key).copied()
    }

    /// Is the voxel with the given key occupied?
    #[inline]
    pub fn contains_key(&self, key: VoxelKey) -> bool {
        self.voxels.contains_key(&key)
    }

    /// Iterates through all the occupied voxels, in no particular order.
    pub fn voxels(&self) -> impl ExactSizeIterator<Item = &Voxel> + '_ {
        self.voxels.values()
    }

    /// Iterates through the keys of all the occupied voxels, in no particular order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = VoxelKey> + '_ {
        self.voxels.keys().copied()
    }

    /// All the occupied voxels, sorted by key.
    pub fn sorted_voxels(&self) -> Vec<Voxel> {
        let mut result: Vec<_> = self.voxels.values().copied().collect();
        result.sort_unstable_by_key(|voxel| voxel.key);
        result
    }

    /// The key of the voxel containing the given point.
    ///
    /// This is a pure function of the origin, the voxel size, and the point: it doesn’t matter
    /// whether that voxel is occupied. Returns `None` if the point has non-finite coordinates
    /// or if some component of its key doesn’t fit in an `i32`.
    #[inline]
    pub fn voxel_at_point(&self, point: Point<Real>) -> Option<VoxelKey> {
        let coords = (point - self.origin) / self.voxel_size;
        Some(VoxelKey::new(
            floor_to_i32(coords.x)?,
            floor_to_i32(coords.y)?,
            floor_to_i32(coords.z)?,
        ))
    }

    /// The world-space center of the voxel with the given key, occupied or not.
    #[inline]
    pub fn voxel_center(&self, key: VoxelKey) -> Point<Real> {
        self.origin + (key.to_real().coords + Vector::repeat(0.5)) * self.voxel_size
    }

    /// The world-space cube covered by the voxel with the given key.
    #[inline]
    pub fn voxel_aabb(&self, key: VoxelKey) -> Aabb {
        Aabb::cube(
            self.origin + key.to_real().coords * self.voxel_size,
            self.voxel_size,
        )
    }

    /// The smallest and largest occupied keys along each axis, or `None` if the grid is empty.
    ///
    /// Both bounds are inclusive.
    pub fn key_range(&self) -> Option<[VoxelKey; 2]> {
        let mut keys = self.voxels.keys();
        let first = *keys.next()?;
        Some(keys.fold([first, first], |[mins, maxs], key| {
            [mins.inf(*key), maxs.sup(*key)]
        }))
    }

    /// The world-space bounds of all the occupied voxels, or `None` if the grid is empty.
    pub fn aabb(&self) -> Option<Aabb> {
        let [mins, maxs] = self.key_range()?;
        Some(self.voxel_aabb(mins).merged(&self.voxel_aabb(maxs)))
    }

    /// The mean of the centers of all the occupied voxels, or `None` if the grid is empty.
    pub fn center(&self) -> Option<Point<Real>> {
        utils::center(self.voxels.keys().map(|key| self.voxel_center(*key)))
    }

    /// The 8 corners of [`VoxelGrid::aabb`], ordered as in [`Aabb::vertices`].
    pub fn bounding_points(&self) -> Option<[Point<Real>; 8]> {
        self.aabb().map(|aabb| aabb.vertices())
    }

    /// Is the point inside of an occupied voxel?
    #[inline]
    pub fn contains_point(&self, point: Point<Real>) -> bool {
        self.voxel_at_point(point)
            .is_some_and(|key| self.contains_key(key))
    }

    /// Tests, for each point, whether it lies inside of an occupied voxel.
    pub fn check_if_included(&self, points: &[Point<Real>]) -> Vec<bool> {
        points.iter().map(|pt| self.contains_point(*pt)).collect()
    }

    /// Groups the given samples per voxel, accumulating their colors.
    ///
    /// Fails on the first sample without a valid voxel key.
    pub(super) fn accumulate<'a, I>(
        &self,
        samples: I,
    ) -> Result<HashMap<VoxelKey, ColorAccumulator>, VoxelGridError>
    where
        I: IntoIterator<Item = (&'a Point<Real>, Option<&'a Color>)>,
    {
        let samples = samples.into_iter();
        let mut result = hashmap_with_capacity(samples.size_hint().0);

        for (pt, color) in samples {
            let key = self
                .voxel_at_point(*pt)
                .ok_or(VoxelGridError::PointOutOfRange(*pt))?;
            result
                .entry(key)
                .or_insert_with(ColorAccumulator::new)
                .push(color);
        }

        Ok(result)
    }

    /// Replaces all the voxels of this grid by the ones described by `accumulators`.
    pub(super) fn set_from_accumulators(
        &mut self,
        accumulators: HashMap<VoxelKey, ColorAccumulator>,
    ) {
        self.voxels = hashmap_with_capacity(accumulators.len());
        for (key, acc) in accumulators {
            let _ = self.voxels.insert(key, acc.to_voxel(key));
        }
    }
}

/// `x.floor()` as an `i32`, or `None` if it is out of range or not finite.
fn floor_to_i32(x: Real) -> Option<i32> {
    let x = f64::from(x).floor();
    (x >= i32::MIN as f64 && x <= i32::MAX as f64).then_some(x as i32)
}

impl fmt::Display for VoxelGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VoxelGrid with {} voxels.", self.len())
    }
}

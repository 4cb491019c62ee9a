use crate::math::{Color, Point, Real};
use core::fmt;

/// The integer coordinates identifying one cell of a voxel grid.
///
/// Keys are totally ordered (lexicographically on `x`, then `y`, then `z`) so that
/// voxels can be listed in a deterministic order.
///
/// # Example
///
/// ```
/// # #[cfg(all(feature = "dim3", feature = "f32"))] {
/// use voxgrid3d::shape::VoxelKey;
/// use voxgrid3d::na::Point3;
///
/// let key = VoxelKey::new(1, -2, 3);
/// assert_eq!(key.to_point(), Point3::new(1, -2, 3));
/// assert_eq!(VoxelKey::from([1, -2, 3]), key);
/// assert!(VoxelKey::new(0, 5, 5) < VoxelKey::new(1, 0, 0));
/// # }
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct VoxelKey {
    /// Grid coordinate along the `x` axis.
    pub x: i32,
    /// Grid coordinate along the `y` axis.
    pub y: i32,
    /// Grid coordinate along the `z` axis.
    pub z: i32,
}

impl VoxelKey {
    /// Creates a key from its three grid coordinates.
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The key as an integer point.
    #[inline]
    pub fn to_point(self) -> Point<i32> {
        Point::new(self.x, self.y, self.z)
    }

    /// The key coordinates converted to the scalar type.
    #[inline]
    pub fn to_real(self) -> Point<Real> {
        Point::new(self.x as Real, self.y as Real, self.z as Real)
    }

    /// The component-wise minimum of two keys.
    #[inline]
    #[must_use]
    pub fn inf(self, other: Self) -> Self {
        Self::new(
            self.x.min(other.x),
            self.y.min(other.y),
            self.z.min(other.z),
        )
    }

    /// The component-wise maximum of two keys.
    #[inline]
    #[must_use]
    pub fn sup(self, other: Self) -> Self {
        Self::new(
            self.x.max(other.x),
            self.y.max(other.y),
            self.z.max(other.z),
        )
    }
}

impl From<Point<i32>> for VoxelKey {
    #[inline]
    fn from(pt: Point<i32>) -> Self {
        Self::new(pt.x, pt.y, pt.z)
    }
}

impl From<VoxelKey> for Point<i32> {
    #[inline]
    fn from(key: VoxelKey) -> Self {
        key.to_point()
    }
}

impl From<[i32; 3]> for VoxelKey {
    #[inline]
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl fmt::Display for VoxelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// A single occupied cell of a [`VoxelGrid`](crate::shape::VoxelGrid).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Voxel {
    /// The grid coordinates of this voxel.
    pub key: VoxelKey,
    /// The color of this voxel, if the grid it belongs to carries colors.
    pub color: Option<Color>,
}

impl Voxel {
    /// A voxel without color.
    #[inline]
    pub fn new(key: VoxelKey) -> Self {
        Self { key, color: None }
    }

    /// A voxel with the given color.
    #[inline]
    pub fn with_color(key: VoxelKey, color: Color) -> Self {
        Self {
            key,
            color: Some(color),
        }
    }

    /// Does this voxel carry a color?
    #[inline]
    pub fn has_color(&self) -> bool {
        self.color.is_some()
    }
}

impl fmt::Display for Voxel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Voxel with grid index {}", self.key)?;
        if let Some(color) = &self.color {
            write!(f, ", color ({}, {}, {})", color.x, color.y, color.z)?;
        }
        Ok(())
    }
}

/// Running sum of the colors mapped into one voxel.
///
/// Dividing the sum by the count when the voxel is emitted yields the mean color of all the
/// samples. Two accumulators built over disjoint samples can be merged exactly by adding them.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct ColorAccumulator {
    sum: Color,
    num_samples: u32,
    num_colored: u32,
}

impl ColorAccumulator {
    pub fn new() -> Self {
        Self {
            sum: Color::zeros(),
            num_samples: 0,
            num_colored: 0,
        }
    }

    pub fn push(&mut self, color: Option<&Color>) {
        self.num_samples += 1;
        if let Some(color) = color {
            self.sum += color;
            self.num_colored += 1;
        }
    }

    #[cfg(any(test, feature = "parallel"))]
    pub fn merge(&mut self, other: &Self) {
        self.sum += other.sum;
        self.num_samples += other.num_samples;
        self.num_colored += other.num_colored;
    }

    pub fn num_samples(&self) -> u32 {
        self.num_samples
    }

    /// The mean of the colored samples, or `None` if none of them had a color.
    pub fn mean(&self) -> Option<Color> {
        (self.num_colored > 0).then(|| self.sum / self.num_colored as Real)
    }

    pub fn to_voxel(&self, key: VoxelKey) -> Voxel {
        Voxel {
            key,
            color: self.mean(),
        }
    }
}

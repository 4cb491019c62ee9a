//! Axis Aligned Bounding Box.

use crate::math::{Point, Real, Vector, DIM, NUM_OCTANTS};

/// An Axis-Aligned Bounding Box (AABB).
///
/// An AABB is defined by its minimum and maximum corners. Its edges are always parallel to the
/// coordinate axes. Voxel grids use it for their bounds, and octrees for the cube covered by
/// each of their nodes.
///
/// # Example
///
/// ```rust
/// # #[cfg(all(feature = "dim3", feature = "f32"))] {
/// use voxgrid3d::bounding_volume::Aabb;
/// use voxgrid3d::math::Point;
///
/// let aabb = Aabb::new(Point::new(-0.5, -0.5, -0.5), Point::new(0.5, 0.5, 0.5));
///
/// assert!(aabb.contains_local_point(&Point::origin()));
/// assert_eq!(aabb.center(), Point::origin());
/// assert_eq!(aabb.extents().x, 1.0);
/// # }
/// ```
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(C)]
pub struct Aabb {
    /// The point with minimum coordinates.
    pub mins: Point<Real>,
    /// The point with maximum coordinates.
    pub maxs: Point<Real>,
}

impl Aabb {
    /// Creates a new AABB from its two corners.
    ///
    /// No check is performed: `mins` is expected to be component-wise smaller than `maxs`.
    /// See [`Aabb::is_valid`].
    #[inline]
    pub fn new(mins: Point<Real>, maxs: Point<Real>) -> Aabb {
        Aabb { mins, maxs }
    }

    /// Creates an invalid AABB with `mins` set to the largest representable values and
    /// `maxs` to the smallest ones.
    ///
    /// This is the neutral element for [`Aabb::take_point`] and [`Aabb::merged`].
    #[inline]
    pub fn new_invalid() -> Self {
        Self::new(
            Vector::repeat(Real::MAX).into(),
            Vector::repeat(-Real::MAX).into(),
        )
    }

    /// Creates a cube from its minimum corner and its edge length.
    #[inline]
    pub fn cube(mins: Point<Real>, size: Real) -> Self {
        Self::new(mins, mins + Vector::repeat(size))
    }

    /// Computes the smallest AABB enclosing all the given points.
    ///
    /// Returns `None` if the iterator is empty.
    pub fn from_points<'a, I>(pts: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point<Real>>,
    {
        let mut it = pts.into_iter();
        let first = *it.next()?;
        let mut result = Aabb::new(first, first);

        for pt in it {
            result.take_point(*pt);
        }

        Some(result)
    }

    /// Does this AABB have `mins <= maxs` along every axis?
    #[inline]
    pub fn is_valid(&self) -> bool {
        (0..DIM).all(|i| self.mins[i] <= self.maxs[i])
    }

    /// The center of this AABB.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        na::center(&self.mins, &self.maxs)
    }

    /// The half-extents of this AABB.
    #[inline]
    pub fn half_extents(&self) -> Vector<Real> {
        (self.maxs - self.mins) * 0.5
    }

    /// The extents of this AABB.
    #[inline]
    pub fn extents(&self) -> Vector<Real> {
        self.maxs - self.mins
    }

    /// The volume of this AABB.
    #[inline]
    pub fn volume(&self) -> Real {
        let extents = self.extents();
        extents.x * extents.y * extents.z
    }

    /// Enlarges this AABB so it also contains `pt`.
    pub fn take_point(&mut self, pt: Point<Real>) {
        self.mins = self.mins.inf(&pt);
        self.maxs = self.maxs.sup(&pt);
    }

    /// The smallest AABB containing both `self` and `other`.
    #[inline]
    #[must_use]
    pub fn merged(&self, other: &Aabb) -> Aabb {
        Aabb {
            mins: self.mins.inf(&other.mins),
            maxs: self.maxs.sup(&other.maxs),
        }
    }

    /// Tests if the given point is inside of this AABB, boundary included.
    #[inline]
    pub fn contains_local_point(&self, point: &Point<Real>) -> bool {
        for i in 0..DIM {
            if point[i] < self.mins[i] || point[i] > self.maxs[i] {
                return false;
            }
        }

        true
    }

    /// Computes the 8 vertices of this AABB.
    ///
    /// The vertices are given in the following order, in a right-handed coordinate system:
    /// ```text
    ///    y             3 - 2
    ///    |           7 − 6 |
    ///    ___ x       |   | 1  (the zero is below 3 and on the left of 1,
    ///   /            4 - 5     hidden by the 4-5-6-7 face.)
    ///  z
    /// ```
    #[inline]
    pub fn vertices(&self) -> [Point<Real>; 8] {
        [
            Point::new(self.mins.x, self.mins.y, self.mins.z),
            Point::new(self.maxs.x, self.mins.y, self.mins.z),
            Point::new(self.maxs.x, self.maxs.y, self.mins.z),
            Point::new(self.mins.x, self.maxs.y, self.mins.z),
            Point::new(self.mins.x, self.mins.y, self.maxs.z),
            Point::new(self.maxs.x, self.mins.y, self.maxs.z),
            Point::new(self.maxs.x, self.maxs.y, self.maxs.z),
            Point::new(self.mins.x, self.maxs.y, self.maxs.z),
        ]
    }

    /// The octant of this AABB with the given index.
    ///
    /// Bit `0` (resp. `1`, `2`) of `octant` selects the upper half of the AABB along
    /// the `x` (resp. `y`, `z`) axis.
    #[inline]
    pub fn octant(&self, octant: usize) -> Aabb {
        let center = self.center();
        let mut mins = self.mins;
        let mut maxs = center;

        for i in 0..DIM {
            if octant & (1 << i) != 0 {
                mins[i] = center[i];
                maxs[i] = self.maxs[i];
            }
        }

        Aabb::new(mins, maxs)
    }

    /// Splits this AABB at its center, into eight parts (as in an octree).
    ///
    /// The `i`-th element of the result is [`Aabb::octant`]`(i)`.
    #[inline]
    pub fn split_at_center(&self) -> [Aabb; NUM_OCTANTS] {
        core::array::from_fn(|i| self.octant(i))
    }

    /// The index of the octant of this AABB containing `point`.
    ///
    /// Points lying exactly on a splitting plane are attributed to the upper octant.
    #[inline]
    pub fn octant_containing(&self, point: &Point<Real>) -> usize {
        let center = self.center();
        (0..DIM)
            .filter(|i| point[*i] >= center[*i])
            .fold(0, |octant, i| octant | (1 << i))
    }
}

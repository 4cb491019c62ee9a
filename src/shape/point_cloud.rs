use crate::bounding_volume::Aabb;
use crate::math::{Color, Point, Real};
use crate::shape::VoxelGridError;

/// An ordered set of 3D points, optionally carrying one color per point.
///
/// This is the input of [`VoxelGrid::from_point_cloud`](crate::shape::VoxelGrid::from_point_cloud).
///
/// # Example
///
/// ```
/// # #[cfg(all(feature = "dim3", feature = "f32"))] {
/// use voxgrid3d::math::{Color, Point};
/// use voxgrid3d::shape::PointCloud;
///
/// let cloud = PointCloud::with_colors(
///     vec![Point::new(0.0, 0.0, 0.0), Point::new(1.0, 2.0, 3.0)],
///     vec![Color::new(1.0, 0.0, 0.0), Color::new(0.0, 0.0, 1.0)],
/// )
/// .unwrap();
///
/// assert_eq!(cloud.len(), 2);
/// assert!(cloud.has_colors());
/// assert_eq!(cloud.aabb().unwrap().maxs, Point::new(1.0, 2.0, 3.0));
///
/// // Each point needs exactly one color.
/// assert!(PointCloud::with_colors(vec![Point::origin()], vec![]).is_err());
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct PointCloud {
    points: Vec<Point<Real>>,
    colors: Option<Vec<Color>>,
}

impl PointCloud {
    /// A point cloud without colors.
    pub fn new(points: Vec<Point<Real>>) -> Self {
        Self {
            points,
            colors: None,
        }
    }

    /// A point cloud with one color per point.
    ///
    /// Fails with [`VoxelGridError::ColorCountMismatch`] if `colors` and `points` do not have
    /// the same length.
    pub fn with_colors(points: Vec<Point<Real>>, colors: Vec<Color>) -> Result<Self, VoxelGridError> {
        if points.len() != colors.len() {
            return Err(VoxelGridError::ColorCountMismatch {
                points: points.len(),
                colors: colors.len(),
            });
        }

        Ok(Self {
            points,
            colors: Some(colors),
        })
    }

    /// The points of this cloud.
    pub fn points(&self) -> &[Point<Real>] {
        &self.points
    }

    /// The per-point colors of this cloud, if any.
    pub fn colors(&self) -> Option<&[Color]> {
        self.colors.as_deref()
    }

    /// The color of the `i`-th point, if this cloud is colored.
    pub fn color(&self, i: usize) -> Option<&Color> {
        self.colors.as_ref().and_then(|colors| colors.get(i))
    }

    /// Does this cloud carry colors?
    pub fn has_colors(&self) -> bool {
        self.colors.is_some()
    }

    /// The number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Does this cloud contain no point at all?
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The bounding box of all the points, or `None` if the cloud is empty.
    pub fn aabb(&self) -> Option<Aabb> {
        Aabb::from_points(&self.points)
    }

    /// Iterates through each point together with its color (if any).
    pub fn iter(&self) -> impl Iterator<Item = (&Point<Real>, Option<&Color>)> + '_ {
        self.points
            .iter()
            .enumerate()
            .map(|(i, pt)| (pt, self.color(i)))
    }
}

impl From<Vec<Point<Real>>> for PointCloud {
    fn from(points: Vec<Point<Real>>) -> Self {
        Self::new(points)
    }
}

use crate::math::{Point, Real};

/// Computes the geometric center (centroid) of a set of points.
///
/// All points are weighted equally. Returns `None` if the iterator is empty.
///
/// # Example
///
/// ```
/// # #[cfg(all(feature = "dim3", feature = "f32"))] {
/// use voxgrid3d::utils::center;
/// use voxgrid3d::math::Point;
///
/// let points = [
///     Point::new(0.0, 0.0, 0.0),
///     Point::new(4.0, 0.0, 0.0),
///     Point::new(0.0, 4.0, 0.0),
/// ];
///
/// let c = center(points).unwrap();
/// assert!((c.x - 4.0 / 3.0).abs() < 1e-6);
/// assert!((c.y - 4.0 / 3.0).abs() < 1e-6);
/// assert!(c.z.abs() < 1e-6);
/// # }
/// ```
#[inline]
pub fn center<I>(pts: I) -> Option<Point<Real>>
where
    I: IntoIterator<Item = Point<Real>>,
{
    let mut count = 0usize;
    let mut sum = Point::origin();

    for pt in pts {
        sum += pt.coords;
        count += 1;
    }

    (count > 0).then(|| sum / count as Real)
}

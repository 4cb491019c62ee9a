/*!
voxgrid
========

**voxgrid** is a 3-dimensional library for building sparse voxel grids out of
point clouds, querying them, merging them, and converting them to and from
octrees. It is written with the rust programming language.

```
# #[cfg(all(feature = "dim3", feature = "f32"))] {
use voxgrid3d::math::Point;
use voxgrid3d::shape::{PointCloud, VoxelGrid};

let cloud = PointCloud::new(vec![
    Point::new(0.0, 0.0, 0.0),
    Point::new(0.1, 0.0, 0.0),
    Point::new(5.0, 5.0, 5.0),
]);
let grid = VoxelGrid::from_point_cloud(&cloud, 1.0).unwrap();
assert_eq!(grid.len(), 2);

let octree = grid.to_octree(4).unwrap();
let back = VoxelGrid::from_octree(&octree).unwrap();
assert_eq!(back.len(), 2);
# }
```
*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.
#![deny(unused_qualifications)]

#[cfg(all(feature = "f32", feature = "f64"))]
std::compile_error!("The `f32` and `f64` features are mutually exclusive.");

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;
#[cfg(test)]
#[macro_use]
extern crate approx;

pub extern crate nalgebra as na;

pub mod bounding_volume;
pub mod partitioning;
pub mod shape;
pub mod utils;

mod real {
    /// The scalar type used throughout this crate.
    #[cfg(feature = "f64")]
    pub use f64 as Real;

    /// The scalar type used throughout this crate.
    #[cfg(feature = "f32")]
    pub use f32 as Real;
}

/// Compilation flags dependent aliases for mathematical types.
#[cfg(feature = "dim3")]
pub mod math {
    pub use super::real::*;
    pub use na::{Matrix3, Point3, Vector3};

    /// The dimension of the space.
    pub const DIM: usize = 3;

    /// The number of children of an octree internal node.
    pub const NUM_OCTANTS: usize = 1 << DIM;

    /// The point type.
    pub use Point3 as Point;

    /// The vector type.
    pub use Vector3 as Vector;

    /// The matrix type.
    pub use Matrix3 as Matrix;

    /// An RGB color, each channel being expected in `[0, 1]`.
    pub type Color = Vector3<Real>;
}

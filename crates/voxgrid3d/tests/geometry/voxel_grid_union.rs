use voxgrid3d::bounding_volume::Aabb;
use voxgrid3d::math::{Point, Real};
use voxgrid3d::shape::{PointCloud, VoxelGrid};

fn random_cloud(seed: u64, num_points: usize) -> PointCloud {
    let mut rng = oorandom::Rand32::new(seed);
    let mut rand = move || rng.rand_float() as Real * 10.0;
    PointCloud::new(
        (0..num_points)
            .map(|_| Point::new(rand(), rand(), rand()))
            .collect(),
    )
}

#[test]
fn union_with_itself_is_idempotent() {
    let grid = VoxelGrid::from_point_cloud(&random_cloud(0, 500), 0.8).unwrap();
    let sum = (&grid + &grid).unwrap();

    assert_eq!(sum, grid);

    let mut sum = grid.clone();
    sum += &grid;
    assert_eq!(sum.sorted_voxels(), grid.sorted_voxels());
}

#[test]
fn bounded_grids_can_be_merged() {
    let bounds = Aabb::new(Point::origin(), Point::new(10.0, 10.0, 10.0));
    let a = VoxelGrid::from_point_cloud_within_bounds(&random_cloud(1, 200), 1.0, &bounds)
        .unwrap();
    let b = VoxelGrid::from_point_cloud_within_bounds(&random_cloud(2, 200), 1.0, &bounds)
        .unwrap();
    let ab = (&a + &b).unwrap();

    assert!(ab.len() <= a.len() + b.len());
    assert!(a.keys().chain(b.keys()).all(|key| ab.contains_key(key)));
    assert!(ab.keys().all(|key| a.contains_key(key) || b.contains_key(key)));
}

#[test]
fn grids_voxelized_from_different_clouds_are_incompatible() {
    // Each grid is anchored at the minimum corner of its own cloud.
    let a = VoxelGrid::from_point_cloud(&random_cloud(3, 10), 1.0).unwrap();
    let b = VoxelGrid::from_point_cloud(&random_cloud(4, 10), 1.0).unwrap();

    let err = (a + b).unwrap_err();
    assert!(err.is_incompatible_grid());
}

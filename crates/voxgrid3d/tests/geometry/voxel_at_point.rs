use voxgrid3d::math::{Point, Real};
use voxgrid3d::shape::{PointCloud, VoxelGrid, VoxelGridError, VoxelKey};

#[test]
fn voxel_center_is_within_half_a_voxel_of_the_point() {
    let mut rng = oorandom::Rand32::new(42);
    let mut rand = move |scale: Real| (rng.rand_float() as Real - 0.5) * scale;

    for _ in 0..100 {
        let origin = Point::new(rand(20.0), rand(20.0), rand(20.0));
        let voxel_size = 0.1 + rand(1.0).abs() * 2.0;
        let grid = VoxelGrid::new(origin, voxel_size).unwrap();

        for _ in 0..100 {
            let pt = Point::new(rand(100.0), rand(100.0), rand(100.0));
            let key = grid.voxel_at_point(pt).unwrap();
            assert_eq!(Some(key), grid.voxel_at_point(pt));

            let center = grid.voxel_center(key);
            for i in 0..3 {
                assert!(
                    (center[i] - pt[i]).abs() <= voxel_size * 0.5 + 1.0e-3,
                    "point {pt} maps to voxel {key} centered at {center}"
                );
            }
        }
    }
}

#[test]
fn voxel_at_point_doesnt_depend_on_occupancy() {
    let pt = Point::new(2.3, -0.7, 10.0);
    let empty = VoxelGrid::new(Point::origin(), 0.5).unwrap();
    let mut occupied = empty.clone();
    let _ = occupied.insert(voxgrid3d::shape::Voxel::new(empty.voxel_at_point(pt).unwrap()));

    assert_eq!(empty.voxel_at_point(pt), occupied.voxel_at_point(pt));
    assert!(!empty.contains_point(pt));
    assert!(occupied.contains_point(pt));
    assert_eq!(
        occupied.check_if_included(&[pt, Point::origin()]),
        vec![true, false]
    );
}

#[test]
fn far_away_points_have_no_voxel() {
    let grid = VoxelGrid::new(Point::origin(), 1.0).unwrap();

    assert_eq!(grid.voxel_at_point(Point::new(3.0e9, 0.5, 0.5)), None);
    assert_eq!(grid.voxel_at_point(Point::new(0.5, -3.0e9, 0.5)), None);
    assert_eq!(grid.voxel_at_point(Point::new(0.5, 0.5, Real::NAN)), None);
    assert!(!grid.contains_point(Point::new(3.0e9, 0.5, 0.5)));
    assert_eq!(
        grid.voxel_at_point(Point::new(-1.0e9, 1.0e9, 0.5)),
        Some(VoxelKey::new(-1_000_000_000, 1_000_000_000, 0))
    );
}

#[test]
fn clouds_wider_than_the_key_range_are_rejected() {
    let cloud = PointCloud::new(vec![
        Point::origin(),
        Point::new(3.0e9, 0.0, 0.0),
        Point::new(4.0e9, 0.0, 0.0),
    ]);

    assert!(matches!(
        VoxelGrid::from_point_cloud(&cloud, 1.0),
        Err(VoxelGridError::PointOutOfRange(_))
    ));
    // The same cloud fits with voxels large enough.
    assert_eq!(VoxelGrid::from_point_cloud(&cloud, 1.0e3).unwrap().len(), 3);
}

use approx::assert_relative_eq;
use voxgrid3d::math::{Color, Point};
use voxgrid3d::shape::{PointCloud, Voxel, VoxelGrid, VoxelGridError, VoxelKey};

#[test]
fn single_point_gives_a_single_voxel() {
    let color = Color::new(0.25, 0.5, 0.75);
    let cloud = PointCloud::with_colors(vec![Point::new(3.0, -2.0, 7.5)], vec![color]).unwrap();
    let grid = VoxelGrid::from_point_cloud(&cloud, 0.3).unwrap();

    assert_eq!(grid.origin(), Point::new(3.0, -2.0, 7.5));
    assert_eq!(
        grid.sorted_voxels(),
        vec![Voxel::with_color(VoxelKey::new(0, 0, 0), color)]
    );
    assert!(grid.has_colors());
}

#[test]
fn points_sharing_a_voxel_average_their_colors() {
    let cloud = PointCloud::with_colors(
        vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(0.1, 0.0, 0.0),
            Point::new(5.0, 5.0, 5.0),
        ],
        vec![
            Color::new(1.0, 0.0, 0.0),
            Color::new(0.0, 1.0, 0.0),
            Color::new(0.0, 0.0, 1.0),
        ],
    )
    .unwrap();
    let grid = VoxelGrid::from_point_cloud(&cloud, 1.0).unwrap();
    let voxels = grid.sorted_voxels();

    assert_eq!(voxels.len(), 2);
    assert_eq!(voxels[0].key, VoxelKey::new(0, 0, 0));
    assert_relative_eq!(voxels[0].color.unwrap(), Color::new(0.5, 0.5, 0.0));
    assert_eq!(voxels[1].key, VoxelKey::new(5, 5, 5));
    assert_relative_eq!(voxels[1].color.unwrap(), Color::new(0.0, 0.0, 1.0));
}

#[test]
fn empty_cloud_gives_an_empty_grid() {
    let grid = VoxelGrid::from_point_cloud(&PointCloud::default(), 1.0).unwrap();

    assert!(!grid.has_voxels());
    assert!(!grid.has_colors());
    assert_eq!(grid.origin(), Point::origin());
    assert!(grid.aabb().is_none());
    assert!(grid.center().is_none());
}

#[test]
fn uncolored_clouds_give_uncolored_voxels() {
    let cloud = PointCloud::new(vec![Point::new(0.0, 0.0, 0.0), Point::new(2.0, 0.0, 0.0)]);
    let grid = VoxelGrid::from_point_cloud(&cloud, 1.0).unwrap();

    assert_eq!(grid.len(), 2);
    assert!(grid.has_voxels());
    assert!(!grid.has_colors());
    assert!(grid.voxels().all(|voxel| voxel.color.is_none()));
}

#[test]
fn invalid_inputs_are_rejected() {
    let cloud = PointCloud::new(vec![Point::origin()]);

    assert_eq!(
        VoxelGrid::from_point_cloud(&cloud, -0.5),
        Err(VoxelGridError::InvalidVoxelSize(-0.5))
    );
    assert_eq!(
        PointCloud::with_colors(vec![Point::origin()], vec![Color::zeros(); 2]),
        Err(VoxelGridError::ColorCountMismatch {
            points: 1,
            colors: 2
        })
    );
}

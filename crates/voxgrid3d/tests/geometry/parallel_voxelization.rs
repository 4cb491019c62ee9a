use voxgrid3d::math::{Color, Point, Real};
use voxgrid3d::shape::{PointCloud, VoxelGrid};

#[test]
fn parallel_and_sequential_voxelizations_agree() {
    let n = 20_000;
    let points: Vec<_> = (0..n)
        .map(|i| {
            let t = i as Real * 0.01;
            Point::new(t.sin(), t.cos(), t * 0.1) * 5.0
        })
        .collect();
    let colors = (0..n).map(|i| Color::repeat((i % 3) as Real * 0.5)).collect();
    let cloud = PointCloud::with_colors(points, colors).unwrap();

    let seq = VoxelGrid::from_point_cloud(&cloud, 0.25).unwrap();
    let par = VoxelGrid::par_from_point_cloud(&cloud, 0.25).unwrap();

    assert_eq!(par.len(), seq.len());
    for (a, b) in seq.sorted_voxels().iter().zip(par.sorted_voxels().iter()) {
        assert_eq!(a.key, b.key);
        approx::assert_relative_eq!(a.color.unwrap(), b.color.unwrap(), epsilon = 1.0e-4);
    }
}

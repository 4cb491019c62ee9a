use voxgrid3d::math::{Color, Point, Real};
use voxgrid3d::partitioning::{Octree, TraversalAction};
use voxgrid3d::shape::{PointCloud, VoxelGrid, VoxelKey};

fn lattice(n: i32, spacing: Real) -> PointCloud {
    let mut points = vec![];
    let mut colors = vec![];

    for i in 0..n {
        for j in 0..n {
            for k in 0..n {
                points.push(Point::new(i as Real, j as Real, k as Real) * spacing);
                colors.push(Color::new(i as Real, j as Real, k as Real) / n as Real);
            }
        }
    }

    PointCloud::with_colors(points, colors).unwrap()
}

fn keys(grid: &VoxelGrid) -> Vec<VoxelKey> {
    grid.sorted_voxels().iter().map(|voxel| voxel.key).collect()
}

#[test]
fn lattice_survives_octree_round_trip() {
    let grid = VoxelGrid::from_point_cloud(&lattice(5, 0.25), 0.25).unwrap();
    assert_eq!(grid.len(), 125);

    // 5 voxels per axis need a root spanning 8 voxels, i.e., 3 levels.
    for max_depth in [3, 4, 10] {
        let octree = grid.to_octree(max_depth).unwrap();
        assert_eq!(octree.max_depth(), 3);
        octree.assert_well_formed();

        let back = VoxelGrid::from_octree(&octree).unwrap();
        assert_eq!(back.origin(), grid.origin());
        assert_eq!(back.voxel_size(), grid.voxel_size());
        assert_eq!(keys(&back), keys(&grid));
        assert_eq!(back, grid);
    }
}

#[test]
fn shallow_octrees_lose_resolution() {
    let grid = VoxelGrid::from_point_cloud(&lattice(4, 1.0), 1.0).unwrap();
    let octree = grid.to_octree(1).unwrap();
    let back = VoxelGrid::from_octree(&octree).unwrap();

    assert_eq!(back.voxel_size(), 2.0);
    assert_eq!(back.len(), 8);
    assert!(back.has_colors());

    // Every coarse voxel covers 2×2×2 lattice points.
    let first = back.get(VoxelKey::new(0, 0, 0)).unwrap();
    approx::assert_relative_eq!(first.color.unwrap(), Color::repeat(0.125));
}

#[test]
fn octrees_of_random_clouds_are_well_formed() {
    let mut rng = oorandom::Rand32::new(7);

    for num_points in [1, 2, 10, 100, 1000] {
        let points = (0..num_points)
            .map(|_| {
                Point::new(
                    rng.rand_float() as Real,
                    rng.rand_float() as Real,
                    rng.rand_float() as Real,
                ) * 20.0
                    - voxgrid3d::math::Vector::repeat(10.0)
            })
            .collect();
        let grid = VoxelGrid::from_point_cloud(&PointCloud::new(points), 0.5).unwrap();

        for max_depth in 0..8 {
            let octree = grid.to_octree(max_depth).unwrap();
            octree.assert_well_formed();

            assert!(octree.max_depth() <= max_depth);
            assert!(octree.depth() <= octree.max_depth());
            assert_eq!(octree.num_voxels(), grid.len());

            for voxel in grid.voxels() {
                let center = grid.voxel_center(voxel.key);
                let leaf = octree.locate_leaf(center).unwrap();
                assert!(octree
                    .leaf_voxels(leaf.id)
                    .iter()
                    .any(|stored| stored.center == center));
            }

            let mut num_voxels = 0;
            let _ = octree.traverse(|_, node| {
                num_voxels += node.num_voxels();
                TraversalAction::Continue
            });
            assert_eq!(num_voxels, grid.len());
        }
    }
}

#[test]
fn invalid_depths_are_rejected() {
    let grid = VoxelGrid::from_point_cloud(&lattice(2, 1.0), 1.0).unwrap();
    let err = grid.to_octree(Octree::MAX_DEPTH + 1).unwrap_err();
    assert!(!err.is_incompatible_grid());
    assert!(!Octree::empty(Point::origin(), 1.0).is_point_in_bound(Point::new(2.0, 0.0, 0.0)));
}

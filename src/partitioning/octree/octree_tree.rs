use crate::bounding_volume::Aabb;
use crate::math::{Color, Point, Real, Vector, NUM_OCTANTS};
use core::ops::Range;

/// A voxel stored in an octree leaf.
///
/// Octrees don’t refer to grid keys: each stored voxel is described by its world-space
/// center, which makes the octree independent from the grid it was built from.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct OctreeVoxel {
    /// The world-space center of the voxel.
    pub center: Point<Real>,
    /// The color of the voxel, if any.
    pub color: Option<Color>,
}

/// A node of an [`Octree`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum OctreeNode {
    /// A node subdivided into exactly eight children.
    ///
    /// The children are stored contiguously: the child covering octant `i` (see
    /// [`Aabb::octant`]) has the index `first_child + i`.
    Internal {
        /// Index of the first child of this node.
        first_child: u32,
    },
    /// A node that is not subdivided.
    Leaf {
        /// Index of the first voxel of this leaf in [`Octree::voxels`].
        first_voxel: u32,
        /// Number of voxels stored in this leaf.
        num_voxels: u32,
    },
}

impl OctreeNode {
    pub(super) const EMPTY_LEAF: Self = OctreeNode::Leaf {
        first_voxel: 0,
        num_voxels: 0,
    };

    /// Is this node a leaf?
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// The indices of the children of this node, or `None` for a leaf.
    #[inline]
    pub fn children(&self) -> Option<Range<u32>> {
        match *self {
            Self::Internal { first_child } => {
                Some(first_child..first_child + NUM_OCTANTS as u32)
            }
            Self::Leaf { .. } => None,
        }
    }

    /// The range of [`Octree::voxels`] stored in this node, or `None` for an internal node.
    #[inline]
    pub fn voxel_range(&self) -> Option<Range<usize>> {
        match *self {
            Self::Leaf {
                first_voxel,
                num_voxels,
            } => Some(first_voxel as usize..(first_voxel + num_voxels) as usize),
            Self::Internal { .. } => None,
        }
    }

    /// The number of voxels stored in this node (always `0` for internal nodes).
    #[inline]
    pub fn num_voxels(&self) -> usize {
        self.voxel_range().map(|range| range.len()).unwrap_or(0)
    }
}

/// Placement of a node inside of its octree.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OctreeNodeInfo {
    /// The index of the node in the octree.
    pub id: u32,
    /// The depth of the node; the root has depth `0`.
    pub depth: usize,
    /// The integer coordinates of the node among all the cells of the same depth.
    pub coords: Point<u32>,
    /// The cube covered by the node.
    pub aabb: Aabb,
}

/// An immutable octree partitioning the occupied cells of a voxel grid.
///
/// The root covers the cube `[origin, origin + size]`. Every internal node has exactly eight
/// children, each covering one octant of their parent, so a node at depth `d` is a cube with
/// an edge length of `size / 2^d`. Leaves store the voxels whose center fall inside of them.
///
/// Octrees are built with [`VoxelGrid::to_octree`](crate::shape::VoxelGrid::to_octree) and
/// never modified afterward. Construction stops subdividing a node once it holds at most one
/// voxel or once it reaches [`Octree::max_depth`].
///
/// # Example
///
/// ```
/// # #[cfg(all(feature = "dim3", feature = "f32"))] {
/// use voxgrid3d::math::Point;
/// use voxgrid3d::shape::{PointCloud, VoxelGrid};
///
/// let cloud = PointCloud::new(vec![
///     Point::new(0.0, 0.0, 0.0),
///     Point::new(1.0, 0.0, 0.0),
///     Point::new(3.0, 3.0, 3.0),
/// ]);
/// let grid = VoxelGrid::from_point_cloud(&cloud, 1.0).unwrap();
/// let octree = grid.to_octree(8).unwrap();
///
/// // The root is the 4×4×4 cube covering all the voxels.
/// assert_eq!(octree.size(), 4.0);
/// // Separating the two adjacent voxels requires going down to unit cells.
/// assert_eq!(octree.max_depth(), 2);
/// assert_eq!(octree.num_voxels(), 3);
///
/// let leaf = octree.locate_leaf(Point::new(3.5, 3.5, 3.5)).unwrap();
/// assert_eq!(octree.leaf_voxels(leaf.id).len(), 1);
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Octree {
    pub(super) origin: Point<Real>,
    pub(super) size: Real,
    pub(super) max_depth: usize,
    pub(super) nodes: Vec<OctreeNode>,
    pub(super) voxels: Vec<OctreeVoxel>,
}

impl Octree {
    /// The largest depth an octree can be built with.
    pub const MAX_DEPTH: usize = 30;

    /// An octree without any voxel, with a single empty leaf covering the given cube.
    pub fn empty(origin: Point<Real>, size: Real) -> Self {
        Self {
            origin,
            size,
            max_depth: 0,
            nodes: vec![OctreeNode::EMPTY_LEAF],
            voxels: vec![],
        }
    }

    /// The minimum corner of the cube covered by the root.
    #[inline]
    pub fn origin(&self) -> Point<Real> {
        self.origin
    }

    /// The edge length of the cube covered by the root.
    #[inline]
    pub fn size(&self) -> Real {
        self.size
    }

    /// The cube covered by the root.
    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::cube(self.origin, self.size)
    }

    /// The depth at which construction stops subdividing nodes.
    ///
    /// This can be smaller than the depth requested at construction: it never exceeds the
    /// depth where cells become as small as the voxels of the source grid.
    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// The edge length of the cells at [`Octree::max_depth`].
    #[inline]
    pub fn finest_cell_size(&self) -> Real {
        self.cell_size(self.max_depth)
    }

    /// The edge length of the nodes at the given depth.
    #[inline]
    pub fn cell_size(&self, depth: usize) -> Real {
        self.size / (1u64 << depth) as Real
    }

    /// The depth of the deepest leaf.
    pub fn depth(&self) -> usize {
        self.leaves().map(|(info, _)| info.depth).max().unwrap_or(0)
    }

    /// The total number of nodes, internal nodes included.
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// The number of leaves.
    pub fn num_leaves(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_leaf()).count()
    }

    /// The number of voxels stored in all the leaves.
    #[inline]
    pub fn num_voxels(&self) -> usize {
        self.voxels.len()
    }

    /// Does this octree store no voxel at all?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// The root node.
    #[inline]
    pub fn root(&self) -> &OctreeNode {
        &self.nodes[0]
    }

    /// The placement of the root node.
    pub fn root_info(&self) -> OctreeNodeInfo {
        OctreeNodeInfo {
            id: 0,
            depth: 0,
            coords: Point::origin(),
            aabb: self.aabb(),
        }
    }

    /// The node with the given index.
    #[inline]
    pub fn node(&self, id: u32) -> Option<&OctreeNode> {
        self.nodes.get(id as usize)
    }

    /// All the nodes, the root being at index `0`.
    #[inline]
    pub fn nodes(&self) -> &[OctreeNode] {
        &self.nodes
    }

    /// All the voxels stored in the leaves, leaf after leaf in depth-first order.
    #[inline]
    pub fn voxels(&self) -> &[OctreeVoxel] {
        &self.voxels
    }

    /// The voxels stored in the node with the given index.
    ///
    /// This is empty for internal nodes and for invalid indices.
    pub fn leaf_voxels(&self, id: u32) -> &[OctreeVoxel] {
        self.node(id)
            .and_then(OctreeNode::voxel_range)
            .and_then(|range| self.voxels.get(range))
            .unwrap_or(&[])
    }

    /// The placement of the `octant`-th child of the internal node described by `parent`.
    pub(super) fn child_info(
        &self,
        parent: &OctreeNodeInfo,
        first_child: u32,
        octant: usize,
    ) -> OctreeNodeInfo {
        let depth = parent.depth + 1;
        let offset = Vector::new(
            (octant & 1) as u32,
            ((octant >> 1) & 1) as u32,
            ((octant >> 2) & 1) as u32,
        );
        let coords = parent.coords * 2 + offset;
        let cell_size = self.cell_size(depth);

        OctreeNodeInfo {
            id: first_child + octant as u32,
            depth,
            coords,
            aabb: Aabb::cube(self.origin + coords.coords.cast::<Real>() * cell_size, cell_size),
        }
    }

    /// Is the point inside of the cube covered by the root?
    #[inline]
    pub fn is_point_in_bound(&self, point: Point<Real>) -> bool {
        self.aabb().contains_local_point(&point)
    }

    /// Finds the leaf containing the given point.
    ///
    /// Returns `None` if the point is outside of the root cube. Points lying exactly on the
    /// boundary between two nodes are attributed to the node with the largest coordinates.
    pub fn locate_leaf(&self, point: Point<Real>) -> Option<OctreeNodeInfo> {
        if !self.is_point_in_bound(point) {
            return None;
        }

        let mut info = self.root_info();

        while let OctreeNode::Internal { first_child } = self.nodes[info.id as usize] {
            let octant = info.aabb.octant_containing(&point);
            info = self.child_info(&info, first_child, octant);
        }

        Some(info)
    }
}

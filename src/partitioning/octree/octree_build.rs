use super::{Octree, OctreeNode, OctreeVoxel};
use crate::math::{Real, NUM_OCTANTS};
use crate::shape::{VoxelGrid, VoxelGridError, VoxelKey};

/// A voxel waiting to be inserted, with its key relative to the root’s minimum corner.
#[derive(Copy, Clone, Debug)]
struct BuildEntry {
    local: [u32; 3],
    voxel: OctreeVoxel,
}

impl BuildEntry {
    /// The child of a node at depth `levels - shift - 1` containing this entry.
    #[inline]
    fn octant(&self, shift: usize) -> usize {
        (0..3).fold(0, |octant, i| {
            octant | ((((self.local[i] >> shift) & 1) as usize) << i)
        })
    }
}

impl Octree {
    /// Builds an octree indexing all the occupied voxels of `grid`.
    ///
    /// The root is the smallest cube aligned with the grid, with an edge length of
    /// `voxel_size * 2^L` for some integer `L`, covering every occupied voxel. Its minimum corner
    /// is the minimum corner of the voxel with the smallest coordinates along each axis.
    ///
    /// Nodes are subdivided until they hold at most one voxel, or until they reach the depth
    /// `min(max_depth, L)`: deeper nodes would be smaller than the voxels themselves. Leaves at
    /// that depth may therefore contain several voxels when `max_depth < L`.
    ///
    /// Fails with [`VoxelGridError::InvalidMaxDepth`] if `max_depth` exceeds
    /// [`Octree::MAX_DEPTH`]. An empty grid yields an empty octree made of a single leaf.
    pub fn from_voxel_grid(grid: &VoxelGrid, max_depth: usize) -> Result<Self, VoxelGridError> {
        if max_depth > Self::MAX_DEPTH {
            return Err(VoxelGridError::InvalidMaxDepth {
                max_depth,
                limit: Self::MAX_DEPTH,
            });
        }

        let Some([mins, maxs]) = grid.key_range() else {
            return Ok(Self::empty(grid.origin(), grid.voxel_size()));
        };

        let extent = (0..3)
            .map(|i| (maxs.to_point()[i] as i64 - mins.to_point()[i] as i64 + 1) as u64)
            .max()
            .unwrap_or(1);
        let levels = extent.next_power_of_two().trailing_zeros() as usize;
        let effective_depth = max_depth.min(levels);

        let mut entries: Vec<_> = grid
            .voxels()
            .map(|voxel| BuildEntry {
                local: local_coords(voxel.key, mins),
                voxel: OctreeVoxel {
                    center: grid.voxel_center(voxel.key),
                    color: voxel.color,
                },
            })
            .collect();
        // Start from a deterministic order so the stored voxels don’t depend on the grid’s
        // hash-map iteration order.
        entries.sort_unstable_by_key(|entry| entry.local);

        let mut result = Octree {
            origin: grid.voxel_aabb(mins).mins,
            size: grid.voxel_size() * (1u64 << levels) as Real,
            max_depth: effective_depth,
            nodes: vec![OctreeNode::EMPTY_LEAF],
            voxels: Vec::with_capacity(entries.len()),
        };
        result.build_recursive(0, 0, levels, &mut entries);

        log::debug!(
            "Built an octree with {} nodes ({} leaves) and depth {} from {} voxels.",
            result.num_nodes(),
            result.num_leaves(),
            result.max_depth,
            result.num_voxels()
        );

        Ok(result)
    }

    fn build_recursive(
        &mut self,
        node_id: usize,
        depth: usize,
        levels: usize,
        entries: &mut [BuildEntry],
    ) {
        if entries.len() <= 1 || depth == self.max_depth {
            self.nodes[node_id] = OctreeNode::Leaf {
                first_voxel: self.voxels.len() as u32,
                num_voxels: entries.len() as u32,
            };
            self.voxels.extend(entries.iter().map(|entry| entry.voxel));
            return;
        }

        let shift = levels - depth - 1;
        // Stable sort: entries of the same octant keep their relative order.
        entries.sort_by_key(|entry| entry.octant(shift));

        let first_child = self.nodes.len();
        self.nodes[node_id] = OctreeNode::Internal {
            first_child: first_child as u32,
        };
        self.nodes
            .extend(core::iter::repeat_n(OctreeNode::EMPTY_LEAF, NUM_OCTANTS));

        let mut start = 0;
        for octant in 0..NUM_OCTANTS {
            let len = entries[start..]
                .iter()
                .take_while(|entry| entry.octant(shift) == octant)
                .count();
            self.build_recursive(
                first_child + octant,
                depth + 1,
                levels,
                &mut entries[start..start + len],
            );
            start += len;
        }
    }
}

/// The coordinates of `key` relative to `mins`, which must be component-wise smaller.
fn local_coords(key: VoxelKey, mins: VoxelKey) -> [u32; 3] {
    let (key, mins) = (key.to_point(), mins.to_point());
    core::array::from_fn(|i| (key[i] as i64 - mins[i] as i64) as u32)
}

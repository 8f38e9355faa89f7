//! Edge detection on the node grid.
//!
//! A chunk is a beach when any of its four cardinal node-grid neighbors is a
//! hole or lies outside the grid. This follows node adjacency, not distance to
//! the circular shore, so a chunk next to an interior hole also counts.

use super::OverwritePolicy;
use crate::chunk::{ChunkKind, NodeCoord};
use crate::chunk_map::ChunkMap;

/// Grid offsets of the four cardinal neighbors.
const NEIGHBORS: [(i32, i32); 4] = [(0, 1), (1, 0), (-1, 0), (0, -1)];

/// Tags every edge chunk [`ChunkKind::Beach`], subject to `policy`.
///
/// Returns the number of chunks that became beach.
pub fn classify_beach(map: &mut ChunkMap, policy: OverwritePolicy) -> usize {
    let edges: Vec<NodeCoord> = map
        .iter()
        .map(|chunk| chunk.grid_pos())
        .filter(|&coord| {
            NEIGHBORS
                .iter()
                .any(|&(di, dj)| map.is_hole(coord.offset(di, dj)))
        })
        .collect();

    let mut tagged = 0;
    for coord in edges {
        if let Some(chunk) = map.get_mut(coord)
            && policy.apply(chunk, ChunkKind::Beach)
        {
            tagged += 1;
        }
    }
    tagged
}

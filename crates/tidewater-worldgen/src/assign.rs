//! Region assignment: every land cell joins the chunk of its nearest anchor.
//!
//! The default search only looks at the 3×3 block of node slots around the
//! cell's own slot. That is a bounded approximation of a Voronoi diagram, valid
//! because each anchor is confined to its own footprint; it can misassign cells
//! near a slot edge when anchors sit close to their footprint corners.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::chunk::{Chunk, NodeCoord};
use crate::chunk_map::ChunkMap;
use crate::error::ChunkError;
use crate::params::WorldParams;
use crate::sampler::{NodeSample, random_debug_color};

/// How far the assigner looks for a cell's nearest anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NeighborSearch {
    /// 3×3 block of slots around the cell's slot, falling back to a full scan
    /// when that block holds no anchor.
    #[default]
    Window3x3,
    /// Every accepted anchor. Exact, and O(cells × anchors).
    Exhaustive,
}

/// Outcome of one nearest-anchor search.
struct Lookup {
    nearest: Option<NodeCoord>,
    /// The 3×3 window was empty and a full scan ran instead.
    used_fallback: bool,
}

/// Builds the chunk partition from a node sample.
pub struct RegionAssigner<'a> {
    params: &'a WorldParams,
    search: NeighborSearch,
}

fn distance_sq(a: IVec2, b: IVec2) -> i64 {
    let d = (a - b).as_i64vec2();
    d.x * d.x + d.y * d.y
}

impl<'a> RegionAssigner<'a> {
    /// Creates an assigner. `params` should already be validated.
    pub fn new(params: &'a WorldParams, search: NeighborSearch) -> Self {
        Self { params, search }
    }

    /// Node slot whose footprint contains `cell`.
    pub fn coarse_coord(&self, cell: IVec2) -> NodeCoord {
        let tpn = self.params.tiles_per_node();
        let local = cell - IVec2::splat(self.params.map_padding);
        NodeCoord::new(local.x.div_euclid(tpn), local.y.div_euclid(tpn))
    }

    /// Nearest anchor to `cell`, honoring the configured search mode.
    ///
    /// Ties keep the first candidate in scan order. Returns `None` only when
    /// the sample has no anchors at all.
    pub fn nearest_anchor(&self, sample: &NodeSample, cell: IVec2) -> Option<NodeCoord> {
        self.lookup(sample, cell).nearest
    }

    fn lookup(&self, sample: &NodeSample, cell: IVec2) -> Lookup {
        match self.search {
            NeighborSearch::Window3x3 => match self.nearest_in_window(sample, cell) {
                Some(coord) => Lookup {
                    nearest: Some(coord),
                    used_fallback: false,
                },
                None => Lookup {
                    nearest: nearest_exhaustive(sample, cell),
                    used_fallback: true,
                },
            },
            NeighborSearch::Exhaustive => Lookup {
                nearest: nearest_exhaustive(sample, cell),
                used_fallback: false,
            },
        }
    }

    fn nearest_in_window(&self, sample: &NodeSample, cell: IVec2) -> Option<NodeCoord> {
        let home = self.coarse_coord(cell);
        let mut best: Option<(i64, NodeCoord)> = None;
        for di in -1..=1 {
            for dj in -1..=1 {
                let coord = home.offset(di, dj);
                let Some(anchor) = sample.get(coord) else {
                    continue;
                };
                let d = distance_sq(cell, anchor);
                if best.is_none_or(|(best_d, _)| d < best_d) {
                    best = Some((d, coord));
                }
            }
        }
        best.map(|(_, coord)| coord)
    }

    /// Creates one chunk per accepted anchor and hands every land cell to its
    /// nearest one. Water cells stay unowned.
    ///
    /// A chunk that ends up with no cells (its anchor sat outside the circle
    /// and every nearby land cell was closer to another anchor) is dropped
    /// back to a hole, so every realized chunk owns at least one cell.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError`] if a cell is routed to a slot without a chunk.
    pub fn assign(
        &self,
        sample: &NodeSample,
        color_rng: &mut impl Rng,
    ) -> Result<ChunkMap, ChunkError> {
        let extent = self.params.world_extent();
        let mut map = ChunkMap::new(sample.grid_size(), extent);

        for (coord, anchor) in sample.iter() {
            map.insert(Chunk::new(coord, anchor, random_debug_color(color_rng)));
        }

        let mut land_cells = 0usize;
        let mut fallback_cells = 0usize;
        for x in 0..extent {
            for y in 0..extent {
                let cell = IVec2::new(x, y);
                if !self.params.is_land(cell) {
                    continue;
                }
                let lookup = self.lookup(sample, cell);
                fallback_cells += usize::from(lookup.used_fallback);
                let Some(coord) = lookup.nearest else {
                    continue;
                };
                map.assign_cell(coord, cell)?;
                land_cells += 1;
            }
        }

        let empty: Vec<NodeCoord> = map
            .iter()
            .filter(|chunk| chunk.size() == 0)
            .map(Chunk::grid_pos)
            .collect();
        for coord in &empty {
            map.remove(*coord);
        }

        if fallback_cells > 0 {
            tracing::warn!(
                fallback_cells,
                "3x3 window held no anchor for some cells; used a full scan"
            );
        }
        tracing::debug!(
            chunks = map.realized_count(),
            land_cells,
            dropped_empty = empty.len(),
            search = ?self.search,
            "Assigned cells to chunks"
        );
        Ok(map)
    }
}

fn nearest_exhaustive(sample: &NodeSample, cell: IVec2) -> Option<NodeCoord> {
    let mut best: Option<(i64, NodeCoord)> = None;
    for (coord, anchor) in sample.iter() {
        let d = distance_sq(cell, anchor);
        if best.is_none_or(|(best_d, _)| d < best_d) {
            best = Some((d, coord));
        }
    }
    best.map(|(_, coord)| coord)
}

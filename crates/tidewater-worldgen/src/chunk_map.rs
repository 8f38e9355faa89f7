//! The chunk map: an N×N arena of optional chunks plus a cell ownership raster.
//!
//! Slots are stored row-major over `(i, j)` with `i` as the outer index, which
//! is also the order every pass scans in. An empty slot is a hole: its node was
//! rejected by the boundary test and no region exists there.

use glam::IVec2;

use crate::chunk::{Chunk, ChunkKind, NodeCoord};
use crate::error::ChunkError;

/// Sparse N×N table of chunks owned by a single generation run.
///
/// Outside the generator the map is read-only:
///
/// ```compile_fail
/// use tidewater_worldgen::{ChunkKind, ChunkMap, NodeCoord};
///
/// let mut map = ChunkMap::new(1, 3);
/// if let Some(chunk) = map.get_mut(NodeCoord::new(0, 0)) {
///     chunk.define(ChunkKind::Base);
/// }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ChunkMap {
    grid_size: i32,
    world_extent: i32,
    slots: Vec<Option<Chunk>>,
    /// Slot index of the owning chunk, per world cell. `None` is water.
    owners: Vec<Option<u32>>,
}

impl ChunkMap {
    /// Creates an all-hole map covering a `world_extent`² cell grid.
    pub fn new(grid_size: i32, world_extent: i32) -> Self {
        let slot_count = (grid_size.max(0) as usize).pow(2);
        let cell_count = (world_extent.max(0) as usize).pow(2);
        Self {
            grid_size,
            world_extent,
            slots: vec![None; slot_count],
            owners: vec![None; cell_count],
        }
    }

    /// Side length of the node grid.
    pub fn grid_size(&self) -> i32 {
        self.grid_size
    }

    /// Side length of the cell grid.
    pub fn world_extent(&self) -> i32 {
        self.world_extent
    }

    /// Whether `coord` addresses a slot of the grid.
    pub fn in_bounds(&self, coord: NodeCoord) -> bool {
        (0..self.grid_size).contains(&coord.i) && (0..self.grid_size).contains(&coord.j)
    }

    fn slot_index(&self, coord: NodeCoord) -> Option<usize> {
        self.in_bounds(coord)
            .then(|| (coord.i * self.grid_size + coord.j) as usize)
    }

    fn cell_index(&self, cell: IVec2) -> Option<usize> {
        let range = 0..self.world_extent;
        (range.contains(&cell.x) && range.contains(&cell.y))
            .then(|| (cell.x * self.world_extent + cell.y) as usize)
    }

    /// The chunk at `coord`, or `None` for holes and out-of-range coordinates.
    pub fn get(&self, coord: NodeCoord) -> Option<&Chunk> {
        self.slot_index(coord).and_then(|idx| self.slots[idx].as_ref())
    }

    /// Mutable access to the chunk at `coord`.
    pub(crate) fn get_mut(&mut self, coord: NodeCoord) -> Option<&mut Chunk> {
        self.slot_index(coord)
            .and_then(|idx| self.slots[idx].as_mut())
    }

    /// Out-of-range or empty slots both count as holes.
    pub fn is_hole(&self, coord: NodeCoord) -> bool {
        self.get(coord).is_none()
    }

    /// Stores a chunk at its own grid position, replacing any previous one.
    /// Chunks outside the grid are dropped.
    pub(crate) fn insert(&mut self, chunk: Chunk) {
        if let Some(idx) = self.slot_index(chunk.grid_pos()) {
            self.slots[idx] = Some(chunk);
        }
    }

    /// Turns the slot at `coord` back into a hole, returning its chunk.
    pub(crate) fn remove(&mut self, coord: NodeCoord) -> Option<Chunk> {
        let idx = self.slot_index(coord)?;
        self.slots[idx].take()
    }

    /// Gives `cell` to the chunk at `coord` and records the ownership.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::Uninitialized`] when `coord` is a hole, since
    /// there is no container to receive the cell.
    pub(crate) fn assign_cell(&mut self, coord: NodeCoord, cell: IVec2) -> Result<(), ChunkError> {
        let slot = self.slot_index(coord).ok_or(ChunkError::Uninitialized)?;
        let chunk = self.slots[slot]
            .as_mut()
            .ok_or(ChunkError::Uninitialized)?;
        chunk.add_cell(cell)?;
        if let Some(idx) = self.cell_index(cell) {
            self.owners[idx] = Some(slot as u32);
        }
        Ok(())
    }

    /// The chunk owning `cell`, or `None` for water.
    pub fn owner_of(&self, cell: IVec2) -> Option<&Chunk> {
        let idx = self.cell_index(cell)?;
        let slot = self.owners[idx]?;
        self.slots[slot as usize].as_ref()
    }

    /// Every slot in scan order, holes included.
    pub fn slots(&self) -> impl Iterator<Item = (NodeCoord, Option<&Chunk>)> {
        let n = self.grid_size;
        self.slots.iter().enumerate().map(move |(idx, slot)| {
            let idx = idx as i32;
            (NodeCoord::new(idx / n, idx % n), slot.as_ref())
        })
    }

    /// Realized chunks in scan order.
    pub fn iter(&self) -> impl Iterator<Item = &Chunk> {
        self.slots.iter().flatten()
    }

    /// Mutable realized chunks in scan order.
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Chunk> {
        self.slots.iter_mut().flatten()
    }

    /// Number of realized chunks.
    pub fn realized_count(&self) -> usize {
        self.iter().count()
    }

    /// Number of empty slots.
    pub fn hole_count(&self) -> usize {
        self.slots.len() - self.realized_count()
    }

    /// Returns `true` if no chunk was realized.
    pub fn is_empty(&self) -> bool {
        self.realized_count() == 0
    }

    /// Number of chunks currently classified as `kind`.
    pub fn count_kind(&self, kind: ChunkKind) -> usize {
        self.iter().filter(|c| c.kind() == kind).count()
    }

    /// Grid position of the chunk whose centroid is closest to `point`,
    /// considering only chunks accepted by `eligible`.
    ///
    /// Linear scan; ties go to the first chunk in scan order.
    pub fn nearest_by_centroid(
        &self,
        point: IVec2,
        mut eligible: impl FnMut(&Chunk) -> bool,
    ) -> Option<NodeCoord> {
        let mut best: Option<(f64, NodeCoord)> = None;
        for chunk in self.iter() {
            if !eligible(chunk) {
                continue;
            }
            let Some(centroid) = chunk.centroid() else {
                continue;
            };
            let distance = centroid.as_dvec2().distance(point.as_dvec2());
            if best.is_none_or(|(d, _)| distance < d) {
                best = Some((distance, chunk.grid_pos()));
            }
        }
        best.map(|(_, coord)| coord)
    }

    /// Text rendering, one glyph per cell, top row first. Water is `~`.
    pub fn render_ascii(&self) -> String {
        let extent = self.world_extent.max(0);
        let mut out = String::with_capacity(((extent + 1) * extent) as usize);
        for y in (0..extent).rev() {
            for x in 0..extent {
                let glyph = self
                    .owner_of(IVec2::new(x, y))
                    .map_or('~', |chunk| chunk.kind().glyph());
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }
}

//! A chunk: one irregular region of map cells sharing a nearest anchor.
//!
//! Chunks are created during region assignment and afterwards only their
//! [`ChunkKind`] changes, as classification passes run in pipeline order.

use glam::IVec2;
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::error::ChunkError;

/// Classification tag of a chunk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChunkKind {
    /// Default land cover.
    #[default]
    Forest,
    /// Open grassland.
    Plains,
    /// Land bordering the water.
    Beach,
    /// Rocky highland.
    Mountain,
    /// The player base.
    Base,
    /// A camp point of interest.
    Camp,
    /// A chest point of interest.
    Chest,
    /// A den point of interest.
    Den,
}

impl ChunkKind {
    /// Every kind, in declaration order.
    pub const ALL: [ChunkKind; 8] = [
        ChunkKind::Forest,
        ChunkKind::Plains,
        ChunkKind::Beach,
        ChunkKind::Mountain,
        ChunkKind::Base,
        ChunkKind::Camp,
        ChunkKind::Chest,
        ChunkKind::Den,
    ];

    /// Base and POI kinds. These are what the skip-specialized overwrite
    /// policy protects.
    pub fn is_specialized(self) -> bool {
        matches!(
            self,
            ChunkKind::Base | ChunkKind::Camp | ChunkKind::Chest | ChunkKind::Den
        )
    }

    /// Lowercase name for reports.
    pub fn name(self) -> &'static str {
        match self {
            ChunkKind::Forest => "forest",
            ChunkKind::Plains => "plains",
            ChunkKind::Beach => "beach",
            ChunkKind::Mountain => "mountain",
            ChunkKind::Base => "base",
            ChunkKind::Camp => "camp",
            ChunkKind::Chest => "chest",
            ChunkKind::Den => "den",
        }
    }

    /// Single-character glyph used by the ASCII map.
    pub fn glyph(self) -> char {
        match self {
            ChunkKind::Forest => 'f',
            ChunkKind::Plains => '.',
            ChunkKind::Beach => ':',
            ChunkKind::Mountain => '^',
            ChunkKind::Base => 'B',
            ChunkKind::Camp => 'C',
            ChunkKind::Chest => '$',
            ChunkKind::Den => 'D',
        }
    }
}

/// Position of a slot in the node grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeCoord {
    /// Column index (x axis).
    pub i: i32,
    /// Row index (y axis).
    pub j: i32,
}

impl NodeCoord {
    /// Creates a node coordinate.
    pub const fn new(i: i32, j: i32) -> Self {
        Self { i, j }
    }

    /// Returns the coordinate shifted by `(di, dj)`.
    pub fn offset(self, di: i32, dj: i32) -> Self {
        Self {
            i: self.i + di,
            j: self.j + dj,
        }
    }
}

impl std::fmt::Display for NodeCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.i, self.j)
    }
}

/// The four axis-aligned neighbor offsets.
pub const CARDINALS: [IVec2; 4] = [
    IVec2::new(0, 1),
    IVec2::new(1, 0),
    IVec2::new(-1, 0),
    IVec2::new(0, -1),
];

/// The four diagonal neighbor offsets.
pub const DIAGONALS: [IVec2; 4] = [
    IVec2::new(1, 1),
    IVec2::new(1, -1),
    IVec2::new(-1, 1),
    IVec2::new(-1, -1),
];

/// Owned cells: insertion order for deterministic iteration, plus a set for
/// membership tests.
#[derive(Clone, Debug, Default, PartialEq)]
struct CellSet {
    order: Vec<IVec2>,
    members: HashSet<IVec2>,
}

/// Boundary cells of a chunk, split by how they were detected.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Perimeter {
    /// Cells missing two or more cardinal neighbors.
    pub outer: Vec<IVec2>,
    /// Cells missing exactly one diagonal neighbor (and not outer).
    pub inner: Vec<IVec2>,
}

impl Perimeter {
    /// Outer cells followed by inner cells.
    pub fn iter(&self) -> impl Iterator<Item = &IVec2> {
        self.outer.iter().chain(self.inner.iter())
    }

    /// Total number of perimeter cells.
    pub fn len(&self) -> usize {
        self.outer.len() + self.inner.len()
    }

    /// Returns `true` if no cell lies on the perimeter.
    pub fn is_empty(&self) -> bool {
        self.outer.is_empty() && self.inner.is_empty()
    }

    /// Flattens into a single list, outer first.
    pub fn into_vec(self) -> Vec<IVec2> {
        let mut cells = self.outer;
        cells.extend(self.inner);
        cells
    }
}

/// One region of the map.
///
/// A `Chunk::default()` is an uninitialized shell: it must go through
/// [`initialize`](Self::initialize) before cells can be added.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Chunk {
    grid_pos: NodeCoord,
    anchor: IVec2,
    kind: ChunkKind,
    debug_color: [u8; 3],
    cells: Option<CellSet>,
}

impl Chunk {
    /// Creates an initialized, empty forest chunk.
    pub fn new(grid_pos: NodeCoord, anchor: IVec2, debug_color: [u8; 3]) -> Self {
        let mut chunk = Self::default();
        chunk.initialize(grid_pos, anchor, debug_color);
        chunk
    }

    /// Resets the chunk to defaults: forest, no cells.
    pub fn initialize(&mut self, grid_pos: NodeCoord, anchor: IVec2, debug_color: [u8; 3]) {
        self.grid_pos = grid_pos;
        self.anchor = anchor;
        self.debug_color = debug_color;
        self.kind = ChunkKind::Forest;
        self.cells = Some(CellSet::default());
    }

    /// Adds a map cell. Returns `false` if the cell was already owned.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::Uninitialized`] if the chunk was never initialized.
    pub fn add_cell(&mut self, cell: IVec2) -> Result<bool, ChunkError> {
        let set = self.cells.as_mut().ok_or(ChunkError::Uninitialized)?;
        if !set.members.insert(cell) {
            return Ok(false);
        }
        set.order.push(cell);
        Ok(true)
    }

    /// Node-grid slot this chunk was seeded from.
    pub fn grid_pos(&self) -> NodeCoord {
        self.grid_pos
    }

    /// Jittered anchor cell.
    pub fn anchor(&self) -> IVec2 {
        self.anchor
    }

    /// Current classification.
    pub fn kind(&self) -> ChunkKind {
        self.kind
    }

    /// Unconditionally sets the classification.
    pub(crate) fn define(&mut self, kind: ChunkKind) {
        self.kind = kind;
    }

    /// Cosmetic color for debug rendering.
    pub fn debug_color(&self) -> [u8; 3] {
        self.debug_color
    }

    /// Owned cells in the order they were added.
    pub fn cells(&self) -> &[IVec2] {
        self.cells.as_ref().map_or(&[], |set| set.order.as_slice())
    }

    /// Whether the chunk owns `cell`.
    pub fn contains(&self, cell: IVec2) -> bool {
        self.cells
            .as_ref()
            .is_some_and(|set| set.members.contains(&cell))
    }

    /// Number of owned cells.
    pub fn size(&self) -> usize {
        self.cells().len()
    }

    /// Average cell position with truncating integer division.
    ///
    /// The result may fall outside a concave cell set. Returns `None` for an
    /// empty chunk.
    pub fn centroid(&self) -> Option<IVec2> {
        let cells = self.cells();
        if cells.is_empty() {
            return None;
        }
        let (sx, sy) = cells.iter().fold((0i64, 0i64), |(sx, sy), c| {
            (sx + i64::from(c.x), sy + i64::from(c.y))
        });
        let n = cells.len() as i64;
        Some(IVec2::new((sx / n) as i32, (sy / n) as i32))
    }

    /// Boundary cells.
    ///
    /// A cell is outer when two or more cardinal neighbors are missing, and
    /// inner when exactly one diagonal neighbor is missing. Outer is tested
    /// first, so a cell is never in both lists.
    pub fn perimeter(&self) -> Perimeter {
        let mut perimeter = Perimeter::default();
        for &cell in self.cells() {
            if self.missing_count(cell, &CARDINALS) >= 2 {
                perimeter.outer.push(cell);
            } else if self.missing_count(cell, &DIAGONALS) == 1 {
                perimeter.inner.push(cell);
            }
        }
        perimeter
    }

    fn missing_count(&self, cell: IVec2, offsets: &[IVec2; 4]) -> usize {
        offsets
            .iter()
            .filter(|&&d| !self.contains(cell + d))
            .count()
    }
}

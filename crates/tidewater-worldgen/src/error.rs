//! Error types for world generation.

/// Invalid world parameters, rejected before any generation work starts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamsError {
    /// The map radius must be at least one cell.
    #[error("map radius must be positive, got {0}")]
    NonPositiveRadius(i32),

    /// Padding is a cell count and cannot be negative.
    #[error("map padding must not be negative, got {0}")]
    NegativePadding(i32),

    /// `2 * (map_radius + map_padding) + 1` overflows or exceeds
    /// [`MAX_WORLD_EXTENT`](crate::MAX_WORLD_EXTENT).
    #[error("map radius {radius} with padding {padding} exceeds the {max} cell world extent")]
    WorldTooLarge {
        /// Configured map radius.
        radius: i32,
        /// Configured map padding.
        padding: i32,
        /// The extent limit.
        max: i32,
    },

    /// The node grid needs at least one slot per axis.
    #[error("node grid size must be positive, got {0}")]
    NonPositiveGridSize(i32),

    /// `2 * map_radius / node_grid_size` rounded down to zero cells.
    #[error("node grid size {grid_size} is too fine for map radius {radius}: no cells per node")]
    GridTooFine {
        /// Configured map radius.
        radius: i32,
        /// Configured node grid size.
        grid_size: i32,
    },

    /// The cutoff percentage must be a finite, non-negative number.
    #[error("cutoff percentage must be finite and non-negative, got {0}")]
    InvalidCutoff(f32),

    /// Terrain chance is a percentage roll.
    #[error("terrain chance must be within 0..=100, got {0}")]
    TerrainChanceOutOfRange(u32),

    /// The base radius cannot be negative.
    #[error("base radius must not be negative, got {0}")]
    NegativeBaseRadius(i32),

    /// A ring layer's radii are negative or not strictly increasing.
    #[error("ring layer {layer} has invalid radii ({min}, {max}); need 0 <= min < max")]
    InvalidRing {
        /// 1-based layer number.
        layer: usize,
        /// Configured inner radius.
        min: i32,
        /// Configured outer radius.
        max: i32,
    },

    /// A ring layer reaches further than [`MAX_WORLD_EXTENT`](crate::MAX_WORLD_EXTENT) cells.
    #[error("ring layer {layer} max radius {radius} exceeds {max}")]
    RingTooLarge {
        /// 1-based layer number.
        layer: usize,
        /// Configured outer radius.
        radius: i32,
        /// The radius limit.
        max: i32,
    },

    /// A ring layer must place at least one marker.
    #[error("ring layer {0} has a zero marker count")]
    EmptyRing(usize),
}

/// Misuse of a [`Chunk`](crate::Chunk) container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ChunkError {
    /// A cell was added before [`Chunk::initialize`](crate::Chunk::initialize).
    #[error("chunk cell set used before initialization")]
    Uninitialized,
}

/// Errors that abort a generation run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerationError {
    /// The world parameters failed validation.
    #[error(transparent)]
    Params(#[from] ParamsError),

    /// A chunk container was used incorrectly.
    #[error(transparent)]
    Chunk(#[from] ChunkError),

    /// Every node was rejected, so there is no chunk to host the base.
    #[error("no realized chunks: cannot place the base")]
    NoRealizedChunks,

    /// No chunk centroid lies within the base radius.
    #[error("no chunk centroid within base radius {radius}")]
    NoBaseCandidate {
        /// The radius that was searched.
        radius: i32,
    },
}

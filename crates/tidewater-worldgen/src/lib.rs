//! Procedural world partitioning: carves a circular island into irregular
//! chunks around jittered anchors, then classifies them and scatters points
//! of interest in concentric rings.

mod assign;
mod chunk;
mod chunk_map;
mod error;
mod params;
mod pipeline;
mod sampler;

pub mod classify;
pub mod debug_viz;
pub mod poi;
pub mod rings;
pub mod seed;

pub use assign::{NeighborSearch, RegionAssigner};
pub use chunk::{CARDINALS, Chunk, ChunkKind, DIAGONALS, NodeCoord, Perimeter};
pub use chunk_map::ChunkMap;
pub use classify::{BaseStrategy, OverwritePolicy};
pub use error::{ChunkError, GenerationError, ParamsError};
pub use params::{MAX_WORLD_EXTENT, RingLayer, WorldParams};
pub use pipeline::{GeneratedWorld, GenerationOptions, WorldGenerator, WorldStats};
pub use poi::{PoiSpawn, collect_spawns};
pub use rings::PoiMarker;
pub use sampler::{NodeSample, NodeSampler, square_inside_circle};

//! Debug images of generated worlds.
//!
//! Provides [`DebugImage`] and renderers for classification maps, per-chunk
//! debug colors, the node grid, and chunk perimeters.

mod image;
mod renderers;

pub use self::image::{DebugImage, ExportError, MAX_IMAGE_SIDE};
pub use renderers::{
    WATER_COLOR, kind_color, render_chunk_debug, render_kind_map, render_node_grid,
    render_perimeters,
};

//! Renderers for chunk maps and node grids.
//!
//! Every renderer draws one `scale`×`scale` block per world cell, with world
//! `y` pointing up so the images match [`ChunkMap::render_ascii`].

use glam::IVec2;

use super::image::{DebugImage, ExportError, MAX_IMAGE_SIDE};
use crate::chunk::{CARDINALS, ChunkKind, NodeCoord};
use crate::chunk_map::ChunkMap;
use crate::params::WorldParams;
use crate::sampler::NodeSampler;

/// Color used for cells owned by no chunk.
pub const WATER_COLOR: [u8; 3] = [0, 255, 255];

const BLACK: [u8; 3] = [0, 0, 0];
const WHITE: [u8; 3] = [255, 255, 255];
const RED: [u8; 3] = [255, 0, 0];
const YELLOW: [u8; 3] = [255, 255, 0];
const MAGENTA: [u8; 3] = [255, 0, 255];

/// Display color of a classification.
pub fn kind_color(kind: ChunkKind) -> [u8; 3] {
    match kind {
        ChunkKind::Forest => [30, 120, 30],
        ChunkKind::Plains => [140, 190, 70],
        ChunkKind::Beach => [230, 210, 140],
        ChunkKind::Mountain => [130, 110, 90],
        ChunkKind::Base => [200, 30, 30],
        ChunkKind::Camp => [230, 130, 20],
        ChunkKind::Chest => [255, 215, 0],
        ChunkKind::Den => [90, 40, 120],
    }
}

fn opaque(rgb: [u8; 3]) -> [u8; 4] {
    [rgb[0], rgb[1], rgb[2], 255]
}

/// Pixel side of a square canvas, computed in `u64` so a large `scale`
/// cannot wrap.
fn canvas_side(extent: i32, scale: u32) -> Result<u32, ExportError> {
    let side = u64::from(extent.max(0).unsigned_abs()) * u64::from(scale);
    if side > u64::from(MAX_IMAGE_SIDE) {
        return Err(ExportError::TooLarge { width: side, height: side });
    }
    // Bounded by MAX_IMAGE_SIDE above.
    Ok(side as u32)
}

/// Canvas sized for a world of `extent` cells at `scale` pixels per cell.
struct Canvas {
    image: DebugImage,
    extent: i32,
    scale: u32,
}

impl Canvas {
    fn new(extent: i32, scale: u32, background: [u8; 3]) -> Result<Self, ExportError> {
        let scale = scale.max(1);
        let side = canvas_side(extent, scale)?;
        let image = DebugImage::filled(side, side, background)?;
        Ok(Self { image, extent, scale })
    }

    fn paint(&mut self, cell: IVec2, rgb: [u8; 3]) {
        if !(0..self.extent).contains(&cell.x) || !(0..self.extent).contains(&cell.y) {
            return;
        }
        let px = cell.x as u32 * self.scale;
        let py = (self.extent - 1 - cell.y) as u32 * self.scale;
        self.image
            .fill_rect(px, py, self.scale, self.scale, opaque(rgb));
    }

    fn finish(self) -> DebugImage {
        self.image
    }
}

/// Classification colors, water cyan.
///
/// # Errors
///
/// Every renderer returns [`ExportError::TooLarge`] when the world extent
/// times `scale` exceeds [`MAX_IMAGE_SIDE`].
pub fn render_kind_map(map: &ChunkMap, scale: u32) -> Result<DebugImage, ExportError> {
    let mut canvas = Canvas::new(map.world_extent(), scale, WATER_COLOR)?;
    for chunk in map.iter() {
        let color = kind_color(chunk.kind());
        for &cell in chunk.cells() {
            canvas.paint(cell, color);
        }
    }
    Ok(canvas.finish())
}

/// Per-chunk debug colors with anchors in black and centroids in white.
pub fn render_chunk_debug(map: &ChunkMap, scale: u32) -> Result<DebugImage, ExportError> {
    let mut canvas = Canvas::new(map.world_extent(), scale, WATER_COLOR)?;
    for chunk in map.iter() {
        for &cell in chunk.cells() {
            canvas.paint(cell, chunk.debug_color());
        }
    }
    for chunk in map.iter() {
        canvas.paint(chunk.anchor(), BLACK);
        if let Some(centroid) = chunk.centroid() {
            canvas.paint(centroid, WHITE);
        }
    }
    Ok(canvas.finish())
}

/// Node footprints outlined yellow when accepted and white when rejected,
/// realized anchors in magenta, and the rim of the land circle in red.
pub fn render_node_grid(
    params: &WorldParams,
    map: &ChunkMap,
    scale: u32,
) -> Result<DebugImage, ExportError> {
    let mut canvas = Canvas::new(params.world_extent(), scale, BLACK)?;
    let sampler = NodeSampler::new(params);
    let tpn = params.tiles_per_node();

    for i in 0..params.node_grid_size {
        for j in 0..params.node_grid_size {
            let coord = NodeCoord::new(i, j);
            let color = if sampler.is_accepted(coord) { YELLOW } else { WHITE };
            let origin = sampler.footprint_origin(coord);
            for k in 0..tpn {
                canvas.paint(origin + IVec2::new(k, 0), color);
                canvas.paint(origin + IVec2::new(k, tpn - 1), color);
                canvas.paint(origin + IVec2::new(0, k), color);
                canvas.paint(origin + IVec2::new(tpn - 1, k), color);
            }
        }
    }

    let extent = params.world_extent();
    for x in 0..extent {
        for y in 0..extent {
            let cell = IVec2::new(x, y);
            let on_rim = params.is_land(cell) && CARDINALS.iter().any(|&d| !params.is_land(cell + d));
            if on_rim {
                canvas.paint(cell, RED);
            }
        }
    }

    for chunk in map.iter() {
        canvas.paint(chunk.anchor(), MAGENTA);
    }
    Ok(canvas.finish())
}

/// The kind map with every chunk's perimeter cells drawn red.
pub fn render_perimeters(map: &ChunkMap, scale: u32) -> Result<DebugImage, ExportError> {
    let mut canvas = Canvas {
        image: render_kind_map(map, scale)?,
        extent: map.world_extent(),
        scale: scale.max(1),
    };
    for chunk in map.iter() {
        for &cell in chunk.perimeter().iter() {
            canvas.paint(cell, RED);
        }
    }
    Ok(canvas.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::Chunk;
    use crate::pipeline::{GenerationOptions, WorldGenerator};

    /// 2x1 node grid over a 4x4 world: the left half is one chunk, the right
    /// half is water.
    fn half_map() -> ChunkMap {
        let mut map = ChunkMap::new(2, 4);
        let coord = NodeCoord::new(0, 0);
        map.insert(Chunk::new(coord, IVec2::new(0, 0), [10, 20, 30]));
        for x in 0..2 {
            for y in 0..4 {
                map.assign_cell(coord, IVec2::new(x, y)).unwrap();
            }
        }
        map.get_mut(coord).unwrap().define(ChunkKind::Plains);
        map
    }

    #[test]
    fn test_kind_map_dimensions_follow_scale() {
        let image = render_kind_map(&half_map(), 3).unwrap();
        assert_eq!(image.dimensions(), (12, 12));
    }

    #[test]
    fn test_kind_map_colors() {
        let image = render_kind_map(&half_map(), 1).unwrap();
        assert_eq!(image.get_pixel(0, 0), Some(opaque(kind_color(ChunkKind::Plains))));
        assert_eq!(image.get_pixel(3, 0), Some(opaque(WATER_COLOR)));
        assert_eq!(image.unique_color_count(), 2);
    }

    #[test]
    fn test_world_y_points_up() {
        let mut map = ChunkMap::new(1, 3);
        let coord = NodeCoord::new(0, 0);
        map.insert(Chunk::new(coord, IVec2::ZERO, [0, 0, 0]));
        map.assign_cell(coord, IVec2::new(0, 0)).unwrap();
        let image = render_kind_map(&map, 1).unwrap();
        // World (0,0) is the bottom-left pixel.
        assert_eq!(image.get_pixel(0, 2), Some(opaque(kind_color(ChunkKind::Forest))));
        assert_eq!(image.get_pixel(0, 0), Some(opaque(WATER_COLOR)));
    }

    #[test]
    fn test_chunk_debug_marks_anchor_and_centroid() {
        let image = render_chunk_debug(&half_map(), 1).unwrap();
        // Anchor (0,0) -> pixel (0,3); centroid (0,1) -> pixel (0,2).
        assert_eq!(image.get_pixel(0, 3), Some(opaque(BLACK)));
        assert_eq!(image.get_pixel(0, 2), Some(opaque(WHITE)));
        assert_eq!(image.get_pixel(1, 1), Some([10, 20, 30, 255]));
    }

    #[test]
    fn test_perimeters_drawn_red() {
        let image = render_perimeters(&half_map(), 1).unwrap();
        // Corner (0,0) misses two cardinal neighbors.
        assert_eq!(image.get_pixel(0, 3), Some(opaque(RED)));
    }

    #[test]
    fn test_node_grid_shows_accepted_and_rejected() {
        let params = WorldParams::default();
        let world = WorldGenerator::new(params.clone(), GenerationOptions::default())
            .unwrap()
            .generate(1)
            .unwrap();
        let image = render_node_grid(&params, &world.map, 2).unwrap();
        let side = params.world_extent() as u32 * 2;
        assert_eq!(image.dimensions(), (side, side));

        let has = |rgb: [u8; 3]| image.pixels.chunks_exact(4).any(|px| px[..3] == rgb);
        assert!(has(YELLOW), "accepted footprints are outlined");
        assert!(has(WHITE), "corner footprints are rejected");
        assert!(has(RED), "the land rim is drawn");
    }

    #[test]
    fn test_huge_scale_is_rejected() {
        let params = WorldParams::default();
        let world = WorldGenerator::new(params.clone(), GenerationOptions::default())
            .unwrap()
            .generate(1)
            .unwrap();
        let side = u64::from(params.world_extent().unsigned_abs()) * 600;

        let err = render_kind_map(&world.map, 600).unwrap_err();
        assert!(matches!(err, ExportError::TooLarge { width, .. } if width == side));
        assert!(render_chunk_debug(&world.map, u32::MAX).is_err());
        assert!(render_node_grid(&params, &world.map, 600).is_err());
        assert!(render_perimeters(&world.map, 600).is_err());
    }
}

//! World parameters: the circular map, its node grid, and the ring layers.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::chunk::ChunkKind;
use crate::error::ParamsError;

/// Largest world extent, in cells per side, that [`WorldParams::validate`]
/// accepts. Also bounds ring layer radii.
pub const MAX_WORLD_EXTENT: i32 = 16_385;

/// One annulus of POI markers.
///
/// Markers are spread evenly in angle and alternate between the two kinds,
/// starting with `kinds[0]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RingLayer {
    /// Inner radius (inclusive), in cells from the world center.
    pub min_radius: i32,
    /// Outer radius (exclusive), in cells from the world center.
    pub max_radius: i32,
    /// Number of markers placed around the ring.
    pub marker_count: u32,
    /// Alternating marker kinds.
    pub kinds: [ChunkKind; 2],
}

impl RingLayer {
    /// A layer of chests and camps, chest first.
    pub fn camps(min_radius: i32, max_radius: i32) -> Self {
        Self {
            min_radius,
            max_radius,
            marker_count: 4,
            kinds: [ChunkKind::Chest, ChunkKind::Camp],
        }
    }

    /// A layer of chests and dens, chest first.
    pub fn dens(min_radius: i32, max_radius: i32) -> Self {
        Self {
            min_radius,
            max_radius,
            marker_count: 4,
            kinds: [ChunkKind::Chest, ChunkKind::Den],
        }
    }

    /// Kind of the `index`-th marker.
    pub fn kind_for(&self, index: u32) -> ChunkKind {
        self.kinds[(index % 2) as usize]
    }
}

/// Full description of the world to generate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldParams {
    /// Radius of the land circle, in cells.
    pub map_radius: i32,
    /// Water margin around the circle, in cells.
    pub map_padding: i32,
    /// Side length of the node grid (one candidate chunk per slot).
    pub node_grid_size: i32,
    /// How far a node footprint may poke past the circle before rejection.
    pub cutoff_percentage: f32,
    /// Percent chance that a chunk is rerolled to plains or mountain.
    pub terrain_chance: u32,
    /// Search radius for [`BaseStrategy::LargestWithinRadius`](crate::BaseStrategy).
    pub base_radius: i32,
    /// The three POI ring layers, innermost first.
    pub rings: [RingLayer; 3],
}

impl Default for WorldParams {
    fn default() -> Self {
        Self {
            map_radius: 50,
            map_padding: 5,
            node_grid_size: 10,
            cutoff_percentage: 0.5,
            terrain_chance: 30,
            base_radius: 10,
            rings: [
                RingLayer::camps(10, 20),
                RingLayer::dens(22, 32),
                RingLayer::dens(34, 44),
            ],
        }
    }
}

impl WorldParams {
    /// Side length of one node footprint, in cells.
    pub fn tiles_per_node(&self) -> i32 {
        2 * self.map_radius / self.node_grid_size
    }

    /// Map radius plus padding.
    pub fn world_radius(&self) -> i32 {
        self.map_radius + self.map_padding
    }

    /// Side length of the square cell grid covering the world.
    pub fn world_extent(&self) -> i32 {
        2 * self.world_radius() + 1
    }

    /// Center cell of the world, also the center of the land circle.
    pub fn world_center(&self) -> IVec2 {
        IVec2::splat(self.world_radius())
    }

    /// Whether `cell` lies strictly inside the land circle.
    pub fn is_land(&self, cell: IVec2) -> bool {
        let d = cell - self.world_center();
        let r = i64::from(self.map_radius);
        i64::from(d.x) * i64::from(d.x) + i64::from(d.y) * i64::from(d.y) < r * r
    }

    /// Check every field, returning the first problem found.
    ///
    /// # Errors
    ///
    /// Returns the [`ParamsError`] describing the offending field.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.map_radius <= 0 {
            return Err(ParamsError::NonPositiveRadius(self.map_radius));
        }
        if self.map_padding < 0 {
            return Err(ParamsError::NegativePadding(self.map_padding));
        }
        // Every derived dimension below is bounded by this extent.
        let extent = self
            .map_radius
            .checked_add(self.map_padding)
            .and_then(|r| r.checked_mul(2))
            .and_then(|d| d.checked_add(1));
        if !extent.is_some_and(|e| e <= MAX_WORLD_EXTENT) {
            return Err(ParamsError::WorldTooLarge {
                radius: self.map_radius,
                padding: self.map_padding,
                max: MAX_WORLD_EXTENT,
            });
        }
        if self.node_grid_size <= 0 {
            return Err(ParamsError::NonPositiveGridSize(self.node_grid_size));
        }
        if self.tiles_per_node() == 0 {
            return Err(ParamsError::GridTooFine {
                radius: self.map_radius,
                grid_size: self.node_grid_size,
            });
        }
        if !self.cutoff_percentage.is_finite() || self.cutoff_percentage < 0.0 {
            return Err(ParamsError::InvalidCutoff(self.cutoff_percentage));
        }
        if self.terrain_chance > 100 {
            return Err(ParamsError::TerrainChanceOutOfRange(self.terrain_chance));
        }
        if self.base_radius < 0 {
            return Err(ParamsError::NegativeBaseRadius(self.base_radius));
        }
        for (i, ring) in self.rings.iter().enumerate() {
            let layer = i + 1;
            if ring.min_radius < 0 || ring.min_radius >= ring.max_radius {
                return Err(ParamsError::InvalidRing {
                    layer,
                    min: ring.min_radius,
                    max: ring.max_radius,
                });
            }
            if ring.max_radius > MAX_WORLD_EXTENT {
                return Err(ParamsError::RingTooLarge {
                    layer,
                    radius: ring.max_radius,
                    max: MAX_WORLD_EXTENT,
                });
            }
            if ring.marker_count == 0 {
                return Err(ParamsError::EmptyRing(layer));
            }
        }
        Ok(())
    }
}

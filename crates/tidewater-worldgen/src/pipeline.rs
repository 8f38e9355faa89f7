//! The generation pipeline.
//!
//! A run always rebuilds the whole map in a fixed order: sample anchors,
//! assign cells, then terrain, base, beach, and the three ring layers. Each
//! random pass draws from its own stream derived from the world seed.

use std::collections::BTreeMap;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::assign::{NeighborSearch, RegionAssigner};
use crate::chunk::{ChunkKind, NodeCoord};
use crate::chunk_map::ChunkMap;
use crate::classify::{BaseStrategy, OverwritePolicy, classify_beach, classify_terrain, locate_base};
use crate::error::{GenerationError, ParamsError};
use crate::params::WorldParams;
use crate::rings::{PoiMarker, place_ring_layer};
use crate::sampler::NodeSampler;
use crate::seed::{Pass, hash_chunk_map, pass_rng};

/// Behavior switches that are not part of the world's shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    /// Whether later passes may replace base and POI kinds.
    pub overwrite_policy: OverwritePolicy,
    /// Nearest-anchor search used during region assignment.
    pub neighbor_search: NeighborSearch,
    /// Rule for choosing the base chunk.
    pub base_strategy: BaseStrategy,
}

/// Summary numbers for a generated map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorldStats {
    /// Slots holding a chunk.
    pub realized_chunks: usize,
    /// Empty slots.
    pub holes: usize,
    /// Cells owned by some chunk.
    pub land_cells: usize,
    /// Cells owned by no chunk.
    pub water_cells: usize,
    /// Chunk count per kind. Kinds with no chunk are absent.
    pub kind_counts: BTreeMap<ChunkKind, usize>,
    /// Cell count of the smallest chunk, 0 for an empty map.
    pub smallest_chunk: usize,
    /// Cell count of the largest chunk, 0 for an empty map.
    pub largest_chunk: usize,
}

impl WorldStats {
    /// Gathers stats from a finished map.
    pub fn from_map(map: &ChunkMap) -> Self {
        let mut kind_counts = BTreeMap::new();
        let mut land_cells = 0;
        let mut smallest = usize::MAX;
        let mut largest = 0;
        for chunk in map.iter() {
            *kind_counts.entry(chunk.kind()).or_insert(0) += 1;
            land_cells += chunk.size();
            smallest = smallest.min(chunk.size());
            largest = largest.max(chunk.size());
        }
        let extent = map.world_extent().max(0) as usize;
        Self {
            realized_chunks: map.realized_count(),
            holes: map.hole_count(),
            land_cells,
            water_cells: extent * extent - land_cells,
            kind_counts,
            smallest_chunk: if map.is_empty() { 0 } else { smallest },
            largest_chunk: largest,
        }
    }

    /// Number of chunks of `kind`.
    pub fn count(&self, kind: ChunkKind) -> usize {
        self.kind_counts.get(&kind).copied().unwrap_or(0)
    }
}

/// Output of one generation run.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedWorld {
    /// Seed the run was derived from.
    pub seed: u64,
    /// Parameters the run used.
    pub params: WorldParams,
    /// The classified chunk map.
    pub map: ChunkMap,
    /// Slot the base locator picked. Under last-write-wins a later pass may
    /// have reclassified it.
    pub base: NodeCoord,
    /// Every ring marker, layer by layer.
    pub markers: Vec<PoiMarker>,
    /// Summary numbers.
    pub stats: WorldStats,
}

impl GeneratedWorld {
    /// Digest of the map, for comparing runs.
    pub fn map_hash(&self) -> u64 {
        hash_chunk_map(&self.map)
    }
}

/// Runs the generation pipeline for a fixed set of parameters.
#[derive(Clone, Debug)]
pub struct WorldGenerator {
    params: WorldParams,
    options: GenerationOptions,
}

impl WorldGenerator {
    /// Creates a generator after validating `params`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParamsError`] found.
    pub fn new(params: WorldParams, options: GenerationOptions) -> Result<Self, ParamsError> {
        params.validate()?;
        Ok(Self { params, options })
    }

    /// The validated parameters.
    pub fn params(&self) -> &WorldParams {
        &self.params
    }

    /// The generation options.
    pub fn options(&self) -> GenerationOptions {
        self.options
    }

    /// Builds a complete world from `seed`.
    ///
    /// # Errors
    ///
    /// Fails when no chunk survives sampling, when the base strategy finds no
    /// candidate, or on a chunk container error.
    pub fn generate(&self, seed: u64) -> Result<GeneratedWorld, GenerationError> {
        let params = &self.params;
        let options = self.options;
        let _span = tracing::info_span!(
            "generate_world",
            seed,
            map_radius = params.map_radius,
            node_grid_size = params.node_grid_size
        )
        .entered();
        let started = Instant::now();

        let sample = NodeSampler::new(params).sample(&mut pass_rng(seed, Pass::NodeSampling));
        let mut map = RegionAssigner::new(params, options.neighbor_search)
            .assign(&sample, &mut pass_rng(seed, Pass::DebugColors))?;

        let rerolled = classify_terrain(
            &mut map,
            params.terrain_chance,
            &mut pass_rng(seed, Pass::Terrain),
        );
        tracing::debug!(rerolled, "Terrain pass complete");

        let center = params.world_center();
        let base = locate_base(
            &mut map,
            center,
            options.base_strategy,
            params.base_radius,
            options.overwrite_policy,
        )?;
        tracing::debug!(%base, strategy = ?options.base_strategy, "Base located");

        let beaches = classify_beach(&mut map, options.overwrite_policy);
        tracing::debug!(beaches, "Beach pass complete");

        let mut markers = Vec::new();
        for (index, ring) in params.rings.iter().enumerate() {
            let mut rng = pass_rng(seed, Pass::RingLayer(index as u8));
            markers.extend(place_ring_layer(
                index + 1,
                ring,
                center,
                &mut map,
                options.overwrite_policy,
                &mut rng,
            ));
        }

        let stats = WorldStats::from_map(&map);
        tracing::info!(
            chunks = stats.realized_chunks,
            holes = stats.holes,
            land_cells = stats.land_cells,
            markers = markers.len(),
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            "World generated"
        );

        Ok(GeneratedWorld {
            seed,
            params: params.clone(),
            map,
            base,
            markers,
            stats,
        })
    }
}

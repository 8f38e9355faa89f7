//! Deterministic seeding.
//!
//! Every random pass draws from its own ChaCha8 stream derived from the world
//! seed and a pass tag, so the same seed and parameters always rebuild the same
//! map, and changing how one pass consumes randomness leaves the others alone.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::chunk_map::ChunkMap;

/// Tags for the random streams used by the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pass {
    /// Anchor jitter in the node sampler.
    NodeSampling,
    /// Cosmetic per-chunk debug colors.
    DebugColors,
    /// Plains/mountain rolls.
    Terrain,
    /// Marker angles and radii of one ring layer (0-based).
    RingLayer(u8),
}

/// Derive a u64 seed for one pass from the world seed.
pub fn derive_pass_seed(world_seed: u64, pass: Pass) -> u64 {
    let mut hasher = DefaultHasher::new();
    world_seed.hash(&mut hasher);
    pass.hash(&mut hasher);
    hasher.finish()
}

/// Deterministic RNG for one pass.
pub fn pass_rng(world_seed: u64, pass: Pass) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(derive_pass_seed(world_seed, pass))
}

/// A fresh world seed from OS entropy, for runs that did not ask for one.
pub fn random_seed() -> u64 {
    rand::random()
}

/// Digest of a chunk map for determinism comparison.
///
/// Covers every slot in scan order: holes, grid positions, anchors, kinds and
/// the owned cells in insertion order.
pub fn hash_chunk_map(map: &ChunkMap) -> u64 {
    let mut hasher = DefaultHasher::new();
    map.grid_size().hash(&mut hasher);
    map.world_extent().hash(&mut hasher);
    for (coord, slot) in map.slots() {
        coord.hash(&mut hasher);
        match slot {
            None => 0u8.hash(&mut hasher),
            Some(chunk) => {
                1u8.hash(&mut hasher);
                chunk.anchor().to_array().hash(&mut hasher);
                chunk.kind().hash(&mut hasher);
                for cell in chunk.cells() {
                    cell.to_array().hash(&mut hasher);
                }
            }
        }
    }
    hasher.finish()
}

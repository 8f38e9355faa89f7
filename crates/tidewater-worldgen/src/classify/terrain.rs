//! Random biome roll.

use rand::Rng;

use crate::chunk::ChunkKind;
use crate::chunk_map::ChunkMap;

/// Rolls `[0, 100)` per chunk; below `terrain_chance` the chunk becomes plains
/// or mountain with equal odds. Other chunks keep their kind.
///
/// Returns the number of chunks that were rerolled.
pub fn classify_terrain(map: &mut ChunkMap, terrain_chance: u32, rng: &mut impl Rng) -> usize {
    let mut rerolled = 0;
    for chunk in map.iter_mut() {
        if rng.random_range(0..100) >= terrain_chance {
            continue;
        }
        let kind = if rng.random_range(0..2) == 0 {
            ChunkKind::Plains
        } else {
            ChunkKind::Mountain
        };
        chunk.define(kind);
        rerolled += 1;
    }
    rerolled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::{Chunk, NodeCoord};
    use glam::IVec2;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn forest_map(n: i32) -> ChunkMap {
        let mut map = ChunkMap::new(n, n);
        for i in 0..n {
            for j in 0..n {
                map.insert(Chunk::new(NodeCoord::new(i, j), IVec2::new(i, j), [0, 0, 0]));
            }
        }
        map
    }

    #[test]
    fn test_zero_chance_keeps_forest() {
        let mut map = forest_map(6);
        let rerolled = classify_terrain(&mut map, 0, &mut ChaCha8Rng::seed_from_u64(1));
        assert_eq!(rerolled, 0);
        assert_eq!(map.count_kind(ChunkKind::Forest), 36);
    }

    #[test]
    fn test_full_chance_rerolls_every_chunk() {
        let mut map = forest_map(8);
        let rerolled = classify_terrain(&mut map, 100, &mut ChaCha8Rng::seed_from_u64(2));
        assert_eq!(rerolled, 64);
        assert_eq!(map.count_kind(ChunkKind::Forest), 0);
        let plains = map.count_kind(ChunkKind::Plains);
        let mountains = map.count_kind(ChunkKind::Mountain);
        assert_eq!(plains + mountains, 64);
        assert!(plains > 0 && mountains > 0, "both outcomes should appear");
    }

    #[test]
    fn test_same_rng_same_result() {
        let mut a = forest_map(5);
        let mut b = forest_map(5);
        classify_terrain(&mut a, 30, &mut ChaCha8Rng::seed_from_u64(3));
        classify_terrain(&mut b, 30, &mut ChaCha8Rng::seed_from_u64(3));
        assert_eq!(a, b);
    }
}

//! Content to instantiate on a finished map.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::chunk::{ChunkKind, NodeCoord};
use crate::chunk_map::ChunkMap;

/// One thing to spawn: the base or a point of interest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoiSpawn {
    /// What to spawn.
    pub kind: ChunkKind,
    /// Chunk the spawn belongs to.
    pub chunk: NodeCoord,
    /// Spawn cell (the chunk centroid).
    pub position: IVec2,
}

/// One spawn per base, camp, chest or den chunk, at its centroid, in scan order.
pub fn collect_spawns(map: &ChunkMap) -> Vec<PoiSpawn> {
    map.iter()
        .filter(|chunk| chunk.kind().is_specialized())
        .filter_map(|chunk| {
            Some(PoiSpawn {
                kind: chunk.kind(),
                chunk: chunk.grid_pos(),
                position: chunk.centroid()?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::Chunk;

    #[test]
    fn test_spawns_only_for_specialized_chunks() {
        let mut map = ChunkMap::new(2, 8);
        let kinds = [
            (NodeCoord::new(0, 0), ChunkKind::Forest),
            (NodeCoord::new(0, 1), ChunkKind::Chest),
            (NodeCoord::new(1, 0), ChunkKind::Beach),
            (NodeCoord::new(1, 1), ChunkKind::Base),
        ];
        for (coord, kind) in kinds {
            map.insert(Chunk::new(coord, IVec2::ZERO, [0, 0, 0]));
            let origin = IVec2::new(coord.i * 4, coord.j * 4);
            map.assign_cell(coord, origin).unwrap();
            map.assign_cell(coord, origin + IVec2::new(2, 2)).unwrap();
            map.get_mut(coord).unwrap().define(kind);
        }

        let spawns = collect_spawns(&map);
        assert_eq!(
            spawns,
            vec![
                PoiSpawn {
                    kind: ChunkKind::Chest,
                    chunk: NodeCoord::new(0, 1),
                    position: IVec2::new(1, 5),
                },
                PoiSpawn {
                    kind: ChunkKind::Base,
                    chunk: NodeCoord::new(1, 1),
                    position: IVec2::new(5, 5),
                },
            ]
        );
    }
}

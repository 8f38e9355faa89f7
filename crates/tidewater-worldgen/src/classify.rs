//! Classification passes that run over a freshly assigned chunk map.
//!
//! The pipeline calls them in a fixed order (terrain, base, beach) and each
//! pass sees the kinds written by the ones before it. Whether a later write may
//! replace an earlier specialized kind is governed by [`OverwritePolicy`].

mod base;
mod beach;
mod terrain;

use serde::{Deserialize, Serialize};

use crate::chunk::{Chunk, ChunkKind};

pub use base::locate_base;
pub use beach::classify_beach;
pub use terrain::classify_terrain;

/// Who may overwrite a chunk's classification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverwritePolicy {
    /// Every pass writes unconditionally; the last write sticks.
    #[default]
    LastWriteWins,
    /// Base and POI kinds are never replaced once set.
    SkipSpecialized,
}

impl OverwritePolicy {
    /// Whether a chunk currently tagged `current` may be reclassified.
    pub fn permits(self, current: ChunkKind) -> bool {
        match self {
            OverwritePolicy::LastWriteWins => true,
            OverwritePolicy::SkipSpecialized => !current.is_specialized(),
        }
    }

    /// Sets `kind` on `chunk` if the policy allows it. Returns whether the
    /// write happened.
    pub fn apply(self, chunk: &mut Chunk, kind: ChunkKind) -> bool {
        if !self.permits(chunk.kind()) {
            return false;
        }
        chunk.define(kind);
        true
    }
}

/// How the base chunk is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BaseStrategy {
    /// Chunk whose centroid is closest to the world center.
    #[default]
    ClosestToCenter,
    /// Largest chunk whose centroid lies within the base radius.
    LargestWithinRadius,
}

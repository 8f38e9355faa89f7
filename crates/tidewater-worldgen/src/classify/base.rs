//! Base locator.

use glam::IVec2;

use super::{BaseStrategy, OverwritePolicy};
use crate::chunk::{ChunkKind, NodeCoord};
use crate::chunk_map::ChunkMap;
use crate::error::GenerationError;

/// Picks the base chunk with `strategy` and tags it [`ChunkKind::Base`].
///
/// With [`BaseStrategy::ClosestToCenter`], ties on centroid distance go to the
/// last chunk in scan order. With [`BaseStrategy::LargestWithinRadius`], ties
/// on size go to the first.
///
/// # Errors
///
/// [`GenerationError::NoRealizedChunks`] when the map is empty, and
/// [`GenerationError::NoBaseCandidate`] when no centroid lies within
/// `base_radius` under the radius strategy.
pub fn locate_base(
    map: &mut ChunkMap,
    center: IVec2,
    strategy: BaseStrategy,
    base_radius: i32,
    policy: OverwritePolicy,
) -> Result<NodeCoord, GenerationError> {
    if map.is_empty() {
        return Err(GenerationError::NoRealizedChunks);
    }

    let chosen = match strategy {
        BaseStrategy::ClosestToCenter => closest_to_center(map, center),
        BaseStrategy::LargestWithinRadius => largest_within_radius(map, center, base_radius),
    };
    let coord = chosen.ok_or(GenerationError::NoBaseCandidate {
        radius: base_radius,
    })?;

    if let Some(chunk) = map.get_mut(coord) {
        policy.apply(chunk, ChunkKind::Base);
    }
    Ok(coord)
}

fn closest_to_center(map: &ChunkMap, center: IVec2) -> Option<NodeCoord> {
    let center = center.as_dvec2();
    let mut best: Option<(f64, NodeCoord)> = None;
    for chunk in map.iter() {
        let Some(centroid) = chunk.centroid() else {
            continue;
        };
        let distance = centroid.as_dvec2().distance(center);
        if best.is_none_or(|(d, _)| distance <= d) {
            best = Some((distance, chunk.grid_pos()));
        }
    }
    best.map(|(_, coord)| coord)
}

fn largest_within_radius(map: &ChunkMap, center: IVec2, radius: i32) -> Option<NodeCoord> {
    let center = center.as_dvec2();
    let radius = f64::from(radius);
    let mut best: Option<(usize, NodeCoord)> = None;
    for chunk in map.iter() {
        let Some(centroid) = chunk.centroid() else {
            continue;
        };
        if centroid.as_dvec2().distance(center) > radius {
            continue;
        }
        if best.is_none_or(|(size, _)| chunk.size() > size) {
            best = Some((chunk.size(), chunk.grid_pos()));
        }
    }
    best.map(|(_, coord)| coord)
}

//! Ring-based POI placement.
//!
//! A layer spreads its markers evenly in angle from one random start angle,
//! gives each marker its own random radius inside the annulus, and snaps it to
//! the chunk whose centroid is closest. Layers run one after another over the
//! same map, so a later layer can land on a chunk an earlier one already
//! tagged; [`OverwritePolicy`] decides what happens then.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::chunk::{ChunkKind, NodeCoord};
use crate::chunk_map::ChunkMap;
use crate::classify::OverwritePolicy;
use crate::params::RingLayer;

/// One placed (or attempted) POI marker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoiMarker {
    /// 1-based ring layer number.
    pub layer: usize,
    /// Kind the marker assigns.
    pub kind: ChunkKind,
    /// Placement angle in degrees. Not normalized to `[0, 360)`.
    pub angle_degrees: f64,
    /// Distance from the world center, in cells.
    pub radius: i32,
    /// Target cell the marker was aimed at.
    pub target: IVec2,
    /// Slot of the chunk that received the kind, if any.
    pub chunk: Option<NodeCoord>,
}

/// Point at `radius` cells from `center` along `angle_degrees`, rounded half
/// to even on each axis.
pub fn ring_point(center: IVec2, radius: i32, angle_degrees: f64) -> IVec2 {
    let (sin, cos) = angle_degrees.to_radians().sin_cos();
    let r = f64::from(radius);
    center
        + IVec2::new(
            (r * cos).round_ties_even() as i32,
            (r * sin).round_ties_even() as i32,
        )
}

/// Places one ring layer's markers on `map`.
///
/// `layer` is the 1-based layer number recorded on each marker. Under
/// [`OverwritePolicy::SkipSpecialized`] a marker snaps to the nearest chunk
/// that is not yet specialized and stays unplaced when none is left.
pub fn place_ring_layer(
    layer: usize,
    ring: &RingLayer,
    center: IVec2,
    map: &mut ChunkMap,
    policy: OverwritePolicy,
    rng: &mut impl Rng,
) -> Vec<PoiMarker> {
    let count = ring.marker_count.max(1);
    let step = 360.0 / f64::from(count);
    let start = rng.random_range(0.0..360.0_f64);

    let mut markers = Vec::with_capacity(count as usize);
    for index in 0..count {
        let angle_degrees = start + f64::from(index) * step;
        let radius = rng.random_range(ring.min_radius..ring.max_radius);
        let target = ring_point(center, radius, angle_degrees);
        let kind = ring.kind_for(index);

        let snapped = map.nearest_by_centroid(target, |chunk| policy.permits(chunk.kind()));
        let chunk = snapped.and_then(|coord| {
            let chunk = map.get_mut(coord)?;
            policy.apply(chunk, kind).then_some(coord)
        });

        if chunk.is_none() {
            tracing::warn!(layer, %target, kind = kind.name(), "No eligible chunk for marker");
        }
        markers.push(PoiMarker {
            layer,
            kind,
            angle_degrees,
            radius,
            target,
            chunk,
        });
    }

    tracing::debug!(
        layer,
        start_angle = start,
        placed = markers.iter().filter(|m| m.chunk.is_some()).count(),
        "Placed ring layer"
    );
    markers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::Chunk;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// A 5x5 node grid where every slot holds one cell at `(4i+2, 4j+2)`,
    /// centered on (10,10).
    fn grid_map() -> ChunkMap {
        let mut map = ChunkMap::new(5, 21);
        for i in 0..5 {
            for j in 0..5 {
                let coord = NodeCoord::new(i, j);
                let cell = IVec2::new(4 * i + 2, 4 * j + 2);
                map.insert(Chunk::new(coord, cell, [0, 0, 0]));
                map.assign_cell(coord, cell).unwrap();
            }
        }
        map
    }

    #[test]
    fn test_ring_point_offsets_from_center() {
        let center = IVec2::new(10, 10);
        assert_eq!(ring_point(center, 5, 0.0), IVec2::new(15, 10));
        assert_eq!(ring_point(center, 5, 90.0), IVec2::new(10, 15));
        assert_eq!(ring_point(center, 5, 180.0), IVec2::new(5, 10));
        // 5 * cos(45deg) = 3.54 on both axes.
        assert_eq!(ring_point(center, 5, 45.0), IVec2::new(14, 14));
    }

    #[test]
    fn test_markers_alternate_and_stay_in_annulus() {
        let mut map = grid_map();
        let ring = RingLayer::camps(4, 8);
        let markers = place_ring_layer(
            1,
            &ring,
            IVec2::new(10, 10),
            &mut map,
            OverwritePolicy::LastWriteWins,
            &mut ChaCha8Rng::seed_from_u64(5),
        );

        assert_eq!(markers.len(), 4);
        let kinds: Vec<_> = markers.iter().map(|m| m.kind).collect();
        assert_eq!(
            kinds,
            vec![ChunkKind::Chest, ChunkKind::Camp, ChunkKind::Chest, ChunkKind::Camp]
        );
        for (i, marker) in markers.iter().enumerate() {
            assert!((4..8).contains(&marker.radius));
            assert_eq!(marker.layer, 1);
            let expected = markers[0].angle_degrees + 90.0 * i as f64;
            assert!((marker.angle_degrees - expected).abs() < 1e-9);
            assert!(marker.chunk.is_some());
        }
        assert!((0.0..360.0).contains(&markers[0].angle_degrees));
    }

    #[test]
    fn test_marker_snaps_to_nearest_centroid() {
        let mut map = grid_map();
        let ring = RingLayer {
            min_radius: 8,
            max_radius: 9,
            marker_count: 1,
            kinds: [ChunkKind::Den, ChunkKind::Chest],
        };
        let markers = place_ring_layer(
            2,
            &ring,
            IVec2::new(10, 10),
            &mut map,
            OverwritePolicy::LastWriteWins,
            &mut ChaCha8Rng::seed_from_u64(8),
        );
        let marker = &markers[0];
        let coord = marker.chunk.unwrap();
        let snapped = map.get(coord).unwrap();
        assert_eq!(snapped.kind(), ChunkKind::Den);

        let best = snapped.centroid().unwrap().as_dvec2().distance(marker.target.as_dvec2());
        for chunk in map.iter() {
            let d = chunk.centroid().unwrap().as_dvec2().distance(marker.target.as_dvec2());
            assert!(d >= best, "chunk {} is closer than the snapped one", chunk.grid_pos());
        }
    }

    #[test]
    fn test_later_layer_overwrites_camp_by_default() {
        let mut map = ChunkMap::new(1, 3);
        let coord = NodeCoord::new(0, 0);
        map.insert(Chunk::new(coord, IVec2::ONE, [0, 0, 0]));
        map.assign_cell(coord, IVec2::ONE).unwrap();
        map.get_mut(coord).unwrap().define(ChunkKind::Camp);

        let markers = place_ring_layer(
            2,
            &RingLayer::dens(1, 2),
            IVec2::ONE,
            &mut map,
            OverwritePolicy::LastWriteWins,
            &mut ChaCha8Rng::seed_from_u64(1),
        );
        assert!(markers.iter().all(|m| m.chunk == Some(coord)));
        // The last of four alternating markers is a den.
        assert_eq!(map.get(coord).unwrap().kind(), ChunkKind::Den);
    }

    #[test]
    fn test_skip_specialized_keeps_camp() {
        let mut map = ChunkMap::new(1, 3);
        let coord = NodeCoord::new(0, 0);
        map.insert(Chunk::new(coord, IVec2::ONE, [0, 0, 0]));
        map.assign_cell(coord, IVec2::ONE).unwrap();
        map.get_mut(coord).unwrap().define(ChunkKind::Camp);

        let markers = place_ring_layer(
            2,
            &RingLayer::dens(1, 2),
            IVec2::ONE,
            &mut map,
            OverwritePolicy::SkipSpecialized,
            &mut ChaCha8Rng::seed_from_u64(1),
        );
        assert!(markers.iter().all(|m| m.chunk.is_none()));
        assert_eq!(map.get(coord).unwrap().kind(), ChunkKind::Camp);
    }

    #[test]
    fn test_skip_specialized_spreads_markers() {
        let mut map = grid_map();
        let markers = place_ring_layer(
            1,
            &RingLayer::camps(1, 2),
            IVec2::new(10, 10),
            &mut map,
            OverwritePolicy::SkipSpecialized,
            &mut ChaCha8Rng::seed_from_u64(3),
        );
        let mut coords: Vec<_> = markers.iter().filter_map(|m| m.chunk).collect();
        coords.sort_unstable();
        coords.dedup();
        assert_eq!(coords.len(), 4, "each marker must claim its own chunk");
    }
}

//! Node sampling: one jittered anchor per accepted node-grid slot.
//!
//! Each slot owns a square footprint of `tiles_per_node` cells. A slot is
//! accepted when its footprint center, pushed outward by a fraction of half the
//! footprint, still lies within the map radius. Accepted slots receive a
//! uniformly random anchor inside their own footprint, which bounds every
//! anchor to one grid cell.

use glam::{DVec2, IVec2};
use rand::Rng;

use crate::chunk::NodeCoord;
use crate::params::WorldParams;

/// Returns `true` if a square of `square_size` centered at `square_center`
/// passes the cutoff test against the circle.
pub fn square_inside_circle(
    square_center: DVec2,
    square_size: f64,
    circle_center: DVec2,
    circle_radius: f64,
    cutoff_percentage: f64,
) -> bool {
    let distance = square_center.distance(circle_center);
    distance + cutoff_percentage * (square_size / 2.0) <= circle_radius
}

/// Accepted anchors laid out on the node grid.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeSample {
    grid_size: i32,
    anchors: Vec<Option<IVec2>>,
}

impl NodeSample {
    /// Builds a sample from a row-major list of optional anchors. The list is
    /// padded with holes or truncated to exactly `grid_size²` slots.
    pub(crate) fn from_anchors(grid_size: i32, mut anchors: Vec<Option<IVec2>>) -> Self {
        let slots = (grid_size.max(0) as usize).pow(2);
        anchors.resize(slots, None);
        Self { grid_size, anchors }
    }

    /// Side length of the node grid.
    pub fn grid_size(&self) -> i32 {
        self.grid_size
    }

    /// Anchor of the slot, or `None` for rejected and out-of-range slots.
    pub fn get(&self, coord: NodeCoord) -> Option<IVec2> {
        let n = self.grid_size;
        if !(0..n).contains(&coord.i) || !(0..n).contains(&coord.j) {
            return None;
        }
        self.anchors
            .get((coord.i * n + coord.j) as usize)
            .copied()
            .flatten()
    }

    /// Accepted `(slot, anchor)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeCoord, IVec2)> + '_ {
        let n = self.grid_size;
        self.anchors.iter().enumerate().filter_map(move |(idx, a)| {
            let idx = idx as i32;
            a.map(|anchor| (NodeCoord::new(idx / n, idx % n), anchor))
        })
    }

    /// Number of accepted slots.
    pub fn accepted_count(&self) -> usize {
        self.anchors.iter().flatten().count()
    }
}

/// Samples anchors for a validated set of world parameters.
pub struct NodeSampler<'a> {
    params: &'a WorldParams,
}

impl<'a> NodeSampler<'a> {
    /// Creates a sampler. `params` should already be validated.
    pub fn new(params: &'a WorldParams) -> Self {
        Self { params }
    }

    /// Cell at the center of a slot's footprint.
    pub fn footprint_center(&self, coord: NodeCoord) -> IVec2 {
        let tpn = self.params.tiles_per_node();
        let offset = self.params.map_padding + tpn / 2;
        IVec2::new(offset + coord.i * tpn, offset + coord.j * tpn)
    }

    /// Lowest-coordinate cell of a slot's footprint.
    pub fn footprint_origin(&self, coord: NodeCoord) -> IVec2 {
        let tpn = self.params.tiles_per_node();
        let pad = self.params.map_padding;
        IVec2::new(pad + coord.i * tpn, pad + coord.j * tpn)
    }

    /// Whether the slot passes the boundary test.
    pub fn is_accepted(&self, coord: NodeCoord) -> bool {
        square_inside_circle(
            self.footprint_center(coord).as_dvec2(),
            f64::from(self.params.tiles_per_node()),
            self.params.world_center().as_dvec2(),
            f64::from(self.params.map_radius),
            f64::from(self.params.cutoff_percentage),
        )
    }

    /// Runs the boundary test on every slot and jitters an anchor for each
    /// accepted one. Randomness is consumed only for accepted slots.
    pub fn sample(&self, rng: &mut impl Rng) -> NodeSample {
        let n = self.params.node_grid_size;
        let tpn = self.params.tiles_per_node();
        let mut anchors = Vec::with_capacity((n * n) as usize);

        for i in 0..n {
            for j in 0..n {
                let coord = NodeCoord::new(i, j);
                if !self.is_accepted(coord) {
                    anchors.push(None);
                    continue;
                }
                let jitter = IVec2::new(rng.random_range(0..tpn), rng.random_range(0..tpn));
                anchors.push(Some(self.footprint_origin(coord) + jitter));
            }
        }

        let sample = NodeSample::from_anchors(n, anchors);
        tracing::debug!(
            accepted = sample.accepted_count(),
            slots = n * n,
            tiles_per_node = tpn,
            "Sampled node anchors"
        );
        sample
    }
}

/// A random, reasonably saturated color for debug rendering.
pub fn random_debug_color(rng: &mut impl Rng) -> [u8; 3] {
    let hue = rng.random_range(0.0..360.0_f64);
    let saturation = rng.random_range(0.5..1.0_f64);
    let value = rng.random_range(0.6..1.0_f64);

    let c = value * saturation;
    let h = hue / 60.0;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = value - c;
    let to_byte = |v: f64| ((v + m) * 255.0).round() as u8;
    [to_byte(r), to_byte(g), to_byte(b)]
}

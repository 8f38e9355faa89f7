//! Plain-text summary of a generated world.

use std::fmt::Write;

use tidewater_worldgen::{ChunkKind, GeneratedWorld, collect_spawns};

/// Multi-line report: stats, per-kind counts, ring markers and spawns.
pub fn summary(world: &GeneratedWorld) -> String {
    let stats = &world.stats;
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "seed {}  map hash {:016x}", world.seed, world.map_hash());
    let _ = writeln!(
        out,
        "chunks {}  holes {}  land {}  water {}  sizes {}..={}",
        stats.realized_chunks,
        stats.holes,
        stats.land_cells,
        stats.water_cells,
        stats.smallest_chunk,
        stats.largest_chunk
    );

    let kinds: Vec<String> = ChunkKind::ALL
        .iter()
        .map(|&kind| format!("{} {}", kind.name(), stats.count(kind)))
        .collect();
    let _ = writeln!(out, "kinds: {}", kinds.join(", "));
    let _ = writeln!(out, "base located at {}", world.base);

    let _ = writeln!(out, "markers:");
    for marker in &world.markers {
        let chunk = marker
            .chunk
            .map_or_else(|| "unplaced".to_string(), |c| c.to_string());
        let _ = writeln!(
            out,
            "  L{} {:<5} angle {:>6.1} r {:>3} target [{}, {}] -> {}",
            marker.layer,
            marker.kind.name(),
            marker.angle_degrees,
            marker.radius,
            marker.target.x,
            marker.target.y,
            chunk
        );
    }

    let _ = writeln!(out, "spawns:");
    for spawn in collect_spawns(&world.map) {
        let _ = writeln!(
            out,
            "  {:<5} at [{}, {}] in chunk {}",
            spawn.kind.name(),
            spawn.position.x,
            spawn.position.y,
            spawn.chunk
        );
    }
    out
}

//! Command-line argument parsing for tidewater.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tidewater_worldgen::{BaseStrategy, NeighborSearch, OverwritePolicy};

use crate::Config;

/// `--overwrite-policy` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Later passes always overwrite.
    LastWriteWins,
    /// Base and POI chunks are never overwritten.
    SkipSpecialized,
}

impl From<PolicyArg> for OverwritePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::LastWriteWins => OverwritePolicy::LastWriteWins,
            PolicyArg::SkipSpecialized => OverwritePolicy::SkipSpecialized,
        }
    }
}

/// `--neighbor-search` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SearchArg {
    /// 3×3 node window with full-scan fallback.
    Window,
    /// Scan every anchor.
    Exhaustive,
}

impl From<SearchArg> for NeighborSearch {
    fn from(arg: SearchArg) -> Self {
        match arg {
            SearchArg::Window => NeighborSearch::Window3x3,
            SearchArg::Exhaustive => NeighborSearch::Exhaustive,
        }
    }
}

/// `--base-strategy` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum BaseArg {
    /// Centroid closest to the world center.
    Closest,
    /// Largest chunk within the base radius.
    Largest,
}

impl From<BaseArg> for BaseStrategy {
    fn from(arg: BaseArg) -> Self {
        match arg {
            BaseArg::Closest => BaseStrategy::ClosestToCenter,
            BaseArg::Largest => BaseStrategy::LargestWithinRadius,
        }
    }
}

/// tidewater command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "tidewater", about = "Procedural island partitioning and POI placement")]
pub struct CliArgs {
    /// World seed (random when omitted and not set in the config).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Land circle radius in cells.
    #[arg(long)]
    pub radius: Option<i32>,

    /// Water margin around the circle in cells.
    #[arg(long)]
    pub padding: Option<i32>,

    /// Node grid side length.
    #[arg(long)]
    pub grid_size: Option<i32>,

    /// Boundary tolerance for node acceptance.
    #[arg(long)]
    pub cutoff: Option<f32>,

    /// Percent chance of plains/mountain per chunk.
    #[arg(long)]
    pub terrain_chance: Option<u32>,

    /// Whether later passes may overwrite base and POI chunks.
    #[arg(long, value_enum)]
    pub overwrite_policy: Option<PolicyArg>,

    /// Nearest-anchor search used during region assignment.
    #[arg(long, value_enum)]
    pub neighbor_search: Option<SearchArg>,

    /// Base selection rule.
    #[arg(long, value_enum)]
    pub base_strategy: Option<BaseArg>,

    /// Directory for PNG output.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Pixels per map cell in PNG output.
    #[arg(long)]
    pub scale: Option<u32>,

    /// Print the ASCII map.
    #[arg(long)]
    pub ascii: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.generation.seed = Some(seed);
        }
        if let Some(r) = args.radius {
            self.world.map_radius = r;
        }
        if let Some(p) = args.padding {
            self.world.map_padding = p;
        }
        if let Some(n) = args.grid_size {
            self.world.node_grid_size = n;
        }
        if let Some(c) = args.cutoff {
            self.world.cutoff_percentage = c;
        }
        if let Some(chance) = args.terrain_chance {
            self.world.terrain_chance = chance;
        }
        if let Some(policy) = args.overwrite_policy {
            self.generation.overwrite_policy = policy.into();
        }
        if let Some(search) = args.neighbor_search {
            self.generation.neighbor_search = search.into();
        }
        if let Some(strategy) = args.base_strategy {
            self.generation.base_strategy = strategy.into();
        }
        if let Some(ref dir) = args.output_dir {
            self.output.dir = dir.clone();
        }
        if let Some(scale) = args.scale {
            self.output.scale = scale;
        }
        if args.ascii {
            self.output.ascii = true;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            seed: Some(77),
            radius: Some(30),
            overwrite_policy: Some(PolicyArg::SkipSpecialized),
            ascii: true,
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.generation.seed, Some(77));
        assert_eq!(config.world.map_radius, 30);
        assert_eq!(
            config.generation.overwrite_policy,
            OverwritePolicy::SkipSpecialized
        );
        assert!(config.output.ascii);
        // Non-overridden fields retain defaults
        assert_eq!(config.world.node_grid_size, 10);
        assert_eq!(config.output.scale, 4);
    }

    #[test]
    fn test_cli_no_override() {
        let defaults = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, defaults);
    }

    #[test]
    fn test_parse_value_enums() {
        let args = CliArgs::try_parse_from([
            "tidewater",
            "--seed",
            "5",
            "--overwrite-policy",
            "skip-specialized",
            "--neighbor-search",
            "exhaustive",
            "--base-strategy",
            "largest",
        ])
        .unwrap();
        assert_eq!(args.seed, Some(5));
        assert_eq!(args.overwrite_policy, Some(PolicyArg::SkipSpecialized));
        assert_eq!(args.neighbor_search, Some(SearchArg::Exhaustive));
        assert_eq!(args.base_strategy, Some(BaseArg::Largest));
        assert!(!args.ascii);
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let result = CliArgs::try_parse_from(["tidewater", "--overwrite-policy", "sometimes"]);
        assert!(result.is_err());
    }
}

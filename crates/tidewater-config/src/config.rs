//! Configuration structs with defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tidewater_worldgen::{
    BaseStrategy, GenerationOptions, NeighborSearch, OverwritePolicy, WorldParams,
};

use crate::error::ConfigError;

/// File name used inside a config directory.
const CONFIG_FILE: &str = "config.ron";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Shape of the world: radius, node grid, ring layers.
    pub world: WorldParams,
    /// Seeding and pass behavior.
    pub generation: GenerationConfig,
    /// Where and how results are written.
    pub output: OutputConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Seeding and pass behavior.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
    /// World seed. `None` draws a fresh one each run.
    pub seed: Option<u64>,
    /// Whether later passes may replace base and POI kinds.
    pub overwrite_policy: OverwritePolicy,
    /// Nearest-anchor search mode.
    pub neighbor_search: NeighborSearch,
    /// Base selection rule.
    pub base_strategy: BaseStrategy,
}

impl GenerationConfig {
    /// The pipeline options described by this section.
    pub fn options(&self) -> GenerationOptions {
        GenerationOptions {
            overwrite_policy: self.overwrite_policy,
            neighbor_search: self.neighbor_search,
            base_strategy: self.base_strategy,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for PNG images. Relative paths resolve against the working
    /// directory.
    pub dir: PathBuf,
    /// Pixels per map cell.
    pub scale: u32,
    /// Print the ASCII map to stdout.
    pub ascii: bool,
    /// Also write the chunk, node-grid and perimeter debug images.
    pub debug_overlay: bool,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("tidewater-out"),
            scale: 4,
            ascii: false,
            debug_overlay: true,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Load config from an explicit file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        log::debug!("Saved config to {}", config_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(4))
                .unwrap();
        assert!(ron_str.contains("map_radius: 50"));
        assert!(ron_str.contains("overwrite_policy: LastWriteWins"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.generation.seed = Some(1234);
        config.generation.overwrite_policy = OverwritePolicy::SkipSpecialized;
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_field_uses_default() {
        let ron_str = "(world: (map_radius: 80), debug: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.world.map_radius, 80);
        assert_eq!(config.world.node_grid_size, 10, "unset world fields keep defaults");
        assert_eq!(config.output, OutputConfig::default());
        assert_eq!(config.generation.seed, None);
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.world.map_radius = 64;
        config.generation.seed = Some(9);
        config.output.ascii = true;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("tidewater");
        let config = Config::load_or_create(&nested).unwrap();
        assert_eq!(config, Config::default());
        assert!(nested.join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("nope.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError(_)));
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "{{not valid}}").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_ron_comments_preserved() {
        let ron_str = "// This is a comment\n(\n  // Another comment\n)";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_generation_options() {
        let generation = GenerationConfig {
            neighbor_search: NeighborSearch::Exhaustive,
            ..Default::default()
        };
        let options = generation.options();
        assert_eq!(options.neighbor_search, NeighborSearch::Exhaustive);
        assert_eq!(options.overwrite_policy, OverwritePolicy::LastWriteWins);
    }
}

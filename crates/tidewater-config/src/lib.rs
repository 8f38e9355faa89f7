//! Configuration for the tidewater world generator.
//!
//! Settings persist to disk as `config.ron` and can be overridden from the
//! command line via clap. Every section uses `#[serde(default)]`, so partial
//! files load and unknown keys are ignored.

mod cli;
mod config;
mod error;

pub use cli::{BaseArg, CliArgs, PolicyArg, SearchArg};
pub use config::{Config, DebugConfig, GenerationConfig, OutputConfig};
pub use error::ConfigError;

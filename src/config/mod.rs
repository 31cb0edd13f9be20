//! Persisted settings for the predictor.
//!
//! Settings live in `config.toml` under the `.trendcast` root. A missing file
//! or missing keys fall back to defaults so a fresh install needs no setup
//! beyond dropping the two artifacts into the artifacts directory.

mod defaults;
mod errors;
mod io;
mod types;

pub use errors::ConfigError;
pub use io::{CONFIG_FILE_NAME, config_path, load_from, load_or_default, save, save_to_path};
pub use types::{AppSettings, ArtifactPaths, ArtifactSettings};

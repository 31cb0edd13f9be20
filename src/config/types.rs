use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::defaults::{default_encoder_path, default_model_path};
use crate::app_dirs;

/// Top-level contents of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Where the fitted model and encoder are read from.
    #[serde(default)]
    pub artifacts: ArtifactSettings,
}

/// Locations of the two persisted artifacts.
///
/// Config keys: `model_path`, `encoder_path`. Relative paths resolve against
/// the `.trendcast/artifacts` directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactSettings {
    /// Fitted random forest regressor (JSON).
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
    /// Fitted category label encoder (JSON).
    #[serde(default = "default_encoder_path")]
    pub encoder_path: PathBuf,
}

impl Default for ArtifactSettings {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            encoder_path: default_encoder_path(),
        }
    }
}

impl ArtifactSettings {
    /// Resolve both paths against `base`, leaving absolute paths untouched.
    pub fn resolve_against(&self, base: &Path) -> ArtifactPaths {
        ArtifactPaths {
            model: app_dirs::resolve_against(base, &self.model_path),
            encoder: app_dirs::resolve_against(base, &self.encoder_path),
        }
    }

    /// Resolve both paths against the application's artifacts directory.
    pub fn resolve(&self) -> Result<ArtifactPaths, app_dirs::AppDirError> {
        Ok(self.resolve_against(&app_dirs::artifacts_dir()?))
    }
}

/// Concrete artifact locations handed to the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// Model file.
    pub model: PathBuf,
    /// Encoder file.
    pub encoder: PathBuf,
}

impl ArtifactPaths {
    /// Build paths directly, mostly for tools and tests.
    pub fn new(model: impl Into<PathBuf>, encoder: impl Into<PathBuf>) -> Self {
        Self {
            model: model.into(),
            encoder: encoder.into(),
        }
    }
}

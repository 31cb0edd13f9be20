use std::path::PathBuf;

use thiserror::Error;

use crate::app_dirs::AppDirError;
use crate::config::{ArtifactPaths, ConfigError};
use crate::ml::{EncoderError, LabelEncoder, ModelError, RandomForestRegressor, Regressor};
use crate::pipeline::{SchemaError, check_schema};

/// Fatal problems with artifacts that exist but cannot be used.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Failed to load settings: {0}")]
    Config(#[from] ConfigError),
    #[error("Artifacts directory unavailable: {0}")]
    Dir(#[from] AppDirError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Encoder(#[from] EncoderError),
    /// The model's input layout does not match the feature rows.
    #[error("Model {path} is incompatible with the form inputs: {source}")]
    Schema { path: PathBuf, source: SchemaError },
}

/// Both artifacts, loaded and validated.
#[derive(Debug)]
pub struct Artifacts {
    pub model: RandomForestRegressor,
    pub encoder: LabelEncoder,
    pub paths: ArtifactPaths,
}

/// Why the app cannot offer predictions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnavailableReason {
    /// One or both artifact files do not exist.
    ArtifactsMissing { missing: Vec<PathBuf> },
}

impl UnavailableReason {
    /// User-facing advisory text.
    pub fn advisory(&self) -> String {
        match self {
            Self::ArtifactsMissing { missing } => {
                let mut text = String::from(
                    "Model files not found. Predictions are disabled until the following files are in place and the app is restarted:",
                );
                for path in missing {
                    text.push_str("\n  ");
                    text.push_str(&path.display().to_string());
                }
                text
            }
        }
    }
}

/// Result of the startup check.
#[derive(Debug)]
pub enum LoadOutcome {
    Ready(Artifacts),
    Unavailable(UnavailableReason),
}

/// Load the model and encoder from `paths`.
///
/// Missing files produce [`LoadOutcome::Unavailable`] without touching the
/// file that does exist.
pub fn load(paths: &ArtifactPaths) -> Result<LoadOutcome, ArtifactError> {
    let missing: Vec<PathBuf> = [&paths.model, &paths.encoder]
        .into_iter()
        .filter(|path| !path.is_file())
        .cloned()
        .collect();
    if !missing.is_empty() {
        tracing::warn!(?missing, "Artifacts missing; predictions unavailable");
        return Ok(LoadOutcome::Unavailable(
            UnavailableReason::ArtifactsMissing { missing },
        ));
    }

    let model = RandomForestRegressor::load_json(&paths.model)?;
    check_schema(&model).map_err(|source| ArtifactError::Schema {
        path: paths.model.clone(),
        source,
    })?;
    let encoder = LabelEncoder::load_json(&paths.encoder)?;
    tracing::info!(
        trees = model.trees.len(),
        features = model.n_features(),
        categories = encoder.len(),
        "Loaded model {} and encoder {}",
        paths.model.display(),
        paths.encoder.display()
    );
    Ok(LoadOutcome::Ready(Artifacts {
        model,
        encoder,
        paths: paths.clone(),
    }))
}

use std::sync::{Arc, OnceLock};

use super::{ArtifactError, ArtifactHandle, LoadOutcome, load};
use crate::config;

static SHARED: SharedArtifacts = SharedArtifacts::new();

/// Load-once holder for the artifact outcome.
///
/// The first caller runs the loader; every later caller gets a clone of the
/// same result, including a failed one. There is no reload.
pub struct SharedArtifacts {
    cell: OnceLock<Result<ArtifactHandle, Arc<ArtifactError>>>,
}

impl SharedArtifacts {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    pub fn get_or_load<F>(&self, loader: F) -> Result<ArtifactHandle, Arc<ArtifactError>>
    where
        F: FnOnce() -> Result<LoadOutcome, ArtifactError>,
    {
        self.cell
            .get_or_init(|| loader().map(ArtifactHandle::new).map_err(Arc::new))
            .clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl Default for SharedArtifacts {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide artifacts, located through `config.toml`.
pub fn shared() -> Result<ArtifactHandle, Arc<ArtifactError>> {
    SHARED.get_or_load(|| {
        let settings = config::load_or_default()?;
        let paths = settings.artifacts.resolve()?;
        tracing::info!(
            "Loading artifacts from {} and {}",
            paths.model.display(),
            paths.encoder.display()
        );
        load(&paths)
    })
}

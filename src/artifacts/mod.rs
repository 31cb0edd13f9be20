//! Loading and sharing the fitted model and encoder.
//!
//! [`load`] turns two artifact paths into a [`LoadOutcome`]: either both
//! artifacts are ready, or at least one file is missing and the app runs in
//! its unavailable mode. Corrupt artifacts are hard errors.
//!
//! [`shared`] memoizes the outcome for the whole process so every form
//! session reads the same instance.

mod handle;
mod loader;
mod shared;

pub use handle::ArtifactHandle;
pub use loader::{ArtifactError, Artifacts, LoadOutcome, UnavailableReason, load};
pub use shared::{SharedArtifacts, shared};

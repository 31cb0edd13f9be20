//! Inference-side model types.
//!
//! Artifacts are fitted elsewhere and only loaded and evaluated here.

pub mod forest;
pub mod label_encoder;

pub use forest::{ModelError, RandomForestRegressor, RegressionTree};
pub use label_encoder::{EncoderError, LabelEncoder};

/// A fitted model that maps one feature row to one scalar.
pub trait Regressor: Send + Sync {
    /// Number of values each row must carry.
    fn n_features(&self) -> usize;

    /// Column names recorded at fit time, if the artifact carries them.
    fn feature_names(&self) -> Option<&[String]> {
        None
    }

    /// Predict the target for a single row.
    fn predict_row(&self, row: &[f64]) -> f64;
}

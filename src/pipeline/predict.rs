use thiserror::Error;
use time::Date;

use super::display::group_thousands;
use super::features::{DateParts, FeatureVector};
use crate::ml::{LabelEncoder, Regressor};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PredictError {
    /// The category is not one the encoder was fit on.
    #[error("Unknown category {0:?}")]
    UnknownCategory(String),
}

/// Outcome of one inference call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Row the model was evaluated on.
    pub features: FeatureVector,
    /// Untruncated model output.
    pub raw: f64,
}

impl Prediction {
    /// Integer part of the raw output, dropping the fraction without rounding.
    pub fn truncated(&self) -> i64 {
        self.raw.trunc() as i64
    }

    /// Truncated value with thousands separators.
    pub fn display_value(&self) -> String {
        group_thousands(self.truncated())
    }
}

/// Derive the model row for one set of form inputs.
pub fn build_features(
    date: Date,
    increase_percentage: f64,
    category: &str,
    encoder: &LabelEncoder,
) -> Result<FeatureVector, PredictError> {
    let parts = DateParts::decompose(date);
    let code = encoder
        .transform(category)
        .map_err(|_| PredictError::UnknownCategory(category.to_string()))?;
    Ok(FeatureVector::new(increase_percentage, parts, code))
}

/// Run one prediction. The percentage is not range-checked here; the form
/// bounds it.
pub fn predict(
    date: Date,
    increase_percentage: f64,
    category: &str,
    model: &dyn Regressor,
    encoder: &LabelEncoder,
) -> Result<Prediction, PredictError> {
    let features = build_features(date, increase_percentage, category, encoder)?;
    let raw = model.predict_row(&features.to_row());
    tracing::debug!(?features, raw, "prediction");
    Ok(Prediction { features, raw })
}

//! Input-to-prediction pipeline.
//!
//! Raw form inputs become a [`FeatureVector`] in the exact column order the
//! model was fit on, then a single inference call produces a [`Prediction`].

mod display;
mod features;
mod predict;

pub use display::group_thousands;
pub use features::{
    DateParts, FEATURE_COUNT, FEATURE_NAMES, FeatureVector, SchemaError, check_schema,
};
pub use predict::{PredictError, Prediction, build_features, predict};

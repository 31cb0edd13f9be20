//! Random forest regressor loaded from a JSON artifact.
//!
//! Each tree is stored as parallel node arrays, the same layout a fitted
//! CART tree exposes after training:
//! - `children_left[i] == -1` marks node `i` as a leaf.
//! - Internal nodes send a row left when `row[feature] <= threshold`.
//! - `value[i]` is the mean target of the training rows that reached node `i`.
//!
//! The forest prediction is the plain average of its trees.

mod model;

pub use model::{LEAF, ModelError, RandomForestRegressor, RegressionTree};

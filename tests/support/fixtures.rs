use std::path::Path;

use trendcast::config::ArtifactPaths;
use trendcast::ml::forest::LEAF;
use trendcast::ml::{LabelEncoder, RandomForestRegressor, RegressionTree};
use trendcast::pipeline::FEATURE_NAMES;

/// Leaf reached by category codes above 6 in the first tree.
pub const HIGH_CATEGORY_VALUE: f64 = 15_234.7;

/// Two-tree forest over the six form features.
///
/// Tree one splits on `category_encoded` at 6.5, tree two on `dayofweek` at
/// 4.5, so weekday and category both move the average.
pub fn forest() -> RandomForestRegressor {
    let by_category = RegressionTree {
        children_left: vec![1, LEAF, LEAF],
        children_right: vec![2, LEAF, LEAF],
        feature: vec![5, -2, -2],
        threshold: vec![6.5, -2.0, -2.0],
        value: vec![0.0, 500.2, HIGH_CATEGORY_VALUE],
    };
    let by_weekday = RegressionTree {
        children_left: vec![1, LEAF, LEAF],
        children_right: vec![2, LEAF, LEAF],
        feature: vec![4, -2, -2],
        threshold: vec![4.5, -2.0, -2.0],
        value: vec![0.0, HIGH_CATEGORY_VALUE, 100.0],
    };
    RandomForestRegressor::new(
        FEATURE_NAMES.len(),
        Some(FEATURE_NAMES.iter().map(|name| name.to_string()).collect()),
        vec![by_category, by_weekday],
    )
    .expect("valid fixture forest")
}

pub const CATEGORIES: [&str; 8] = [
    "Technology", "Sports", "News", "Health", "Games", "Food", "Business", "Arts",
];

pub fn write_model(path: &Path) {
    forest().save_json(path).expect("write model fixture");
}

pub fn write_encoder(path: &Path, labels: &[&str]) {
    LabelEncoder::fit(labels.iter().copied())
        .expect("fit encoder fixture")
        .save_json(path)
        .expect("write encoder fixture");
}

/// Write both artifacts into `dir` under their default names.
pub fn write_artifacts(dir: &Path, labels: &[&str]) -> ArtifactPaths {
    std::fs::create_dir_all(dir).expect("create artifact dir");
    let paths = ArtifactPaths::new(dir.join("model.json"), dir.join("encoder.json"));
    write_model(&paths.model);
    write_encoder(&paths.encoder, labels);
    paths
}

//! Library exports for the predictor binaries, tests and benchmarks.
/// Per-user application directories.
pub mod app_dirs;
/// Loading and sharing the fitted model and encoder.
pub mod artifacts;
/// Persisted settings.
pub mod config;
/// egui prediction form.
pub mod egui_app;
/// Tracing setup.
pub mod logging;
/// Model and encoder types.
pub mod ml;
/// Form inputs to model prediction.
pub mod pipeline;

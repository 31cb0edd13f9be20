//! egui front end: a single-page prediction form.

pub mod controller;
pub mod state;
pub mod ui;

#![deny(missing_docs)]

//! Entry point for the search volume prediction form.
use eframe::egui;
use trendcast::artifacts;
use trendcast::egui_app::ui::{EguiApp, MIN_VIEWPORT_SIZE};
use trendcast::logging;

const WINDOW_TITLE: &str = "Google Trends Search Volume Predictor";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let loaded = artifacts::shared();
    match &loaded {
        Ok(handle) if handle.is_ready() => tracing::info!("Artifacts ready"),
        Ok(_) => tracing::warn!("Starting in demo mode"),
        Err(err) => tracing::error!("Artifacts failed to load: {err}"),
    }

    let viewport = egui::ViewportBuilder::default()
        .with_title(WINDOW_TITLE)
        .with_inner_size(MIN_VIEWPORT_SIZE)
        .with_min_inner_size(MIN_VIEWPORT_SIZE);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        native_options,
        Box::new(move |_cc| {
            let app: Box<dyn eframe::App> = match loaded {
                Ok(handle) => Box::new(EguiApp::new(handle)),
                Err(err) => Box::new(LaunchError {
                    message: err.to_string(),
                }),
            };
            Ok(app)
        }),
    )?;
    Ok(())
}

/// Minimal fallback app to display artifact errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to load model artifacts");
                ui.label(&self.message);
            });
        });
    }
}

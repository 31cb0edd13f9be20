//! egui renderer for the prediction form.

mod style;

use eframe::egui::{self, RichText, Ui, Vec2};
use time::{Date, OffsetDateTime};

use crate::artifacts::ArtifactHandle;
use crate::egui_app::controller::PredictorController;
use crate::egui_app::state::{PERCENT_MAX, PERCENT_MIN, PERCENT_STEP, YEAR_RANGE};

/// Smallest window that fits the whole form.
pub const MIN_VIEWPORT_SIZE: Vec2 = Vec2::new(520.0, 560.0);

const TITLE: &str = "Google Trends Search Volume Predictor";
const DESCRIPTION: &str =
    "Predict search volume from trend growth, category and date-based features.";
const MODEL_LINE: &str = "Model: Random Forest Regressor";
const SOURCE_LINE: &str = "Data source: Google Trends (US)";
const FOOTER: &str = "Random Forest Model | Google Trends US Data";

/// Renders the form using one controller session.
pub struct EguiApp {
    controller: PredictorController,
    visuals_set: bool,
}

impl EguiApp {
    pub fn new(handle: ArtifactHandle) -> Self {
        Self {
            controller: PredictorController::new(handle, today()),
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_header(&self, ui: &mut Ui) {
        let palette = style::palette();
        ui.heading(TITLE);
        ui.add_space(4.0);
        ui.label(DESCRIPTION);
        ui.label(RichText::new(MODEL_LINE).color(palette.text_muted));
        ui.label(RichText::new(SOURCE_LINE).color(palette.text_muted));
    }

    fn render_unavailable(&self, ui: &mut Ui, advisory: &str) {
        let palette = style::palette();
        ui.add_space(12.0);
        ui.label(
            RichText::new("Demo mode")
                .strong()
                .color(palette.warning),
        );
        ui.label(advisory);
    }

    fn render_inputs(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("Input Parameters").strong());
        ui.add_space(6.0);
        egui::Grid::new("inputs_grid")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label("Select Date");
                self.render_date_fields(ui);
                ui.end_row();

                ui.label("Increase Percentage (%)");
                ui.add(
                    egui::DragValue::new(&mut self.controller.form.increase_percentage)
                        .range(PERCENT_MIN..=PERCENT_MAX)
                        .speed(PERCENT_STEP)
                        .fixed_decimals(1)
                        .suffix(" %"),
                );
                ui.end_row();

                ui.label("Select Search Category");
                self.render_category_select(ui);
                ui.end_row();
            });
    }

    fn render_date_fields(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            let date = &mut self.controller.form.date;
            ui.add(
                egui::DragValue::new(&mut date.year)
                    .range(YEAR_RANGE)
                    .prefix("year "),
            );
            ui.add(egui::DragValue::new(&mut date.month).range(1..=12).prefix("month "));
            ui.add(egui::DragValue::new(&mut date.day).range(1..=31).prefix("day "));
            if ui.button("Today").clicked() {
                self.controller.reset_date(today());
            }
            if self.controller.selected_date().is_none() {
                ui.colored_label(style::palette().warning, "not a calendar date");
            }
        });
    }

    fn render_category_select(&mut self, ui: &mut Ui) {
        let selected = self
            .controller
            .selected_category()
            .unwrap_or_default()
            .to_string();
        // Cloned so the combo box can write the index back into the form.
        let categories = self.controller.categories().to_vec();
        egui::ComboBox::from_id_salt("category_select")
            .selected_text(selected)
            .show_ui(ui, |ui| {
                for (index, label) in categories.iter().enumerate() {
                    ui.selectable_value(
                        &mut self.controller.form.category_index,
                        index,
                        label.as_str(),
                    );
                }
            });
    }

    fn render_prediction(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        let clicked = ui
            .add_enabled(
                self.controller.can_predict(),
                egui::Button::new("Predict Search Volume"),
            )
            .clicked();
        if clicked {
            self.controller.predict();
        }
        ui.add_space(8.0);
        if let Some(result) = &self.controller.form.result {
            ui.colored_label(palette.success, "Prediction successful");
            ui.label(RichText::new("Predicted Search Volume").color(palette.text_muted));
            ui.label(RichText::new(&result.value).size(32.0).strong())
                .on_hover_text(format!("raw model output {:.3}", result.raw));
        } else if let Some(error) = &self.controller.form.error {
            ui.colored_label(palette.warning, error.as_str());
        }
    }

    fn render_footer(&self, ui: &mut Ui) {
        ui.label(
            RichText::new(FOOTER)
                .small()
                .color(style::palette().text_muted),
        );
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.discard_stale_result();
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.render_header(ui);
                ui.separator();
                if let Some(advisory) = self.controller.advisory() {
                    self.render_unavailable(ui, &advisory);
                    return;
                }
                self.render_inputs(ui);
                ui.separator();
                self.render_prediction(ui);
                ui.separator();
                self.render_footer(ui);
            });
        });
    }
}

/// Current local date, or the UTC date when the local offset is unknown.
pub fn today() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}

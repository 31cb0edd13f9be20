//! Form logic kept apart from rendering so it can be driven in tests.

use time::Date;

use crate::artifacts::ArtifactHandle;
use crate::egui_app::state::{DateInput, FormState, ResultView, SubmittedInputs, clamp_percentage};
use crate::pipeline;

/// Bridges the shared artifacts to one form session.
pub struct PredictorController {
    handle: ArtifactHandle,
    pub form: FormState,
}

impl PredictorController {
    pub fn new(handle: ArtifactHandle, today: Date) -> Self {
        Self {
            handle,
            form: FormState::new(today),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.handle.is_ready()
    }

    pub fn handle(&self) -> &ArtifactHandle {
        &self.handle
    }

    /// Advisory text when predictions are unavailable.
    pub fn advisory(&self) -> Option<String> {
        self.handle.unavailable_reason().map(|reason| reason.advisory())
    }

    /// Selectable categories, read from the loaded encoder every time.
    pub fn categories(&self) -> &[String] {
        self.handle
            .encoder()
            .map(|encoder| encoder.classes())
            .unwrap_or(&[])
    }

    pub fn selected_category(&self) -> Option<&str> {
        self.categories()
            .get(self.form.category_index)
            .map(String::as_str)
    }

    pub fn selected_date(&self) -> Option<Date> {
        self.form.date.to_date()
    }

    pub fn can_predict(&self) -> bool {
        self.is_ready() && self.selected_date().is_some() && self.selected_category().is_some()
    }

    pub fn reset_date(&mut self, today: Date) {
        self.form.date = DateInput::from_date(today);
    }

    /// Drop a shown result once the inputs no longer match it.
    pub fn discard_stale_result(&mut self) {
        let current = self.current_inputs();
        let stale = self
            .form
            .result
            .as_ref()
            .is_some_and(|result| current.as_ref() != Some(&result.inputs));
        if stale {
            self.form.result = None;
            self.form.error = None;
        }
    }

    fn current_inputs(&self) -> Option<SubmittedInputs> {
        Some(SubmittedInputs {
            date: self.selected_date()?,
            increase_percentage: clamp_percentage(self.form.increase_percentage),
            category: self.selected_category()?.to_string(),
        })
    }

    /// Run one prediction for the current inputs.
    ///
    /// Returns `None` without touching the model when artifacts are
    /// unavailable or the inputs are incomplete.
    pub fn predict(&mut self) -> Option<&ResultView> {
        let model = self.handle.model()?;
        let encoder = self.handle.encoder()?;
        self.form.increase_percentage = clamp_percentage(self.form.increase_percentage);
        let inputs = self.current_inputs()?;
        match pipeline::predict(
            inputs.date,
            inputs.increase_percentage,
            &inputs.category,
            model,
            encoder,
        ) {
            Ok(prediction) => {
                tracing::info!(
                    category = %inputs.category,
                    raw = prediction.raw,
                    "Predicted search volume {}",
                    prediction.truncated()
                );
                self.form.error = None;
                self.form.result = Some(ResultView {
                    value: prediction.display_value(),
                    raw: prediction.raw,
                    inputs,
                });
            }
            Err(err) => {
                tracing::warn!("Prediction failed: {err}");
                self.form.result = None;
                self.form.error = Some(err.to_string());
            }
        }
        self.form.result.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::{Artifacts, LoadOutcome, UnavailableReason};
    use crate::config::ArtifactPaths;
    use crate::ml::forest::LEAF;
    use crate::ml::{LabelEncoder, RandomForestRegressor, RegressionTree};
    use time::Month;

    fn today() -> Date {
        Date::from_calendar_date(2024, Month::March, 15).unwrap()
    }

    /// Predicts 15234.7 for category code 7 and 500.2 otherwise.
    fn ready_handle(labels: &[&str]) -> ArtifactHandle {
        let tree = RegressionTree {
            children_left: vec![1, LEAF, LEAF],
            children_right: vec![2, LEAF, LEAF],
            feature: vec![5, -2, -2],
            threshold: vec![6.5, -2.0, -2.0],
            value: vec![0.0, 500.2, 15_234.7],
        };
        ArtifactHandle::new(LoadOutcome::Ready(Artifacts {
            model: RandomForestRegressor::new(6, None, vec![tree]).unwrap(),
            encoder: LabelEncoder::fit(labels.iter().copied()).unwrap(),
            paths: ArtifactPaths::new("model.json", "encoder.json"),
        }))
    }

    fn eight_categories() -> ArtifactHandle {
        ready_handle(&[
            "Technology", "Arts", "Business", "Food", "Games", "Health", "News", "Sports",
        ])
    }

    fn unavailable_handle() -> ArtifactHandle {
        ArtifactHandle::new(LoadOutcome::Unavailable(
            UnavailableReason::ArtifactsMissing {
                missing: vec!["model.json".into()],
            },
        ))
    }

    #[test]
    fn categories_follow_the_loaded_encoder() {
        let controller = PredictorController::new(eight_categories(), today());
        assert_eq!(
            controller.categories(),
            ["Arts", "Business", "Food", "Games", "Health", "News", "Sports", "Technology"]
        );

        let other = PredictorController::new(ready_handle(&["Zebra", "Apple"]), today());
        assert_eq!(other.categories(), ["Apple", "Zebra"]);
    }

    #[test]
    fn predict_formats_truncated_value() {
        let mut controller = PredictorController::new(eight_categories(), today());
        controller.form.category_index = 7;
        let result = controller.predict().unwrap().clone();
        assert_eq!(result.value, "15,234");
        assert_eq!(result.inputs.category, "Technology");
        assert_eq!(result.inputs.increase_percentage, 10.0);

        controller.form.category_index = 0;
        assert_eq!(controller.predict().unwrap().value, "500");
    }

    #[test]
    fn unavailable_controller_never_predicts() {
        let mut controller = PredictorController::new(unavailable_handle(), today());
        assert!(!controller.is_ready());
        assert!(!controller.can_predict());
        assert!(controller.categories().is_empty());
        assert!(controller.predict().is_none());
        assert!(controller.form.result.is_none());
        assert!(controller.advisory().unwrap().contains("model.json"));
    }

    #[test]
    fn invalid_date_blocks_prediction() {
        let mut controller = PredictorController::new(eight_categories(), today());
        controller.form.date.month = 2;
        controller.form.date.day = 30;
        assert!(!controller.can_predict());
        assert!(controller.predict().is_none());

        controller.reset_date(today());
        assert!(controller.can_predict());
    }

    #[test]
    fn out_of_range_percentage_is_clamped_before_predicting() {
        let mut controller = PredictorController::new(eight_categories(), today());
        controller.form.increase_percentage = 900.0;
        let result = controller.predict().unwrap();
        assert_eq!(result.inputs.increase_percentage, 500.0);
        assert_eq!(controller.form.increase_percentage, 500.0);
    }

    #[test]
    fn changing_inputs_discards_the_result() {
        let mut controller = PredictorController::new(eight_categories(), today());
        controller.predict().unwrap();
        controller.discard_stale_result();
        assert!(controller.form.result.is_some());

        controller.form.increase_percentage = 11.0;
        controller.discard_stale_result();
        assert!(controller.form.result.is_none());
    }

    #[test]
    fn sessions_share_one_handle() {
        let handle = eight_categories();
        let first = PredictorController::new(handle.clone(), today());
        let second = PredictorController::new(handle, today());
        assert!(first.handle().same_instance(second.handle()));
    }
}

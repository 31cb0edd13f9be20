use std::sync::Arc;

use super::{Artifacts, LoadOutcome, UnavailableReason};
use crate::ml::{LabelEncoder, Regressor};

/// Cheap, cloneable view of the process-wide load outcome.
///
/// Nothing mutates the artifacts after loading, so clones can be handed to
/// any number of form sessions.
#[derive(Debug, Clone)]
pub struct ArtifactHandle {
    outcome: Arc<LoadOutcome>,
}

impl ArtifactHandle {
    pub fn new(outcome: LoadOutcome) -> Self {
        Self {
            outcome: Arc::new(outcome),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(*self.outcome, LoadOutcome::Ready(_))
    }

    pub fn artifacts(&self) -> Option<&Artifacts> {
        match &*self.outcome {
            LoadOutcome::Ready(artifacts) => Some(artifacts),
            LoadOutcome::Unavailable(_) => None,
        }
    }

    pub fn model(&self) -> Option<&dyn Regressor> {
        self.artifacts().map(|artifacts| &artifacts.model as &dyn Regressor)
    }

    pub fn encoder(&self) -> Option<&LabelEncoder> {
        self.artifacts().map(|artifacts| &artifacts.encoder)
    }

    pub fn unavailable_reason(&self) -> Option<&UnavailableReason> {
        match &*self.outcome {
            LoadOutcome::Ready(_) => None,
            LoadOutcome::Unavailable(reason) => Some(reason),
        }
    }

    /// Whether two handles share one loaded instance.
    pub fn same_instance(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.outcome, &other.outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArtifactPaths;
    use crate::ml::{RandomForestRegressor, RegressionTree};

    fn ready() -> ArtifactHandle {
        ArtifactHandle::new(LoadOutcome::Ready(Artifacts {
            model: RandomForestRegressor::new(6, None, vec![RegressionTree::constant(5.0)])
                .unwrap(),
            encoder: LabelEncoder::fit(["A"]).unwrap(),
            paths: ArtifactPaths::new("m.json", "e.json"),
        }))
    }

    #[test]
    fn ready_handle_exposes_both_artifacts() {
        let handle = ready();
        assert!(handle.is_ready());
        assert_eq!(handle.model().unwrap().predict_row(&[0.0; 6]), 5.0);
        assert_eq!(handle.encoder().unwrap().classes(), ["A"]);
        assert!(handle.unavailable_reason().is_none());
    }

    #[test]
    fn unavailable_handle_exposes_nothing() {
        let handle = ArtifactHandle::new(LoadOutcome::Unavailable(
            UnavailableReason::ArtifactsMissing {
                missing: vec!["m.json".into()],
            },
        ));
        assert!(!handle.is_ready());
        assert!(handle.model().is_none());
        assert!(handle.encoder().is_none());
        assert!(handle.unavailable_reason().is_some());
    }

    #[test]
    fn clones_share_the_instance() {
        let handle = ready();
        let clone = handle.clone();
        assert!(handle.same_instance(&clone));
        assert!(!handle.same_instance(&ready()));
    }
}

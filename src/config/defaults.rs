use std::path::PathBuf;

pub(super) const DEFAULT_MODEL_FILE: &str = "model.json";
pub(super) const DEFAULT_ENCODER_FILE: &str = "encoder.json";

pub(super) fn default_model_path() -> PathBuf {
    PathBuf::from(DEFAULT_MODEL_FILE)
}

pub(super) fn default_encoder_path() -> PathBuf {
    PathBuf::from(DEFAULT_ENCODER_FILE)
}

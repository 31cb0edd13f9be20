//! Label encoding for categorical inputs.
//!
//! Each known label maps to its index in the sorted class list. Codes carry
//! no ordinal meaning; they only have to match what the model saw at fit time.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading an encoder or translating labels.
#[derive(Debug, Error)]
pub enum EncoderError {
    /// The artifact file could not be read.
    #[error("Failed to read encoder {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The artifact is not valid encoder JSON.
    #[error("Failed to parse encoder {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The encoder could not be encoded as JSON.
    #[error("Failed to encode encoder for {path}: {source}")]
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The artifact could not be written.
    #[error("Failed to write encoder {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    /// No classes were provided.
    #[error("Encoder has no classes")]
    Empty,
    /// Stored classes are not strictly ascending.
    #[error("Encoder classes must be sorted and unique; {previous:?} precedes {next:?}")]
    Unsorted { previous: String, next: String },
    /// A label outside the fitted class set was presented.
    #[error("Unknown category {0:?}")]
    UnknownCategory(String),
    /// A code outside `0..len` was presented.
    #[error("Unknown category code {0}")]
    UnknownCode(u32),
}

/// On-disk shape: `{"classes": ["...", ...]}`.
#[derive(Deserialize)]
struct EncoderFile {
    classes: Vec<String>,
}

/// Fitted label encoder with a closed, sorted class set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Fit an encoder on raw labels: sort and deduplicate them.
    pub fn fit<I, S>(labels: I) -> Result<Self, EncoderError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut classes: Vec<String> = labels.into_iter().map(Into::into).collect();
        classes.sort();
        classes.dedup();
        Self::from_classes(classes)
    }

    /// Adopt an already fitted class list, which must be sorted and unique.
    pub fn from_classes(classes: Vec<String>) -> Result<Self, EncoderError> {
        if classes.is_empty() {
            return Err(EncoderError::Empty);
        }
        if let Some(pair) = classes.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(EncoderError::Unsorted {
                previous: pair[0].clone(),
                next: pair[1].clone(),
            });
        }
        Ok(Self { classes })
    }

    /// Load and validate an encoder from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self, EncoderError> {
        let bytes = std::fs::read(path).map_err(|source| EncoderError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: EncoderFile =
            serde_json::from_slice(&bytes).map_err(|source| EncoderError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_classes(file.classes)
    }

    /// Write the encoder as JSON.
    pub fn save_json(&self, path: &Path) -> Result<(), EncoderError> {
        let bytes = serde_json::to_vec_pretty(self).map_err(|source| EncoderError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, bytes).map_err(|source| EncoderError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Known labels in lexicographic order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.transform(label).is_ok()
    }

    /// Code for `label`.
    pub fn transform(&self, label: &str) -> Result<u32, EncoderError> {
        self.classes
            .binary_search_by(|class| class.as_str().cmp(label))
            .map(|idx| idx as u32)
            .map_err(|_| EncoderError::UnknownCategory(label.to_string()))
    }

    /// Label for `code`.
    pub fn inverse_transform(&self, code: u32) -> Result<&str, EncoderError> {
        self.classes
            .get(code as usize)
            .map(String::as_str)
            .ok_or(EncoderError::UnknownCode(code))
    }
}

use thiserror::Error;
use time::Date;

use crate::ml::Regressor;

/// Number of columns in every feature row.
pub const FEATURE_COUNT: usize = 6;

/// Column names in the order the model consumes them.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "increase_percentage",
    "year",
    "month",
    "day",
    "dayofweek",
    "category_encoded",
];

/// Calendar components derived from a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateParts {
    pub year: i32,
    /// 1-12.
    pub month: u8,
    /// 1-31.
    pub day: u8,
    /// 0 = Monday ... 6 = Sunday.
    pub day_of_week: u8,
}

impl DateParts {
    pub fn decompose(date: Date) -> Self {
        Self {
            year: date.year(),
            month: u8::from(date.month()),
            day: date.day(),
            day_of_week: date.weekday().number_days_from_monday(),
        }
    }
}

/// One model input row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub increase_percentage: f64,
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub day_of_week: u8,
    pub category_encoded: u32,
}

impl FeatureVector {
    pub fn new(increase_percentage: f64, date: DateParts, category_encoded: u32) -> Self {
        Self {
            increase_percentage,
            year: date.year,
            month: date.month,
            day: date.day,
            day_of_week: date.day_of_week,
            category_encoded,
        }
    }

    /// Row in [`FEATURE_NAMES`] order.
    pub fn to_row(&self) -> [f64; FEATURE_COUNT] {
        [
            self.increase_percentage,
            f64::from(self.year),
            f64::from(self.month),
            f64::from(self.day),
            f64::from(self.day_of_week),
            f64::from(self.category_encoded),
        ]
    }
}

/// A model whose input layout cannot accept [`FeatureVector`] rows.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Model expects {actual} features but the form produces {}", FEATURE_COUNT)]
    FeatureCount { actual: usize },
    #[error("Model feature {index} is {actual:?}, expected {expected:?}")]
    FeatureName {
        index: usize,
        expected: &'static str,
        actual: String,
    },
}

/// Check a model against the row layout.
///
/// Column names are only compared when the artifact recorded them.
pub fn check_schema(model: &dyn Regressor) -> Result<(), SchemaError> {
    if model.n_features() != FEATURE_COUNT {
        return Err(SchemaError::FeatureCount {
            actual: model.n_features(),
        });
    }
    let Some(names) = model.feature_names() else {
        return Ok(());
    };
    for (index, (actual, expected)) in names.iter().zip(FEATURE_NAMES).enumerate() {
        if actual != expected {
            return Err(SchemaError::FeatureName {
                index,
                expected,
                actual: actual.clone(),
            });
        }
    }
    Ok(())
}

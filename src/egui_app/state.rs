//! Plain data behind the form widgets.

use time::{Date, Month};

/// Lower bound of the percentage input.
pub const PERCENT_MIN: f64 = -100.0;
/// Upper bound of the percentage input.
pub const PERCENT_MAX: f64 = 500.0;
/// Initial percentage value.
pub const PERCENT_DEFAULT: f64 = 10.0;
/// Drag granularity of the percentage input.
pub const PERCENT_STEP: f64 = 0.1;

/// Oldest and newest year the date fields accept.
pub const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1..=9999;

/// Editable year/month/day fields.
///
/// Fields are edited independently, so the combination may not be a real
/// calendar date until the user finishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateInput {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl DateInput {
    pub fn from_date(date: Date) -> Self {
        Self {
            year: date.year(),
            month: u8::from(date.month()),
            day: date.day(),
        }
    }

    /// The calendar date, if the fields form one.
    pub fn to_date(self) -> Option<Date> {
        if !YEAR_RANGE.contains(&self.year) {
            return None;
        }
        let month = Month::try_from(self.month).ok()?;
        Date::from_calendar_date(self.year, month, self.day).ok()
    }
}

/// Inputs that produced a displayed result.
#[derive(Clone, Debug, PartialEq)]
pub struct SubmittedInputs {
    pub date: Date,
    pub increase_percentage: f64,
    pub category: String,
}

/// A rendered prediction.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultView {
    /// Truncated value with thousands separators.
    pub value: String,
    /// Untruncated model output, kept for logging and hover text.
    pub raw: f64,
    pub inputs: SubmittedInputs,
}

/// Everything the form shows besides the artifact-derived category list.
#[derive(Clone, Debug, PartialEq)]
pub struct FormState {
    pub date: DateInput,
    pub increase_percentage: f64,
    /// Index into the encoder's sorted labels.
    pub category_index: usize,
    pub result: Option<ResultView>,
    /// Message for a prediction that could not be produced.
    pub error: Option<String>,
}

impl FormState {
    pub fn new(today: Date) -> Self {
        Self {
            date: DateInput::from_date(today),
            increase_percentage: PERCENT_DEFAULT,
            category_index: 0,
            result: None,
            error: None,
        }
    }
}

/// Clamp a percentage into the accepted input range.
pub fn clamp_percentage(value: f64) -> f64 {
    if value.is_nan() {
        return PERCENT_DEFAULT;
    }
    value.clamp(PERCENT_MIN, PERCENT_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_input_round_trips_real_dates() {
        let date = Date::from_calendar_date(2024, Month::February, 29).unwrap();
        let input = DateInput::from_date(date);
        assert_eq!(
            input,
            DateInput {
                year: 2024,
                month: 2,
                day: 29
            }
        );
        assert_eq!(input.to_date(), Some(date));
    }

    #[test]
    fn impossible_dates_are_rejected() {
        for input in [
            DateInput { year: 2023, month: 2, day: 29 },
            DateInput { year: 2024, month: 4, day: 31 },
            DateInput { year: 2024, month: 13, day: 1 },
            DateInput { year: 2024, month: 0, day: 1 },
            DateInput { year: 0, month: 1, day: 1 },
        ] {
            assert_eq!(input.to_date(), None, "{input:?}");
        }
    }

    #[test]
    fn new_form_uses_defaults() {
        let today = Date::from_calendar_date(2026, Month::October, 19).unwrap();
        let form = FormState::new(today);
        assert_eq!(form.date.to_date(), Some(today));
        assert_eq!(form.increase_percentage, 10.0);
        assert_eq!(form.category_index, 0);
        assert!(form.result.is_none());
    }

    #[test]
    fn percentage_clamps_to_bounds() {
        assert_eq!(clamp_percentage(-250.0), -100.0);
        assert_eq!(clamp_percentage(500.0), 500.0);
        assert_eq!(clamp_percentage(612.3), 500.0);
        assert_eq!(clamp_percentage(12.5), 12.5);
        assert_eq!(clamp_percentage(f64::NAN), PERCENT_DEFAULT);
    }
}

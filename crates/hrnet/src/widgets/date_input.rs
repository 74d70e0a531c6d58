//! Date input bound to the `MM/DD/YYYY` text format.
//!
//! Values are held as [`NaiveDate`]. The external text form is what the form
//! and the record store see; the internal `YYYY-MM-DD` form is what a native
//! date picker speaks.

use chrono::{Local, NaiveDate};

use crate::error::{Error, Result};

/// `chrono` format of the external text form.
pub const EXTERNAL_FORMAT: &str = "%m/%d/%Y";

/// `chrono` format of the internal text form.
pub const INTERNAL_FORMAT: &str = "%Y-%m-%d";

/// Parse `MM/DD/YYYY`.
///
/// # Errors
///
/// Returns [`Error::DateFormat`] if the text is not a valid date in that format.
pub fn parse_external(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), EXTERNAL_FORMAT).map_err(|_| Error::DateFormat {
        input: text.to_string(),
        expected: "MM/DD/YYYY",
    })
}

/// Parse `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns [`Error::DateFormat`] if the text is not a valid date in that format.
pub fn parse_internal(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), INTERNAL_FORMAT).map_err(|_| Error::DateFormat {
        input: text.to_string(),
        expected: "YYYY-MM-DD",
    })
}

/// Format a date as `MM/DD/YYYY`.
#[must_use]
pub fn format_external(date: NaiveDate) -> String {
    date.format(EXTERNAL_FORMAT).to_string()
}

/// Format a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_internal(date: NaiveDate) -> String {
    date.format(INTERNAL_FORMAT).to_string()
}

/// A single optional date with inclusive bounds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateInput {
    value: Option<NaiveDate>,
    min: Option<NaiveDate>,
    max: Option<NaiveDate>,
}

impl DateInput {
    /// An empty, unbounded input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Earliest selectable date, inclusive.
    #[must_use]
    pub fn with_min(mut self, min: NaiveDate) -> Self {
        self.min = Some(min);
        self
    }

    /// Latest selectable date, inclusive.
    #[must_use]
    pub fn with_max(mut self, max: NaiveDate) -> Self {
        self.max = Some(max);
        self
    }

    /// Forbid dates after today (local time).
    #[must_use]
    pub fn not_after_today(self) -> Self {
        self.with_max(Local::now().date_naive())
    }

    /// Earliest selectable date.
    #[must_use]
    pub fn min(&self) -> Option<NaiveDate> {
        self.min
    }

    /// Latest selectable date.
    #[must_use]
    pub fn max(&self) -> Option<NaiveDate> {
        self.max
    }

    /// Whether `date` lies within the bounds.
    #[must_use]
    pub fn is_selectable(&self, date: NaiveDate) -> bool {
        self.min.map_or(true, |min| date >= min) && self.max.map_or(true, |max| date <= max)
    }

    /// Pick a date. Out-of-range dates are rejected and the value is left as it was.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DateOutOfRange`] if `date` is outside the bounds.
    pub fn select(&mut self, date: NaiveDate) -> Result<()> {
        if let Some(min) = self.min.filter(|min| date < *min) {
            return Err(Error::DateOutOfRange {
                date,
                bound: format!("earliest {}", format_external(min)),
            });
        }
        if let Some(max) = self.max.filter(|max| date > *max) {
            return Err(Error::DateOutOfRange {
                date,
                bound: format!("latest {}", format_external(max)),
            });
        }
        self.value = Some(date);
        Ok(())
    }

    /// Clear the value.
    pub fn clear(&mut self) {
        self.value = None;
    }

    /// Set from `MM/DD/YYYY`; empty text clears.
    ///
    /// # Errors
    ///
    /// Returns an error if the text does not parse or is out of range.
    pub fn set_external(&mut self, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            self.clear();
            return Ok(());
        }
        self.select(parse_external(text)?)
    }

    /// Set from `YYYY-MM-DD`; empty text clears.
    ///
    /// # Errors
    ///
    /// Returns an error if the text does not parse or is out of range.
    pub fn set_internal(&mut self, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            self.clear();
            return Ok(());
        }
        self.select(parse_internal(text)?)
    }

    /// Set from either text form.
    ///
    /// # Errors
    ///
    /// Returns an error if the text matches neither form or is out of range.
    pub fn set_text(&mut self, text: &str) -> Result<()> {
        if text.contains('-') {
            self.set_internal(text)
        } else {
            self.set_external(text)
        }
    }

    /// The selected date.
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        self.value
    }

    /// `MM/DD/YYYY`, or the empty string when cleared.
    #[must_use]
    pub fn external(&self) -> String {
        self.value.map(format_external).unwrap_or_default()
    }

    /// `YYYY-MM-DD`, or the empty string when cleared.
    #[must_use]
    pub fn internal(&self) -> String {
        self.value.map(format_internal).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_internal_to_external() {
        let mut input = DateInput::new();
        input.set_internal("2024-03-17").unwrap();

        assert_eq!(input.external(), "03/17/2024");
        assert_eq!(input.internal(), "2024-03-17");
    }

    #[test]
    fn test_external_to_internal() {
        let mut input = DateInput::new();
        input.set_external("12/01/1999").unwrap();

        assert_eq!(input.date(), Some(date(1999, 12, 1)));
        assert_eq!(input.internal(), "1999-12-01");
        assert_eq!(input.external(), "12/01/1999");
    }

    #[test]
    fn test_cleared_emits_empty_string() {
        let mut input = DateInput::new();
        assert_eq!(input.external(), "");

        input.set_external("03/17/2024").unwrap();
        input.set_external("").unwrap();
        assert_eq!(input.external(), "");
        assert_eq!(input.date(), None);

        input.set_internal("2024-03-17").unwrap();
        input.clear();
        assert_eq!(input.internal(), "");
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let mut input = DateInput::new()
            .with_min(date(2024, 1, 1))
            .with_max(date(2024, 12, 31));

        assert!(input.select(date(2024, 1, 1)).is_ok());
        assert!(input.select(date(2024, 12, 31)).is_ok());
        assert!(input.is_selectable(date(2024, 6, 1)));
        assert!(!input.is_selectable(date(2025, 1, 1)));
    }

    #[test]
    fn test_out_of_range_rejected_and_value_kept() {
        let mut input = DateInput::new().with_max(date(2024, 3, 17));
        input.select(date(2024, 3, 1)).unwrap();

        let err = input.select(date(2024, 3, 18)).unwrap_err();
        assert!(matches!(err, Error::DateOutOfRange { .. }));
        assert!(err.to_string().contains("03/17/2024"));
        assert_eq!(input.date(), Some(date(2024, 3, 1)));

        let mut input = DateInput::new().with_min(date(2000, 1, 1));
        assert!(input.set_external("12/31/1999").is_err());
        assert_eq!(input.date(), None);
    }

    #[test]
    fn test_not_after_today() {
        let mut input = DateInput::new().not_after_today();
        let today = input.max().unwrap();

        assert!(input.select(today).is_ok());
        assert!(input.select(today.succ_opt().unwrap()).is_err());
    }

    #[test]
    fn test_invalid_text_rejected() {
        let mut input = DateInput::new();
        assert!(matches!(
            input.set_external("2024/17/03"),
            Err(Error::DateFormat { .. })
        ));
        assert!(input.set_internal("03/17/2024").is_err());
        assert!(input.set_external("02/30/2024").is_err());
    }

    #[test]
    fn test_set_text_accepts_both_forms() {
        let mut input = DateInput::new();
        input.set_text("2024-03-17").unwrap();
        assert_eq!(input.external(), "03/17/2024");

        input.set_text("01/02/2023").unwrap();
        assert_eq!(input.internal(), "2023-01-02");
    }

    #[test]
    fn test_free_functions_round_trip() {
        let d = parse_internal("2024-03-17").unwrap();
        assert_eq!(format_external(d), "03/17/2024");
        assert_eq!(parse_external("03/17/2024").unwrap(), d);
        assert_eq!(format_internal(d), "2024-03-17");
    }
}

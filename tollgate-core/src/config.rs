//! Configuration loaded from a TOML file.
//!
//! Every section is optional; an empty file yields the built-in tariff,
//! strict ordering, and no extra calendars.
//!
//! ```toml
//! ordering = "sort"
//!
//! [tariff]
//! daily_cap = 60
//! merge_window_minutes = 60
//!
//! [[calendars]]
//! year = 2014
//! dates = ["2014-01-01", "2014-01-06"]
//! ranges = [{ start = "2014-07-01", end = "2014-07-31" }]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::calendar::HolidayTable;
use crate::ports::TollError;
use crate::tariff::Tariff;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// What to do with passages that are not in chronological order.
pub enum OrderPolicy {
    /// Fail with [`TollError::UnsortedPassages`].
    #[default]
    Reject,
    /// Sort a copy of the passages before pricing.
    Sort,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Settings for a [`crate::service::TollCalculator`].
pub struct TollConfig {
    /// Pricing rules.
    pub tariff: Tariff,
    /// Handling of unsorted input.
    pub ordering: OrderPolicy,
    /// Holiday tables added on top of the compiled-in calendar plugins.
    pub calendars: Vec<HolidayTable>,
}

impl TollConfig {
    /// Read and validate a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`TollError::Io`] when the file cannot be read, and any error of
    /// [`TollConfig::from_toml`].
    pub fn load(path: &Path) -> Result<Self, TollError> {
        let raw = fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    /// Parse and validate configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`TollError::Config`] for malformed TOML or unknown keys,
    /// [`TollError::InvalidTariff`] or [`TollError::InvalidCalendar`] for inconsistent contents.
    pub fn from_toml(raw: &str) -> Result<Self, TollError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the tariff and every holiday table.
    ///
    /// # Errors
    ///
    /// Returns the first [`TollError::InvalidTariff`] or [`TollError::InvalidCalendar`] found.
    pub fn validate(&self) -> Result<(), TollError> {
        self.tariff.validate()?;
        self.calendars.iter().try_for_each(HolidayTable::validate)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::model::Fee;
    use crate::ports::HolidayCalendar;

    #[test]
    fn empty_text_yields_defaults() {
        let config = TollConfig::from_toml("").expect("empty config is valid");
        assert_eq!(config, TollConfig::default());
        assert_eq!(config.ordering, OrderPolicy::Reject);
        assert_eq!(config.tariff.daily_cap, Fee(60));
    }

    #[test]
    fn example_file_spells_out_the_defaults() {
        let config = TollConfig::from_toml(include_str!("../../tollgate.example.toml"))
            .expect("valid example config");
        assert_eq!(config, TollConfig::default());
    }

    #[test]
    fn partial_tariff_keeps_default_bands() {
        let config = TollConfig::from_toml(
            r#"
            ordering = "sort"

            [tariff]
            daily_cap = 45
            "#,
        )
        .expect("valid config");

        assert_eq!(config.ordering, OrderPolicy::Sort);
        assert_eq!(config.tariff.daily_cap, Fee(45));
        assert_eq!(config.tariff.bands, Tariff::default().bands);
        assert_eq!(config.tariff.merge_window_minutes, 60);
    }

    #[test]
    fn custom_bands_and_calendars_are_parsed() {
        let config = TollConfig::from_toml(
            r#"
            [tariff.window]
            opens = "07:00:00"
            closes = "09:00:00"

            [[tariff.bands]]
            start = "07:00:00"
            end = "09:00:00"
            fee = 20

            [[calendars]]
            year = 2014
            dates = ["2014-01-01"]
            ranges = [{ start = "2014-07-01", end = "2014-07-31" }]
            "#,
        )
        .expect("valid config");

        assert_eq!(config.tariff.bands.len(), 1);
        let calendar = config.calendars.first().expect("one calendar");
        assert_eq!(calendar.year(), 2014);
        assert!(calendar.is_holiday(NaiveDate::from_ymd_opt(2014, 7, 15).expect("valid date")));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            TollConfig::from_toml("currency = \"SEK\""),
            Err(TollError::Config(_))
        ));
    }

    #[test]
    fn inconsistent_calendar_fails_validation() {
        let result = TollConfig::from_toml(
            r#"
            [[calendars]]
            year = 2014
            dates = ["2013-12-31"]
            "#,
        );
        assert!(matches!(result, Err(TollError::InvalidCalendar { year: 2014, .. })));
    }

    #[test]
    fn overlapping_bands_fail_validation() {
        let result = TollConfig::from_toml(
            r#"
            [[tariff.bands]]
            start = "06:00:00"
            end = "07:00:00"
            fee = 8

            [[tariff.bands]]
            start = "06:30:00"
            end = "08:00:00"
            fee = 13
            "#,
        );
        assert!(matches!(result, Err(TollError::InvalidTariff(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = TollConfig::load(Path::new("/nonexistent/tollgate.toml"));
        assert!(matches!(result, Err(TollError::Io(_))));
    }
}

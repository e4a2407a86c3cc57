//! Error type and the trait describing holiday calendar providers.

use std::io::Error as IoError;

use chrono::{NaiveDate, NaiveDateTime};
use toml::de::Error as TomlError;

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while configuring the calculator or pricing a day.
pub enum TollError {
    /// A passage was earlier than the one before it.
    #[error("Passages out of order at index {index}: {current} precedes {previous}")]
    UnsortedPassages {
        /// Position of the offending passage.
        index: usize,
        /// The passage before it.
        previous: NaiveDateTime,
        /// The offending passage.
        current: NaiveDateTime,
    },
    /// Passages span more than one calendar day.
    #[error("Passages span several days: expected {expected}, found {found}")]
    MixedDays {
        /// Date of the first passage.
        expected: NaiveDate,
        /// First date that differs from it.
        found: NaiveDate,
    },
    /// Text did not name a known vehicle category.
    #[error("Unknown vehicle category: {0}")]
    UnknownVehicleCategory(String),
    /// A calendar date could not be constructed.
    #[error("Invalid date {year}-{month:02}-{day:02}")]
    InvalidDate {
        /// Year component.
        year: i32,
        /// Month component.
        month: u32,
        /// Day component.
        day: u32,
    },
    /// Holiday table contents are inconsistent.
    #[error("Invalid calendar for {year}: {reason}")]
    InvalidCalendar {
        /// Year of the offending table.
        year: i32,
        /// What is wrong with it.
        reason: String,
    },
    /// Tariff bands or window are inconsistent.
    #[error("Invalid tariff: {0}")]
    InvalidTariff(String),
    /// Configuration file could not be parsed.
    #[error("Config error: {0}")]
    Config(#[from] TomlError),
    /// Configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] IoError),
}

/// Trait for year-scoped public holiday providers.
pub trait HolidayCalendar: Send + Sync {
    /// The calendar year this provider covers.
    fn year(&self) -> i32;

    /// Whether `date` is a toll-free public holiday.
    ///
    /// Dates outside [`HolidayCalendar::year`] are never holidays.
    fn is_holiday(&self, date: NaiveDate) -> bool;
}

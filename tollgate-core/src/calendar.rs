//! Holiday tables keyed by calendar year.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::DateRange;
use crate::ports::{HolidayCalendar, TollError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
/// Toll-free dates and date ranges for a single year.
pub struct HolidayTable {
    /// Year every entry belongs to.
    pub year: i32,
    /// Individual toll-free dates.
    #[serde(default)]
    pub dates: BTreeSet<NaiveDate>,
    /// Inclusive toll-free spans, e.g. a summer month.
    #[serde(default)]
    pub ranges: Vec<DateRange>,
}

impl HolidayTable {
    /// Start an empty table for `year`.
    #[must_use]
    pub fn new(year: i32) -> Self {
        Self {
            year,
            dates: BTreeSet::new(),
            ranges: Vec::new(),
        }
    }

    /// Add a single day of the table's year.
    ///
    /// # Errors
    ///
    /// Returns [`TollError::InvalidDate`] when the month/day pair does not exist.
    pub fn day(mut self, month: u32, day: u32) -> Result<Self, TollError> {
        let date = self.date(month, day)?;
        self.dates.insert(date);
        Ok(self)
    }

    /// Add several days of the same month.
    ///
    /// # Errors
    ///
    /// Returns [`TollError::InvalidDate`] for the first day that does not exist.
    pub fn days(self, month: u32, days: &[u32]) -> Result<Self, TollError> {
        days.iter().try_fold(self, |table, &day| table.day(month, day))
    }

    /// Mark a whole month as toll-free.
    ///
    /// # Errors
    ///
    /// Returns [`TollError::InvalidDate`] when `month` is not in `1..=12`.
    pub fn month(self, month: u32) -> Result<Self, TollError> {
        let start = self.date(month, 1)?;
        let end = if month == 12 {
            self.date(12, 31)?
        } else {
            self.date(month + 1, 1)?
                .pred_opt()
                .ok_or(TollError::InvalidDate {
                    year: self.year,
                    month,
                    day: 1,
                })?
        };
        self.range(start, end)
    }

    /// Add an inclusive span of dates.
    ///
    /// # Errors
    ///
    /// Returns [`TollError::InvalidCalendar`] when the span is inverted or leaves the table's year.
    pub fn range(mut self, start: NaiveDate, end: NaiveDate) -> Result<Self, TollError> {
        let range = DateRange { start, end };
        self.check_range(&range)?;
        self.ranges.push(range);
        Ok(self)
    }

    /// Check that every entry belongs to the table's year and no span is inverted.
    ///
    /// # Errors
    ///
    /// Returns [`TollError::InvalidCalendar`] describing the first inconsistency.
    pub fn validate(&self) -> Result<(), TollError> {
        if let Some(stray) = self.dates.iter().find(|date| date.year() != self.year) {
            return Err(self.invalid(format!("date {stray} is outside the table's year")));
        }
        self.ranges
            .iter()
            .try_for_each(|range| self.check_range(range))
    }

    /// Number of distinct toll-free days in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        let mut all = self.dates.clone();
        for range in &self.ranges {
            all.extend(range.start.iter_days().take_while(|day| *day <= range.end));
        }
        all.len()
    }

    /// Whether the table holds no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() && self.ranges.is_empty()
    }

    fn date(&self, month: u32, day: u32) -> Result<NaiveDate, TollError> {
        NaiveDate::from_ymd_opt(self.year, month, day).ok_or(TollError::InvalidDate {
            year: self.year,
            month,
            day,
        })
    }

    fn check_range(&self, range: &DateRange) -> Result<(), TollError> {
        if range.start > range.end {
            return Err(self.invalid(format!(
                "range {} to {} is inverted",
                range.start, range.end
            )));
        }
        if range.start.year() != self.year || range.end.year() != self.year {
            return Err(self.invalid(format!(
                "range {} to {} is outside the table's year",
                range.start, range.end
            )));
        }
        Ok(())
    }

    fn invalid(&self, reason: String) -> TollError {
        TollError::InvalidCalendar {
            year: self.year,
            reason,
        }
    }
}

impl HolidayCalendar for HolidayTable {
    fn year(&self) -> i32 {
        self.year
    }

    fn is_holiday(&self, date: NaiveDate) -> bool {
        date.year() == self.year
            && (self.dates.contains(&date) || self.ranges.iter().any(|range| range.contains(date)))
    }
}

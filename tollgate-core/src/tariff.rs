//! Time-of-day pricing for single passages.
//!
//! A [`Tariff`] prices a passage in two steps. The [`ChargingWindow`] guard
//! decides whether the time is chargeable at all; only then is the band table
//! consulted. Times the guard lets through but no band covers also cost
//! nothing.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::model::Fee;
use crate::ports::TollError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
/// Part of the day in which passages can be charged.
pub struct ChargingWindow {
    /// First chargeable time (inclusive).
    pub opens: NaiveTime,
    /// End of the chargeable period (exclusive).
    pub closes: NaiveTime,
}

impl ChargingWindow {
    /// Whether `time` is chargeable.
    #[must_use]
    pub fn admits(&self, time: NaiveTime) -> bool {
        self.opens <= time && time < self.closes
    }
}

impl Default for ChargingWindow {
    fn default() -> Self {
        Self {
            opens: hm(6, 0),
            closes: hm(18, 30),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
/// Contiguous interval of the day with a fixed base fee.
pub struct TimeBand {
    /// Start of the band (inclusive).
    pub start: NaiveTime,
    /// End of the band (exclusive).
    pub end: NaiveTime,
    /// Fee for a passage within the band.
    pub fee: Fee,
}

impl TimeBand {
    /// Build a band from hour/minute pairs.
    ///
    /// # Errors
    ///
    /// Returns [`TollError::InvalidTariff`] when either bound is not a valid time of day.
    pub fn new(start: (u32, u32), end: (u32, u32), fee: u32) -> Result<Self, TollError> {
        let time = |(hour, minute): (u32, u32)| {
            NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| {
                TollError::InvalidTariff(format!("{hour:02}:{minute:02} is not a time"))
            })
        };

        Ok(Self {
            start: time(start)?,
            end: time(end)?,
            fee: Fee(fee),
        })
    }

    /// Whether `time` falls inside the band.
    #[must_use]
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.start <= time && time < self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Complete pricing rules for one day.
pub struct Tariff {
    /// Guard applied before any band lookup.
    pub window: ChargingWindow,
    /// Band table, ordered by start time.
    pub bands: Vec<TimeBand>,
    /// Maximum total charged to one vehicle per day.
    pub daily_cap: Fee,
    /// Passages closer than this to the previous one are billed once.
    pub merge_window_minutes: u32,
}

impl Tariff {
    /// Fee for a single passage at `time`, ignoring exemptions.
    #[must_use]
    pub fn fee_at(&self, time: NaiveTime) -> Fee {
        if !self.window.admits(time) {
            return Fee::ZERO;
        }

        self.bands
            .iter()
            .find(|band| band.contains(time))
            .map_or(Fee::ZERO, |band| band.fee)
    }

    /// Check the window and band table for consistency.
    ///
    /// # Errors
    ///
    /// Returns [`TollError::InvalidTariff`] when the window is inverted, a band is empty or
    /// inverted, or bands overlap or are out of order.
    pub fn validate(&self) -> Result<(), TollError> {
        if self.window.opens >= self.window.closes {
            return Err(TollError::InvalidTariff(format!(
                "charging window {} to {} is empty",
                self.window.opens, self.window.closes
            )));
        }

        if let Some(band) = self.bands.iter().find(|band| band.start >= band.end) {
            return Err(TollError::InvalidTariff(format!(
                "band {} to {} is empty",
                band.start, band.end
            )));
        }

        for pair in self.bands.windows(2) {
            if let [earlier, later] = pair
                && later.start < earlier.end
            {
                return Err(TollError::InvalidTariff(format!(
                    "band starting {} overlaps band ending {}",
                    later.start, earlier.end
                )));
            }
        }

        Ok(())
    }
}

impl Default for Tariff {
    fn default() -> Self {
        let bands = [
            ((6, 0), (6, 30), 8),
            ((6, 30), (7, 0), 13),
            ((7, 0), (8, 0), 18),
            ((8, 0), (8, 30), 13),
            ((8, 30), (15, 0), 8),
            ((15, 0), (15, 30), 13),
            ((15, 30), (17, 0), 18),
            ((17, 0), (18, 0), 13),
            ((18, 0), (18, 30), 8),
        ]
        .into_iter()
        .map(|((start_hour, start_minute), (end_hour, end_minute), fee)| TimeBand {
            start: hm(start_hour, start_minute),
            end: hm(end_hour, end_minute),
            fee: Fee(fee),
        })
        .collect();

        Self {
            window: ChargingWindow::default(),
            bands,
            daily_cap: Fee(60),
            merge_window_minutes: 60,
        }
    }
}

// Only called with literal in-range values.
fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

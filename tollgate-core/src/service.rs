//! High-level service computing a vehicle's daily toll.

use std::borrow::Cow;
use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use tracing::{debug, trace};

use crate::config::{OrderPolicy, TollConfig};
use crate::model::{Fee, Vehicle};
use crate::plugin::{CalendarPlugin, CalendarRegistry};
use crate::ports::TollError;
use crate::tariff::Tariff;

/// Public entry point for pricing a vehicle's passages on one day.
///
/// The calculator holds no mutable state, so one instance can be shared
/// across threads and used for any number of vehicles.
pub struct TollCalculator {
    calendars: Arc<CalendarRegistry>,
    tariff: Tariff,
    ordering: OrderPolicy,
}

impl TollCalculator {
    /// Create a calculator bound to the provided calendars and tariff.
    #[must_use]
    pub fn new(calendars: Arc<CalendarRegistry>, tariff: Tariff) -> Self {
        Self {
            calendars,
            tariff,
            ordering: OrderPolicy::default(),
        }
    }

    /// Wire a calculator from configuration and the compiled-in calendar plugins.
    ///
    /// Calendars listed in the configuration replace plugin calendars for the same year.
    #[must_use]
    pub fn from_config(config: TollConfig, plugins: Vec<CalendarPlugin>) -> Self {
        let registry = config
            .calendars
            .into_iter()
            .fold(CalendarRegistry::new(plugins), |registry, table| {
                registry.with_calendar(Arc::new(table))
            });

        Self::new(Arc::new(registry), config.tariff).with_ordering(config.ordering)
    }

    /// Choose how unsorted passages are handled.
    #[must_use]
    pub fn with_ordering(mut self, ordering: OrderPolicy) -> Self {
        self.ordering = ordering;
        self
    }

    /// Pricing rules in effect.
    #[must_use]
    pub fn tariff(&self) -> &Tariff {
        &self.tariff
    }

    /// Registered holiday calendars.
    #[must_use]
    pub fn calendars(&self) -> &CalendarRegistry {
        &self.calendars
    }

    /// Whether the vehicle never pays.
    #[must_use]
    pub fn is_toll_free_vehicle<V: Vehicle + ?Sized>(&self, vehicle: &V) -> bool {
        vehicle.category().is_toll_free()
    }

    /// Whether no passage on `date` is charged: weekends and registered holidays.
    ///
    /// Years without a calendar only get the weekend exemption.
    #[must_use]
    pub fn is_toll_free_date(&self, date: NaiveDate) -> bool {
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            return true;
        }

        self.calendars
            .calendar(date.year())
            .is_some_and(|calendar| calendar.is_holiday(date))
    }

    /// Base fee for a single passage from its time of day alone.
    #[must_use]
    pub fn calculate_toll_fee(&self, passage: NaiveDateTime) -> Fee {
        self.tariff.fee_at(passage.time())
    }

    /// Whether `current` happened less than the merge window after `previous`.
    #[must_use]
    pub fn within_merge_window(&self, current: NaiveDateTime, previous: NaiveDateTime) -> bool {
        current - previous < Duration::minutes(i64::from(self.tariff.merge_window_minutes))
    }

    /// Total fee for one vehicle's passages on a single day.
    ///
    /// Passages must be chronological (or the calculator configured with
    /// [`OrderPolicy::Sort`]) and share one calendar date. An empty list costs
    /// nothing. A passage within the merge window of the one before it is
    /// billed together with it at the higher of the two band fees; the chain
    /// only ever looks one passage back. The result never exceeds the daily cap.
    ///
    /// # Errors
    ///
    /// Returns [`TollError::UnsortedPassages`] when passages are out of order under
    /// [`OrderPolicy::Reject`], and [`TollError::MixedDays`] when they span several dates.
    pub fn get_toll_fee<V: Vehicle + ?Sized>(
        &self,
        vehicle: &V,
        passages: &[NaiveDateTime],
    ) -> Result<Fee, TollError> {
        if self.is_toll_free_vehicle(vehicle) {
            debug!(category = %vehicle.category(), "toll-free vehicle");
            return Ok(Fee::ZERO);
        }

        let passages = self.ordered(passages)?;
        let Some(&first) = passages.first() else {
            return Ok(Fee::ZERO);
        };
        ensure_single_day(first.date(), &passages)?;

        let cap = self.tariff.daily_cap;
        let mut total = Fee::ZERO;
        let mut previous = first;
        // Highest fee billed so far for the chain `previous` belongs to.
        let mut chain_charge = Fee::ZERO;

        for &passage in passages.iter() {
            if self.is_toll_free_date(passage.date()) {
                debug!(%passage, "toll-free date");
                previous = passage;
                chain_charge = Fee::ZERO;
                continue;
            }

            let fee = self.calculate_toll_fee(passage);

            if self.within_merge_window(passage, previous) {
                let pair_charge = fee.max(self.calculate_toll_fee(previous));
                total = total + pair_charge.saturating_sub(chain_charge);
                chain_charge = chain_charge.max(pair_charge);
                trace!(%passage, %fee, %pair_charge, %total, "merged with previous passage");
            } else {
                total = total + fee;
                chain_charge = fee;
                trace!(%passage, %fee, %total, "charged passage");
            }

            if total >= cap {
                debug!(%passage, %total, %cap, "daily cap reached");
                break;
            }

            previous = passage;
        }

        Ok(total.min(cap))
    }

    fn ordered<'passages>(
        &self,
        passages: &'passages [NaiveDateTime],
    ) -> Result<Cow<'passages, [NaiveDateTime]>, TollError> {
        let misplaced = passages
            .windows(2)
            .enumerate()
            .find_map(|(index, pair)| match pair {
                [previous, current] if current < previous => Some((index + 1, *previous, *current)),
                _ => None,
            });

        match (misplaced, self.ordering) {
            (None, _) => Ok(Cow::Borrowed(passages)),
            (Some(_), OrderPolicy::Sort) => {
                let mut sorted = passages.to_vec();
                sorted.sort_unstable();
                Ok(Cow::Owned(sorted))
            }
            (Some((index, previous, current)), OrderPolicy::Reject) => {
                Err(TollError::UnsortedPassages {
                    index,
                    previous,
                    current,
                })
            }
        }
    }
}

fn ensure_single_day(expected: NaiveDate, passages: &[NaiveDateTime]) -> Result<(), TollError> {
    match passages
        .iter()
        .map(NaiveDateTime::date)
        .find(|date| *date != expected)
    {
        Some(found) => Err(TollError::MixedDays { expected, found }),
        None => Ok(()),
    }
}

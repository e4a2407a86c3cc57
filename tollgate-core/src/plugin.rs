//! Registry for all calendar plugins and their year tables.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use crate::model::RegionMeta;
use crate::ports::HolidayCalendar;

/// Holiday calendars contributed by a provider for a single region.
pub struct CalendarPlugin {
    /// Static metadata describing the region.
    pub meta: RegionMeta,
    /// One calendar per covered year.
    pub calendars: Vec<Arc<dyn HolidayCalendar>>,
}

/// Registry that resolves holiday calendars by year.
#[derive(Default)]
pub struct CalendarRegistry {
    regions: Vec<RegionMeta>,
    calendars: HashMap<i32, Arc<dyn HolidayCalendar>>,
}

impl CalendarRegistry {
    /// Build a registry from the provided plugin list.
    ///
    /// When two plugins cover the same year the later one wins.
    #[must_use]
    pub fn new(plugins: Vec<CalendarPlugin>) -> Self {
        plugins
            .into_iter()
            .fold(Self::default(), |mut registry, plugin| {
                for calendar in plugin.calendars {
                    registry.insert(calendar);
                }
                registry.regions.push(plugin.meta);
                registry
            })
    }

    /// Add or replace the calendar for its year.
    #[must_use]
    pub fn with_calendar(mut self, calendar: Arc<dyn HolidayCalendar>) -> Self {
        self.insert(calendar);
        self
    }

    /// Metadata for all registered regions.
    #[must_use]
    pub fn regions(&self) -> &[RegionMeta] {
        &self.regions
    }

    /// Years that have a calendar, in ascending order.
    #[must_use]
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.calendars.keys().copied().collect();
        years.sort_unstable();
        years
    }

    /// Look up the calendar covering `year`, if any.
    #[must_use]
    pub fn calendar(&self, year: i32) -> Option<&Arc<dyn HolidayCalendar>> {
        self.calendars.get(&year)
    }

    fn insert(&mut self, calendar: Arc<dyn HolidayCalendar>) {
        let year = calendar.year();
        if self.calendars.insert(year, calendar).is_some() {
            warn!(year, "replacing previously registered holiday calendar");
        } else {
            info!(year, "registered holiday calendar");
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::calendar::HolidayTable;
    use crate::model::RegionId;

    fn region(slug: &str) -> RegionMeta {
        RegionMeta {
            id: RegionId(slug.to_owned()),
            name: slug.to_owned(),
        }
    }

    fn table(year: i32, month: u32, day: u32) -> Arc<dyn HolidayCalendar> {
        Arc::new(HolidayTable::new(year).day(month, day).expect("valid table"))
    }

    #[test]
    fn resolves_calendars_by_year() {
        let registry = CalendarRegistry::new(vec![CalendarPlugin {
            meta: region("test"),
            calendars: vec![table(2014, 1, 1), table(2013, 1, 1)],
        }]);

        assert_eq!(registry.years(), vec![2013, 2014]);
        assert!(registry.calendar(2013).is_some());
        assert!(registry.calendar(2015).is_none());
        assert_eq!(registry.regions().len(), 1);
    }

    #[test]
    fn later_calendar_replaces_earlier_one() {
        let registry = CalendarRegistry::new(vec![CalendarPlugin {
            meta: region("test"),
            calendars: vec![table(2013, 1, 1)],
        }])
        .with_calendar(table(2013, 6, 6));

        let calendar = registry.calendar(2013).expect("registered year");
        let new_year = NaiveDate::from_ymd_opt(2013, 1, 1).expect("valid date");
        let national_day = NaiveDate::from_ymd_opt(2013, 6, 6).expect("valid date");
        assert!(!calendar.is_holiday(new_year));
        assert!(calendar.is_holiday(national_day));
    }

    #[test]
    fn empty_registry_has_no_years() {
        let registry = CalendarRegistry::default();
        assert!(registry.years().is_empty());
        assert!(registry.regions().is_empty());
    }
}

//! Calendar provider for toll-free days in Sweden.
//!
//! Only years with published toll-free dates are included. Adding a year
//! means adding another table here or listing it in the configuration file;
//! the pricing logic does not change.

use std::sync::Arc;

use tollgate_core::{
    calendar::HolidayTable,
    model::{RegionId, RegionMeta},
    plugin::CalendarPlugin,
    ports::{HolidayCalendar, TollError},
};

/// Build the plugin bundle for the Swedish calendar provider.
///
/// # Errors
///
/// Returns a [`TollError`] if a compiled-in table contains an impossible date.
pub fn plugin() -> Result<CalendarPlugin, TollError> {
    let calendars: Vec<Arc<dyn HolidayCalendar>> = vec![Arc::new(toll_free_2013()?)];

    Ok(CalendarPlugin {
        meta: region_meta(),
        calendars,
    })
}

/// Toll-free public holidays and bridge days for 2013.
///
/// # Errors
///
/// Returns a [`TollError`] if the table contains an impossible date.
pub fn toll_free_2013() -> Result<HolidayTable, TollError> {
    HolidayTable::new(2013)
        .day(1, 1)?
        .days(3, &[28, 29])?
        .days(4, &[1, 30])?
        .days(5, &[1, 8, 9])?
        .days(6, &[5, 6, 21])?
        // summer toll holiday
        .month(7)?
        .day(11, 1)?
        .days(12, &[24, 25, 26, 31])
}

fn region_meta() -> RegionMeta {
    RegionMeta {
        id: RegionId(String::from("sweden")),
        name: String::from("Sverige"),
    }
}

//! Domain data structures for vehicles, fees, and calendar regions.

use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ports::TollError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Classification of a vehicle as far as congestion tolls are concerned.
pub enum VehicleCategory {
    /// Regular fee-liable vehicle such as a private car.
    Ordinary,
    /// Motorbike.
    Motorbike,
    /// Tractor.
    Tractor,
    /// Emergency vehicle.
    Emergency,
    /// Diplomatic vehicle.
    Diplomat,
    /// Vehicle registered abroad.
    Foreign,
    /// Military vehicle.
    Military,
}

/// Categories that never pay a toll.
pub const TOLL_FREE_CATEGORIES: [VehicleCategory; 6] = [
    VehicleCategory::Motorbike,
    VehicleCategory::Tractor,
    VehicleCategory::Emergency,
    VehicleCategory::Diplomat,
    VehicleCategory::Foreign,
    VehicleCategory::Military,
];

impl VehicleCategory {
    /// Whether vehicles of this category are exempt from all charges.
    #[must_use]
    pub fn is_toll_free(self) -> bool {
        TOLL_FREE_CATEGORIES.contains(&self)
    }

    fn slug(self) -> &'static str {
        match self {
            VehicleCategory::Ordinary => "ordinary",
            VehicleCategory::Motorbike => "motorbike",
            VehicleCategory::Tractor => "tractor",
            VehicleCategory::Emergency => "emergency",
            VehicleCategory::Diplomat => "diplomat",
            VehicleCategory::Foreign => "foreign",
            VehicleCategory::Military => "military",
        }
    }
}

impl fmt::Display for VehicleCategory {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.slug())
    }
}

impl FromStr for VehicleCategory {
    type Err = TollError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_lowercase();

        match normalized.as_str() {
            "ordinary" | "car" => Ok(VehicleCategory::Ordinary),
            "motorbike" | "motorcycle" => Ok(VehicleCategory::Motorbike),
            "tractor" => Ok(VehicleCategory::Tractor),
            "emergency" => Ok(VehicleCategory::Emergency),
            "diplomat" => Ok(VehicleCategory::Diplomat),
            "foreign" => Ok(VehicleCategory::Foreign),
            "military" => Ok(VehicleCategory::Military),
            _ => Err(TollError::UnknownVehicleCategory(raw.to_owned())),
        }
    }
}

/// Anything that can be classified for toll purposes.
pub trait Vehicle {
    /// The category deciding whether the vehicle pays at all.
    fn category(&self) -> VehicleCategory;
}

impl Vehicle for VehicleCategory {
    fn category(&self) -> VehicleCategory {
        *self
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
/// Whole currency units charged for one or more passages.
pub struct Fee(pub u32);

impl Fee {
    /// No charge.
    pub const ZERO: Fee = Fee(0);

    /// Raw amount.
    #[must_use]
    pub fn amount(self) -> u32 {
        self.0
    }

    /// Add without wrapping on overflow.
    #[must_use]
    pub fn saturating_add(self, other: Fee) -> Fee {
        Fee(self.0.saturating_add(other.0))
    }

    /// Subtract, stopping at zero.
    #[must_use]
    pub fn saturating_sub(self, other: Fee) -> Fee {
        Fee(self.0.saturating_sub(other.0))
    }
}

impl Add for Fee {
    type Output = Fee;

    fn add(self, rhs: Fee) -> Fee {
        self.saturating_add(rhs)
    }
}

impl fmt::Display for Fee {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Inclusive start/end span of calendar dates.
pub struct DateRange {
    /// Start date (inclusive).
    pub start: NaiveDate,
    /// End date (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Whether `date` falls within the span.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Identifier for a jurisdiction whose holidays are known to tollgate.
pub struct RegionId(pub String);

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Metadata describing a region and its human-friendly name.
pub struct RegionMeta {
    /// Unique identifier.
    pub id: RegionId,
    /// Display name.
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toll_free_categories_exclude_ordinary() {
        assert!(!VehicleCategory::Ordinary.is_toll_free());
        for category in TOLL_FREE_CATEGORIES {
            assert!(category.is_toll_free(), "{category} should be exempt");
        }
    }

    #[test]
    fn category_parses_aliases_and_rejects_unknown() {
        assert_eq!("Car".parse::<VehicleCategory>().ok(), Some(VehicleCategory::Ordinary));
        assert_eq!(
            " motorcycle ".parse::<VehicleCategory>().ok(),
            Some(VehicleCategory::Motorbike)
        );
        assert!(matches!(
            "bus".parse::<VehicleCategory>(),
            Err(TollError::UnknownVehicleCategory(raw)) if raw == "bus"
        ));
    }

    #[test]
    fn category_display_round_trips_through_from_str() {
        let parsed = VehicleCategory::Diplomat
            .to_string()
            .parse::<VehicleCategory>()
            .ok();
        assert_eq!(parsed, Some(VehicleCategory::Diplomat));
    }

    #[test]
    fn fee_arithmetic_saturates() {
        assert_eq!(Fee(u32::MAX) + Fee(1), Fee(u32::MAX));
        assert_eq!(Fee(5).saturating_sub(Fee(8)), Fee::ZERO);
        assert_eq!(Fee(13).saturating_sub(Fee(8)), Fee(5));
    }

    #[test]
    fn date_range_is_inclusive() {
        let range = DateRange {
            start: NaiveDate::from_ymd_opt(2013, 12, 24).expect("valid date"),
            end: NaiveDate::from_ymd_opt(2013, 12, 26).expect("valid date"),
        };
        assert!(range.contains(range.start));
        assert!(range.contains(range.end));
        assert!(!range.contains(NaiveDate::from_ymd_opt(2013, 12, 27).expect("valid date")));
    }
}

//! Core types and service wiring for the tollgate congestion toll calculator.

/// Year-scoped holiday tables.
pub mod calendar;
/// TOML-backed configuration for tariffs, input ordering, and extra calendars.
pub mod config;
/// Domain models and identifiers shared by all calendar providers.
pub mod model;
/// Registry and helpers for plugging region-specific holiday calendars into the service.
pub mod plugin;
/// Error type and the holiday calendar interface.
pub mod ports;
/// High-level service computing a vehicle's daily fee.
pub mod service;
/// Time-of-day pricing, daily cap, and merge window.
pub mod tariff;

pub use calendar::*;
pub use config::*;
pub use model::*;
pub use plugin::*;
pub use ports::*;
pub use service::*;
pub use tariff::*;

//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate storage to the record-store traits in `traffic_db`,
//! classification to `traffic_core`, and map errors via [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod speed_intervals;
pub mod speed_readings;

//! Row structs and request DTOs for the record store.

pub mod speed_interval;
pub mod speed_reading;

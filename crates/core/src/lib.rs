//! Domain logic for the traffic-intensity service.
//!
//! Everything in this crate is free of I/O: speed classification, the
//! threshold configuration and its single-slot store, query-filter dispatch,
//! and the small helpers shared by the storage and HTTP layers.

pub mod error;
pub mod filter;
pub mod geometry;
pub mod intensity;
pub mod pagination;
pub mod roles;
pub mod thresholds;
pub mod types;

use std::sync::Arc;

use traffic_core::thresholds::ThresholdStore;
use traffic_db::{SpeedIntervalStore, SpeedReadingStore};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Record store for speed readings.
    pub readings: Arc<dyn SpeedReadingStore>,
    /// Record store for threshold history.
    pub intervals: Arc<dyn SpeedIntervalStore>,
    /// The threshold configuration in effect. Handlers snapshot it once per
    /// request so filtering and annotation agree.
    pub thresholds: Arc<ThresholdStore>,
    /// Server configuration (read by the auth extractor).
    pub config: Arc<ServerConfig>,
}

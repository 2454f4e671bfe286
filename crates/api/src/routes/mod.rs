pub mod health;
pub mod speed_intervals;
pub mod speed_readings;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /speed-readings                 list (public), create (admin)
/// /speed-readings/{id}            get (public), replace, patch, delete (admin)
/// /road-segments[/{id}]           alias of /speed-readings
///
/// /speed-intervals                current thresholds (public), update (admin)
/// /speed-intervals/history        stored configurations, newest first
/// /speed-intervals/history/{id}   one stored configuration
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/speed-readings", speed_readings::router())
        .nest("/road-segments", speed_readings::router())
        .nest("/speed-intervals", speed_intervals::router())
}

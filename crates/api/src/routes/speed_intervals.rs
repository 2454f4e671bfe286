//! Route definitions for the threshold configuration.

use axum::routing::get;
use axum::Router;

use crate::handlers::speed_intervals;
use crate::state::AppState;

/// ```text
/// GET /               -> get_current
/// PUT /               -> update_thresholds
/// GET /history        -> list_history
/// GET /history/{id}   -> get_history_entry
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(speed_intervals::get_current).put(speed_intervals::update_thresholds),
        )
        .route("/history", get(speed_intervals::list_history))
        .route("/history/{id}", get(speed_intervals::get_history_entry))
}

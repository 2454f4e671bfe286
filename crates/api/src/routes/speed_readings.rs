//! Route definitions for speed readings.

use axum::routing::get;
use axum::Router;

use crate::handlers::speed_readings;
use crate::state::AppState;

/// Speed reading routes.
///
/// ```text
/// GET    /        -> list_readings
/// POST   /        -> create_reading
/// GET    /{id}    -> get_reading
/// PUT    /{id}    -> replace_reading
/// PATCH  /{id}    -> patch_reading
/// DELETE /{id}    -> delete_reading
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(speed_readings::list_readings).post(speed_readings::create_reading),
        )
        .route(
            "/{id}",
            get(speed_readings::get_reading)
                .put(speed_readings::replace_reading)
                .patch(speed_readings::patch_reading)
                .delete(speed_readings::delete_reading),
        )
}

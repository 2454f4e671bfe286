//! Handlers for the intensity threshold configuration.
//!
//! An update is validated before anything is written. Only a valid pair is
//! appended to the history and then installed in the [`ThresholdStore`], so
//! a rejected update leaves the configuration in effect untouched.
//!
//! [`ThresholdStore`]: traffic_core::thresholds::ThresholdStore

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use traffic_core::error::CoreError;
use traffic_core::thresholds::ThresholdConfig;
use traffic_core::types::DbId;
use traffic_db::models::speed_interval::UpdateSpeedInterval;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/speed-intervals
///
/// The configuration in effect (defaults when none was ever stored).
pub async fn get_current(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let current = state.thresholds.current().await;
    Ok(Json(DataResponse { data: current }))
}

/// PUT /api/v1/speed-intervals
pub async fn update_thresholds(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    payload: Result<Json<UpdateSpeedInterval>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    let candidate =
        ThresholdConfig::new(input.low_speed, input.medium_speed, chrono::Utc::now())?;

    let stored = state.intervals.insert(&candidate).await?;
    let applied = state.thresholds.apply(stored.to_config()?).await;

    tracing::info!(
        interval_id = stored.id,
        low_speed = stored.low_speed,
        medium_speed = stored.medium_speed,
        applied,
        user_id = admin.user_id,
        "Speed intervals updated",
    );

    let current = state.thresholds.current().await;
    Ok(Json(DataResponse { data: current }))
}

/// GET /api/v1/speed-intervals/history
///
/// Stored configurations, most recent first.
pub async fn list_history(
    State(state): State<AppState>,
    query: Result<Query<PaginationParams>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(params) = query?;
    let intervals = state.intervals.list(params.page()).await?;
    Ok(Json(DataResponse { data: intervals }))
}

/// GET /api/v1/speed-intervals/history/{id}
pub async fn get_history_entry(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let interval = state.intervals.find_by_id(id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "SpeedInterval",
            id,
        })
    })?;
    Ok(Json(DataResponse { data: interval }))
}

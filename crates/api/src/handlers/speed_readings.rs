//! Handlers for speed readings.
//!
//! Reads are public. Writes require the admin role. Every reading returned
//! carries an `intensity` token derived from its speed under the threshold
//! snapshot taken at the start of the request; the same snapshot decides
//! which readings pass an `intensity` filter.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use traffic_core::error::CoreError;
use traffic_core::filter::IntensityFilter;
use traffic_core::intensity::{classify, IntensityLabel};
use traffic_core::thresholds::ThresholdConfig;
use traffic_core::types::DbId;
use traffic_db::models::speed_reading::{
    CreateSpeedReading, NewSpeedReading, SpeedReading, UpdateSpeedReading,
};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::ListReadingsParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// A stored reading plus its derived intensity.
#[derive(Debug, Serialize)]
pub struct SpeedReadingResponse {
    #[serde(flatten)]
    pub reading: SpeedReading,
    pub intensity: IntensityLabel,
}

impl SpeedReadingResponse {
    pub fn new(reading: SpeedReading, thresholds: &ThresholdConfig) -> Self {
        let intensity = classify(reading.speed, thresholds);
        Self { reading, intensity }
    }
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "SpeedReading",
        id,
    })
}

/// GET /api/v1/speed-readings
///
/// List readings, optionally filtered with `?intensity=elevada|média|baixa`.
/// Any other token applies no filter.
pub async fn list_readings(
    State(state): State<AppState>,
    query: Result<Query<ListReadingsParams>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(params) = query?;
    let thresholds = state.thresholds.current().await;

    let band = match IntensityFilter::from_query(params.intensity.as_deref()) {
        IntensityFilter::Unrecognized(token) => {
            tracing::debug!(token = %token, "Unrecognized intensity filter, listing unfiltered");
            None
        }
        filter => filter.band(&thresholds),
    };

    let readings = state.readings.list(band, params.page()).await?;
    let data: Vec<SpeedReadingResponse> = readings
        .into_iter()
        .map(|r| SpeedReadingResponse::new(r, &thresholds))
        .collect();

    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/speed-readings/{id}
pub async fn get_reading(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let reading = state
        .readings
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let thresholds = state.thresholds.current().await;

    Ok(Json(DataResponse {
        data: SpeedReadingResponse::new(reading, &thresholds),
    }))
}

/// POST /api/v1/speed-readings
pub async fn create_reading(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    payload: Result<Json<CreateSpeedReading>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    input.validate()?;

    let reading = state
        .readings
        .create(&NewSpeedReading::from(&input))
        .await?;

    tracing::info!(
        reading_id = reading.id,
        speed = ?reading.speed,
        user_id = admin.user_id,
        "Speed reading created",
    );

    let thresholds = state.thresholds.current().await;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SpeedReadingResponse::new(reading, &thresholds),
        }),
    ))
}

/// PUT /api/v1/speed-readings/{id}
///
/// Replace every field; omitted fields become null.
pub async fn replace_reading(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    payload: Result<Json<CreateSpeedReading>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    input.validate()?;

    let reading = state
        .readings
        .replace(id, &NewSpeedReading::from(&input))
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(reading_id = id, user_id = admin.user_id, "Speed reading replaced");

    let thresholds = state.thresholds.current().await;
    Ok(Json(DataResponse {
        data: SpeedReadingResponse::new(reading, &thresholds),
    }))
}

/// PATCH /api/v1/speed-readings/{id}
///
/// Update only the supplied fields; an explicit `null` clears a field.
/// Geometry is re-derived from the merged coordinates.
pub async fn patch_reading(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    payload: Result<Json<UpdateSpeedReading>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;

    let existing = state
        .readings
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let merged = input.merge_into(&existing);
    merged.validate()?;

    let reading = state
        .readings
        .replace(id, &NewSpeedReading::from(&merged))
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(reading_id = id, user_id = admin.user_id, "Speed reading updated");

    let thresholds = state.thresholds.current().await;
    Ok(Json(DataResponse {
        data: SpeedReadingResponse::new(reading, &thresholds),
    }))
}

/// DELETE /api/v1/speed-readings/{id}
pub async fn delete_reading(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !state.readings.delete(id).await? {
        return Err(not_found(id));
    }

    tracing::info!(reading_id = id, user_id = admin.user_id, "Speed reading deleted");

    Ok(StatusCode::NO_CONTENT)
}

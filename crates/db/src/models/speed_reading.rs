//! Speed reading models and DTOs.
//!
//! A reading's intensity is never stored here; it is derived at read time
//! from `speed` and the thresholds in effect.

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use traffic_core::geometry::point_wkt;
use traffic_core::types::DbId;
use validator::Validate;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `traffic_speed` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct SpeedReading {
    pub id: DbId,
    pub long_start: Option<f64>,
    pub lat_start: Option<f64>,
    pub long_end: Option<f64>,
    pub lat_end: Option<f64>,
    /// Segment length in metres.
    pub length: Option<f64>,
    /// Observed speed in km/h; `None` when unknown.
    pub speed: Option<f64>,
    /// WKT point at (`long_start`, `lat_start`).
    pub geom_start: Option<String>,
    /// WKT point at (`long_end`, `lat_end`).
    pub geom_end: Option<String>,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating a reading, or fully replacing one (`PUT`).
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateSpeedReading {
    #[validate(range(min = -180.0, max = 180.0))]
    pub long_start: Option<f64>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat_start: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub long_end: Option<f64>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat_end: Option<f64>,
    #[validate(range(min = 0.0))]
    pub length: Option<f64>,
    #[validate(range(min = 0.0))]
    pub speed: Option<f64>,
}

/// DTO for partially updating a reading (`PATCH`).
///
/// Each field is tri-state: absent keeps the stored value, `null` clears it,
/// and a number replaces it. Range checks run on the merged result (see
/// [`UpdateSpeedReading::merge_into`]).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSpeedReading {
    #[serde(default, deserialize_with = "nullable")]
    pub long_start: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub lat_start: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub long_end: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub lat_end: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub length: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub speed: Option<Option<f64>>,
}

/// A present field is `Some`, even when its value is `null`; absent fields
/// fall back to `#[serde(default)]`.
fn nullable<'de, D>(deserializer: D) -> Result<Option<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer).map(Some)
}

impl UpdateSpeedReading {
    /// Overlay the supplied fields on `existing`. The result still needs
    /// validating before it is written.
    pub fn merge_into(&self, existing: &SpeedReading) -> CreateSpeedReading {
        CreateSpeedReading {
            long_start: self.long_start.unwrap_or(existing.long_start),
            lat_start: self.lat_start.unwrap_or(existing.lat_start),
            long_end: self.long_end.unwrap_or(existing.long_end),
            lat_end: self.lat_end.unwrap_or(existing.lat_end),
            length: self.length.unwrap_or(existing.length),
            speed: self.speed.unwrap_or(existing.speed),
        }
    }
}

/// Column values for an insert or full update, geometry included.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSpeedReading {
    pub long_start: Option<f64>,
    pub lat_start: Option<f64>,
    pub long_end: Option<f64>,
    pub lat_end: Option<f64>,
    pub length: Option<f64>,
    pub speed: Option<f64>,
    pub geom_start: Option<String>,
    pub geom_end: Option<String>,
}

impl From<&CreateSpeedReading> for NewSpeedReading {
    fn from(dto: &CreateSpeedReading) -> Self {
        Self {
            long_start: dto.long_start,
            lat_start: dto.lat_start,
            long_end: dto.long_end,
            lat_end: dto.lat_end,
            length: dto.length,
            speed: dto.speed,
            geom_start: point_wkt(dto.long_start, dto.lat_start),
            geom_end: point_wkt(dto.long_end, dto.lat_end),
        }
    }
}

impl NewSpeedReading {
    /// Materialize as a row with the given id.
    pub fn into_row(self, id: DbId) -> SpeedReading {
        SpeedReading {
            id,
            long_start: self.long_start,
            lat_start: self.lat_start,
            long_end: self.long_end,
            lat_end: self.lat_end,
            length: self.length,
            speed: self.speed,
            geom_start: self.geom_start,
            geom_end: self.geom_end,
        }
    }
}

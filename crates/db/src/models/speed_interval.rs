//! Threshold history models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use traffic_core::error::CoreError;
use traffic_core::thresholds::ThresholdConfig;
use traffic_core::types::{DbId, Timestamp};

/// A row from the `speed_intervals` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct SpeedInterval {
    pub id: DbId,
    pub low_speed: f64,
    pub medium_speed: f64,
    pub updated_at: Timestamp,
}

impl SpeedInterval {
    /// Re-validate the stored pair as a [`ThresholdConfig`].
    pub fn to_config(&self) -> Result<ThresholdConfig, CoreError> {
        ThresholdConfig::new(self.low_speed, self.medium_speed, self.updated_at)
    }
}

/// DTO for replacing the threshold pair.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSpeedInterval {
    pub low_speed: f64,
    pub medium_speed: f64,
}

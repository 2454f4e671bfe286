//! Repository for the `speed_intervals` table.
//!
//! Rows are append-only: each threshold update inserts a new row, and the
//! one with the latest `updated_at` is authoritative.

use sqlx::PgPool;
use traffic_core::pagination::Page;
use traffic_core::thresholds::ThresholdConfig;
use traffic_core::types::DbId;

use crate::models::speed_interval::SpeedInterval;

/// Column list for `speed_intervals` queries.
const COLUMNS: &str = "id, low_speed, medium_speed, updated_at";

/// Provides data access for threshold history.
pub struct SpeedIntervalRepo;

impl SpeedIntervalRepo {
    /// The most recently updated configuration, if any was ever stored.
    pub async fn latest(pool: &PgPool) -> Result<Option<SpeedInterval>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM speed_intervals \
             ORDER BY updated_at DESC, id DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, SpeedInterval>(&query)
            .fetch_optional(pool)
            .await
    }

    /// Find a stored configuration by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SpeedInterval>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM speed_intervals WHERE id = $1");
        sqlx::query_as::<_, SpeedInterval>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Append a configuration. Its own timestamp is stored, falling back to
    /// `now()` for the unstamped defaults.
    pub async fn insert(
        pool: &PgPool,
        config: &ThresholdConfig,
    ) -> Result<SpeedInterval, sqlx::Error> {
        let query = format!(
            "INSERT INTO speed_intervals (low_speed, medium_speed, updated_at) \
             VALUES ($1, $2, COALESCE($3, now())) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SpeedInterval>(&query)
            .bind(config.low_speed())
            .bind(config.medium_speed())
            .bind(config.updated_at())
            .fetch_one(pool)
            .await
    }

    /// List stored configurations, most recent first.
    pub async fn list(pool: &PgPool, page: Page) -> Result<Vec<SpeedInterval>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM speed_intervals \
             ORDER BY updated_at DESC, id DESC \
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, SpeedInterval>(&query)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await
    }
}

//! Repository for the `traffic_speed` table.

use sqlx::PgPool;
use traffic_core::intensity::SpeedBand;
use traffic_core::pagination::Page;
use traffic_core::types::DbId;

use crate::models::speed_reading::{NewSpeedReading, SpeedReading};

/// Column list for `traffic_speed` queries.
const COLUMNS: &str = "\
    id, long_start, lat_start, long_end, lat_end, length, speed, \
    geom_start, geom_end";

/// Provides data access for speed readings.
pub struct SpeedReadingRepo;

impl SpeedReadingRepo {
    /// List readings ordered by id, optionally restricted to a speed band.
    ///
    /// With a band, NULL and NaN speeds are excluded (PostgreSQL orders NaN
    /// above every number, so it would otherwise leak into the top band).
    pub async fn list(
        pool: &PgPool,
        band: Option<SpeedBand>,
        page: Page,
    ) -> Result<Vec<SpeedReading>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM traffic_speed \
             WHERE (NOT $1 OR (speed IS NOT NULL AND speed <> 'NaN'::float8)) \
               AND ($2::float8 IS NULL OR speed > $2) \
               AND ($3::float8 IS NULL OR speed <= $3) \
             ORDER BY id \
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, SpeedReading>(&query)
            .bind(band.is_some())
            .bind(band.and_then(|b| b.above))
            .bind(band.and_then(|b| b.up_to))
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await
    }

    /// Find a reading by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SpeedReading>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM traffic_speed WHERE id = $1");
        sqlx::query_as::<_, SpeedReading>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new reading.
    pub async fn create(pool: &PgPool, row: &NewSpeedReading) -> Result<SpeedReading, sqlx::Error> {
        let query = format!(
            "INSERT INTO traffic_speed \
                 (long_start, lat_start, long_end, lat_end, length, speed, geom_start, geom_end) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SpeedReading>(&query)
            .bind(row.long_start)
            .bind(row.lat_start)
            .bind(row.long_end)
            .bind(row.lat_end)
            .bind(row.length)
            .bind(row.speed)
            .bind(&row.geom_start)
            .bind(&row.geom_end)
            .fetch_one(pool)
            .await
    }

    /// Overwrite every column of a reading. Returns `None` if it does not exist.
    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        row: &NewSpeedReading,
    ) -> Result<Option<SpeedReading>, sqlx::Error> {
        let query = format!(
            "UPDATE traffic_speed SET \
                 long_start = $2, lat_start = $3, long_end = $4, lat_end = $5, \
                 length = $6, speed = $7, geom_start = $8, geom_end = $9 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SpeedReading>(&query)
            .bind(id)
            .bind(row.long_start)
            .bind(row.lat_start)
            .bind(row.long_end)
            .bind(row.lat_end)
            .bind(row.length)
            .bind(row.speed)
            .bind(&row.geom_start)
            .bind(&row.geom_end)
            .fetch_optional(pool)
            .await
    }

    /// Delete a reading. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM traffic_speed WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

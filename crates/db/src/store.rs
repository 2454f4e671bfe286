//! Record-store interfaces consumed by the HTTP layer.
//!
//! Errors are reported as `sqlx::Error` for every backend so handlers map
//! them uniformly; [`crate::MemoryStore`] simply never fails.

use async_trait::async_trait;
use traffic_core::intensity::SpeedBand;
use traffic_core::pagination::Page;
use traffic_core::thresholds::ThresholdConfig;
use traffic_core::types::DbId;

use crate::models::speed_interval::SpeedInterval;
use crate::models::speed_reading::{NewSpeedReading, SpeedReading};
use crate::repositories::{SpeedIntervalRepo, SpeedReadingRepo};
use crate::DbPool;

/// Speed readings keyed by integer id.
#[async_trait]
pub trait SpeedReadingStore: Send + Sync {
    /// Readings ordered by id. With a band, only readings whose speed lies
    /// in it are returned; absent speeds never match a band.
    async fn list(
        &self,
        band: Option<SpeedBand>,
        page: Page,
    ) -> Result<Vec<SpeedReading>, sqlx::Error>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<SpeedReading>, sqlx::Error>;

    async fn create(&self, row: &NewSpeedReading) -> Result<SpeedReading, sqlx::Error>;

    /// Overwrite a reading. `None` if it does not exist.
    async fn replace(
        &self,
        id: DbId,
        row: &NewSpeedReading,
    ) -> Result<Option<SpeedReading>, sqlx::Error>;

    /// `true` if a reading was removed.
    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error>;

    async fn health_check(&self) -> Result<(), sqlx::Error>;
}

/// Append-only history of threshold configurations.
#[async_trait]
pub trait SpeedIntervalStore: Send + Sync {
    /// The entry with the latest `updated_at`.
    async fn latest(&self) -> Result<Option<SpeedInterval>, sqlx::Error>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<SpeedInterval>, sqlx::Error>;

    async fn insert(&self, config: &ThresholdConfig) -> Result<SpeedInterval, sqlx::Error>;

    /// Entries, most recent first.
    async fn list(&self, page: Page) -> Result<Vec<SpeedInterval>, sqlx::Error>;
}

/// PostgreSQL-backed store.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl SpeedReadingStore for PgStore {
    async fn list(
        &self,
        band: Option<SpeedBand>,
        page: Page,
    ) -> Result<Vec<SpeedReading>, sqlx::Error> {
        SpeedReadingRepo::list(&self.pool, band, page).await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<SpeedReading>, sqlx::Error> {
        SpeedReadingRepo::find_by_id(&self.pool, id).await
    }

    async fn create(&self, row: &NewSpeedReading) -> Result<SpeedReading, sqlx::Error> {
        SpeedReadingRepo::create(&self.pool, row).await
    }

    async fn replace(
        &self,
        id: DbId,
        row: &NewSpeedReading,
    ) -> Result<Option<SpeedReading>, sqlx::Error> {
        SpeedReadingRepo::replace(&self.pool, id, row).await
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        SpeedReadingRepo::delete(&self.pool, id).await
    }

    async fn health_check(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }
}

#[async_trait]
impl SpeedIntervalStore for PgStore {
    async fn latest(&self) -> Result<Option<SpeedInterval>, sqlx::Error> {
        SpeedIntervalRepo::latest(&self.pool).await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<SpeedInterval>, sqlx::Error> {
        SpeedIntervalRepo::find_by_id(&self.pool, id).await
    }

    async fn insert(&self, config: &ThresholdConfig) -> Result<SpeedInterval, sqlx::Error> {
        SpeedIntervalRepo::insert(&self.pool, config).await
    }

    async fn list(&self, page: Page) -> Result<Vec<SpeedInterval>, sqlx::Error> {
        SpeedIntervalRepo::list(&self.pool, page).await
    }
}

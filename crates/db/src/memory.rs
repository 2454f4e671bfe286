//! In-process record store.
//!
//! Used when no `DATABASE_URL` is configured and by the HTTP integration
//! tests. Ids are assigned from 1 upward and never reused.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use traffic_core::intensity::SpeedBand;
use traffic_core::pagination::Page;
use traffic_core::thresholds::ThresholdConfig;
use traffic_core::types::DbId;

use crate::models::speed_interval::SpeedInterval;
use crate::models::speed_reading::{NewSpeedReading, SpeedReading};
use crate::store::{SpeedIntervalStore, SpeedReadingStore};

#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<DbId, T>,
    last_id: DbId,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> DbId {
        self.last_id += 1;
        self.last_id
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    readings: RwLock<Table<SpeedReading>>,
    intervals: RwLock<Table<SpeedInterval>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn window<T>(rows: impl Iterator<Item = T>, page: Page) -> Vec<T> {
    rows.skip(page.offset as usize)
        .take(page.limit as usize)
        .collect()
}

#[async_trait]
impl SpeedReadingStore for MemoryStore {
    async fn list(
        &self,
        band: Option<SpeedBand>,
        page: Page,
    ) -> Result<Vec<SpeedReading>, sqlx::Error> {
        let table = self.readings.read().await;
        let matching = table
            .rows
            .values()
            .filter(|r| band.map_or(true, |b| b.contains(r.speed)))
            .cloned();
        Ok(window(matching, page))
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<SpeedReading>, sqlx::Error> {
        Ok(self.readings.read().await.rows.get(&id).cloned())
    }

    async fn create(&self, row: &NewSpeedReading) -> Result<SpeedReading, sqlx::Error> {
        let mut table = self.readings.write().await;
        let id = table.next_id();
        let reading = row.clone().into_row(id);
        table.rows.insert(id, reading.clone());
        Ok(reading)
    }

    async fn replace(
        &self,
        id: DbId,
        row: &NewSpeedReading,
    ) -> Result<Option<SpeedReading>, sqlx::Error> {
        let mut table = self.readings.write().await;
        let Some(slot) = table.rows.get_mut(&id) else {
            return Ok(None);
        };
        *slot = row.clone().into_row(id);
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        Ok(self.readings.write().await.rows.remove(&id).is_some())
    }

    async fn health_check(&self) -> Result<(), sqlx::Error> {
        Ok(())
    }
}

#[async_trait]
impl SpeedIntervalStore for MemoryStore {
    async fn latest(&self) -> Result<Option<SpeedInterval>, sqlx::Error> {
        let table = self.intervals.read().await;
        Ok(table
            .rows
            .values()
            .max_by_key(|i| (i.updated_at, i.id))
            .cloned())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<SpeedInterval>, sqlx::Error> {
        Ok(self.intervals.read().await.rows.get(&id).cloned())
    }

    async fn insert(&self, config: &ThresholdConfig) -> Result<SpeedInterval, sqlx::Error> {
        let mut table = self.intervals.write().await;
        let id = table.next_id();
        let interval = SpeedInterval {
            id,
            low_speed: config.low_speed(),
            medium_speed: config.medium_speed(),
            updated_at: config.updated_at().unwrap_or_else(chrono::Utc::now),
        };
        table.rows.insert(id, interval.clone());
        Ok(interval)
    }

    async fn list(&self, page: Page) -> Result<Vec<SpeedInterval>, sqlx::Error> {
        let table = self.intervals.read().await;
        let mut all: Vec<SpeedInterval> = table.rows.values().cloned().collect();
        all.sort_by(|a, b| (b.updated_at, b.id).cmp(&(a.updated_at, a.id)));
        Ok(window(all.into_iter(), page))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

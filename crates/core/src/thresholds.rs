//! Speed thresholds that partition readings into intensity bands.
//!
//! A [`ThresholdConfig`] can only be built through validation, so holding
//! one proves `0 <= low_speed < medium_speed`. The process-wide "current"
//! configuration lives in a [`ThresholdStore`], a single slot swapped whole
//! on every update: readers see either the old pair or the new pair, never
//! a mix of both.

use serde::Serialize;
use tokio::sync::RwLock;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Default upper bound (inclusive, km/h) of the `High` intensity band.
pub const DEFAULT_LOW_SPEED: f64 = 20.0;

/// Default upper bound (inclusive, km/h) of the `Medium` intensity band.
pub const DEFAULT_MEDIUM_SPEED: f64 = 50.0;

/// The pair of boundary speeds, in km/h, plus the time it was last set.
///
/// `updated_at` is `None` only for the built-in defaults, which lose to any
/// configuration that was ever explicitly stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThresholdConfig {
    low_speed: f64,
    medium_speed: f64,
    updated_at: Option<Timestamp>,
}

impl ThresholdConfig {
    /// Build a configuration stamped with `updated_at`.
    ///
    /// Fails with `CoreError::Validation` when either value is non-finite or
    /// negative, or when `low_speed >= medium_speed`.
    pub fn new(
        low_speed: f64,
        medium_speed: f64,
        updated_at: Timestamp,
    ) -> Result<Self, CoreError> {
        validate_thresholds(low_speed, medium_speed)?;
        Ok(Self {
            low_speed,
            medium_speed,
            updated_at: Some(updated_at),
        })
    }

    pub fn low_speed(&self) -> f64 {
        self.low_speed
    }

    pub fn medium_speed(&self) -> f64 {
        self.medium_speed
    }

    pub fn updated_at(&self) -> Option<Timestamp> {
        self.updated_at
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            low_speed: DEFAULT_LOW_SPEED,
            medium_speed: DEFAULT_MEDIUM_SPEED,
            updated_at: None,
        }
    }
}

/// Check a candidate threshold pair without building a configuration.
pub fn validate_thresholds(low_speed: f64, medium_speed: f64) -> Result<(), CoreError> {
    validate_speed_value(low_speed, "low_speed")?;
    validate_speed_value(medium_speed, "medium_speed")?;
    if low_speed >= medium_speed {
        return Err(CoreError::Validation(format!(
            "low_speed must be less than medium_speed, got {low_speed} >= {medium_speed}"
        )));
    }
    Ok(())
}

fn validate_speed_value(value: f64, name: &str) -> Result<(), CoreError> {
    if !value.is_finite() {
        return Err(CoreError::Validation(format!(
            "{name} must be a finite number, got {value}"
        )));
    }
    if value < 0.0 {
        return Err(CoreError::Validation(format!(
            "{name} must not be negative, got {value}"
        )));
    }
    Ok(())
}

/// Single-slot holder of the authoritative [`ThresholdConfig`].
///
/// Designed to be wrapped in `Arc` and shared through application state.
#[derive(Debug, Default)]
pub struct ThresholdStore {
    current: RwLock<ThresholdConfig>,
}

impl ThresholdStore {
    pub fn new(initial: ThresholdConfig) -> Self {
        Self {
            current: RwLock::new(initial),
        }
    }

    /// Snapshot of the configuration in effect right now.
    ///
    /// Callers that classify and filter within one request should take a
    /// single snapshot and use it for both.
    pub async fn current(&self) -> ThresholdConfig {
        *self.current.read().await
    }

    /// Install `config` if it is at least as recent as the one in effect.
    ///
    /// Returns `true` when the slot was replaced. The most recently updated
    /// configuration is authoritative regardless of the order writers
    /// finished in, and a configuration can only exist once validated, so
    /// the slot never holds an inverted pair.
    pub async fn apply(&self, config: ThresholdConfig) -> bool {
        let mut slot = self.current.write().await;
        if config.updated_at < slot.updated_at {
            return false;
        }
        *slot = config;
        true
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

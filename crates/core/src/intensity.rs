//! Traffic-intensity classification (pure logic, no I/O).
//!
//! [`classify`] maps a speed to an [`IntensityLabel`]; [`predicate_for`] is
//! its inverse, producing the [`SpeedBand`] that selects exactly the speeds
//! classified under a label. Both read the same [`ThresholdConfig`], and the
//! band edges mirror the comparisons in `classify` one for one:
//!
//! ```text
//! High    speed <= low_speed
//! Medium  low_speed < speed <= medium_speed
//! Low     speed > medium_speed
//! ```
//!
//! Both cut points lean toward the more congested label.

use std::fmt;

use serde::Serialize;

use crate::thresholds::ThresholdConfig;

/// Token for congested traffic (at or below `low_speed`).
pub const TOKEN_HIGH: &str = "elevada";

/// Token for moderate traffic.
pub const TOKEN_MEDIUM: &str = "média";

/// Token for free-flowing traffic (above `medium_speed`).
pub const TOKEN_LOW: &str = "baixa";

/// Token reported for readings with no recorded speed. Output only.
pub const TOKEN_UNKNOWN: &str = "desconhecida";

/// Derived intensity of a reading. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntensityLabel {
    High,
    Medium,
    Low,
    Unknown,
}

impl IntensityLabel {
    /// The three labels that have a filter band, most congested first.
    pub const BANDED: [IntensityLabel; 3] = [Self::High, Self::Medium, Self::Low];

    /// Wire token used in query parameters and response bodies.
    pub fn token(self) -> &'static str {
        match self {
            Self::High => TOKEN_HIGH,
            Self::Medium => TOKEN_MEDIUM,
            Self::Low => TOKEN_LOW,
            Self::Unknown => TOKEN_UNKNOWN,
        }
    }

    /// Parse a filter token. `Unknown` has no filter token, so
    /// `"desconhecida"` yields `None` like any other unrecognized value.
    pub fn from_filter_token(token: &str) -> Option<Self> {
        match token {
            TOKEN_HIGH => Some(Self::High),
            TOKEN_MEDIUM => Some(Self::Medium),
            TOKEN_LOW => Some(Self::Low),
            _ => None,
        }
    }
}

impl fmt::Display for IntensityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl Serialize for IntensityLabel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.token())
    }
}

/// Classify a speed (km/h) under `thresholds`.
///
/// Negative speeds are not rejected here; they fall into `High` like any
/// other value at or below `low_speed`. A NaN speed is not a measurement
/// and is reported as `Unknown`.
pub fn classify(speed: Option<f64>, thresholds: &ThresholdConfig) -> IntensityLabel {
    let Some(speed) = speed else {
        return IntensityLabel::Unknown;
    };
    if speed.is_nan() {
        IntensityLabel::Unknown
    } else if speed <= thresholds.low_speed() {
        IntensityLabel::High
    } else if speed <= thresholds.medium_speed() {
        IntensityLabel::Medium
    } else {
        IntensityLabel::Low
    }
}

/// A half-open speed range `(above, up_to]`; a missing edge is unbounded.
///
/// Absent and NaN speeds never match, whatever the edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpeedBand {
    /// Exclusive lower edge.
    pub above: Option<f64>,
    /// Inclusive upper edge.
    pub up_to: Option<f64>,
}

impl SpeedBand {
    pub fn contains(&self, speed: Option<f64>) -> bool {
        let Some(speed) = speed else {
            return false;
        };
        if speed.is_nan() {
            return false;
        }
        self.above.map_or(true, |lower| speed > lower)
            && self.up_to.map_or(true, |upper| speed <= upper)
    }
}

/// The band selecting exactly the speeds that [`classify`] maps to `label`.
///
/// Returns `None` for `Unknown`: readings without a speed are excluded from
/// every filtered result.
pub fn predicate_for(label: IntensityLabel, thresholds: &ThresholdConfig) -> Option<SpeedBand> {
    match label {
        IntensityLabel::High => Some(SpeedBand {
            above: None,
            up_to: Some(thresholds.low_speed()),
        }),
        IntensityLabel::Medium => Some(SpeedBand {
            above: Some(thresholds.low_speed()),
            up_to: Some(thresholds.medium_speed()),
        }),
        IntensityLabel::Low => Some(SpeedBand {
            above: Some(thresholds.medium_speed()),
            up_to: None,
        }),
        IntensityLabel::Unknown => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

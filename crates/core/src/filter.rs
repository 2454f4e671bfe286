//! Dispatch of the `intensity` query parameter.
//!
//! The token set is closed. Anything outside it is carried as
//! [`IntensityFilter::Unrecognized`] and deliberately applies no filter:
//! intensity is an optional refinement of a listing, not a required input.

use crate::intensity::{predicate_for, IntensityLabel, SpeedBand};
use crate::thresholds::ThresholdConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntensityFilter {
    /// No `intensity` parameter was supplied.
    All,
    /// Keep only readings classified under this label.
    Only(IntensityLabel),
    /// A token outside the accepted set. Treated exactly like `All`.
    Unrecognized(String),
}

impl IntensityFilter {
    /// Interpret the raw query value. An empty string counts as absent.
    pub fn from_query(token: Option<&str>) -> Self {
        match token {
            None | Some("") => Self::All,
            Some(raw) => match IntensityLabel::from_filter_token(raw) {
                Some(label) => Self::Only(label),
                None => Self::Unrecognized(raw.to_string()),
            },
        }
    }

    /// The speed band to select under `thresholds`, or `None` for no filter.
    pub fn band(&self, thresholds: &ThresholdConfig) -> Option<SpeedBand> {
        match self {
            Self::All => None,
            Self::Only(label) => predicate_for(*label, thresholds),
            Self::Unrecognized(_) => None,
        }
    }
}

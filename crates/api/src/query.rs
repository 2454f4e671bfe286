//! Shared query parameter types for API handlers.

use serde::Deserialize;
use traffic_core::pagination::Page;

/// Generic pagination parameters (`?limit=&offset=`).
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    pub fn page(&self) -> Page {
        Page::new(self.limit, self.offset)
    }
}

/// Query parameters for listing speed readings
/// (`?intensity=&limit=&offset=`).
///
/// `intensity` is kept as the raw token; interpretation, including the
/// no-filter fallback for unrecognized values, belongs to
/// [`traffic_core::filter::IntensityFilter`].
#[derive(Debug, Deserialize)]
pub struct ListReadingsParams {
    pub intensity: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListReadingsParams {
    pub fn page(&self) -> Page {
        Page::new(self.limit, self.offset)
    }
}

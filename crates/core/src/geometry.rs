//! Point geometries derived from a reading's coordinates.
//!
//! Geometry is opaque to classification; it is only derived on write and
//! returned as WKT (SRID 4326, longitude first).

use geo_types::Point;
use wkt::ToWkt;

/// WKT for the point at (`longitude`, `latitude`), if both are present.
pub fn point_wkt(longitude: Option<f64>, latitude: Option<f64>) -> Option<String> {
    match (longitude, latitude) {
        (Some(x), Some(y)) => Some(Point::new(x, y).wkt_string()),
        _ => None,
    }
}

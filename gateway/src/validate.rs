//! Request boundary validation
//!
//! Coordinates and thresholds are checked at the HTTP edge so the
//! algorithm crates only ever see well-formed values.

use axum::http::StatusCode;
use route_deviation::TrackPoint;

type Rejection = (StatusCode, String);

pub fn require_latitude(field: &str, lat: f64) -> Result<(), Rejection> {
    if lat.is_finite() && (-90.0..=90.0).contains(&lat) {
        Ok(())
    } else {
        Err((
            StatusCode::BAD_REQUEST,
            format!("{} latitude out of range: {}", field, lat),
        ))
    }
}

pub fn require_longitude(field: &str, lon: f64) -> Result<(), Rejection> {
    if lon.is_finite() && (-180.0..=180.0).contains(&lon) {
        Ok(())
    } else {
        Err((
            StatusCode::BAD_REQUEST,
            format!("{} longitude out of range: {}", field, lon),
        ))
    }
}

pub fn require_positive(field: &str, value: f64) -> Result<(), Rejection> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err((
            StatusCode::BAD_REQUEST,
            format!("{} must be positive and finite, got {}", field, value),
        ))
    }
}

pub fn require_positive_seconds(field: &str, value: i64) -> Result<(), Rejection> {
    if value > 0 {
        Ok(())
    } else {
        Err((
            StatusCode::BAD_REQUEST,
            format!("{} must be positive, got {}", field, value),
        ))
    }
}

/// Validate every point of a named path
pub fn require_track_points(field: &str, points: &[TrackPoint]) -> Result<(), Rejection> {
    for p in points {
        require_latitude(field, p.lat)?;
        require_longitude(field, p.lon)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latitude_bounds() {
        assert!(require_latitude("q", 13.0827).is_ok());
        assert!(require_latitude("q", -90.0).is_ok());
        assert!(require_latitude("q", 90.0).is_ok());
        assert!(require_latitude("q", 90.01).is_err());
        assert!(require_latitude("q", f64::NAN).is_err());
    }

    #[test]
    fn test_longitude_bounds() {
        assert!(require_longitude("q", 80.2707).is_ok());
        assert!(require_longitude("q", -180.0).is_ok());
        assert!(require_longitude("q", 180.0).is_ok());
        assert!(require_longitude("q", 181.0).is_err());
        assert!(require_longitude("q", f64::INFINITY).is_err());
    }

    #[test]
    fn test_positive_thresholds() {
        assert!(require_positive("max_deviation_m", 300.0).is_ok());
        assert!(require_positive("max_deviation_m", 0.0).is_err());
        assert!(require_positive("max_deviation_m", -5.0).is_err());
        assert!(require_positive("max_deviation_m", f64::NAN).is_err());
    }

    #[test]
    fn test_positive_seconds() {
        assert!(require_positive_seconds("max_gap_seconds", 1200).is_ok());
        assert!(require_positive_seconds("max_gap_seconds", 0).is_err());
        assert!(require_positive_seconds("max_gap_seconds", -10).is_err());
    }

    #[test]
    fn test_track_points_reject_first_bad_point() {
        let points = vec![
            TrackPoint { lat: 13.0, lon: 80.0, t: 0 },
            TrackPoint { lat: 95.0, lon: 80.0, t: 60 },
        ];
        let err = require_track_points("actual", &points).unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
        assert!(err.1.contains("actual"), "message: {}", err.1);
    }
}

//! Route Deviation API
//!
//! Thin wrapper over `route_deviation`: request validation, threshold
//! defaults, and the wire response shapes.

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::validate::{require_positive, require_positive_seconds, require_track_points};
use route_deviation::{
    DeviationDetector, DeviationError, TrackPoint, DEFAULT_MAX_DEVIATION_M,
    DEFAULT_MAX_GAP_SECONDS,
};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize)]
pub struct RouteCheckRequest {
    pub planned: Vec<TrackPoint>,
    pub actual: Vec<TrackPoint>,
    /// Spatial threshold in meters (default 300)
    pub max_deviation_m: Option<f64>,
    /// Inactivity threshold in seconds (default 1200)
    pub max_gap_seconds: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct RouteCheckResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anomalous: Option<bool>,
    pub alerts: Vec<String>,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /check - flag deviations between a planned and an actual path
pub async fn check_route(
    Json(req): Json<RouteCheckRequest>,
) -> Result<Json<RouteCheckResponse>, (StatusCode, String)> {
    let max_deviation_m = req.max_deviation_m.unwrap_or(DEFAULT_MAX_DEVIATION_M);
    let max_gap_seconds = req.max_gap_seconds.unwrap_or(DEFAULT_MAX_GAP_SECONDS);

    require_positive("max_deviation_m", max_deviation_m)?;
    require_positive_seconds("max_gap_seconds", max_gap_seconds)?;
    require_track_points("planned", &req.planned)?;
    require_track_points("actual", &req.actual)?;

    let detector = DeviationDetector::new(max_deviation_m, max_gap_seconds);

    match detector.detect(&req.planned, &req.actual) {
        Ok(report) => Ok(Json(RouteCheckResponse {
            ok: true,
            anomalous: Some(report.anomalous),
            alerts: report.alerts.into_iter().map(|a| a.message).collect(),
        })),
        // Empty input is a well-formed "can't check" outcome, not an error status
        Err(DeviationError::MissingData) => Ok(Json(RouteCheckResponse {
            ok: false,
            anomalous: None,
            alerts: vec!["missing data".to_string()],
        })),
    }
}

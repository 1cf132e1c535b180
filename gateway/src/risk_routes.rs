//! Geofence Risk API
//!
//! Point scoring against the zone registry plus the zone listing.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::validate::{require_latitude, require_longitude};
use crate::AppState;
use geofence_risk::{score_point, Zone};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize)]
pub struct ScoreQuery {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub score: u8,
    /// Null when the point fell through to the fallback path
    pub zone: Option<String>,
}

#[derive(Serialize)]
pub struct ZonesResponse {
    pub zones: Vec<ZoneSummary>,
}

#[derive(Serialize)]
pub struct ZoneSummary {
    pub name: String,
    pub score: u8,
    pub polygon: Vec<[f64; 2]>,
}

impl From<&Zone> for ZoneSummary {
    fn from(zone: &Zone) -> Self {
        Self {
            name: zone.name.clone(),
            score: zone.score,
            polygon: zone.polygon.clone(),
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /score?lat=&lon= - risk score for a single point
pub async fn score(
    State(state): State<AppState>,
    Query(query): Query<ScoreQuery>,
) -> Result<Json<ScoreResponse>, (StatusCode, String)> {
    require_latitude("query", query.lat)?;
    require_longitude("query", query.lon)?;

    let m = score_point(query.lat, query.lon, state.zones.zones());

    Ok(Json(ScoreResponse {
        score: m.score,
        zone: m.zone_name,
    }))
}

/// GET /zones - configured zones in priority order
pub async fn list_zones(State(state): State<AppState>) -> Json<ZonesResponse> {
    let zones = state.zones.zones().iter().map(ZoneSummary::from).collect();
    Json(ZonesResponse { zones })
}

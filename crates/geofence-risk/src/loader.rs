//! Zone configuration loading from JSON
//!
//! Expected file shape:
//!
//! ```json
//! {
//!   "zones": [
//!     {"name": "RedZone", "score": 90, "polygon": [[80.27, 13.08], [80.30, 13.08], [80.30, 13.11]]}
//!   ]
//! }
//! ```
//!
//! Validation is strict and any malformed zone fails the whole load. A
//! silently skipped zone would shift first-match priority for every zone
//! listed behind it.

use crate::{GeofenceError, Result, Zone};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// Validate latitude is in valid range
fn is_valid_latitude(lat: f64) -> bool {
    (-90.0..=90.0).contains(&lat) && lat.is_finite()
}

/// Validate longitude is in valid range
fn is_valid_longitude(lon: f64) -> bool {
    (-180.0..=180.0).contains(&lon) && lon.is_finite()
}

/// Raw zone record from JSON
#[derive(Debug, Deserialize)]
struct RawZone {
    name: String,
    score: i64,
    polygon: Vec<[f64; 2]>,
}

/// Container for the zone file
#[derive(Debug, Deserialize)]
struct ZoneFile {
    zones: Vec<RawZone>,
}

/// Process-wide zone configuration, built once at startup
#[derive(Debug)]
pub struct ZoneRegistry {
    zones: Vec<Zone>,
    loaded_at: DateTime<Utc>,
}

impl ZoneRegistry {
    pub fn new(zones: Vec<Zone>) -> Self {
        Self {
            zones,
            loaded_at: Utc::now(),
        }
    }

    /// Zones in priority order
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

/// Load and validate the zone configuration file.
///
/// An empty `zones` array is valid: every query then takes the fallback
/// path from the hardcoded center.
pub fn load_zones(path: impl AsRef<Path>) -> Result<ZoneRegistry> {
    let path = path.as_ref();
    info!("Loading zones from {:?}", path);

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let raw: ZoneFile = serde_json::from_reader(reader)?;

    let mut zones = Vec::with_capacity(raw.zones.len());
    let mut seen = HashSet::new();

    for (i, zone) in raw.zones.into_iter().enumerate() {
        if zone.name.trim().is_empty() {
            return Err(GeofenceError::EmptyName(i));
        }
        if !seen.insert(zone.name.clone()) {
            return Err(GeofenceError::DuplicateName(zone.name));
        }
        if !(0..=100).contains(&zone.score) {
            return Err(GeofenceError::ScoreOutOfRange(zone.name, zone.score));
        }
        if zone.polygon.len() < 3 {
            return Err(GeofenceError::TooFewVertices(zone.name, zone.polygon.len()));
        }
        for v in &zone.polygon {
            if !is_valid_longitude(v[0]) || !is_valid_latitude(v[1]) {
                return Err(GeofenceError::InvalidVertex(zone.name, v[0], v[1]));
            }
        }

        zones.push(Zone::new(zone.name, zone.score as u8, zone.polygon)?);
    }

    info!("Loaded {} zones", zones.len());

    Ok(ZoneRegistry::new(zones))
}

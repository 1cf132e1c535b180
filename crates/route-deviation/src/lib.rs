//! Route Deviation Detector
//!
//! Compares a vehicle's actual path against its planned path and flags
//! two classes of anomaly:
//!
//! ```text
//! spatial    d(actual[i], planned[min(i, last)]) > max_deviation_m
//! temporal   actual[i].t - actual[i-1].t         > max_gap_seconds
//! ```
//!
//! Both passes walk the full actual path. Alerts are collected in pass
//! order (every spatial alert, then every gap alert) and the report is
//! anomalous iff at least one alert fired.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use thiserror::Error;
use tracing::debug;

/// Mean Earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Default spatial deviation threshold in meters
pub const DEFAULT_MAX_DEVIATION_M: f64 = 300.0;

/// Default inactivity gap threshold in seconds
pub const DEFAULT_MAX_GAP_SECONDS: i64 = 1200;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DeviationError {
    #[error("planned and actual paths must be non-empty")]
    MissingData,
}

pub type Result<T> = std::result::Result<T, DeviationError>;

/// A single geo-timestamped path sample
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrackPoint {
    pub lat: f64,
    pub lon: f64,
    /// Unix epoch seconds
    pub t: i64,
}

/// Kind of anomaly an alert describes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AlertKind {
    SpatialDeviation,
    InactivityGap,
}

/// A single detected anomaly
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviationAlert {
    pub kind: AlertKind,
    /// Stable wire-format description
    pub message: String,
    /// Measured value (meters for spatial alerts, seconds for gaps)
    pub measured: i64,
    /// Threshold the measurement exceeded
    pub threshold: i64,
}

impl DeviationAlert {
    fn spatial(distance_m: f64, at: i64, max_deviation_m: f64) -> Self {
        let measured = distance_m as i64;
        let threshold = max_deviation_m as i64;
        Self {
            kind: AlertKind::SpatialDeviation,
            message: format!("Deviation {}m at t={} (max {})", measured, at, threshold),
            measured,
            threshold,
        }
    }

    fn gap(gap_seconds: i64, max_gap_seconds: i64) -> Self {
        Self {
            kind: AlertKind::InactivityGap,
            message: format!("Inactivity gap {}s", gap_seconds),
            measured: gap_seconds,
            threshold: max_gap_seconds,
        }
    }
}

/// Outcome of checking one planned/actual path pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviationReport {
    pub anomalous: bool,
    pub alerts: Vec<DeviationAlert>,
}

pub struct DeviationDetector {
    max_deviation_m: f64,
    max_gap_seconds: i64,
}

impl Default for DeviationDetector {
    fn default() -> Self {
        Self {
            max_deviation_m: DEFAULT_MAX_DEVIATION_M,
            max_gap_seconds: DEFAULT_MAX_GAP_SECONDS,
        }
    }
}

impl DeviationDetector {
    pub fn new(max_deviation_m: f64, max_gap_seconds: i64) -> Self {
        Self {
            max_deviation_m,
            max_gap_seconds,
        }
    }

    /// Run both detection passes over a planned/actual path pair.
    ///
    /// Actual points past the end of the planned path are compared against
    /// the final planned point. Timestamps are taken as-is: out-of-order
    /// samples produce negative gaps, which never exceed a positive
    /// threshold and are never flagged. Gap arithmetic saturates at the
    /// i64 limits.
    pub fn detect(&self, planned: &[TrackPoint], actual: &[TrackPoint]) -> Result<DeviationReport> {
        if planned.is_empty() || actual.is_empty() {
            return Err(DeviationError::MissingData);
        }

        let mut alerts = Vec::new();

        // Spatial pass: nearest-index pairing, clamped to the planned tail
        for (i, point) in actual.iter().enumerate() {
            let reference = planned[i.min(planned.len() - 1)];
            let distance_m = haversine_m(*point, reference);
            if distance_m > self.max_deviation_m {
                alerts.push(DeviationAlert::spatial(
                    distance_m,
                    point.t,
                    self.max_deviation_m,
                ));
            }
        }

        // Temporal pass: consecutive actual samples only
        for pair in actual.windows(2) {
            let gap = pair[1].t.saturating_sub(pair[0].t);
            if gap > self.max_gap_seconds {
                alerts.push(DeviationAlert::gap(gap, self.max_gap_seconds));
            }
        }

        debug!(
            "Checked {} actual against {} planned points: {} alert(s)",
            actual.len(),
            planned.len(),
            alerts.len()
        );

        Ok(DeviationReport {
            anomalous: !alerts.is_empty(),
            alerts,
        })
    }
}

/// Haversine great-circle distance between two track points in meters
pub fn haversine_m(p1: TrackPoint, p2: TrackPoint) -> f64 {
    let lat1_rad = p1.lat * PI / 180.0;
    let lat2_rad = p2.lat * PI / 180.0;
    let dlat = (p2.lat - p1.lat) * PI / 180.0;
    let dlon = (p2.lon - p1.lon) * PI / 180.0;

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);

    // √a can drift past 1.0 for near-antipodal pairs
    2.0 * EARTH_RADIUS_M * a.sqrt().min(1.0).asin()
}

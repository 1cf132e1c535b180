//! Zone boundary geometry
//!
//! The scorer only ever asks a zone two questions: does it contain a
//! point, and where is its center. Both sit behind `ZoneBoundary` so the
//! scoring logic stays independent of the geometry backend.

use geo::{Centroid, Contains, LineString, Point, Polygon};

/// Boundary capability a zone exposes to the scorer.
///
/// Coordinates are (lon, lat) in degrees throughout.
pub trait ZoneBoundary {
    fn contains(&self, lon: f64, lat: f64) -> bool;
    fn centroid(&self) -> (f64, f64);
}

/// Planar polygon boundary backed by the `geo` crate.
///
/// Containment is boundary-exclusive: a point on an edge or vertex is
/// outside. The centroid is computed once at construction, keeping the
/// query path allocation-free.
pub struct PlanarBoundary {
    polygon: Polygon<f64>,
    centroid: Point<f64>,
}

impl PlanarBoundary {
    /// Build from a (lon, lat) vertex ring. The ring is closed
    /// automatically if the final vertex does not repeat the first.
    /// Returns `None` when no centroid is computable (empty ring).
    pub fn new(vertices: &[[f64; 2]]) -> Option<Self> {
        let ring: Vec<(f64, f64)> = vertices.iter().map(|v| (v[0], v[1])).collect();
        let polygon = Polygon::new(LineString::from(ring), vec![]);
        let centroid = polygon.centroid()?;
        Some(Self { polygon, centroid })
    }
}

impl ZoneBoundary for PlanarBoundary {
    fn contains(&self, lon: f64, lat: f64) -> bool {
        self.polygon.contains(&Point::new(lon, lat))
    }

    fn centroid(&self) -> (f64, f64) {
        (self.centroid.x(), self.centroid.y())
    }
}

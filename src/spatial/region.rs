//! Geometric model of the site map: points, polygons, zones and places

use serde::{Deserialize, Serialize};

/// A map coordinate
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Level of a region in the two-level hierarchy
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RegionKind {
    /// Coarse area, numbered from 1
    Zone { number: u32 },
    /// Named sub-region inside exactly one zone
    #[serde(rename_all = "camelCase")]
    Place { parent_zone: u32 },
}

/// A zone or place polygon. Immutable once the catalog is built.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MapRegion {
    pub id: String,
    pub kind: RegionKind,
    /// Proper name for places; empty for zones (their label is generated)
    pub name: String,
    pub polygon: Vec<Point>,
}

impl MapRegion {
    pub fn zone(number: u32, polygon: Vec<Point>) -> Self {
        Self {
            id: zone_id(number),
            kind: RegionKind::Zone { number },
            name: String::new(),
            polygon,
        }
    }

    pub fn place(id: &str, name: &str, parent_zone: u32, polygon: Vec<Point>) -> Self {
        Self {
            id: id.to_string(),
            kind: RegionKind::Place { parent_zone },
            name: name.to_string(),
            polygon,
        }
    }

    pub fn is_zone(&self) -> bool {
        matches!(self.kind, RegionKind::Zone { .. })
    }

    /// Zone that owns this place; `None` for zones
    pub fn parent_zone(&self) -> Option<u32> {
        match self.kind {
            RegionKind::Place { parent_zone } => Some(parent_zone),
            RegionKind::Zone { .. } => None,
        }
    }

    /// Derived on demand, never stored
    pub fn centroid(&self) -> Option<Point> {
        centroid_of(&self.polygon)
    }
}

/// Selection id used for zone `n`
pub fn zone_id(number: u32) -> String {
    format!("zone-{}", number)
}

/// Arithmetic mean of the vertices.
///
/// Not area-weighted; close enough for the convex, roughly uniform regions of
/// the site map. `None` for an empty polygon.
pub fn centroid_of(polygon: &[Point]) -> Option<Point> {
    if polygon.is_empty() {
        return None;
    }
    let n = polygon.len() as f64;
    let (sx, sy) = polygon
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(Point::new(sx / n, sy / n))
}

/// Axis-aligned bounds as (min, max)
pub fn bounds_of(polygon: &[Point]) -> Option<(Point, Point)> {
    let first = polygon.first()?;
    let init = (*first, *first);
    Some(polygon.iter().fold(init, |(lo, hi), p| {
        (
            Point::new(lo.x.min(p.x), lo.y.min(p.y)),
            Point::new(hi.x.max(p.x), hi.y.max(p.y)),
        )
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64, y: f64, size: f64) -> Vec<Point> {
        vec![
            Point::new(x, y),
            Point::new(x + size, y),
            Point::new(x + size, y + size),
            Point::new(x, y + size),
        ]
    }

    #[test]
    fn test_centroid_square() {
        let c = centroid_of(&square(0.0, 0.0, 10.0)).unwrap();
        assert_eq!(c, Point::new(5.0, 5.0));
    }

    #[test]
    fn test_centroid_is_vertex_mean_not_area_weighted() {
        // Extra vertex on one edge pulls the mean, though the area is unchanged
        let polygon = vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        let c = centroid_of(&polygon).unwrap();
        assert!((c.x - 5.0).abs() < 1e-9);
        assert!((c.y - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_centroid_empty() {
        assert_eq!(centroid_of(&[]), None);
    }

    #[test]
    fn test_parent_zone_only_for_places() {
        let zone = MapRegion::zone(2, square(200.0, 0.0, 200.0));
        let place = MapRegion::place("place-x", "X", 2, square(210.0, 10.0, 20.0));

        assert_eq!(zone.id, "zone-2");
        assert!(zone.is_zone());
        assert_eq!(zone.parent_zone(), None);
        assert_eq!(place.parent_zone(), Some(2));
    }

    #[test]
    fn test_bounds() {
        let (lo, hi) = bounds_of(&square(10.0, 20.0, 5.0)).unwrap();
        assert_eq!(lo, Point::new(10.0, 20.0));
        assert_eq!(hi, Point::new(15.0, 25.0));
        assert_eq!(bounds_of(&[]), None);
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_value(RegionKind::Place { parent_zone: 4 }).unwrap();
        assert_eq!(json["type"], "place");
        assert_eq!(json["parentZone"], 4);
    }
}

//! Static site map catalog
//!
//! Six rectangular zones tile a 600 x 400 map (3 columns x 2 rows, numbered
//! row-major from the top-left). Every place polygon sits inside exactly one
//! zone.

use super::region::{MapRegion, Point};

pub const MAP_WIDTH: f64 = 600.0;
pub const MAP_HEIGHT: f64 = 400.0;
pub const ZONE_COLUMNS: u32 = 3;
pub const ZONE_ROWS: u32 = 2;

/// Places as (id, name, zone, vertices)
const PLACES: &[(&str, &str, u32, &[(f64, f64)])] = &[
    ("place-main-gate", "正門", 1, &[(20.0, 20.0), (90.0, 20.0), (90.0, 70.0), (20.0, 70.0)]),
    ("place-guard-house", "守衛所", 1, &[(110.0, 30.0), (180.0, 30.0), (180.0, 90.0), (110.0, 90.0)]),
    ("place-building-a", "A棟", 2, &[(220.0, 20.0), (380.0, 20.0), (380.0, 120.0), (220.0, 120.0)]),
    ("place-building-b", "B棟", 3, &[(420.0, 20.0), (580.0, 20.0), (580.0, 140.0), (420.0, 140.0)]),
    ("place-material-yard", "資材置場", 4, &[(20.0, 220.0), (180.0, 220.0), (180.0, 300.0), (20.0, 300.0)]),
    ("place-parking", "駐車場", 4, &[(20.0, 320.0), (180.0, 320.0), (180.0, 380.0), (20.0, 380.0)]),
    ("place-warehouse-1", "第1倉庫", 5, &[(220.0, 220.0), (300.0, 220.0), (300.0, 300.0), (220.0, 300.0)]),
    ("place-warehouse-2", "第2倉庫", 5, &[(320.0, 220.0), (380.0, 220.0), (380.0, 300.0), (320.0, 300.0)]),
    ("place-canteen", "食堂", 6, &[(420.0, 240.0), (520.0, 220.0), (580.0, 300.0), (520.0, 380.0), (430.0, 360.0)]),
];

/// Immutable zone + place catalog
#[derive(Clone, Debug)]
pub struct RegionCatalog {
    regions: Vec<MapRegion>,
}

impl Default for RegionCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl RegionCatalog {
    /// The built-in site map
    pub fn standard() -> Self {
        let zone_w = MAP_WIDTH / ZONE_COLUMNS as f64;
        let zone_h = MAP_HEIGHT / ZONE_ROWS as f64;

        let mut regions = Vec::new();
        for number in 1..=ZONE_COLUMNS * ZONE_ROWS {
            let col = ((number - 1) % ZONE_COLUMNS) as f64;
            let row = ((number - 1) / ZONE_COLUMNS) as f64;
            let (x0, y0) = (col * zone_w, row * zone_h);
            regions.push(MapRegion::zone(
                number,
                vec![
                    Point::new(x0, y0),
                    Point::new(x0 + zone_w, y0),
                    Point::new(x0 + zone_w, y0 + zone_h),
                    Point::new(x0, y0 + zone_h),
                ],
            ));
        }

        for (id, name, zone, vertices) in PLACES {
            let polygon = vertices.iter().map(|(x, y)| Point::new(*x, *y)).collect();
            regions.push(MapRegion::place(id, name, *zone, polygon));
        }

        Self { regions }
    }

    pub fn get(&self, id: &str) -> Option<&MapRegion> {
        self.regions.iter().find(|r| r.id == id)
    }

    pub fn zone(&self, number: u32) -> Option<&MapRegion> {
        self.zones().find(|z| z.kind == super::region::RegionKind::Zone { number })
    }

    pub fn zones(&self) -> impl Iterator<Item = &MapRegion> {
        self.regions.iter().filter(|r| r.is_zone())
    }

    pub fn places(&self) -> impl Iterator<Item = &MapRegion> {
        self.regions.iter().filter(|r| !r.is_zone())
    }

    /// Places owned by a zone, in catalog order
    pub fn places_in(&self, zone: u32) -> impl Iterator<Item = &MapRegion> {
        self.places().filter(move |p| p.parent_zone() == Some(zone))
    }

    pub fn all(&self) -> &[MapRegion] {
        &self.regions
    }
}

/// Detail map image shown for a zone
pub fn zone_detail_image(number: u32) -> String {
    format!("map_area{}.png", number)
}

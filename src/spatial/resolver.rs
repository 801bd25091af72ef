//! RegionResolver - turns a zone / place selection into a location label
//!
//! Selection is command driven: the host calls `select(region_id)` with the id
//! of whatever the operator clicked. Selecting a place implies its parent zone;
//! selecting a zone never picks a place and drops any previous place.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;

use super::catalog::{zone_detail_image, RegionCatalog};
use super::region::{MapRegion, Point, RegionKind};

/// Current zone / place selection
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegionSelection {
    pub zone: Option<u32>,
    pub place: Option<String>,
}

/// Region as handed to the map renderer
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegionSummary {
    pub id: String,
    pub kind: RegionKind,
    pub label: String,
    pub polygon: Vec<Point>,
    pub centroid: Option<Point>,
    pub parent_zone: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail_image: Option<String>,
}

/// Selection-driven location resolver over a static catalog
pub struct RegionResolver {
    catalog: RegionCatalog,
    selection: RegionSelection,
    zone_label_prefix: String,
    zone_label_separator: String,
}

impl RegionResolver {
    pub fn new(zone_label_prefix: &str, zone_label_separator: &str) -> Self {
        Self {
            catalog: RegionCatalog::standard(),
            selection: RegionSelection::default(),
            zone_label_prefix: zone_label_prefix.to_string(),
            zone_label_separator: zone_label_separator.to_string(),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(&config.zone_label_prefix, &config.zone_label_separator)
    }

    pub fn catalog(&self) -> &RegionCatalog {
        &self.catalog
    }

    pub fn selection(&self) -> &RegionSelection {
        &self.selection
    }

    /// Apply a click. Unknown ids are rejected and leave the selection as is.
    pub fn select(&mut self, region_id: &str) -> Result<&MapRegion, String> {
        let region = self
            .catalog
            .get(region_id)
            .ok_or_else(|| format!("Unknown region: {}", region_id))?;

        self.selection = match region.kind {
            RegionKind::Zone { number } => RegionSelection {
                zone: Some(number),
                place: None,
            },
            RegionKind::Place { parent_zone } => RegionSelection {
                zone: Some(parent_zone),
                place: Some(region.id.clone()),
            },
        };
        Ok(region)
    }

    pub fn clear(&mut self) {
        self.selection = RegionSelection::default();
    }

    /// Generated label for a zone ("Zone 3", "エリア3")
    pub fn zone_label(&self, number: u32) -> String {
        format!("{}{}{}", self.zone_label_prefix, self.zone_label_separator, number)
    }

    /// Place name, else the zone label, else empty
    pub fn resolve_label(&self) -> String {
        if let Some(place) = self
            .selection
            .place
            .as_deref()
            .and_then(|id| self.catalog.get(id))
        {
            return place.name.clone();
        }
        match self.selection.zone {
            Some(number) => self.zone_label(number),
            None => String::new(),
        }
    }

    /// Every region with its display label and derived centroid
    pub fn summaries(&self) -> Vec<RegionSummary> {
        self.catalog
            .all()
            .iter()
            .map(|region| {
                let (label, detail_image) = match region.kind {
                    RegionKind::Zone { number } => {
                        (self.zone_label(number), Some(zone_detail_image(number)))
                    }
                    RegionKind::Place { .. } => (region.name.clone(), None),
                };
                RegionSummary {
                    id: region.id.clone(),
                    kind: region.kind,
                    label,
                    polygon: region.polygon.clone(),
                    centroid: region.centroid(),
                    parent_zone: region.parent_zone(),
                    detail_image,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_selection() {
        let resolver = RegionResolver::new("Zone", " ");
        assert_eq!(resolver.resolve_label(), "");
    }

    #[test]
    fn test_zone_label() {
        let mut resolver = RegionResolver::new("Zone", " ");
        resolver.select("zone-3").unwrap();
        assert_eq!(resolver.resolve_label(), "Zone 3");
        assert_eq!(resolver.selection().place, None);
    }

    #[test]
    fn test_place_name_wins_over_zone() {
        let mut resolver = RegionResolver::from_config(&EngineConfig::japanese());
        resolver.select("zone-2").unwrap();
        resolver.select("place-warehouse-1").unwrap();

        assert_eq!(resolver.resolve_label(), "第1倉庫");
        // Place implies its own zone, not the previously selected one
        assert_eq!(resolver.selection().zone, Some(5));
    }

    #[test]
    fn test_zone_does_not_pick_place() {
        let mut resolver = RegionResolver::from_config(&EngineConfig::japanese());
        resolver.select("place-parking").unwrap();
        resolver.select("zone-4").unwrap();

        assert_eq!(resolver.selection().place, None);
        assert_eq!(resolver.resolve_label(), "エリア4");
    }

    #[test]
    fn test_unknown_region_keeps_selection() {
        let mut resolver = RegionResolver::new("Zone", " ");
        resolver.select("place-canteen").unwrap();
        assert!(resolver.select("zone-99").is_err());
        assert_eq!(resolver.resolve_label(), "食堂");

        resolver.clear();
        assert_eq!(resolver.resolve_label(), "");
    }

    #[test]
    fn test_summaries() {
        let resolver = RegionResolver::new("Zone", " ");
        let summaries = resolver.summaries();
        assert_eq!(summaries.len(), resolver.catalog().all().len());

        let zone1 = summaries.iter().find(|s| s.id == "zone-1").unwrap();
        assert_eq!(zone1.label, "Zone 1");
        assert_eq!(zone1.centroid, Some(Point::new(100.0, 100.0)));
        assert_eq!(zone1.detail_image.as_deref(), Some("map_area1.png"));

        let gate = summaries.iter().find(|s| s.id == "place-main-gate").unwrap();
        assert_eq!(gate.parent_zone, Some(1));
        assert_eq!(gate.detail_image, None);
    }
}

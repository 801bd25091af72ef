//! Engine configuration
//!
//! Display-time knobs only. Extraction labels and payload strategies are fixed.

use serde::{Deserialize, Serialize};

/// Configuration for the reconciliation engine
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Rendered in place of any empty field. Default: "unknown"
    pub placeholder: String,
    /// Prefix of generated zone labels ("Zone 3"). Default: "Zone"
    pub zone_label_prefix: String,
    /// Between prefix and zone number. Default: " "
    pub zone_label_separator: String,
    /// Joins list fields (history, medications, allergies). Default: "、"
    pub list_separator: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            placeholder: "unknown".to_string(),
            zone_label_prefix: "Zone".to_string(),
            zone_label_separator: " ".to_string(),
            list_separator: "、".to_string(),
        }
    }
}

impl EngineConfig {
    /// Preset matching the Japanese field app ("不明", "エリア3")
    pub fn japanese() -> Self {
        Self {
            placeholder: "不明".to_string(),
            zone_label_prefix: "エリア".to_string(),
            zone_label_separator: String::new(),
            ..Self::default()
        }
    }

    /// Replace an empty value with the placeholder
    pub fn display<'a>(&'a self, value: &'a str) -> &'a str {
        if value.trim().is_empty() {
            &self.placeholder
        } else {
            value
        }
    }

    /// Join a list field, falling back to the placeholder when empty
    pub fn display_list(&self, values: &[String]) -> String {
        let joined = values
            .iter()
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .collect::<Vec<_>>()
            .join(&self.list_separator);
        if joined.is_empty() {
            self.placeholder.clone()
        } else {
            joined
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"placeholder":"-"}"#).unwrap();
        assert_eq!(config.placeholder, "-");
        assert_eq!(config.zone_label_prefix, "Zone");
        assert_eq!(config.zone_label_separator, " ");
        assert_eq!(config.list_separator, "、");
    }

    #[test]
    fn test_japanese_zone_label_has_no_space() {
        let config = EngineConfig::japanese();
        let mut resolver = crate::spatial::RegionResolver::from_config(&config);
        resolver.select("zone-3").unwrap();
        assert_eq!(resolver.resolve_label(), "エリア3");
    }

    #[test]
    fn test_display_placeholder() {
        let config = EngineConfig::default();
        assert_eq!(config.display(""), "unknown");
        assert_eq!(config.display("  "), "unknown");
        assert_eq!(config.display("A棟"), "A棟");
    }

    #[test]
    fn test_display_list() {
        let config = EngineConfig::japanese();
        assert_eq!(config.display_list(&[]), "不明");
        let meds = vec!["降圧薬".to_string(), "".to_string(), "吸入薬".to_string()];
        assert_eq!(config.display_list(&meds), "降圧薬、吸入薬");
    }
}

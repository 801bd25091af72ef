//! ReconcileEngine: Unified reconciliation facade
//!
//! Owns everything one operator screen needs:
//! - the hydrated staff directory (read-only copy supplied by the host)
//! - MessageCortex / PayloadCortex for notices and scanned codes
//! - the ReconciliationSession being edited
//! - the map selection (RegionResolver)
//! - the ScanGate for the camera decode loop
//!
//! Designed for WASM: every JS call crosses the boundary once and exchanges
//! plain objects through serde-wasm-bindgen.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::config::EngineConfig;
use crate::directory::{duplicate_ids, find_by_id, search_by_name, PersonRecord};
use crate::extract::{LocationCode, MessageCortex, PayloadCortex, PersonCode};
use crate::session::{
    DisplayRow, MatchOutcome, MergedRecord, PayloadKind, ReconciliationSession, ScanGate,
    ScanPayload, ScanTicket,
};
use crate::spatial::{RegionResolver, RegionSummary};
use crate::types::{IncidentReport, ReportPatch};

// =============================================================================
// Types
// =============================================================================

/// Result of extracting a free-text notice
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub report: IncidentReport,
    /// Labeled id, else the first id-like token
    pub identifier_hint: String,
    pub elapsed_us: u64,
}

/// Match outcome plus the notice to show the operator
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    pub outcome: MatchOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl From<MatchOutcome> for MatchReport {
    fn from(outcome: MatchOutcome) -> Self {
        let notice = outcome.notice();
        Self { outcome, notice }
    }
}

/// Name search as sent to JS
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NameSearchReport {
    pub primary: Option<PersonRecord>,
    pub match_count: usize,
    pub notice: String,
}

/// What a decoded string produced and what it did to the session
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScanFeedResult {
    pub payload: ScanPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<MatchReport>,
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn from_js<T: for<'de> Deserialize<'de>>(value: JsValue, what: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid {}: {}", what, e)))
}

// =============================================================================
// ReconcileEngine
// =============================================================================

#[wasm_bindgen]
pub struct ReconcileEngine {
    config: EngineConfig,
    directory: Vec<PersonRecord>,
    messages: MessageCortex,
    payloads: PayloadCortex,
    session: ReconciliationSession,
    regions: RegionResolver,
    scans: ScanGate,
}

impl Default for ReconcileEngine {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

#[wasm_bindgen]
impl ReconcileEngine {
    /// Create an engine with an optional `EngineConfig` object
    #[wasm_bindgen(constructor)]
    pub fn js_new(config: JsValue) -> Result<ReconcileEngine, JsValue> {
        let config = if config.is_null() || config.is_undefined() {
            EngineConfig::default()
        } else {
            from_js(config, "config")?
        };
        Ok(Self::with_config(config))
    }

    /// Replace the directory copy. Returns the record count.
    #[wasm_bindgen(js_name = hydrateDirectory)]
    pub fn js_hydrate_directory(&mut self, records: JsValue) -> Result<usize, JsValue> {
        let records: Vec<PersonRecord> = from_js(records, "directory")?;
        Ok(self.hydrate_directory(records))
    }

    #[wasm_bindgen(js_name = directorySize)]
    pub fn directory_size(&self) -> usize {
        self.directory.len()
    }

    #[wasm_bindgen(js_name = extractMessage)]
    pub fn js_extract_message(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.extract_message(text))
    }

    #[wasm_bindgen(js_name = identifierHint)]
    pub fn identifier_hint(&self, text: &str) -> String {
        self.messages.identifier_hint(text)
    }

    #[wasm_bindgen(js_name = parsePersonCode)]
    pub fn js_parse_person_code(&self, raw: &str) -> Result<JsValue, JsValue> {
        to_js(&self.parse_person_code(raw))
    }

    #[wasm_bindgen(js_name = parseLocationCode)]
    pub fn js_parse_location_code(&self, raw: &str) -> Result<JsValue, JsValue> {
        to_js(&self.parse_location_code(raw))
    }

    /// Exact id lookup; `undefined` when absent
    #[wasm_bindgen(js_name = findById)]
    pub fn js_find_by_id(&self, id: &str) -> Result<JsValue, JsValue> {
        to_js(&find_by_id(&self.directory, id))
    }

    #[wasm_bindgen(js_name = searchByName)]
    pub fn js_search_by_name(&self, query: &str) -> Result<JsValue, JsValue> {
        to_js(&self.search_by_name(query))
    }

    /// Extract a notice and match it. A non-empty `manual_id` overrides the hint.
    #[wasm_bindgen(js_name = startFromMessage)]
    pub fn js_start_from_message(
        &mut self,
        text: &str,
        manual_id: Option<String>,
    ) -> Result<JsValue, JsValue> {
        to_js(&self.start_from_message(text, manual_id.as_deref()))
    }

    #[wasm_bindgen(js_name = startFromReport)]
    pub fn js_start_from_report(&mut self, report: JsValue) -> Result<JsValue, JsValue> {
        let report: IncidentReport = from_js(report, "report")?;
        to_js(&MatchReport::from(
            self.session.start_from_extraction(report, &self.directory),
        ))
    }

    /// Attach a directory person by id
    #[wasm_bindgen(js_name = attachPerson)]
    pub fn js_attach_person(&mut self, id: &str) -> Result<(), JsValue> {
        self.attach_person_by_id(id).map_err(|e| JsValue::from_str(&e))
    }

    #[wasm_bindgen(js_name = editReport)]
    pub fn js_edit_report(&mut self, patch: JsValue) -> Result<(), JsValue> {
        let patch: ReportPatch = from_js(patch, "report patch")?;
        self.session.edit_report(&patch);
        Ok(())
    }

    #[wasm_bindgen(js_name = resolveHint)]
    pub fn js_resolve_hint(&mut self) -> Result<JsValue, JsValue> {
        to_js(&MatchReport::from(self.session.resolve_hint(&self.directory)))
    }

    #[wasm_bindgen(js_name = detachPerson)]
    pub fn detach_person(&mut self) {
        self.session.detach_person();
    }

    /// Clear report, person and map selection; closes any scan session
    #[wasm_bindgen(js_name = reset)]
    pub fn reset(&mut self) {
        self.session.reset();
        self.regions.clear();
        if let Some(ticket) = self.scans.active() {
            self.scans.close(ticket);
        }
    }

    #[wasm_bindgen(js_name = commit)]
    pub fn commit(&mut self) -> bool {
        self.session.commit()
    }

    #[wasm_bindgen(js_name = merged)]
    pub fn js_merged(&self) -> Result<JsValue, JsValue> {
        to_js(&self.merged())
    }

    #[wasm_bindgen(js_name = showcase)]
    pub fn js_showcase(&self) -> Result<JsValue, JsValue> {
        to_js(&self.showcase())
    }

    /// Select a zone or place; returns the resolved label
    #[wasm_bindgen(js_name = selectRegion)]
    pub fn js_select_region(&mut self, region_id: &str) -> Result<String, JsValue> {
        self.select_region(region_id)
            .map_err(|e| JsValue::from_str(&e))
    }

    #[wasm_bindgen(js_name = resolveLabel)]
    pub fn resolve_label(&self) -> String {
        self.regions.resolve_label()
    }

    /// Copy the resolved label into the report's location
    #[wasm_bindgen(js_name = applyRegion)]
    pub fn apply_region(&mut self) -> String {
        let label = self.regions.resolve_label();
        if !label.is_empty() {
            self.session.edit_report(&ReportPatch::location(label.clone()));
        }
        label
    }

    #[wasm_bindgen(js_name = clearRegion)]
    pub fn clear_region(&mut self) {
        self.regions.clear();
    }

    #[wasm_bindgen(js_name = regions)]
    pub fn js_regions(&self) -> Result<JsValue, JsValue> {
        to_js(&self.region_summaries())
    }

    /// Open a scan session ("person" | "location"), cancelling any previous one
    #[wasm_bindgen(js_name = openScan)]
    pub fn js_open_scan(&mut self, kind: &str) -> Result<JsValue, JsValue> {
        let kind = match kind {
            "person" => PayloadKind::Person,
            "location" => PayloadKind::Location,
            other => return Err(JsValue::from_str(&format!("Unknown scan kind: {}", other))),
        };
        to_js(&self.open_scan(kind))
    }

    /// Feed one decoded string; `undefined` when the ticket is stale
    #[wasm_bindgen(js_name = feedScan)]
    pub fn js_feed_scan(&mut self, ticket: JsValue, raw: &str) -> Result<JsValue, JsValue> {
        let ticket: ScanTicket = from_js(ticket, "scan ticket")?;
        to_js(&self.feed_scan(ticket, raw))
    }

    #[wasm_bindgen(js_name = closeScan)]
    pub fn js_close_scan(&mut self, ticket: JsValue) -> Result<bool, JsValue> {
        let ticket: ScanTicket = from_js(ticket, "scan ticket")?;
        Ok(self.scans.close(ticket))
    }
}

impl ReconcileEngine {
    pub fn with_config(config: EngineConfig) -> Self {
        let regions = RegionResolver::from_config(&config);
        Self {
            config,
            directory: Vec::new(),
            messages: MessageCortex::new(),
            payloads: PayloadCortex::new(),
            session: ReconciliationSession::new(),
            regions,
            scans: ScanGate::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn session(&self) -> &ReconciliationSession {
        &self.session
    }

    pub fn directory(&self) -> &[PersonRecord] {
        &self.directory
    }

    /// Replace the directory copy. The current person stays attached.
    pub fn hydrate_directory(&mut self, records: Vec<PersonRecord>) -> usize {
        let dupes = duplicate_ids(&records);
        if !dupes.is_empty() {
            crate::console_warn!("[ReconcileEngine] duplicate staff ids: {}", dupes.join(", "));
        }
        self.directory = records;
        crate::console_log!("[ReconcileEngine] directory hydrated ({} records)", self.directory.len());
        self.directory.len()
    }

    pub fn extract_message(&self, text: &str) -> ExtractionResult {
        let start = instant::Instant::now();
        let report = self.messages.extract(text);
        let identifier_hint = if report.employee_id_hint.is_empty() {
            crate::extract::first_id_token(text).unwrap_or_default().to_string()
        } else {
            report.employee_id_hint.clone()
        };
        ExtractionResult {
            report,
            identifier_hint,
            elapsed_us: start.elapsed().as_micros() as u64,
        }
    }

    pub fn parse_person_code(&self, raw: &str) -> PersonCode {
        self.payloads.parse_person_code(raw)
    }

    pub fn parse_location_code(&self, raw: &str) -> LocationCode {
        self.payloads.parse_location_code(raw)
    }

    pub fn search_by_name(&self, query: &str) -> NameSearchReport {
        let search = search_by_name(&self.directory, query.trim());
        NameSearchReport {
            primary: search.primary.cloned(),
            match_count: search.match_count,
            notice: search.notice(),
        }
    }

    /// Extract, pick the hint (manual id > labeled id > first id token), match
    pub fn start_from_message(&mut self, text: &str, manual_id: Option<&str>) -> MatchReport {
        let ExtractionResult {
            mut report,
            identifier_hint,
            ..
        } = self.extract_message(text);

        report.employee_id_hint = match manual_id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => id.to_string(),
            None => identifier_hint,
        };

        self.session
            .start_from_extraction(report, &self.directory)
            .into()
    }

    pub fn attach_person_by_id(&mut self, id: &str) -> Result<(), String> {
        let person = find_by_id(&self.directory, id)
            .cloned()
            .ok_or_else(|| format!("No person with id: {}", id))?;
        self.session.attach_person(person);
        Ok(())
    }

    pub fn edit_report(&mut self, patch: &ReportPatch) {
        self.session.edit_report(patch);
    }

    pub fn merged(&self) -> MergedRecord {
        self.session.merged(&self.config)
    }

    pub fn showcase(&self) -> Vec<DisplayRow> {
        self.session.showcase_rows(&self.config)
    }

    pub fn select_region(&mut self, region_id: &str) -> Result<String, String> {
        self.regions.select(region_id)?;
        Ok(self.regions.resolve_label())
    }

    pub fn region_summaries(&self) -> Vec<RegionSummary> {
        self.regions.summaries()
    }

    pub fn open_scan(&mut self, kind: PayloadKind) -> ScanTicket {
        self.scans.open(kind)
    }

    /// Parse a decoded string and apply it to the session.
    ///
    /// Person codes set the hint and re-run matching; location codes with a
    /// non-empty name replace the report's location.
    pub fn feed_scan(&mut self, ticket: ScanTicket, raw: &str) -> Option<ScanFeedResult> {
        let payload = self.scans.feed(ticket, raw, &self.payloads)?;

        let outcome = match &payload {
            ScanPayload::Person(code) => {
                self.session.edit_report(&ReportPatch {
                    employee_id_hint: Some(code.id.clone()),
                    ..ReportPatch::default()
                });
                Some(MatchReport::from(self.session.resolve_hint(&self.directory)))
            }
            ScanPayload::Location(code) => {
                if !code.name.is_empty() {
                    self.session.edit_report(&ReportPatch::location(code.name.clone()));
                }
                None
            }
        };

        Some(ScanFeedResult { payload, outcome })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> ReconcileEngine {
        let mut engine = ReconcileEngine::default();
        engine.hydrate_directory(vec![
            PersonRecord::new("S001", "佐藤 一郎").with_phonetic("サトウ イチロウ"),
            PersonRecord::new("S002", "高橋 花子"),
            PersonRecord::new("S003", "佐藤 三郎"),
        ]);
        engine
    }

    #[test]
    fn test_extract_message_hint() {
        let engine = engine();
        let result = engine.extract_message("至急 S002\n場所: A棟");
        assert_eq!(result.report.location, "A棟");
        assert_eq!(result.report.employee_id_hint, "");
        assert_eq!(result.identifier_hint, "S002");
    }

    #[test]
    fn test_manual_id_overrides_notice() {
        let mut engine = engine();
        let report = engine.start_from_message("職員ID: S001", Some(" S002 "));
        assert_eq!(report.outcome, MatchOutcome::Matched { id: "S002".to_string() });
        assert_eq!(report.notice, None);
    }

    #[test]
    fn test_start_without_any_id() {
        let mut engine = engine();
        let report = engine.start_from_message("場所: 正門", None);
        assert_eq!(report.outcome, MatchOutcome::MissingHint);
        assert!(report.notice.is_some());
        assert_eq!(engine.session().report().unwrap().location, "正門");
    }

    #[test]
    fn test_search_trims_and_counts() {
        let engine = engine();
        let search = engine.search_by_name(" 佐藤 ");
        assert_eq!(search.match_count, 2);
        assert_eq!(search.primary.map(|p| p.id), Some("S001".to_string()));
    }

    #[test]
    fn test_attach_unknown_id() {
        let mut engine = engine();
        assert!(engine.attach_person_by_id("S404").is_err());
        assert!(engine.attach_person_by_id("S003").is_ok());
        assert_eq!(engine.session().report().unwrap().employee_id_hint, "S003");
    }

    #[test]
    fn test_region_flow() {
        let mut engine = engine();
        assert!(engine.select_region("nowhere").is_err());
        assert_eq!(engine.select_region("zone-6").unwrap(), "Zone 6");
        assert_eq!(engine.select_region("place-canteen").unwrap(), "食堂");
        assert_eq!(engine.apply_region(), "食堂");
        assert_eq!(engine.session().report().unwrap().location, "食堂");
    }

    #[test]
    fn test_scan_flow() {
        let mut engine = engine();
        let stale = engine.open_scan(PayloadKind::Person);
        let ticket = engine.open_scan(PayloadKind::Person);
        assert_eq!(engine.feed_scan(stale, "S001"), None);

        let fed = engine.feed_scan(ticket, "STAFF|S002|高橋 花子").unwrap();
        assert_eq!(
            fed.outcome.map(|o| o.outcome),
            Some(MatchOutcome::Matched { id: "S002".to_string() })
        );

        let loc = engine.open_scan(PayloadKind::Location);
        engine.feed_scan(loc, "PLACE:第2倉庫").unwrap();
        let report = engine.session().report().unwrap();
        assert_eq!(report.location, "第2倉庫");
        assert_eq!(report.employee_id_hint, "S002");
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut engine = engine();
        engine.start_from_message("職員ID: S001", None);
        engine.select_region("zone-1").unwrap();
        engine.open_scan(PayloadKind::Location);
        assert!(engine.commit());

        engine.reset();

        assert_eq!(engine.session(), &ReconciliationSession::default());
        assert_eq!(engine.resolve_label(), "");
        assert_eq!(engine.scans.active(), None);
        assert_eq!(engine.directory_size(), 3);
    }

    #[test]
    fn test_hydrate_loose_records() {
        let records: Vec<PersonRecord> = serde_json::from_str(
            r#"[
                {"id":"S001","name":"佐藤 一郎","history":"高血圧","meds":null,"doctor":null},
                {"id":"S002","name":"高橋 花子","allergies":["卵"]}
            ]"#,
        )
        .unwrap();

        let mut engine = ReconcileEngine::default();
        assert_eq!(engine.hydrate_directory(records), 2);
        engine.start_from_message("職員ID: S001", None);
        let rows = engine.showcase();
        let value = |label: &str| rows.iter().find(|r| r.label == label).map(|r| r.value.clone());
        assert_eq!(value("既往歴").as_deref(), Some("高血圧"));
        assert_eq!(value("薬剤情報").as_deref(), Some("unknown"));
        assert_eq!(value("かかりつけ医").as_deref(), Some("unknown"));
    }

    #[test]
    fn test_japanese_config() {
        let mut engine = ReconcileEngine::with_config(EngineConfig::japanese());
        assert_eq!(engine.select_region("zone-2").unwrap(), "エリア2");
        engine.apply_region();
        let merged = engine.merged();
        let loc = merged.incident.iter().find(|r| r.label == "場所").unwrap();
        assert_eq!(loc.value, "エリア2");
        let status = merged.incident.iter().find(|r| r.label == "状態1").unwrap();
        assert_eq!(status.value, "不明");
    }
}

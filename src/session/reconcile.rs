//! ReconciliationSession - current incident fields + matched person
//!
//! Holds at most one report and at most one person. While both are present the
//! report's `employee_id_hint` equals the person's id; any change that breaks
//! that equality detaches the person.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::directory::{find_by_id, PersonRecord};
use crate::types::{IncidentReport, ReportPatch};

use super::view::{incident_rows, person_rows, showcase_rows, DisplayRow};

/// Result of resolving the report's identifier hint
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum MatchOutcome {
    Matched { id: String },
    MissingHint,
    NoMatch { hint: String },
}

impl MatchOutcome {
    pub fn is_matched(&self) -> bool {
        matches!(self, MatchOutcome::Matched { .. })
    }

    /// Operator notice for unsuccessful outcomes
    pub fn notice(&self) -> Option<String> {
        match self {
            MatchOutcome::Matched { .. } => None,
            MatchOutcome::MissingHint => Some("enter a staff ID".to_string()),
            MatchOutcome::NoMatch { hint } => Some(format!("no matching person found for {}", hint)),
        }
    }
}

/// Merged record handed to the presentation layer
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MergedRecord {
    pub incident: Vec<DisplayRow>,
    pub person: Vec<DisplayRow>,
    pub matched: bool,
    pub committed: bool,
}

/// Mutable reconciliation state, driven from the UI thread only
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReconciliationSession {
    report: Option<IncidentReport>,
    person: Option<PersonRecord>,
    committed: bool,
}

impl ReconciliationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&self) -> Option<&IncidentReport> {
        self.report.as_ref()
    }

    pub fn person(&self) -> Option<&PersonRecord> {
        self.person.as_ref()
    }

    pub fn is_committed(&self) -> bool {
        self.committed
    }

    /// Install freshly extracted fields and try to resolve the person.
    ///
    /// The report is kept whatever the outcome, so an unmatched hint never
    /// discards the extracted fields.
    pub fn start_from_extraction(
        &mut self,
        report: IncidentReport,
        directory: &[PersonRecord],
    ) -> MatchOutcome {
        self.report = Some(report);
        self.person = None;
        self.committed = false;
        self.resolve_hint(directory)
    }

    /// Re-run id resolution for the current hint (e.g. after an edit)
    pub fn resolve_hint(&mut self, directory: &[PersonRecord]) -> MatchOutcome {
        let hint = self
            .report
            .as_ref()
            .map(|r| r.employee_id_hint.trim().to_string())
            .unwrap_or_default();

        if hint.is_empty() {
            return MatchOutcome::MissingHint;
        }

        match find_by_id(directory, &hint) {
            Some(person) => {
                let id = person.id.clone();
                self.attach_person(person.clone());
                MatchOutcome::Matched { id }
            }
            None => MatchOutcome::NoMatch { hint },
        }
    }

    /// Attach a person, overwriting any previous hint with the person's id
    pub fn attach_person(&mut self, record: PersonRecord) {
        let report = self.report.get_or_insert_with(IncidentReport::default);
        report.employee_id_hint = record.id.clone();
        self.person = Some(record);
        self.committed = false;
    }

    /// Drop the person and the hint that linked it
    pub fn detach_person(&mut self) {
        self.person = None;
        if let Some(report) = self.report.as_mut() {
            report.employee_id_hint.clear();
        }
        self.committed = false;
    }

    /// Shallow merge of operator edits; each provided field replaces the old value
    pub fn edit_report(&mut self, patch: &ReportPatch) {
        let report = self.report.get_or_insert_with(IncidentReport::default);
        patch.apply_to(report);

        let linked = match &self.person {
            Some(person) => person.id == report.employee_id_hint,
            None => true,
        };
        if !linked {
            self.person = None;
            self.committed = false;
        }
    }

    /// Mark the merged record as presented. Needs both report and person.
    pub fn commit(&mut self) -> bool {
        self.committed = self.report.is_some() && self.person.is_some();
        self.committed
    }

    /// Clear everything at once
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Merged record with placeholders applied
    pub fn merged(&self, config: &EngineConfig) -> MergedRecord {
        MergedRecord {
            incident: self
                .report
                .as_ref()
                .map(|r| incident_rows(r, config))
                .unwrap_or_default(),
            person: self
                .person
                .as_ref()
                .map(|p| person_rows(p, config))
                .unwrap_or_default(),
            matched: self.person.is_some(),
            committed: self.committed,
        }
    }

    /// Responder-facing rows; empty until both report and person are present
    pub fn showcase_rows(&self, config: &EngineConfig) -> Vec<DisplayRow> {
        match (&self.report, &self.person) {
            (Some(report), Some(person)) => showcase_rows(report, person, config),
            _ => Vec::new(),
        }
    }
}

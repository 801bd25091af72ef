//! Display rows for the merged record
//!
//! Empty values become the configured placeholder here, never earlier.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::directory::PersonRecord;
use crate::types::{IncidentField, IncidentReport};

/// One caption / value pair
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DisplayRow {
    pub label: String,
    pub value: String,
}

impl DisplayRow {
    fn new(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
        }
    }
}

pub fn incident_rows(report: &IncidentReport, config: &EngineConfig) -> Vec<DisplayRow> {
    IncidentField::ALL
        .iter()
        .map(|field| DisplayRow::new(field.caption(), config.display(report.get(*field))))
        .collect()
}

pub fn person_rows(person: &PersonRecord, config: &EngineConfig) -> Vec<DisplayRow> {
    let mut rows = vec![
        DisplayRow::new("職員ID", config.display(&person.id)),
        DisplayRow::new("氏名", config.display(&person.name)),
        DisplayRow::new("所属", config.display(&person.affiliation)),
        DisplayRow::new("生年月日", config.display(&person.birthday)),
    ];
    rows.extend(medical_rows(person, config));
    rows
}

/// Rows safe to show to responders: no staff id, no birthday
pub fn showcase_rows(
    report: &IncidentReport,
    person: &PersonRecord,
    config: &EngineConfig,
) -> Vec<DisplayRow> {
    let mut rows = vec![DisplayRow::new("氏名", config.display(&person.name))];
    rows.extend(medical_rows(person, config));
    rows.extend(
        incident_rows(report, config)
            .into_iter()
            .filter(|row| row.label != IncidentField::EmployeeIdHint.caption()),
    );
    rows
}

fn medical_rows(person: &PersonRecord, config: &EngineConfig) -> Vec<DisplayRow> {
    vec![
        DisplayRow::new("血液型", config.display(&person.blood_type)),
        DisplayRow::new("既往歴", config.display_list(&person.history)),
        DisplayRow::new("薬剤情報", config.display_list(&person.medications)),
        DisplayRow::new("アレルギー", config.display_list(&person.allergies)),
        DisplayRow::new("かかりつけ医", config.display(&person.physician)),
        DisplayRow::new("緊急連絡先（続柄）", config.display(&person.emergency_contact_relation)),
        DisplayRow::new("緊急連絡先（電話番号）", config.display(&person.emergency_contact_phone)),
    ]
}

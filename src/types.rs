//! Core incident data structures shared by the extractors and the session

use serde::{Deserialize, Serialize};

/// The six labeled incident fields carried by a notice
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum IncidentField {
    ContactTime,
    EmployeeIdHint,
    Location,
    Status1,
    Status2,
    AccidentType,
}

impl IncidentField {
    pub const ALL: [IncidentField; 6] = [
        IncidentField::ContactTime,
        IncidentField::EmployeeIdHint,
        IncidentField::Location,
        IncidentField::Status1,
        IncidentField::Status2,
        IncidentField::AccidentType,
    ];

    /// Display caption used in the merged record
    pub fn caption(&self) -> &'static str {
        match self {
            IncidentField::ContactTime => "連絡時間",
            IncidentField::EmployeeIdHint => "職員ID",
            IncidentField::Location => "場所",
            IncidentField::Status1 => "状態1",
            IncidentField::Status2 => "状態2",
            IncidentField::AccidentType => "事故種別",
        }
    }
}

/// Structured incident fields.
///
/// Empty string means "absent"; the placeholder is applied at display time.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct IncidentReport {
    pub contact_time: String,
    pub employee_id_hint: String,
    pub location: String,
    pub status1: String,
    pub status2: String,
    pub accident_type: String,
}

impl IncidentReport {
    pub fn get(&self, field: IncidentField) -> &str {
        match field {
            IncidentField::ContactTime => &self.contact_time,
            IncidentField::EmployeeIdHint => &self.employee_id_hint,
            IncidentField::Location => &self.location,
            IncidentField::Status1 => &self.status1,
            IncidentField::Status2 => &self.status2,
            IncidentField::AccidentType => &self.accident_type,
        }
    }

    pub fn set(&mut self, field: IncidentField, value: String) {
        let slot = match field {
            IncidentField::ContactTime => &mut self.contact_time,
            IncidentField::EmployeeIdHint => &mut self.employee_id_hint,
            IncidentField::Location => &mut self.location,
            IncidentField::Status1 => &mut self.status1,
            IncidentField::Status2 => &mut self.status2,
            IncidentField::AccidentType => &mut self.accident_type,
        };
        *slot = value;
    }

    /// True when no field carries a value
    pub fn is_blank(&self) -> bool {
        IncidentField::ALL.iter().all(|f| self.get(*f).trim().is_empty())
    }
}

/// Partial report used by operator edits. `None` leaves a field untouched.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportPatch {
    pub contact_time: Option<String>,
    pub employee_id_hint: Option<String>,
    pub location: Option<String>,
    pub status1: Option<String>,
    pub status2: Option<String>,
    pub accident_type: Option<String>,
}

impl ReportPatch {
    /// Patch that only sets the location (region selection, location scan)
    pub fn location(value: impl Into<String>) -> Self {
        Self {
            location: Some(value.into()),
            ..Self::default()
        }
    }

    /// Provided fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (IncidentField, &String)> + '_ {
        let slots = [
            &self.contact_time,
            &self.employee_id_hint,
            &self.location,
            &self.status1,
            &self.status2,
            &self.accident_type,
        ];
        IncidentField::ALL
            .into_iter()
            .zip(slots)
            .filter_map(|(field, value)| value.as_ref().map(|v| (field, v)))
    }

    /// Apply onto a report; every provided field fully replaces the old value
    pub fn apply_to(&self, report: &mut IncidentReport) {
        for (field, value) in self.fields() {
            report.set(field, value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_serializes_camel_case() {
        let report = IncidentReport {
            contact_time: "12:00".to_string(),
            employee_id_hint: "S001".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["contactTime"], "12:00");
        assert_eq!(json["employeeIdHint"], "S001");
        assert_eq!(json["accidentType"], "");
    }

    #[test]
    fn test_patch_replaces_only_provided_fields() {
        let mut report = IncidentReport {
            location: "A棟".to_string(),
            status1: "意識なし".to_string(),
            ..Default::default()
        };
        let patch: ReportPatch = serde_json::from_str(r#"{"status1":"意識あり","status2":""}"#).unwrap();
        patch.apply_to(&mut report);

        assert_eq!(report.location, "A棟");
        assert_eq!(report.status1, "意識あり");
        assert_eq!(report.status2, "");
        assert_eq!(patch.fields().count(), 2);
    }

    #[test]
    fn test_blank_report() {
        assert!(IncidentReport::default().is_blank());
        let mut report = IncidentReport::default();
        report.set(IncidentField::AccidentType, "挟まれ".to_string());
        assert!(!report.is_blank());
        assert_eq!(report.get(IncidentField::AccidentType), "挟まれ");
    }
}

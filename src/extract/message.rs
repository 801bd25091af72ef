//! MessageCortex - Labeled incident field extraction from free-text notices
//!
//! A notice looks like:
//!
//! ```text
//! 連絡時間: 2025-01-01 12:00
//! 職員ID: S001
//! 場所: A棟
//! 状態1: 意識なし
//! 状態2: 呼吸なし
//! 事故種別: 挟まれ
//! ```
//!
//! All field labels (Japanese and English spellings) go into one Aho-Corasick
//! automaton, so a message is scanned once regardless of field order. A label
//! only counts when a colon (`:` or `：`) follows it; the value is the rest of
//! that line, trimmed. English labels must start a word, so `Relocation:` is
//! not a `Location:` label.

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use regex::Regex;

use crate::types::{IncidentField, IncidentReport};

// ==================== LABELS ====================

/// Fixed label spellings per field
fn field_labels(field: IncidentField) -> &'static [&'static str] {
    match field {
        IncidentField::ContactTime => &["連絡時間", "Contact Time"],
        IncidentField::EmployeeIdHint => &["職員ID", "職員番号", "Employee ID", "Staff ID"],
        IncidentField::Location => &["場所", "Location"],
        IncidentField::Status1 => &["状態1", "Status 1", "Status1"],
        IncidentField::Status2 => &["状態2", "Status 2", "Status2"],
        IncidentField::AccidentType => &["事故種別", "Accident Type"],
    }
}

/// Minimum length of a fallback identifier token
const MIN_ID_TOKEN_LEN: usize = 2;

// ==================== MAIN IMPLEMENTATION ====================

/// Free-text incident field extractor
pub struct MessageCortex {
    automaton: AhoCorasick,
    /// Field owning each automaton pattern (indexed by pattern id)
    pattern_fields: Vec<IncidentField>,
    /// Separator + rest-of-line, anchored at the end of a label match
    value_re: Regex,
}

impl Default for MessageCortex {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageCortex {
    pub fn new() -> Self {
        let mut patterns = Vec::new();
        let mut pattern_fields = Vec::new();
        for field in IncidentField::ALL {
            for label in field_labels(field) {
                patterns.push(*label);
                pattern_fields.push(field);
            }
        }

        let automaton = AhoCorasickBuilder::new()
            .match_kind(MatchKind::LeftmostLongest)
            .ascii_case_insensitive(true)
            .build(&patterns)
            .unwrap();

        // Horizontal whitespace only: a label on its own line captures nothing
        let value_re = Regex::new(r"^[ \t\x{3000}]*[:：]+[ \t\x{3000}]*([^\r\n]*)").unwrap();

        Self {
            automaton,
            pattern_fields,
            value_re,
        }
    }

    /// Extract the six labeled fields. Missing labels leave fields empty.
    pub fn extract(&self, message: &str) -> IncidentReport {
        let mut report = IncidentReport::default();
        let mut found = [false; IncidentField::ALL.len()];

        for m in self.automaton.find_iter(message) {
            let field = self.pattern_fields[m.pattern().as_usize()];
            let slot = field as usize;
            if found[slot] || starts_inside_word(message, m.start()) {
                continue;
            }

            let Some(cap) = self.value_re.captures(&message[m.end()..]) else {
                continue;
            };
            let value = cap.get(1).map(|v| v.as_str().trim()).unwrap_or_default();
            if value.is_empty() {
                continue;
            }

            report.set(field, value.to_string());
            found[slot] = true;
            if found.iter().all(|f| *f) {
                break;
            }
        }

        report
    }

    /// Best-effort identifier for the notice.
    ///
    /// The labeled employee id wins; otherwise the first token of two or more
    /// `[A-Za-z0-9_-]` characters, splitting on whitespace, line breaks and
    /// full/half-width commas.
    pub fn identifier_hint(&self, message: &str) -> String {
        let labeled = self.extract(message).employee_id_hint;
        if !labeled.is_empty() {
            return labeled;
        }
        first_id_token(message).unwrap_or_default().to_string()
    }
}

/// ASCII label glued to a preceding ASCII letter or digit
fn starts_inside_word(text: &str, start: usize) -> bool {
    let label_is_ascii = text[start..].starts_with(|c: char| c.is_ascii_alphabetic());
    label_is_ascii
        && text[..start]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_alphanumeric())
}

/// First token that looks like an identifier
pub fn first_id_token(text: &str) -> Option<&str> {
    text.split(|c: char| c.is_whitespace() || matches!(c, ',' | '、' | '，'))
        .filter(|token| !token.is_empty())
        .find(|token| {
            token.chars().count() >= MIN_ID_TOKEN_LEN
                && token
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        })
}

// ==================== TESTS ====================

//! PayloadCortex - Decoding of scanned-code payload strings
//!
//! Two payload classes come off the helmet / site codes:
//! - person codes (`{"staffId":"S001"}`, `STAFF|S002|高橋 花子`, `S003 山田 太郎`, ...)
//! - location codes (`{"place":"A棟"}`, `場所: 資材置場`, `SITE|LOC-B棟`, ...)
//!
//! Each class is decoded by an ordered list of strategies. A strategy only
//! fills what is still missing, so the first strategy that produces a field
//! owns it. Nothing here fails: malformed JSON just means "not a structured
//! payload" and decoding falls through to the next strategy.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ==================== TYPE DEFINITIONS ====================

/// Decoded person code
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PersonCode {
    pub id: String,
    pub name: String,
    /// True when no identifier was recognised and `id` is the raw text
    pub literal_fallback: bool,
}

/// Decoded location code
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LocationCode {
    pub name: String,
}

/// Person-code strategies, in evaluation order
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PersonStrategy {
    Structured,
    BareId,
    LabeledId,
    Segments,
    LabeledName,
    Remainder,
}

impl PersonStrategy {
    pub const ORDER: [PersonStrategy; 6] = [
        PersonStrategy::Structured,
        PersonStrategy::BareId,
        PersonStrategy::LabeledId,
        PersonStrategy::Segments,
        PersonStrategy::LabeledName,
        PersonStrategy::Remainder,
    ];
}

/// Location-code strategies, in evaluation order
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocationStrategy {
    Structured,
    Labeled,
    Segments,
    SingleLine,
}

impl LocationStrategy {
    pub const ORDER: [LocationStrategy; 4] = [
        LocationStrategy::Structured,
        LocationStrategy::Labeled,
        LocationStrategy::Segments,
        LocationStrategy::SingleLine,
    ];
}

/// Partial person fields accumulated across strategies
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PersonCandidate {
    pub id: Option<String>,
    pub name: Option<String>,
}

impl PersonCandidate {
    fn is_complete(&self) -> bool {
        self.id.is_some() && self.name.is_some()
    }

    /// Take fields from `other` only where still missing
    fn fill_from(&mut self, other: PersonCandidate) {
        if self.id.is_none() {
            self.id = other.id;
        }
        if self.name.is_none() {
            self.name = other.name;
        }
    }
}

const PERSON_ID_KEYS: &[&str] = &[
    "id", "staffId", "staff_id", "employeeId", "employee_id", "empId", "emp_id", "職員ID",
];
const PERSON_NAME_KEYS: &[&str] = &["name", "staffName", "fullName", "氏名", "名前"];
const LOCATION_KEYS: &[&str] = &["location", "place", "loc", "name", "場所"];

// ==================== MAIN IMPLEMENTATION ====================

/// Scanned-code payload decoder
pub struct PayloadCortex {
    /// One letter + 3..=6 digits, ASCII-delimited
    bare_id_re: Regex,
    /// Whole-segment form of `bare_id_re`
    segment_id_re: Regex,
    labeled_id_re: Regex,
    labeled_name_re: Regex,
    labeled_location_re: Regex,
    location_prefix_re: Regex,
}

impl Default for PayloadCortex {
    fn default() -> Self {
        Self::new()
    }
}

impl PayloadCortex {
    pub fn new() -> Self {
        // Explicit ASCII boundaries: `\b` is Unicode-aware and would reject "S001佐藤"
        let bare_id_re =
            Regex::new(r"(?:^|[^A-Za-z0-9_])([A-Za-z][0-9]{3,6})(?:[^A-Za-z0-9_]|$)").unwrap();
        let segment_id_re = Regex::new(r"^[A-Za-z][0-9]{3,6}$").unwrap();

        // 職員ID: S001 / staff id = S001 / employee_id：S001 / ID: S001
        let labeled_id_re = Regex::new(
            r"(?i)(?:職員ID|職員番号|社員ID|社員番号|staff[\s_-]*id|employee[\s_-]*id|emp[\s_-]*id|\bid)\s*[:：=]\s*([A-Za-z0-9_-]+)",
        )
        .unwrap();

        // 氏名: 佐藤 一郎 (stops at a pipe or line break)
        let labeled_name_re =
            Regex::new(r"(?i)(?:氏名|名前|\bname)\s*[:：=]\s*([^\n|｜]+)").unwrap();

        // `location` must precede `loc` so the longer label is consumed
        let labeled_location_re = Regex::new(
            r"(?i)(?:設置場所|場所|地点|\blocation|\bplace|\bloc)\s*[:：=]\s*([^\n]+)",
        )
        .unwrap();

        let location_prefix_re = Regex::new(r"(?i)^(?:location|place|loc)[\s:：_\-]+").unwrap();

        Self {
            bare_id_re,
            segment_id_re,
            labeled_id_re,
            labeled_name_re,
            labeled_location_re,
            location_prefix_re,
        }
    }

    // ---------- person codes ----------

    /// Decode a person code into `{id, name}`.
    ///
    /// With no recognisable identifier, the whole normalized text becomes the
    /// id (`literal_fallback = true`) and the name is empty.
    pub fn parse_person_code(&self, raw: &str) -> PersonCode {
        let text = preprocess(raw);
        let mut found = PersonCandidate::default();

        for strategy in PersonStrategy::ORDER {
            if found.is_complete() {
                break;
            }
            let candidate = self.run_person_strategy(strategy, &text, &found);
            found.fill_from(candidate);
        }

        match found.id {
            Some(id) => PersonCode {
                id,
                name: found.name.unwrap_or_default(),
                literal_fallback: false,
            },
            None => PersonCode {
                id: text,
                name: String::new(),
                literal_fallback: true,
            },
        }
    }

    /// Run a single person strategy against preprocessed text
    pub fn run_person_strategy(
        &self,
        strategy: PersonStrategy,
        text: &str,
        found: &PersonCandidate,
    ) -> PersonCandidate {
        match strategy {
            PersonStrategy::Structured => structured_person(text),
            PersonStrategy::BareId => PersonCandidate {
                id: self.bare_id(text),
                name: None,
            },
            PersonStrategy::LabeledId => PersonCandidate {
                id: capture_trimmed(&self.labeled_id_re, text),
                name: None,
            },
            PersonStrategy::Segments => self.person_segments(text),
            PersonStrategy::LabeledName => PersonCandidate {
                id: None,
                name: capture_trimmed(&self.labeled_name_re, text),
            },
            PersonStrategy::Remainder => PersonCandidate {
                id: None,
                name: found.id.as_deref().and_then(|id| name_after_id(text, id)),
            },
        }
    }

    fn bare_id(&self, text: &str) -> Option<String> {
        self.bare_id_re
            .captures(text)
            .and_then(|cap| cap.get(1))
            .map(|m| m.as_str().to_ascii_uppercase())
    }

    /// `STAFF | S001 | 佐藤 一郎`
    fn person_segments(&self, text: &str) -> PersonCandidate {
        let segments = split_segments(text);
        if segments.len() < 2 {
            return PersonCandidate::default();
        }

        let id_index = segments
            .iter()
            .position(|seg| self.segment_id_re.is_match(seg));

        match id_index {
            Some(idx) => PersonCandidate {
                id: Some(segments[idx].to_ascii_uppercase()),
                name: non_empty(&segments[idx + 1..].join(" ")),
            },
            None if segments.len() >= 3 => PersonCandidate {
                id: None,
                name: segments.last().and_then(|s| non_empty(s)),
            },
            None => PersonCandidate::default(),
        }
    }

    // ---------- location codes ----------

    /// Decode a location code. The name may be empty.
    pub fn parse_location_code(&self, raw: &str) -> LocationCode {
        let text = preprocess(raw);

        let name = LocationStrategy::ORDER
            .iter()
            .find_map(|strategy| self.run_location_strategy(*strategy, &text))
            .map(|name| self.strip_location_prefix(&name))
            .unwrap_or_default();

        LocationCode { name }
    }

    /// Run a single location strategy against preprocessed text
    pub fn run_location_strategy(&self, strategy: LocationStrategy, text: &str) -> Option<String> {
        match strategy {
            LocationStrategy::Structured => {
                structured_object(text).and_then(|map| first_key(&map, LOCATION_KEYS))
            }
            LocationStrategy::Labeled => capture_trimmed(&self.labeled_location_re, text),
            LocationStrategy::Segments => {
                let segments = split_segments(text);
                if segments.len() >= 2 {
                    segments.last().and_then(|s| non_empty(s))
                } else {
                    None
                }
            }
            LocationStrategy::SingleLine => {
                if text.contains('\n') {
                    None
                } else {
                    non_empty(text)
                }
            }
        }
    }

    /// Drop a literal `PLACE` / `LOCATION` / `LOC` prefix plus separator
    fn strip_location_prefix(&self, name: &str) -> String {
        self.location_prefix_re.replace(name, "").trim().to_string()
    }
}

// ==================== HELPERS ====================

/// Full-width space -> space, unify line breaks, trim
pub fn preprocess(raw: &str) -> String {
    raw.replace('\u{3000}', " ")
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .trim()
        .to_string()
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

fn capture_trimmed(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|cap| cap.get(1))
        .and_then(|m| non_empty(m.as_str()))
}

/// Parse `{...}` text as a JSON object; anything else is "not structured"
fn structured_object(text: &str) -> Option<Map<String, Value>> {
    if !(text.starts_with('{') && text.ends_with('}')) {
        return None;
    }
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// First accepted key holding a non-empty string or a number
fn first_key(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match map.get(*key)? {
        Value::String(s) => non_empty(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn structured_person(text: &str) -> PersonCandidate {
    match structured_object(text) {
        Some(map) => PersonCandidate {
            id: first_key(&map, PERSON_ID_KEYS),
            name: first_key(&map, PERSON_NAME_KEYS),
        },
        None => PersonCandidate::default(),
    }
}

/// Split on `|` / `｜`, trimming and dropping empty segments
fn split_segments(text: &str) -> Vec<&str> {
    text.split(['|', '｜'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// "S003 Alex Kim" -> "Alex Kim" once the id is known
fn name_after_id(text: &str, id: &str) -> Option<String> {
    let collapsed = text
        .split(|c: char| {
            c.is_whitespace() || matches!(c, '|' | '｜' | ',' | '、' | '，' | ';' | '；')
        })
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let head = collapsed.get(..id.len())?;
    if !head.eq_ignore_ascii_case(id) {
        return None;
    }
    collapsed[id.len()..].strip_prefix(' ').and_then(non_empty)
}

// ==================== TESTS ====================

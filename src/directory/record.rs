//! Person directory records
//!
//! Records are owned by the host (it loads, imports and persists the
//! directory); the engine only reads them. Deserialization accepts both the
//! current camelCase keys and the older directory-file keys
//! (`blood`, `meds`, `doctor`, `contactRel`, `contactTel`, `kana`).
//!
//! Imported directory files are loosely shaped: any field but `id` may be
//! `null`, and list fields may hold a single string instead of an array.

use serde::{Deserialize, Deserializer, Serialize};

/// One known person
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, alias = "kana", deserialize_with = "null_as_empty")]
    pub phonetic_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub affiliation: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub birthday: String,
    #[serde(default, alias = "blood", deserialize_with = "null_as_empty")]
    pub blood_type: String,
    #[serde(default, deserialize_with = "string_or_list")]
    pub history: Vec<String>,
    #[serde(default, alias = "meds", deserialize_with = "string_or_list")]
    pub medications: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub allergies: Vec<String>,
    #[serde(default, alias = "doctor", deserialize_with = "null_as_empty")]
    pub physician: String,
    #[serde(default, alias = "contactRel", deserialize_with = "null_as_empty")]
    pub emergency_contact_relation: String,
    #[serde(default, alias = "contactTel", deserialize_with = "null_as_empty")]
    pub emergency_contact_phone: String,
}

impl PersonRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_phonetic(mut self, phonetic: impl Into<String>) -> Self {
        self.phonetic_name = phonetic.into();
        self
    }
}

/// `null` reads as an empty string
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<Option<String>>),
}

/// A list field given as an array, a single string or `null`
fn string_or_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let values = match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(value)) => vec![value],
        Some(OneOrMany::Many(values)) => values.into_iter().flatten().collect(),
    };
    Ok(values
        .into_iter()
        .filter(|v| !v.trim().is_empty())
        .collect())
}

/// Ids that occur more than once, in first-seen order
pub fn duplicate_ids(directory: &[PersonRecord]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut dupes = Vec::new();
    for record in directory {
        if !seen.insert(record.id.as_str()) && !dupes.contains(&record.id) {
            dupes.push(record.id.clone());
        }
    }
    dupes
}

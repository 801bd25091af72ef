//! Directory lookups: exact id and fuzzy name / phonetic search
//!
//! Directories hold tens of records, so both lookups are linear scans in
//! insertion order. Name search is substring based: the raw query against
//! `name`, and the script-normalized query against the normalized
//! `phonetic_name`.

use serde::Serialize;

use super::record::PersonRecord;
use crate::extract::normalize::normalize;

/// Outcome of a name search
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NameSearch<'a> {
    /// First candidate in directory order
    pub primary: Option<&'a PersonRecord>,
    /// Total number of candidates; > 1 means the operator should disambiguate
    pub match_count: usize,
}

impl NameSearch<'_> {
    pub fn is_ambiguous(&self) -> bool {
        self.match_count > 1
    }

    /// Operator-facing notice for this outcome
    pub fn notice(&self) -> String {
        match self.primary {
            None => "no matching person found".to_string(),
            Some(p) if self.match_count == 1 => format!("{} (ID: {}) selected", p.name, p.id),
            Some(p) => format!(
                "{} (ID: {}) selected, {} other candidate(s)",
                p.name,
                p.id,
                self.match_count - 1
            ),
        }
    }
}

/// Exact, case-sensitive id lookup
pub fn find_by_id<'a>(directory: &'a [PersonRecord], id: &str) -> Option<&'a PersonRecord> {
    directory.iter().find(|p| p.id == id)
}

/// Does a record match an already-normalized query?
fn matches_name(record: &PersonRecord, raw_query: &str, normalized_query: &str) -> bool {
    record.name.contains(raw_query) || normalize(&record.phonetic_name).contains(normalized_query)
}

/// All candidates for a query, in directory order.
///
/// The query is trimmed; an empty or whitespace-only query matches everyone.
pub fn name_candidates<'a>(directory: &'a [PersonRecord], query: &str) -> Vec<&'a PersonRecord> {
    let query = query.trim();
    if query.is_empty() {
        return directory.iter().collect();
    }
    let normalized_query = normalize(query);
    directory
        .iter()
        .filter(|p| matches_name(p, query, &normalized_query))
        .collect()
}

/// Substring search over name and normalized phonetic name
pub fn search_by_name<'a>(directory: &'a [PersonRecord], query: &str) -> NameSearch<'a> {
    let candidates = name_candidates(directory, query);
    NameSearch {
        primary: candidates.first().copied(),
        match_count: candidates.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> Vec<PersonRecord> {
        vec![
            PersonRecord::new("S001", "佐藤 一郎").with_phonetic("サトウ イチロウ"),
            PersonRecord::new("S002", "高橋 花子").with_phonetic("たかはし はなこ"),
            PersonRecord::new("S003", "山田 太郎").with_phonetic("ヤマダ タロウ"),
            PersonRecord::new("S004", "伊藤 次郎"),
            PersonRecord::new("S005", "佐藤 三郎").with_phonetic("サトウ サブロウ"),
        ]
    }

    #[test]
    fn test_find_by_id_every_record() {
        let dir = directory();
        for person in &dir {
            assert_eq!(find_by_id(&dir, &person.id), Some(person));
        }
    }

    #[test]
    fn test_find_by_id_is_case_sensitive() {
        let dir = directory();
        assert_eq!(find_by_id(&dir, "s001"), None);
        assert_eq!(find_by_id(&dir, "S999"), None);
    }

    #[test]
    fn test_empty_query_matches_everyone() {
        let dir = directory();
        let result = search_by_name(&dir, "");
        assert_eq!(result.match_count, dir.len());
        assert_eq!(result.primary.map(|p| p.id.as_str()), Some("S001"));
    }

    #[test]
    fn test_whitespace_query_counts_as_empty() {
        let dir = directory();
        assert_eq!(name_candidates(&dir, " \u{3000} ").len(), dir.len());

        let result = search_by_name(&dir, "  高橋 ");
        assert_eq!(result.match_count, 1);
        assert_eq!(result.primary.map(|p| p.id.as_str()), Some("S002"));
    }

    #[test]
    fn test_name_substring() {
        let dir = directory();
        let result = search_by_name(&dir, "高橋");
        assert_eq!(result.match_count, 1);
        assert_eq!(result.primary.map(|p| p.id.as_str()), Some("S002"));
    }

    #[test]
    fn test_phonetic_script_insensitive() {
        let dir = directory();
        // Hiragana query against katakana phonetic name
        let result = search_by_name(&dir, "やまだ");
        assert_eq!(result.primary.map(|p| p.id.as_str()), Some("S003"));

        // Katakana query against hiragana phonetic name, whitespace ignored
        let result = search_by_name(&dir, "タカハシ ハナ");
        assert_eq!(result.primary.map(|p| p.id.as_str()), Some("S002"));
    }

    #[test]
    fn test_multiple_matches_keep_insertion_order() {
        let dir = directory();
        let result = search_by_name(&dir, "佐藤");
        assert_eq!(result.match_count, 2);
        assert!(result.is_ambiguous());
        assert_eq!(result.primary.map(|p| p.id.as_str()), Some("S001"));
        assert!(result.notice().contains("1 other candidate"));
    }

    #[test]
    fn test_no_match() {
        let dir = directory();
        let result = search_by_name(&dir, "田中");
        assert_eq!(result.primary, None);
        assert_eq!(result.match_count, 0);
        assert_eq!(result.notice(), "no matching person found");
    }
}

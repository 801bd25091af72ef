//! Script folding for search comparisons
//!
//! Katakana in U+30A1..=U+30F6 is folded onto hiragana (U+3041..=U+3096) by a
//! fixed code-point offset so "ヤマダ" and "やまだ" compare equal. Whitespace
//! (ASCII and U+3000) is removed. Everything else passes through unchanged.

/// First katakana code point that has a hiragana counterpart (ァ)
const KATAKANA_START: u32 = 0x30A1;
/// Last katakana code point that has a hiragana counterpart (ヶ)
const KATAKANA_END: u32 = 0x30F6;
/// Distance from a katakana code point to its hiragana counterpart
const KANA_OFFSET: u32 = 0x60;

/// Fold a single character; identity outside the katakana range
#[inline]
pub fn fold_char(c: char) -> char {
    let cp = c as u32;
    if (KATAKANA_START..=KATAKANA_END).contains(&cp) {
        char::from_u32(cp - KANA_OFFSET).unwrap_or(c)
    } else {
        c
    }
}

/// Normalize a string for script-insensitive comparison.
///
/// Idempotent: folded output never contains katakana from the folded range
/// and never contains whitespace.
pub fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .map(fold_char)
        .collect::<String>()
        .trim()
        .to_string()
}

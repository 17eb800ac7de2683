use std::ops::Range;

use regex::Regex;

use crate::model::item::{Checklist, ChecklistItem};

/// A search hit in the item text
#[derive(Debug, Clone)]
pub struct SearchHit<'a> {
    /// Index into the full list
    pub index: usize,
    pub item: &'a ChecklistItem,
    /// Byte ranges of each match in `item.text`
    pub spans: Vec<Range<usize>>,
}

/// Compile a case-insensitive pattern. Invalid regex syntax falls back to a
/// literal match, so `ck search "a+("` still works.
pub fn compile_pattern(pattern: &str) -> Option<Regex> {
    Regex::new(&format!("(?i){}", pattern))
        .or_else(|_| Regex::new(&format!("(?i){}", regex::escape(pattern))))
        .ok()
}

/// Collect all non-overlapping match byte-ranges for a regex in the given text.
pub fn find_matches(re: &Regex, text: &str) -> Vec<Range<usize>> {
    re.find_iter(text)
        .filter(|m| !m.is_empty())
        .map(|m| m.start()..m.end())
        .collect()
}

/// Search item text, returning hits in list order.
pub fn search<'a>(list: &'a Checklist, re: &Regex) -> Vec<SearchHit<'a>> {
    list.items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let spans = find_matches(re, &item.text);
            if spans.is_empty() {
                None
            } else {
                Some(SearchHit { index, item, spans })
            }
        })
        .collect()
}

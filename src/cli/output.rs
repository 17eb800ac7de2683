use serde::Serialize;

use crate::model::item::{Checklist, ChecklistItem, FilterMode, Progress};
use crate::ops::search::SearchHit;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ItemJson {
    /// 1-based position in the full list
    pub position: usize,
    pub id: String,
    pub text: String,
    pub checked: bool,
}

#[derive(Serialize)]
pub struct ListJson {
    pub name: String,
    pub filter: FilterMode,
    pub items: Vec<ItemJson>,
    pub progress: Progress,
}

#[derive(Serialize)]
pub struct SearchHitJson {
    #[serde(flatten)]
    pub item: ItemJson,
    /// Byte ranges of the matches in `text`
    pub matches: Vec<[usize; 2]>,
}

#[derive(Serialize)]
pub struct ConfigJson {
    pub key: String,
    pub value: String,
}

pub fn item_to_json(position: usize, item: &ChecklistItem) -> ItemJson {
    ItemJson {
        position: position + 1,
        id: item.id.to_string(),
        text: item.text.clone(),
        checked: item.checked,
    }
}

/// JSON for the items of `list` that pass `filter`, with full-list positions.
pub fn view_to_json(list: &Checklist, filter: FilterMode) -> Vec<ItemJson> {
    list.items
        .iter()
        .enumerate()
        .filter(|(_, item)| filter.matches(item))
        .map(|(i, item)| item_to_json(i, item))
        .collect()
}

pub fn hit_to_json(hit: &SearchHit) -> SearchHitJson {
    SearchHitJson {
        item: item_to_json(hit.index, hit.item),
        matches: hit.spans.iter().map(|r| [r.start, r.end]).collect(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// `[x]  3. Buy milk  (01924c7a)`; position is 0-based
pub fn format_item_line(position: usize, item: &ChecklistItem, full_id: bool) -> String {
    let id = if full_id {
        item.id.as_str()
    } else {
        item.id.short()
    };
    format!(
        "[{}] {:>2}. {}  ({})",
        item.checkbox_char(),
        position + 1,
        item.text,
        id
    )
}

/// Lines for the filtered view of `list`, numbered by full-list position
pub fn format_listing(list: &Checklist, filter: FilterMode, full_ids: bool) -> Vec<String> {
    list.items
        .iter()
        .enumerate()
        .filter(|(_, item)| filter.matches(item))
        .map(|(i, item)| format_item_line(i, item, full_ids))
        .collect()
}

/// `2/5 completed (40%)`
pub fn format_progress(progress: &Progress) -> String {
    format!(
        "{}/{} completed ({}%)",
        progress.completed, progress.total, progress.percent
    )
}

/// Text-mode progress bar: `[######----] 2/5 completed (40%)`
pub fn format_progress_bar(progress: &Progress, width: usize) -> String {
    let filled = (progress.percent as usize * width) / 100;
    format!(
        "[{}{}] {}",
        "#".repeat(filled),
        "-".repeat(width - filled),
        format_progress(progress)
    )
}

use crate::model::item::{Checklist, ChecklistItem, FilterMode, Progress};

/// Items visible under `filter`, in list order.
pub fn filtered_view(list: &Checklist, filter: FilterMode) -> Vec<&ChecklistItem> {
    list.items.iter().filter(|item| filter.matches(item)).collect()
}

/// Full-list indices of the items visible under `filter`.
pub fn view_indices(list: &Checklist, filter: FilterMode) -> Vec<usize> {
    list.items
        .iter()
        .enumerate()
        .filter(|(_, item)| filter.matches(item))
        .map(|(i, _)| i)
        .collect()
}

/// Number of items in each view: (all, active, completed)
pub fn view_counts(list: &Checklist) -> (usize, usize, usize) {
    let completed = list.items.iter().filter(|item| item.checked).count();
    (list.len(), list.len() - completed, completed)
}

/// Completion summary. `percent` is rounded half-up and is 0 for an empty list.
pub fn progress(list: &Checklist) -> Progress {
    let total = list.len();
    let completed = list.items.iter().filter(|item| item.checked).count();
    let percent = if total == 0 {
        0
    } else {
        ((200 * completed + total) / (2 * total)) as u8
    };
    Progress {
        completed,
        total,
        percent,
    }
}

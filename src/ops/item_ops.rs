use crate::model::item::{Checklist, ChecklistItem, FilterMode, ItemId};
use crate::ops::view::view_indices;
use crate::parse::{document, parse_lines};

/// Error type for item operations
#[derive(Debug, thiserror::Error)]
pub enum ItemError {
    #[error("item not found: {0}")]
    NotFound(String),
    #[error("item text cannot be empty")]
    EmptyText,
    #[error("position {index} is out of range (list has {len} items)")]
    OutOfRange { index: usize, len: usize },
}

// ---------------------------------------------------------------------------
// Adding
// ---------------------------------------------------------------------------

/// Append one unchecked item per non-empty line of `raw`.
/// Returns the ids of the new items, in order.
pub fn add_items(list: &mut Checklist, raw: &str) -> Vec<ItemId> {
    let mut ids = Vec::new();
    for line in parse_lines(raw) {
        let item = ChecklistItem::new(line);
        ids.push(item.id.clone());
        list.items.push(item);
    }
    ids
}

// ---------------------------------------------------------------------------
// Checked state
// ---------------------------------------------------------------------------

/// Flip `checked` on the matching item. Returns false if no item matched.
pub fn toggle(list: &mut Checklist, id: &ItemId) -> bool {
    match list.get_mut(id) {
        Some(item) => {
            item.checked = !item.checked;
            true
        }
        None => false,
    }
}

/// Set `checked` explicitly. Returns false if no item matched.
pub fn set_checked(list: &mut Checklist, id: &ItemId, checked: bool) -> bool {
    match list.get_mut(id) {
        Some(item) => {
            item.checked = checked;
            true
        }
        None => false,
    }
}

// ---------------------------------------------------------------------------
// Editing and removal
// ---------------------------------------------------------------------------

/// Replace an item's text. The new text is trimmed and must not be empty.
pub fn edit_text(list: &mut Checklist, id: &ItemId, new_text: &str) -> Result<(), ItemError> {
    let text = new_text.trim();
    if text.is_empty() {
        return Err(ItemError::EmptyText);
    }
    let item = list
        .get_mut(id)
        .ok_or_else(|| ItemError::NotFound(id.to_string()))?;
    item.text = text.to_string();
    Ok(())
}

/// Remove the matching item and return it. Absent ids are a no-op.
pub fn delete_item(list: &mut Checklist, id: &ItemId) -> Option<ChecklistItem> {
    let idx = list.position(id)?;
    Some(list.items.remove(idx))
}

/// Empty the list, returning everything that was removed.
pub fn clear_all(list: &mut Checklist) -> Vec<ChecklistItem> {
    std::mem::take(&mut list.items)
}

/// Replace the whole list. Returns the items that were replaced.
pub fn import_replace(list: &mut Checklist, incoming: Checklist) -> Vec<ChecklistItem> {
    std::mem::replace(&mut list.items, incoming.items)
}

/// Serialize the full list (ignoring any filter) as a versioned document.
pub fn export_serialize(list: &Checklist) -> Result<String, serde_json::Error> {
    document::encode(list)
}

// ---------------------------------------------------------------------------
// Reordering
// ---------------------------------------------------------------------------

/// Move the item at full-list index `from` to index `to`, shifting the rest.
pub fn reorder(list: &mut Checklist, from: usize, to: usize) -> Result<(), ItemError> {
    let len = list.len();
    for index in [from, to] {
        if index >= len {
            return Err(ItemError::OutOfRange { index, len });
        }
    }
    if from != to {
        let item = list.items.remove(from);
        list.items.insert(to, item);
    }
    Ok(())
}

/// Move an item using positions within a filtered view.
///
/// `from` and `to` index into the view for `filter`. They are translated to
/// full-list indices before splicing, so items hidden by the filter keep
/// their relative order. After the call the moved item sits at view
/// position `to`.
pub fn reorder_in_view(
    list: &mut Checklist,
    filter: FilterMode,
    from: usize,
    to: usize,
) -> Result<(), ItemError> {
    let view = view_indices(list, filter);
    let len = view.len();
    for index in [from, to] {
        if index >= len {
            return Err(ItemError::OutOfRange { index, len });
        }
    }
    if from == to {
        return Ok(());
    }

    let full_from = view[from];
    let item = list.items.remove(full_from);

    // View positions of the remaining items, after the removal
    let rest = view_indices(list, filter);
    let insert_at = if to < rest.len() {
        rest[to]
    } else {
        rest.last().map_or(full_from, |&last| last + 1)
    };
    list.items.insert(insert_at, item);
    Ok(())
}

/// Move an item one or more places up (negative) or down (positive) within
/// the view. Returns false if the item is not in the view or already at the
/// edge.
pub fn move_by(list: &mut Checklist, filter: FilterMode, id: &ItemId, delta: isize) -> bool {
    let view = view_indices(list, filter);
    let Some(from) = view.iter().position(|&i| &list.items[i].id == id) else {
        return false;
    };
    let target = from as isize + delta;
    if target < 0 || target as usize >= view.len() || delta == 0 {
        return false;
    }
    reorder_in_view(list, filter, from, target as usize).is_ok()
}

use crate::model::item::Checklist;

const UNDO_STACK_LIMIT: usize = 200;

/// Whole-list snapshots taken before each mutation made in the TUI.
#[derive(Debug, Default)]
pub struct UndoStack {
    undo: Vec<Checklist>,
    redo: Vec<Checklist>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the list as it was before a mutation. Clears the redo stack.
    pub fn push(&mut self, before: Checklist) {
        self.undo.push(before);
        if self.undo.len() > UNDO_STACK_LIMIT {
            self.undo.drain(..self.undo.len() - UNDO_STACK_LIMIT);
        }
        self.redo.clear();
    }

    /// Take the snapshot to go back to; `current` becomes redoable.
    pub fn undo(&mut self, current: &Checklist) -> Option<Checklist> {
        let previous = self.undo.pop()?;
        self.redo.push(current.clone());
        Some(previous)
    }

    /// Take the snapshot to go forward to; `current` becomes undoable.
    pub fn redo(&mut self, current: &Checklist) -> Option<Checklist> {
        let next = self.redo.pop()?;
        self.undo.push(current.clone());
        Some(next)
    }

    /// Forget everything (the list changed outside the TUI)
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.undo.is_empty()
    }
}

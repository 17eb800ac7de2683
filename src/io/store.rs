use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};
use crate::model::config::ChecklistConfig;
use crate::model::item::{Checklist, ChecklistItem, FilterMode, ItemId};
use crate::ops::item_ops::{self, ItemError};
use crate::parse::document;

/// Name of the directory holding a checklist
pub const DIR_NAME: &str = "checklist";
/// Config file inside [`DIR_NAME`]
pub const CONFIG_FILE: &str = "checklist.toml";

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("not a checklist: no checklist/ directory found (run `ck init`)")]
    NotFound,
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: io::Error,
    },
    #[error("could not parse checklist.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),
    #[error("could not encode checklist: {0}")]
    EncodeError(#[from] serde_json::Error),
    #[error(transparent)]
    Item(#[from] ItemError),
}

/// Find the checklist root by walking up from `start`, looking for a
/// `checklist/` directory with a config file.
pub fn discover_root(start: &Path) -> Result<PathBuf, StoreError> {
    let mut current = start.to_path_buf();
    loop {
        let dir = current.join(DIR_NAME);
        if dir.is_dir() && dir.join(CONFIG_FILE).exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(StoreError::NotFound);
        }
    }
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// The checklist in memory plus its mirror on disk.
///
/// Every mutation runs against a copy of the list. The copy is written to
/// disk first and only swapped in once the write succeeded, so memory and
/// disk never disagree after a failed save.
#[derive(Debug)]
pub struct ChecklistStore {
    pub root: PathBuf,
    /// The `checklist/` directory
    pub dir: PathBuf,
    pub config: ChecklistConfig,
    checklist: Checklist,
    /// Problems found while loading (document set aside, ids assigned)
    pub load_warnings: Vec<String>,
}

impl ChecklistStore {
    /// Load the checklist rooted at `root`.
    pub fn open(root: &Path) -> Result<Self, StoreError> {
        let dir = root.join(DIR_NAME);
        if !dir.is_dir() {
            return Err(StoreError::NotFound);
        }
        let config = read_config(&dir)?;
        let mut store = ChecklistStore {
            root: root.to_path_buf(),
            dir,
            config,
            checklist: Checklist::default(),
            load_warnings: Vec::new(),
        };
        store.checklist = store.load()?;
        Ok(store)
    }

    pub fn checklist(&self) -> &Checklist {
        &self.checklist
    }

    pub fn document_path(&self) -> PathBuf {
        self.dir.join(self.config.storage.file_name())
    }

    /// Read the stored document.
    ///
    /// A missing file is an empty list. A document that cannot be decoded is
    /// copied to `<file>.bak`, recorded in the recovery log, and replaced by
    /// an empty list. Legacy documents whose items lacked ids are rewritten
    /// right away so the assigned ids stay stable.
    fn load(&mut self) -> Result<Checklist, StoreError> {
        self.load_warnings.clear();
        let path = self.document_path();
        if !path.exists() {
            return Ok(Checklist::default());
        }
        let text = fs::read_to_string(&path).map_err(|e| StoreError::ReadError {
            path: path.clone(),
            source: e,
        })?;

        match document::decode(&text) {
            Ok(decoded) => {
                if decoded.assigned_ids > 0 {
                    self.write(&decoded.checklist)?;
                    self.load_warnings.push(format!(
                        "assigned ids to {} items in {}",
                        decoded.assigned_ids,
                        path.display()
                    ));
                }
                Ok(decoded.checklist)
            }
            Err(e) => {
                let backup = path.with_extension("json.bak");
                // Already set aside by an earlier load
                let seen = fs::read_to_string(&backup).is_ok_and(|old| old == text);
                let backed_up = seen || fs::copy(&path, &backup).is_ok();
                if !seen {
                    recovery::log_recovery(
                        &self.dir,
                        RecoveryEntry::new(RecoveryCategory::Load, "unreadable document set aside")
                            .field("Source", path.display().to_string())
                            .field("Error", e.to_string())
                            .body(text),
                    );
                }
                self.load_warnings.push(if backed_up {
                    format!(
                        "could not read {} (backed up as {}): {}",
                        path.display(),
                        backup.display(),
                        e
                    )
                } else {
                    format!("could not read {}: {}", path.display(), e)
                });
                Ok(Checklist::default())
            }
        }
    }

    /// Re-read the document from disk. Returns true if the list changed.
    pub fn reload(&mut self) -> Result<bool, StoreError> {
        let fresh = self.load()?;
        if fresh == self.checklist {
            return Ok(false);
        }
        self.checklist = fresh;
        Ok(true)
    }

    fn write(&self, list: &Checklist) -> Result<(), StoreError> {
        let path = self.document_path();
        let content = document::encode(list)?;
        atomic_write(&path, content.as_bytes()).map_err(|e| {
            recovery::log_recovery(
                &self.dir,
                RecoveryEntry::new(RecoveryCategory::Write, "save failed")
                    .field("Target", path.display().to_string())
                    .field("Error", e.to_string())
                    .body(content.clone()),
            );
            StoreError::WriteError {
                path: path.clone(),
                source: e,
            }
        })
    }

    /// Apply `op` to a copy of the list, persist it, then swap it in.
    pub fn mutate<T, F>(&mut self, op: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Checklist) -> Result<T, ItemError>,
    {
        let mut next = self.checklist.clone();
        let out = op(&mut next)?;
        if next != self.checklist {
            self.write(&next)?;
            self.checklist = next;
        }
        Ok(out)
    }

    /// Replace the whole list without recording anything (used by undo).
    pub fn restore(&mut self, list: Checklist) -> Result<(), StoreError> {
        self.mutate(|current| {
            *current = list;
            Ok(())
        })
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    pub fn add_items(&mut self, raw: &str) -> Result<Vec<ItemId>, StoreError> {
        self.mutate(|list| Ok(item_ops::add_items(list, raw)))
    }

    pub fn toggle(&mut self, id: &ItemId) -> Result<bool, StoreError> {
        self.mutate(|list| Ok(item_ops::toggle(list, id)))
    }

    pub fn set_checked(&mut self, id: &ItemId, checked: bool) -> Result<bool, StoreError> {
        self.mutate(|list| Ok(item_ops::set_checked(list, id, checked)))
    }

    pub fn edit_text(&mut self, id: &ItemId, text: &str) -> Result<(), StoreError> {
        self.mutate(|list| item_ops::edit_text(list, id, text))
    }

    pub fn delete_item(&mut self, id: &ItemId) -> Result<Option<ChecklistItem>, StoreError> {
        let removed = self.mutate(|list| Ok(item_ops::delete_item(list, id)))?;
        if let Some(item) = &removed {
            recovery::log_removed_items(
                &self.dir,
                RecoveryCategory::Delete,
                "item deleted",
                std::slice::from_ref(item),
            );
        }
        Ok(removed)
    }

    /// Delete several items with a single write. Ids that are not present
    /// are skipped.
    pub fn delete_items(&mut self, ids: &[ItemId]) -> Result<Vec<ChecklistItem>, StoreError> {
        let removed = self.mutate(|list| {
            Ok(ids
                .iter()
                .filter_map(|id| item_ops::delete_item(list, id))
                .collect::<Vec<_>>())
        })?;
        let description = match removed.len() {
            1 => "item deleted".to_string(),
            n => format!("{} items deleted", n),
        };
        recovery::log_removed_items(&self.dir, RecoveryCategory::Delete, &description, &removed);
        Ok(removed)
    }

    /// Empty the list. Callers are responsible for asking first.
    pub fn clear_all(&mut self) -> Result<Vec<ChecklistItem>, StoreError> {
        let removed = self.mutate(|list| Ok(item_ops::clear_all(list)))?;
        recovery::log_removed_items(
            &self.dir,
            RecoveryCategory::Clear,
            &format!("{} items cleared", removed.len()),
            &removed,
        );
        Ok(removed)
    }

    pub fn reorder_in_view(
        &mut self,
        filter: FilterMode,
        from: usize,
        to: usize,
    ) -> Result<(), StoreError> {
        self.mutate(|list| item_ops::reorder_in_view(list, filter, from, to))
    }

    pub fn move_by(
        &mut self,
        filter: FilterMode,
        id: &ItemId,
        delta: isize,
    ) -> Result<bool, StoreError> {
        self.mutate(|list| Ok(item_ops::move_by(list, filter, id, delta)))
    }

    /// Replace the whole list with an already validated one.
    pub fn import_replace(&mut self, incoming: Checklist) -> Result<Vec<ChecklistItem>, StoreError> {
        let replaced = self.mutate(|list| Ok(item_ops::import_replace(list, incoming)))?;
        recovery::log_removed_items(
            &self.dir,
            RecoveryCategory::Import,
            &format!("{} items replaced by import", replaced.len()),
            &replaced,
        );
        Ok(replaced)
    }

    pub fn export(&self) -> Result<String, StoreError> {
        Ok(item_ops::export_serialize(&self.checklist)?)
    }
}

/// Read and parse `checklist.toml`.
pub fn read_config(dir: &Path) -> Result<ChecklistConfig, StoreError> {
    let path = dir.join(CONFIG_FILE);
    let text = fs::read_to_string(&path).map_err(|e| StoreError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    Ok(toml::from_str(&text)?)
}

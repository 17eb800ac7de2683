//! The JSON document used both for the persisted store and for export files.
//!
//! Current form:
//!
//! ```json
//! { "version": 2, "items": [ { "id": "…", "text": "…", "checked": false } ] }
//! ```
//!
//! The legacy form, a bare array of `{ id?, text, checked }` objects, is still
//! accepted on read. Items in a legacy document may lack an id; those get a
//! fresh one. Every other shape problem is rejected with a [`DocumentError`].

use std::collections::HashSet;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::model::item::{Checklist, ChecklistItem, ItemId};

/// Version written by [`encode`]
pub const DOCUMENT_VERSION: u64 = 2;

/// Error type for document decoding
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unexpected document shape: {0}")]
    Shape(String),
    #[error("unsupported document version {found} (newest supported is {supported})", supported = DOCUMENT_VERSION)]
    UnsupportedVersion { found: u64 },
    #[error("item {index}: {reason}")]
    InvalidItem { index: usize, reason: String },
    #[error("duplicate item id: {0}")]
    DuplicateId(String),
}

/// Which on-disk form a decoded document had
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentForm {
    Versioned(u64),
    Legacy,
}

/// Result of decoding a document
#[derive(Debug)]
pub struct Decoded {
    pub checklist: Checklist,
    pub form: DocumentForm,
    /// Number of items that had no id and were given a fresh one
    pub assigned_ids: usize,
}

#[derive(Serialize)]
struct DocumentOut<'a> {
    version: u64,
    items: &'a [ChecklistItem],
}

/// Serialize a checklist as a pretty-printed versioned document.
pub fn encode(checklist: &Checklist) -> Result<String, serde_json::Error> {
    let mut out = serde_json::to_string_pretty(&DocumentOut {
        version: DOCUMENT_VERSION,
        items: &checklist.items,
    })?;
    out.push('\n');
    Ok(out)
}

/// Parse and validate a document.
pub fn decode(text: &str) -> Result<Decoded, DocumentError> {
    let value: Value = serde_json::from_str(text)?;

    let (entries, form) = match value {
        Value::Array(entries) => (entries, DocumentForm::Legacy),
        Value::Object(mut obj) => {
            let version = match obj.get("version") {
                Some(Value::Number(n)) => n
                    .as_u64()
                    .ok_or_else(|| DocumentError::Shape("version must be a positive integer".into()))?,
                Some(_) => {
                    return Err(DocumentError::Shape(
                        "version must be a positive integer".into(),
                    ));
                }
                None => return Err(DocumentError::Shape("missing \"version\"".into())),
            };
            if version > DOCUMENT_VERSION {
                return Err(DocumentError::UnsupportedVersion { found: version });
            }
            match obj.remove("items") {
                Some(Value::Array(entries)) => (entries, DocumentForm::Versioned(version)),
                Some(_) => return Err(DocumentError::Shape("\"items\" must be an array".into())),
                None => return Err(DocumentError::Shape("missing \"items\"".into())),
            }
        }
        other => {
            return Err(DocumentError::Shape(format!(
                "expected an object or array, found {}",
                json_kind(&other)
            )));
        }
    };

    let mut items = Vec::with_capacity(entries.len());
    let mut seen = HashSet::new();
    let mut assigned_ids = 0;

    for (index, entry) in entries.into_iter().enumerate() {
        let obj = match entry {
            Value::Object(obj) => obj,
            other => {
                return Err(DocumentError::InvalidItem {
                    index,
                    reason: format!("expected an object, found {}", json_kind(&other)),
                });
            }
        };

        let text = field_text(&obj, index)?;
        let checked = match obj.get("checked") {
            Some(Value::Bool(b)) => *b,
            Some(other) => {
                return Err(DocumentError::InvalidItem {
                    index,
                    reason: format!("\"checked\" must be a boolean, found {}", json_kind(other)),
                });
            }
            None => {
                return Err(DocumentError::InvalidItem {
                    index,
                    reason: "missing \"checked\"".into(),
                });
            }
        };

        let id = match obj.get("id") {
            Some(Value::String(s)) if !s.trim().is_empty() => ItemId::from(s.trim()),
            Some(Value::String(_)) => {
                return Err(DocumentError::InvalidItem {
                    index,
                    reason: "\"id\" is empty".into(),
                });
            }
            // Older documents used numeric ids
            Some(Value::Number(n)) => ItemId::from(n.to_string()),
            Some(other) => {
                return Err(DocumentError::InvalidItem {
                    index,
                    reason: format!("\"id\" must be a string, found {}", json_kind(other)),
                });
            }
            None if form == DocumentForm::Legacy => {
                assigned_ids += 1;
                ItemId::generate()
            }
            None => {
                return Err(DocumentError::InvalidItem {
                    index,
                    reason: "missing \"id\"".into(),
                });
            }
        };

        if !seen.insert(id.clone()) {
            return Err(DocumentError::DuplicateId(id.to_string()));
        }

        items.push(ChecklistItem { id, text, checked });
    }

    Ok(Decoded {
        checklist: Checklist::new(items),
        form,
        assigned_ids,
    })
}

fn field_text(obj: &Map<String, Value>, index: usize) -> Result<String, DocumentError> {
    match obj.get("text") {
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Err(DocumentError::InvalidItem {
                    index,
                    reason: "\"text\" is empty".into(),
                })
            } else {
                Ok(trimmed.to_string())
            }
        }
        Some(other) => Err(DocumentError::InvalidItem {
            index,
            reason: format!("\"text\" must be a string, found {}", json_kind(other)),
        }),
        None => Err(DocumentError::InvalidItem {
            index,
            reason: "missing \"text\"".into(),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

pub mod document;
pub mod lines;

pub use document::{DOCUMENT_VERSION, Decoded, DocumentError, DocumentForm, decode, encode};
pub use lines::parse_lines;

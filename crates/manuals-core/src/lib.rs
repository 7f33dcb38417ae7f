//! Core types and logic for the manuals catalog.
//!
//! This crate holds everything that does not talk to the network:
//! - `Manual`: a catalog record with its folder-derived taxonomy
//! - `FolderSource`: paginated listing of a folder's children
//! - `collect_manuals`: recursive folder walk producing `Manual` records
//! - `filter_manuals`: case-insensitive free-text search over records

mod error;
mod model;
mod search;
mod source;
mod walk;

pub use error::CatalogError;
pub use model::{Manual, FOLDER_MIME_TYPE, PDF_MIME_TYPE, UNTITLED};
pub use search::{filter_manuals, result_count_label};
pub use source::{ChildPage, DriveEntry, FolderSource};
pub use walk::{collect_manuals, list_all_children};

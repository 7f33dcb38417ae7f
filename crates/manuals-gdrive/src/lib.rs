//! Google Drive backend for the manuals catalog.
//!
//! Authenticates with a service-account key, lists folders through the
//! Drive v3 API and feeds the recursive walk from `manuals-core`.

mod catalog;
mod credentials;
mod gdrive;
mod source;
mod token_manager;

pub use catalog::DriveCatalog;
pub use credentials::{ServiceAccountKey, DEFAULT_TOKEN_URI};
pub use gdrive::{GDriveClient, DEFAULT_API_BASE_URL};
pub use source::GDriveFolderSource;
pub use token_manager::{TokenManager, DRIVE_READONLY_SCOPE};

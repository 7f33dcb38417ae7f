use thiserror::Error;

/// Errors surfaced while building the manuals catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid service credential: {0}")]
    Credential(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Folder listing failed: {0}")]
    Listing(String),
}

//! Drive-backed manuals catalog.
//!
//! Ties together key parsing, token acquisition and the recursive walk so a
//! request handler can build the catalog in one call.

use std::sync::Arc;

use manuals_core::{collect_manuals, CatalogError, Manual};
use tracing::{info, instrument};

use crate::credentials::ServiceAccountKey;
use crate::gdrive::GDriveClient;
use crate::source::GDriveFolderSource;
use crate::token_manager::TokenManager;

/// Builds the manuals list for a Drive folder on demand.
pub struct DriveCatalog {
    client: Arc<GDriveClient>,
    token_manager: Arc<TokenManager>,
}

impl DriveCatalog {
    pub fn new(client: Arc<GDriveClient>, token_manager: Arc<TokenManager>) -> Self {
        Self {
            client,
            token_manager,
        }
    }

    /// Walk `root_folder_id` and return every file of `mime_type` under it.
    ///
    /// `service_key_json` is the raw service-account key. Any failure while
    /// parsing the key, signing in, or listing aborts the whole call.
    #[instrument(skip(self, service_key_json), level = "debug")]
    pub async fn list_manuals(
        &self,
        service_key_json: &str,
        root_folder_id: &str,
        mime_type: &str,
    ) -> Result<Vec<Manual>, CatalogError> {
        let key = ServiceAccountKey::from_json(service_key_json)?;

        let token = self
            .token_manager
            .get_valid_token(&key)
            .await
            .map_err(|e| CatalogError::Auth(e.to_string()))?;

        let source = GDriveFolderSource::new(self.client.clone(), token);
        let manuals = collect_manuals(&source, root_folder_id, mime_type).await?;

        info!(
            "Found {} manuals under folder {}",
            manuals.len(),
            root_folder_id
        );
        Ok(manuals)
    }
}

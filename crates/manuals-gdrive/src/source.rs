use std::sync::Arc;

use async_trait::async_trait;
use manuals_core::{CatalogError, ChildPage, FolderSource};

use crate::gdrive::GDriveClient;

/// [`FolderSource`] backed by the Drive API with a fixed access token.
pub struct GDriveFolderSource {
    client: Arc<GDriveClient>,
    token: String,
}

impl GDriveFolderSource {
    pub fn new(client: Arc<GDriveClient>, token: String) -> Self {
        Self { client, token }
    }
}

#[async_trait]
impl FolderSource for GDriveFolderSource {
    async fn list_children(
        &self,
        folder_id: &str,
        page_token: Option<&str>,
    ) -> Result<ChildPage, CatalogError> {
        let (entries, next_page_token) = self
            .client
            .list_children(&self.token, folder_id, page_token)
            .await
            .map_err(|e| CatalogError::Listing(e.to_string()))?;

        Ok(ChildPage {
            entries,
            next_page_token,
        })
    }
}

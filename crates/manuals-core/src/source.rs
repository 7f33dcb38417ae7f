use async_trait::async_trait;
use serde::Deserialize;

use crate::error::CatalogError;

/// A file or folder entry as reported by the remote storage.
///
/// Any field may be missing from the remote response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub web_view_link: Option<String>,
}

impl DriveEntry {
    pub fn has_mime_type(&self, mime_type: &str) -> bool {
        self.mime_type.as_deref() == Some(mime_type)
    }
}

/// One page of a folder listing.
#[derive(Debug, Clone, Default)]
pub struct ChildPage {
    pub entries: Vec<DriveEntry>,
    pub next_page_token: Option<String>,
}

/// Lists the direct, non-trashed children of a remote folder.
#[async_trait]
pub trait FolderSource: Send + Sync {
    /// Fetch one page of children of `folder_id`.
    ///
    /// `page_token` is the continuation token returned by the previous page.
    async fn list_children(
        &self,
        folder_id: &str,
        page_token: Option<&str>,
    ) -> Result<ChildPage, CatalogError>;
}

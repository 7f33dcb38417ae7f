//! Google Drive API v3 client wrapper.
//!
//! Token is passed per-call by the caller (TokenManager resolves it from the
//! service-account key).

use manuals_core::DriveEntry;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

/// Public Google APIs endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com";

/// Fields requested from `files.list`.
const LIST_FIELDS: &str = "nextPageToken, files(id,name,mimeType,webViewLink)";

/// Largest page size `files.list` accepts.
const PAGE_SIZE: u32 = 1000;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileListResponse {
    #[serde(default)]
    files: Vec<DriveEntry>,
    #[serde(default)]
    next_page_token: Option<String>,
}

/// Google Drive API client (stateless, token provided per-call).
pub struct GDriveClient {
    http: Client,
    base_url: String,
}

impl GDriveClient {
    pub fn new(http: Client) -> Self {
        Self::with_base_url(http, DEFAULT_API_BASE_URL)
    }

    pub fn with_base_url(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// List one page of non-trashed children of a folder.
    ///
    /// Returns the entries and the token of the next page, if any.
    #[instrument(skip(self, token), level = "debug")]
    pub async fn list_children(
        &self,
        token: &str,
        parent_id: &str,
        page_token: Option<&str>,
    ) -> anyhow::Result<(Vec<DriveEntry>, Option<String>)> {
        let url = format!("{}/drive/v3/files", self.base_url);
        let page_size = PAGE_SIZE.to_string();

        let mut query = vec![
            ("q", children_query(parent_id)),
            ("fields", LIST_FIELDS.to_string()),
            ("pageSize", page_size),
        ];
        if let Some(pt) = page_token {
            query.push(("pageToken", pt.to_string()));
        }

        let resp = self
            .http
            .get(&url)
            .bearer_auth(token)
            .query(&query)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Google Drive API error {}: {}", status, body);
        }

        let list: FileListResponse = resp.json().await?;
        debug!(
            "Listed {} children of folder {} (more: {})",
            list.files.len(),
            parent_id,
            list.next_page_token.is_some()
        );
        Ok((list.files, list.next_page_token))
    }
}

/// Drive search query selecting the live children of `parent_id`.
fn children_query(parent_id: &str) -> String {
    let escaped = parent_id.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{}' in parents and trashed=false", escaped)
}

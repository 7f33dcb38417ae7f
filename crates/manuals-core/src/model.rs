use serde::{Deserialize, Serialize};

/// MIME type Google Drive assigns to folders.
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// MIME type of the documents the catalog collects by default.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Title used when the remote entry carries no name.
pub const UNTITLED: &str = "Untitled";

/// A manual found under the catalog root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manual {
    pub id: String,
    pub title: String,
    pub url: String,
    /// Folder names from the catalog root down to the file's parent.
    pub path: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Manual {
    /// Build a record for a file found at `path`.
    ///
    /// `title` falls back to [`UNTITLED`] and `url` to the Drive viewer URL
    /// for `id`. Category and brand are the first two path segments.
    pub fn from_entry(
        id: &str,
        title: Option<&str>,
        url: Option<&str>,
        path: &[String],
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.unwrap_or(UNTITLED).to_string(),
            url: url
                .map(str::to_string)
                .unwrap_or_else(|| drive_view_url(id)),
            path: path.to_vec(),
            category: path.first().cloned(),
            brand: path.get(1).cloned(),
            tags: Vec::new(),
        }
    }

    /// Text the search filter matches against.
    pub fn search_text(&self) -> String {
        [
            self.title.as_str(),
            self.brand.as_deref().unwrap_or_default(),
            self.category.as_deref().unwrap_or_default(),
            self.tags.join(" ").as_str(),
        ]
        .join(" ")
    }
}

fn drive_view_url(id: &str) -> String {
    format!("https://drive.google.com/file/d/{}/view", id)
}

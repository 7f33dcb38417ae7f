//! Recursive folder walk.
//!
//! Traverses a folder tree depth-first, sub-folders before files, and turns
//! every file of the target MIME type into a [`Manual`] annotated with the
//! folder chain that leads to it.

use async_recursion::async_recursion;
use tracing::{debug, instrument};

use crate::error::CatalogError;
use crate::model::{Manual, FOLDER_MIME_TYPE};
use crate::source::{DriveEntry, FolderSource};

/// List every child of `folder_id`, following continuation tokens.
pub async fn list_all_children(
    source: &dyn FolderSource,
    folder_id: &str,
) -> Result<Vec<DriveEntry>, CatalogError> {
    let mut out = Vec::new();
    let mut page_token: Option<String> = None;

    loop {
        let page = source
            .list_children(folder_id, page_token.as_deref())
            .await?;
        out.extend(page.entries);

        match page.next_page_token {
            Some(token) if !token.is_empty() => page_token = Some(token),
            _ => break,
        }
    }

    Ok(out)
}

/// Collect all files of `mime_type` found anywhere under `root_folder_id`.
///
/// Any listing failure aborts the walk.
#[instrument(skip(source), level = "debug")]
pub async fn collect_manuals(
    source: &dyn FolderSource,
    root_folder_id: &str,
    mime_type: &str,
) -> Result<Vec<Manual>, CatalogError> {
    let mut manuals = Vec::new();
    walk_folder(source, root_folder_id, &[], mime_type, &mut manuals).await?;
    debug!("Collected {} manuals under {}", manuals.len(), root_folder_id);
    Ok(manuals)
}

#[async_recursion]
async fn walk_folder(
    source: &dyn FolderSource,
    folder_id: &str,
    path: &[String],
    mime_type: &str,
    manuals: &mut Vec<Manual>,
) -> Result<(), CatalogError> {
    let children = list_all_children(source, folder_id).await?;

    for folder in children.iter().filter(|e| e.has_mime_type(FOLDER_MIME_TYPE)) {
        if let (Some(id), Some(name)) = (&folder.id, &folder.name) {
            let mut sub_path = path.to_vec();
            sub_path.push(name.clone());
            walk_folder(source, id, &sub_path, mime_type, manuals).await?;
        }
    }

    for file in children.iter().filter(|e| e.has_mime_type(mime_type)) {
        let Some(id) = &file.id else {
            continue;
        };
        manuals.push(Manual::from_entry(
            id,
            file.name.as_deref(),
            file.web_view_link.as_deref(),
            path,
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::model::PDF_MIME_TYPE;
    use crate::source::ChildPage;

    /// In-memory folder tree that serves children `page_size` at a time.
    #[derive(Default)]
    struct MemoryTree {
        children: HashMap<String, Vec<DriveEntry>>,
        page_size: usize,
        fail_on: Option<String>,
        calls: Mutex<Vec<(String, Option<String>)>>,
    }

    impl MemoryTree {
        fn new(page_size: usize) -> Self {
            Self {
                page_size,
                ..Default::default()
            }
        }

        fn folder(mut self, parent: &str, id: &str, name: &str) -> Self {
            self.children.entry(parent.to_string()).or_default().push(DriveEntry {
                id: Some(id.to_string()),
                name: Some(name.to_string()),
                mime_type: Some(FOLDER_MIME_TYPE.to_string()),
                web_view_link: None,
            });
            self
        }

        fn file(mut self, parent: &str, entry: DriveEntry) -> Self {
            self.children.entry(parent.to_string()).or_default().push(entry);
            self
        }
    }

    fn pdf(id: &str, name: &str) -> DriveEntry {
        DriveEntry {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            mime_type: Some(PDF_MIME_TYPE.to_string()),
            web_view_link: Some(format!("https://drive.example/{}", id)),
        }
    }

    #[async_trait]
    impl FolderSource for MemoryTree {
        async fn list_children(
            &self,
            folder_id: &str,
            page_token: Option<&str>,
        ) -> Result<ChildPage, CatalogError> {
            self.calls
                .lock()
                .unwrap()
                .push((folder_id.to_string(), page_token.map(str::to_string)));

            if self.fail_on.as_deref() == Some(folder_id) {
                return Err(CatalogError::Listing(format!("boom in {}", folder_id)));
            }

            let all = self.children.get(folder_id).cloned().unwrap_or_default();
            let start: usize = page_token.map(|t| t.parse().unwrap()).unwrap_or(0);
            let end = (start + self.page_size).min(all.len());
            let next_page_token = (end < all.len()).then(|| end.to_string());

            Ok(ChildPage {
                entries: all[start..end].to_vec(),
                next_page_token,
            })
        }
    }

    #[tokio::test]
    async fn test_depth_two_tree() {
        let tree = MemoryTree::new(100)
            .folder("root", "ovens", "Ovens")
            .folder("ovens", "acme", "Acme")
            .folder("root", "fridges", "Fridges")
            .folder("fridges", "polar", "Polar")
            .file("acme", pdf("m1", "X100.pdf"))
            .file("acme", pdf("m2", "X200.pdf"))
            .file("polar", pdf("m3", "P1.pdf"));

        let manuals = collect_manuals(&tree, "root", PDF_MIME_TYPE).await.unwrap();

        assert_eq!(manuals.len(), 3);
        for manual in &manuals {
            assert_eq!(manual.path.len(), 2);
            assert_eq!(manual.category.as_ref(), Some(&manual.path[0]));
            assert_eq!(manual.brand.as_ref(), Some(&manual.path[1]));
        }
        assert_eq!(manuals[0].path, vec!["Ovens", "Acme"]);
        assert_eq!(manuals[2].path, vec!["Fridges", "Polar"]);
        assert_eq!(manuals[2].brand.as_deref(), Some("Polar"));
    }

    #[tokio::test]
    async fn test_subfolders_before_files() {
        let tree = MemoryTree::new(100)
            .file("root", pdf("top", "Top.pdf"))
            .folder("root", "a", "A")
            .file("a", pdf("nested", "Nested.pdf"));

        let manuals = collect_manuals(&tree, "root", PDF_MIME_TYPE).await.unwrap();
        let ids: Vec<_> = manuals.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["nested", "top"]);
        assert!(manuals[1].path.is_empty());
        assert_eq!(manuals[1].category, None);
    }

    #[tokio::test]
    async fn test_follows_page_tokens() {
        let mut tree = MemoryTree::new(2);
        for i in 0..5 {
            tree = tree.file("root", pdf(&format!("m{}", i), &format!("{}.pdf", i)));
        }

        let manuals = collect_manuals(&tree, "root", PDF_MIME_TYPE).await.unwrap();
        assert_eq!(manuals.len(), 5);

        let calls = tree.calls.lock().unwrap();
        let tokens: Vec<_> = calls.iter().map(|(_, t)| t.clone()).collect();
        assert_eq!(
            tokens,
            vec![None, Some("2".to_string()), Some("4".to_string())]
        );
    }

    #[tokio::test]
    async fn test_fallbacks_and_filtering() {
        let tree = MemoryTree::new(100)
            .file(
                "root",
                DriveEntry {
                    id: Some("bare".to_string()),
                    name: None,
                    mime_type: Some(PDF_MIME_TYPE.to_string()),
                    web_view_link: None,
                },
            )
            .file(
                "root",
                DriveEntry {
                    id: None,
                    name: Some("orphan.pdf".to_string()),
                    mime_type: Some(PDF_MIME_TYPE.to_string()),
                    web_view_link: None,
                },
            )
            .file(
                "root",
                DriveEntry {
                    id: Some("doc".to_string()),
                    name: Some("notes.txt".to_string()),
                    mime_type: Some("text/plain".to_string()),
                    web_view_link: None,
                },
            )
            .file(
                "root",
                DriveEntry {
                    id: None,
                    name: Some("Nameless".to_string()),
                    mime_type: Some(FOLDER_MIME_TYPE.to_string()),
                    web_view_link: None,
                },
            );

        let manuals = collect_manuals(&tree, "root", PDF_MIME_TYPE).await.unwrap();
        assert_eq!(manuals.len(), 1);
        assert_eq!(manuals[0].title, "Untitled");
        assert_eq!(manuals[0].url, "https://drive.google.com/file/d/bare/view");

        // The folder without an id is never listed.
        let calls = tree.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
    }

    #[tokio::test]
    async fn test_listing_error_aborts() {
        let mut tree = MemoryTree::new(100)
            .file("root", pdf("m1", "a.pdf"))
            .folder("root", "bad", "Bad");
        tree.fail_on = Some("bad".to_string());

        let err = collect_manuals(&tree, "root", PDF_MIME_TYPE)
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Listing(_)));
        assert_eq!(err.to_string(), "Folder listing failed: boom in bad");
    }

    #[tokio::test]
    async fn test_other_mime_type() {
        let tree = MemoryTree::new(100).file(
            "root",
            DriveEntry {
                id: Some("doc".to_string()),
                name: Some("guide.docx".to_string()),
                mime_type: Some("application/msword".to_string()),
                web_view_link: None,
            },
        );

        let manuals = collect_manuals(&tree, "root", "application/msword")
            .await
            .unwrap();
        assert_eq!(manuals.len(), 1);
        assert_eq!(manuals[0].title, "guide.docx");
    }
}

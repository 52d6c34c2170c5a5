//! Catalogue of generated artifacts under the output directory.

use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use tracing::warn;

/// Artifact categories, one subdirectory each.
pub const OUTPUT_CATEGORIES: [&str; 4] = ["designs", "mockups", "videos", "drafts"];

/// File names per category.
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct OutputListing {
    pub designs: Vec<String>,
    pub mockups: Vec<String>,
    pub videos: Vec<String>,
    pub drafts: Vec<String>,
}

impl OutputListing {
    fn category_mut(&mut self, category: &str) -> Option<&mut Vec<String>> {
        match category {
            "designs" => Some(&mut self.designs),
            "mockups" => Some(&mut self.mockups),
            "videos" => Some(&mut self.videos),
            "drafts" => Some(&mut self.drafts),
            _ => None,
        }
    }
}

/// List the files in each category directory. Missing or unreadable
/// directories yield an empty list.
pub async fn list_outputs(output_dir: &Path) -> OutputListing {
    let mut listing = OutputListing::default();

    for category in OUTPUT_CATEGORIES {
        let dir = output_dir.join(category);
        let names = match read_file_names(&dir).await {
            Ok(names) => names,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "Failed to read output directory");
                continue;
            }
        };
        if let Some(slot) = listing.category_mut(category) {
            *slot = names;
        }
    }

    listing
}

async fn read_file_names(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}

/// Resolve a download request to a path inside `output_dir`.
///
/// Returns `None` for unknown categories or file names that are not a single
/// plain path component.
pub fn resolve_download(output_dir: &Path, category: &str, filename: &str) -> Option<PathBuf> {
    if !OUTPUT_CATEGORIES.contains(&category) {
        return None;
    }

    let mut components = Path::new(filename).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) => Some(output_dir.join(category).join(name)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_outputs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("designs")).unwrap();
        std::fs::write(dir.path().join("designs/b.png"), b"").unwrap();
        std::fs::write(dir.path().join("designs/a.png"), b"").unwrap();
        std::fs::create_dir_all(dir.path().join("drafts")).unwrap();
        std::fs::write(dir.path().join("drafts/listing.json"), b"{}").unwrap();

        let listing = list_outputs(dir.path()).await;

        assert_eq!(listing.designs, vec!["a.png", "b.png"]);
        assert_eq!(listing.drafts, vec!["listing.json"]);
        assert!(listing.mockups.is_empty());
        assert!(listing.videos.is_empty());
    }

    #[tokio::test]
    async fn test_list_outputs_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let listing = list_outputs(&dir.path().join("absent")).await;
        assert_eq!(listing, OutputListing::default());
    }

    #[test]
    fn test_resolve_download() {
        let root = Path::new("/srv/output");

        assert_eq!(
            resolve_download(root, "designs", "cat.png"),
            Some(PathBuf::from("/srv/output/designs/cat.png"))
        );
        assert_eq!(resolve_download(root, "secrets", "cat.png"), None);
        assert_eq!(resolve_download(root, "designs", "../config/.env"), None);
        assert_eq!(resolve_download(root, "designs", "/etc/passwd"), None);
        assert_eq!(resolve_download(root, "designs", "sub/cat.png"), None);
        assert_eq!(resolve_download(root, "designs", ".."), None);
    }
}

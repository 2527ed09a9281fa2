use crate::core::Storage;
use crate::domain::model::{LoadReport, ResultTree};
use crate::utils::error::Result;
use crate::utils::sanitize::sanitize_dir_name;
use std::collections::hash_map::{Entry, HashMap};
use std::path::Path;

/// Writes `tree` below `output_root` as `<required>/<article>/<photo name>`.
///
/// Existing directories and files are reused and overwritten, so running it
/// twice yields the same file set. A failure leaves whatever was already
/// copied in place.
pub async fn materialize<S: Storage>(
    storage: &S,
    output_root: &Path,
    tree: &ResultTree,
) -> Result<LoadReport> {
    storage.create_dir_all(output_root).await?;
    let mut directories_created = 1;
    let mut files_copied = 0;

    let mut names = DirectoryNames::default();
    for group in tree.groups() {
        let required_name = names.required_dir(&group.required_article, output_root);
        let required_dir = output_root.join(&required_name);
        storage.create_dir_all(&required_dir).await?;
        directories_created += 1;

        for article_group in &group.articles {
            let leaf = required_dir.join(names.article_dir(
                &required_name,
                &article_group.article,
                &required_dir,
            ));
            storage.create_dir_all(&leaf).await?;
            directories_created += 1;

            for photo in &article_group.photos {
                let target = leaf.join(&photo.file_name);
                tracing::debug!("Copying {} -> {}", photo.path.display(), target.display());
                storage.copy_file(&photo.path, &target).await?;
                files_copied += 1;
            }
        }
    }

    Ok(LoadReport {
        output_root: output_root.to_path_buf(),
        directories_created,
        files_copied,
    })
}

/// Sanitized directory names for the whole run.
///
/// Article names are tracked per sanitized required directory, so articles
/// from two required articles that land in the same directory are checked
/// against each other.
#[derive(Default)]
struct DirectoryNames {
    required: CollisionTracker,
    articles: HashMap<String, CollisionTracker>,
}

impl DirectoryNames {
    fn required_dir(&mut self, required_article: &str, output_root: &Path) -> String {
        self.required.sanitize(required_article, output_root)
    }

    fn article_dir(&mut self, required_name: &str, article: &str, required_dir: &Path) -> String {
        self.articles
            .entry(required_name.to_string())
            .or_default()
            .sanitize(article, required_dir)
    }
}

/// Remembers which original name produced each sanitized directory name so
/// that merges of distinct names can be reported.
#[derive(Default)]
struct CollisionTracker {
    origins: HashMap<String, String>,
}

impl CollisionTracker {
    fn sanitize(&mut self, name: &str, parent: &Path) -> String {
        let sanitized = sanitize_dir_name(name);
        match self.origins.entry(sanitized.clone()) {
            Entry::Occupied(first) if first.get() != name => {
                tracing::warn!(
                    "⚠️ {:?} and {:?} share the directory {}",
                    first.get(),
                    name,
                    parent.join(&sanitized).display()
                );
            }
            Entry::Occupied(_) => {}
            Entry::Vacant(slot) => {
                slot.insert(name.to_string());
            }
        }
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::cli::LocalStorage;
    use crate::domain::model::{ArticleGroup, PhotoFile, RequiredGroup};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn group(photo_dir: &Path, required: &str, articles: Vec<(&str, Vec<&str>)>) -> RequiredGroup {
        RequiredGroup {
            required_article: required.to_string(),
            articles: articles
                .into_iter()
                .map(|(article, photos)| ArticleGroup {
                    article: article.to_string(),
                    photos: photos
                        .into_iter()
                        .map(|name| PhotoFile::from_path(photo_dir.join(name)).unwrap())
                        .collect(),
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_copies_into_nested_tree() {
        let temp_dir = TempDir::new().unwrap();
        let photos = temp_dir.path().join("photos");
        std::fs::create_dir(&photos).unwrap();
        std::fs::write(photos.join("123_front.jpg"), b"front").unwrap();

        let tree = ResultTree::new(vec![group(
            &photos,
            "SKU1",
            vec![("A1", vec!["123_front.jpg"]), ("A2", vec![])],
        )]);
        let storage = LocalStorage::new(temp_dir.path());
        let report = materialize(&storage, Path::new("result"), &tree)
            .await
            .unwrap();

        let copied = temp_dir.path().join("result/SKU1/A1/123_front.jpg");
        assert_eq!(std::fs::read(copied).unwrap(), b"front");
        assert!(temp_dir.path().join("result/SKU1/A2").is_dir());
        assert_eq!(report.files_copied, 1);
        assert_eq!(report.directories_created, 4);
    }

    #[tokio::test]
    async fn test_names_are_sanitized() {
        let temp_dir = TempDir::new().unwrap();
        let tree = ResultTree::new(vec![group(temp_dir.path(), "SKU/1", vec![("A:1", vec![])])]);
        let storage = LocalStorage::new(temp_dir.path());

        materialize(&storage, Path::new("result"), &tree)
            .await
            .unwrap();

        assert!(temp_dir.path().join("result/SKU1/A1").is_dir());
        assert!(!temp_dir.path().join("result/SKU").exists());
    }

    #[tokio::test]
    async fn test_rerun_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let photos = temp_dir.path().join("photos");
        std::fs::create_dir(&photos).unwrap();
        std::fs::write(photos.join("1.jpg"), b"one").unwrap();
        std::fs::write(photos.join("2.jpg"), b"two").unwrap();

        let tree = ResultTree::new(vec![group(&photos, "R", vec![("A", vec!["1.jpg", "2.jpg"])])]);
        let storage = LocalStorage::new(temp_dir.path());

        materialize(&storage, Path::new("result"), &tree)
            .await
            .unwrap();
        let first = list_files(&temp_dir.path().join("result"));
        materialize(&storage, Path::new("result"), &tree)
            .await
            .unwrap();
        let second = list_files(&temp_dir.path().join("result"));

        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[tokio::test]
    async fn test_existing_output_is_kept() {
        let temp_dir = TempDir::new().unwrap();
        let result = temp_dir.path().join("result");
        std::fs::create_dir(&result).unwrap();
        std::fs::write(result.join("keep.txt"), b"keep").unwrap();

        let tree = ResultTree::new(vec![group(temp_dir.path(), "R", vec![("A", vec![])])]);
        let storage = LocalStorage::new(temp_dir.path());
        materialize(&storage, Path::new("result"), &tree)
            .await
            .unwrap();

        assert!(result.join("keep.txt").exists());
    }

    #[tokio::test]
    async fn test_missing_source_photo_fails() {
        let temp_dir = TempDir::new().unwrap();
        let tree = ResultTree::new(vec![group(temp_dir.path(), "R", vec![("A", vec!["gone.jpg"])])]);
        let storage = LocalStorage::new(temp_dir.path());

        let err = materialize(&storage, Path::new("result"), &tree)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("gone.jpg"));
        assert!(temp_dir.path().join("result/R/A").is_dir());
    }

    #[test]
    fn test_collision_tracker_keeps_first_origin() {
        let mut tracker = CollisionTracker::default();
        assert_eq!(tracker.sanitize("A/1", Path::new("result")), "A1");
        assert_eq!(tracker.sanitize("A1", Path::new("result")), "A1");
        assert_eq!(tracker.origins.get("A1").unwrap(), "A/1");
    }

    #[test]
    fn test_article_names_tracked_across_merged_required_dirs() {
        let mut names = DirectoryNames::default();
        let root = Path::new("result");

        let first = names.required_dir("SKU/1", root);
        assert_eq!(names.article_dir(&first, "A:1", &root.join(&first)), "A1");

        let second = names.required_dir("SKU1", root);
        assert_eq!(second, first);
        assert_eq!(names.article_dir(&second, "A1", &root.join(&second)), "A1");

        assert_eq!(names.articles.len(), 1);
        assert_eq!(names.articles["SKU1"].origins["A1"], "A:1");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_utf8_photo_name_is_kept() {
        use crate::core::locator::scan_photo_directory;
        use crate::core::matcher::build_result_tree;
        use crate::domain::model::{CollectedItem, DuplicatePolicy, InventoryItem};
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = TempDir::new().unwrap();
        let photos = temp_dir.path().join("photos");
        std::fs::create_dir(&photos).unwrap();
        let raw_name = OsStr::from_bytes(b"123_\xff.jpg");
        if std::fs::write(photos.join(raw_name), b"raw").is_err() {
            // Some filesystems reject names that are not UTF-8.
            return;
        }

        let storage = LocalStorage::new(temp_dir.path());
        let barcodes = vec!["123".to_string()];
        let found = scan_photo_directory(
            &storage,
            Path::new("photos"),
            &barcodes,
            DuplicatePolicy::Unique,
        )
        .await
        .unwrap();
        let items = vec![CollectedItem::new("SKU1", InventoryItem::new("A1", "123"))];
        let tree = build_result_tree(&["SKU1".to_string()], items, &found).unwrap();

        materialize(&storage, Path::new("result"), &tree)
            .await
            .unwrap();

        let copied = temp_dir.path().join("result/SKU1/A1").join(raw_name);
        assert_eq!(std::fs::read(copied).unwrap(), b"raw");
        let leaf_entries = std::fs::read_dir(temp_dir.path().join("result/SKU1/A1"))
            .unwrap()
            .count();
        assert_eq!(leaf_entries, 1);
    }

    fn list_files(root: &Path) -> Vec<(PathBuf, Vec<u8>)> {
        let mut files = Vec::new();
        let mut stack = vec![root.to_path_buf()];
        while let Some(dir) = stack.pop() {
            for entry in std::fs::read_dir(dir).unwrap() {
                let path = entry.unwrap().path();
                if path.is_dir() {
                    stack.push(path);
                } else {
                    let content = std::fs::read(&path).unwrap();
                    files.push((path, content));
                }
            }
        }
        files.sort();
        files
    }
}

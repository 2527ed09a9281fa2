use crate::core::Storage;
use crate::utils::error::{CollectError, Result};
use std::path::{Path, PathBuf};

/// Local file system, with relative paths resolved against `base_path`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Storage rooted at the process working directory.
    pub fn current_dir() -> Self {
        Self::new(".")
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Storage for LocalStorage {
    async fn read_to_string(&self, path: &Path) -> Result<String> {
        let full_path = self.resolve(path);
        tokio::fs::read_to_string(&full_path)
            .await
            .map_err(|e| CollectError::io(&full_path, e))
    }

    async fn list_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let full_path = self.resolve(path);
        let mut entries = Vec::new();
        let mut dir = tokio::fs::read_dir(&full_path)
            .await
            .map_err(|e| CollectError::io(&full_path, e))?;

        while let Some(entry) = dir
            .next_entry()
            .await
            .map_err(|e| CollectError::io(&full_path, e))?
        {
            entries.push(path.join(entry.file_name()));
        }

        entries.sort();
        Ok(entries)
    }

    async fn create_dir_all(&self, path: &Path) -> Result<()> {
        let full_path = self.resolve(path);
        tokio::fs::create_dir_all(&full_path)
            .await
            .map_err(|e| CollectError::io(&full_path, e))
    }

    async fn copy_file(&self, from: &Path, to: &Path) -> Result<()> {
        let source = self.resolve(from);
        let target = self.resolve(to);
        tokio::fs::copy(&source, &target)
            .await
            .map_err(|e| CollectError::io(&source, e))?;
        Ok(())
    }
}

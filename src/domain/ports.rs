use crate::domain::model::{DuplicatePolicy, Extraction, InventoryItem, LoadReport, ResultTree};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// File system access used by the loader, locator and materializer.
pub trait Storage: Send + Sync {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> impl std::future::Future<Output = Result<String>> + Send;

    /// Immediate entries of `path`, sorted.
    fn list_dir(
        &self,
        path: &Path,
    ) -> impl std::future::Future<Output = Result<Vec<PathBuf>>> + Send;

    fn create_dir_all(&self, path: &Path) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Copies `from` to `to`, replacing `to` if it exists.
    fn copy_file(
        &self,
        from: &Path,
        to: &Path,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_url(&self) -> &str;
    fn api_login(&self) -> &str;
    fn api_password(&self) -> &str;
    fn photo_directory(&self) -> &str;
    fn articles_file(&self) -> &str;
    fn output_root(&self) -> &str;
    fn duplicate_policy(&self) -> DuplicatePolicy;
    fn request_timeout_secs(&self) -> Option<u64>;
}

#[async_trait]
pub trait InventorySource: Send + Sync {
    async fn fetch_items(&self, article: &str) -> Result<Vec<InventoryItem>>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Extraction>;
    async fn transform(&self, extraction: Extraction) -> Result<ResultTree>;
    async fn load(&self, tree: ResultTree) -> Result<LoadReport>;
}

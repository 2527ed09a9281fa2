use crate::core::articles::load_required_articles;
use crate::core::inventory::{fetch_all_items, InventoryClient};
use crate::core::locator::scan_photo_directory;
use crate::core::materializer::materialize;
use crate::core::matcher::build_result_tree;
use crate::core::{ConfigProvider, InventorySource, Pipeline, Storage};
use crate::domain::model::{Extraction, LoadReport, ResultTree};
use crate::utils::error::Result;
use std::path::Path;

/// Articles file + inventory API -> photo directory scan -> result tree on disk.
pub struct PhotoPipeline<S: Storage, C: ConfigProvider, I: InventorySource = InventoryClient> {
    pub(crate) storage: S,
    pub(crate) config: C,
    pub(crate) source: I,
}

impl<S: Storage, C: ConfigProvider> PhotoPipeline<S, C, InventoryClient> {
    pub fn new(storage: S, config: C) -> Self {
        let source = InventoryClient::from_config(&config);
        Self {
            storage,
            config,
            source,
        }
    }
}

impl<S: Storage, C: ConfigProvider, I: InventorySource> PhotoPipeline<S, C, I> {
    pub fn with_source(storage: S, config: C, source: I) -> Self {
        Self {
            storage,
            config,
            source,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, I: InventorySource> Pipeline for PhotoPipeline<S, C, I> {
    async fn extract(&self) -> Result<Extraction> {
        let articles_file = Path::new(self.config.articles_file());
        let required_articles = load_required_articles(&self.storage, articles_file).await?;
        tracing::info!(
            "🚀 Fetching items for {} required articles from {}",
            required_articles.len(),
            self.config.api_url()
        );

        fetch_all_items(&self.source, &required_articles).await
    }

    async fn transform(&self, extraction: Extraction) -> Result<ResultTree> {
        let photos = scan_photo_directory(
            &self.storage,
            Path::new(self.config.photo_directory()),
            &extraction.barcodes,
            self.config.duplicate_policy(),
        )
        .await?;

        let tree = build_result_tree(&extraction.required_articles, extraction.items, &photos)?;
        tracing::info!(
            "🔧 {} articles with {} photos under {} required articles",
            tree.article_count(),
            tree.photo_count(),
            tree.groups().len()
        );
        Ok(tree)
    }

    async fn load(&self, tree: ResultTree) -> Result<LoadReport> {
        let output_root = Path::new(self.config.output_root());
        tracing::info!("💾 Copying photos into {}", output_root.display());
        materialize(&self.storage, output_root, &tree).await
    }
}

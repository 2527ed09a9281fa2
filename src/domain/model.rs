use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// One record of the inventory API's `result` list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InventoryItem {
    pub article: String,
    pub barcode: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl InventoryItem {
    pub fn new(article: impl Into<String>, barcode: impl Into<String>) -> Self {
        Self {
            article: article.into(),
            barcode: barcode.into(),
            extra: serde_json::Map::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InventoryResponse {
    pub result: Vec<InventoryItem>,
}

/// An inventory item together with the required article that fetched it and
/// the photos matched to it.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectedItem {
    pub required_article: String,
    pub item: InventoryItem,
    pub photos: Vec<PhotoFile>,
}

impl CollectedItem {
    pub fn new(required_article: impl Into<String>, item: InventoryItem) -> Self {
        Self {
            required_article: required_article.into(),
            item,
            photos: Vec::new(),
        }
    }

    pub fn article(&self) -> &str {
        &self.item.article
    }

    pub fn barcode(&self) -> &str {
        &self.item.barcode
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhotoFile {
    pub path: PathBuf,
    /// File name exactly as found on disk; copies keep it.
    pub file_name: OsString,
    /// Lossy UTF-8 form of `file_name`, for logs.
    pub name: String,
    /// Lossy UTF-8 stem, matched against barcodes.
    pub stem: String,
}

impl PhotoFile {
    /// `None` for paths without a final component (`/`, `..`).
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let file_name = path.file_name()?.to_os_string();
        let name = file_name.to_string_lossy().into_owned();
        let stem = Path::new(&file_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| name.clone());
        Some(Self {
            path,
            file_name,
            name,
            stem,
        })
    }
}

/// Output of the extract phase.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub required_articles: Vec<String>,
    pub items: Vec<CollectedItem>,
    /// One barcode per item, in item order, duplicates kept.
    pub barcodes: Vec<String>,
}

/// How the photo locator treats a directory entry matched by several barcodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Collect each entry once.
    #[default]
    Unique,
    /// Collect an entry once per matching barcode.
    PerMatch,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArticleGroup {
    pub article: String,
    pub photos: Vec<PhotoFile>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RequiredGroup {
    pub required_article: String,
    pub articles: Vec<ArticleGroup>,
}

/// Required article -> article -> photos, in load order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTree {
    groups: Vec<RequiredGroup>,
}

impl ResultTree {
    pub fn new(groups: Vec<RequiredGroup>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[RequiredGroup] {
        &self.groups
    }

    pub fn group(&self, required_article: &str) -> Option<&RequiredGroup> {
        self.groups
            .iter()
            .find(|g| g.required_article == required_article)
    }

    pub fn get(&self, required_article: &str, article: &str) -> Option<&[PhotoFile]> {
        self.group(required_article)?
            .articles
            .iter()
            .find(|a| a.article == article)
            .map(|a| a.photos.as_slice())
    }

    pub fn article_count(&self) -> usize {
        self.groups.iter().map(|g| g.articles.len()).sum()
    }

    pub fn photo_count(&self) -> usize {
        self.groups
            .iter()
            .flat_map(|g| g.articles.iter())
            .map(|a| a.photos.len())
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub output_root: PathBuf,
    pub directories_created: usize,
    pub files_copied: usize,
}

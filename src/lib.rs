pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, toml_config::TomlConfig};

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use core::{etl::EtlEngine, inventory::InventoryClient, pipeline::PhotoPipeline};
pub use domain::model::{DuplicatePolicy, LoadReport, ResultTree};
pub use utils::error::{CollectError, Result};

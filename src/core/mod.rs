pub mod articles;
pub mod etl;
pub mod inventory;
pub mod locator;
pub mod materializer;
pub mod matcher;
pub mod pipeline;

pub use crate::domain::model::{Extraction, LoadReport, ResultTree};
pub use crate::domain::ports::{ConfigProvider, InventorySource, Pipeline, Storage};
pub use crate::utils::error::Result;

pub mod cache;
pub mod catalog;
pub mod engine;
pub mod report;
pub mod scoring;

pub use crate::domain::model::{Card, Set, SetCards};
pub use crate::domain::ports::{CatalogClient, ConfigProvider, ScoringRule, Storage};
pub use crate::utils::error::Result;

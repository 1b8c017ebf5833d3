use crate::core::scoring::KeywordTable;
use crate::domain::model::{Card, Set, SetCards};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
    /// Human-readable location of `path`, used in logs and error messages.
    fn describe(&self, path: &str) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn api_host(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn page_size(&self) -> usize;
    fn max_pages(&self) -> usize;
    fn cache_dir(&self) -> &Path;
    fn report_threshold(&self) -> u32;
    fn keyword_table(&self) -> KeywordTable;
}

#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn fetch_sets(&self) -> Result<Vec<Set>>;
    async fn fetch_set_cards(&self, set_code: &str) -> Result<SetCards>;
}

/// One heuristic pass: looks at a card and returns how much to add to its score.
pub trait ScoringRule: Send + Sync {
    fn name(&self) -> &'static str;
    fn score(&self, card: &Card) -> Result<u32>;
}

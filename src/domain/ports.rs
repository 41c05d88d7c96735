use crate::domain::model::FruitQueryResult;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn species_file(&self) -> &str;
    fn output_path(&self) -> &str;
    fn batch_size(&self) -> usize;
    fn file_pattern(&self) -> &str;
    fn model_name(&self) -> &str;
    fn api_base_url(&self) -> &str;
    fn api_key(&self) -> Option<&str>;
    fn timeout_seconds(&self) -> u64;
    fn include_references(&self) -> bool;
}

/// A text-completion service: one prompt in, the raw response text out.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    /// Ordered common names to research.
    async fn extract(&self) -> Result<Vec<String>>;
    /// Looks up and researches every name of one group. Items that fail are skipped.
    async fn transform(&self, group: &[String]) -> Vec<FruitQueryResult>;
    /// Persists one non-empty group, returning where it was written.
    async fn load(&self, results: &[FruitQueryResult], batch_index: usize) -> Result<String>;
    fn batch_size(&self) -> usize;
}

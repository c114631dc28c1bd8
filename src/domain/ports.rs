use crate::domain::model::{CacheEntry, ProducerRecord, RawRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Single-slot cache. `save` replaces the slot atomically from the caller's
/// perspective; `load` returns None for missing, version-mismatched, or
/// expired entries (and deletes expired ones).
pub trait CacheStore: Send + Sync {
    fn save(
        &self,
        records: &[ProducerRecord],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn load(&self) -> impl std::future::Future<Output = Result<Option<CacheEntry>>> + Send;
    fn clear(&self) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn cache_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn request_timeout_secs(&self) -> u64;
    fn page_limit(&self) -> usize;
}

/// A data origin wrapped behind a failure-tolerant fetch. Implementations
/// must not fail: degraded output beats no output.
#[async_trait]
pub trait ProducerSource: Send + Sync {
    fn name(&self) -> &'static str;
    async fn fetch(&self, limit: usize) -> Vec<RawRecord>;
}

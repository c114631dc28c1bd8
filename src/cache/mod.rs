//! Cache store backends behind the `CacheStore` port: an in-memory slot for
//! tests and short-lived runs, and a single JSON file on disk for the CLI.
//! Neither is safe under concurrent writers from multiple processes;
//! last-writer-wins.

use crate::domain::model::{CacheEntry, ProducerRecord, CACHE_SCHEMA_VERSION};
use crate::domain::ports::CacheStore;
use crate::utils::error::Result;
use chrono::Utc;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Single mutex-guarded slot.
#[derive(Clone, Default)]
pub struct MemoryCache {
    slot: Arc<Mutex<Option<CacheEntry>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) async fn put(&self, entry: CacheEntry) {
        *self.slot.lock().await = Some(entry);
    }
}

impl CacheStore for MemoryCache {
    async fn save(&self, records: &[ProducerRecord]) -> Result<()> {
        let mut slot = self.slot.lock().await;
        *slot = Some(CacheEntry::new(records.to_vec()));
        Ok(())
    }

    async fn load(&self) -> Result<Option<CacheEntry>> {
        let mut slot = self.slot.lock().await;
        let evict = slot
            .as_ref()
            .map(|entry| entry.version != CACHE_SCHEMA_VERSION || entry.is_expired(Utc::now()))
            .unwrap_or(false);
        if evict {
            *slot = None;
            return Ok(None);
        }
        Ok(slot.clone())
    }

    async fn clear(&self) -> Result<()> {
        *self.slot.lock().await = None;
        Ok(())
    }
}

const CACHE_FILE: &str = "producers_cache.json";

/// One JSON file under a base directory. Save writes a sibling temp file
/// and renames it over the slot, so readers never observe a partial write.
#[derive(Debug, Clone)]
pub struct FileCache {
    base_path: PathBuf,
}

impl FileCache {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn file_path(&self) -> PathBuf {
        self.base_path.join(CACHE_FILE)
    }
}

impl CacheStore for FileCache {
    async fn save(&self, records: &[ProducerRecord]) -> Result<()> {
        let entry = CacheEntry::new(records.to_vec());
        let json = serde_json::to_vec(&entry)?;

        fs::create_dir_all(&self.base_path)?;
        let tmp_path = self.base_path.join(format!("{}.tmp", CACHE_FILE));
        fs::write(&tmp_path, &json)?;
        fs::rename(&tmp_path, self.file_path())?;
        Ok(())
    }

    async fn load(&self) -> Result<Option<CacheEntry>> {
        let path = self.file_path();
        if !path.exists() {
            return Ok(None);
        }

        let data = fs::read(&path)?;
        let entry: CacheEntry = match serde_json::from_slice(&data) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Discarding unreadable cache file: {}", e);
                let _ = fs::remove_file(&path);
                return Ok(None);
            }
        };

        if entry.version != CACHE_SCHEMA_VERSION {
            tracing::info!(
                "Cache schema version {} != {}, evicting",
                entry.version,
                CACHE_SCHEMA_VERSION
            );
            let _ = fs::remove_file(&path);
            return Ok(None);
        }

        if entry.is_expired(Utc::now()) {
            tracing::info!("Cache entry past expiry window, evicting");
            let _ = fs::remove_file(&path);
            return Ok(None);
        }

        Ok(Some(entry))
    }

    async fn clear(&self) -> Result<()> {
        let path = self.file_path();
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::normalize::normalize;
    use crate::domain::model::{RawLicenseRecord, RawRecord, CACHE_EXPIRY_DAYS};
    use chrono::Duration;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::TempDir;

    fn records(n: usize) -> Vec<ProducerRecord> {
        let mut rng = StdRng::seed_from_u64(3);
        (0..n)
            .map(|i| {
                let raw = RawLicenseRecord {
                    legal_name: Some(format!("Producer {}", i)),
                    naics_code: Some("323111".to_string()),
                    latitude: Some("41.88".to_string()),
                    longitude: Some("-87.63".to_string()),
                    ..Default::default()
                };
                normalize(RawRecord::License(raw), &mut rng)
            })
            .collect()
    }

    #[tokio::test]
    async fn test_memory_roundtrip() {
        let cache = MemoryCache::new();
        assert!(cache.load().await.unwrap().is_none());

        cache.save(&records(3)).await.unwrap();
        let entry = cache.load().await.unwrap().unwrap();
        assert_eq!(entry.records.len(), 3);
        assert_eq!(entry.version, CACHE_SCHEMA_VERSION);
    }

    #[tokio::test]
    async fn test_memory_save_replaces_whole_slot() {
        let cache = MemoryCache::new();
        cache.save(&records(5)).await.unwrap();
        cache.save(&records(2)).await.unwrap();
        assert_eq!(cache.load().await.unwrap().unwrap().records.len(), 2);
    }

    #[tokio::test]
    async fn test_memory_expired_entry_is_evicted() {
        let cache = MemoryCache::new();
        let mut entry = CacheEntry::new(records(1));
        entry.saved_at = Utc::now() - Duration::days(CACHE_EXPIRY_DAYS + 1);
        cache.put(entry).await;

        assert!(cache.load().await.unwrap().is_none());
        // Stays evicted, not just filtered.
        assert!(cache.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_stale_but_unexpired_entry_survives() {
        let cache = MemoryCache::new();
        let mut entry = CacheEntry::new(records(5));
        entry.saved_at = Utc::now() - Duration::days(2);
        cache.put(entry).await;

        let loaded = cache.load().await.unwrap().unwrap();
        assert_eq!(loaded.records.len(), 5);
        assert!(loaded.is_stale(Utc::now()));
    }

    #[tokio::test]
    async fn test_memory_version_mismatch_is_evicted() {
        let cache = MemoryCache::new();
        let mut entry = CacheEntry::new(records(1));
        entry.version = CACHE_SCHEMA_VERSION + 1;
        cache.put(entry).await;
        assert!(cache.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_clear() {
        let cache = MemoryCache::new();
        cache.save(&records(1)).await.unwrap();
        cache.clear().await.unwrap();
        assert!(cache.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_file_roundtrip() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::new(dir.path());

        assert!(cache.load().await.unwrap().is_none());
        cache.save(&records(4)).await.unwrap();

        let entry = cache.load().await.unwrap().unwrap();
        assert_eq!(entry.records.len(), 4);
        assert_eq!(entry.records[0].name, "Producer 0");
    }

    #[tokio::test]
    async fn test_file_expired_entry_is_deleted() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::new(dir.path());

        let mut entry = CacheEntry::new(records(1));
        entry.saved_at = Utc::now() - Duration::days(CACHE_EXPIRY_DAYS + 1);
        fs::create_dir_all(dir.path()).unwrap();
        fs::write(
            dir.path().join(CACHE_FILE),
            serde_json::to_vec(&entry).unwrap(),
        )
        .unwrap();

        assert!(cache.load().await.unwrap().is_none());
        assert!(!dir.path().join(CACHE_FILE).exists());
    }

    #[tokio::test]
    async fn test_file_garbage_is_discarded_not_fatal() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::new(dir.path());
        fs::write(dir.path().join(CACHE_FILE), b"{not json").unwrap();

        assert!(cache.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_file_clear_removes_slot() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::new(dir.path());
        cache.save(&records(1)).await.unwrap();
        cache.clear().await.unwrap();
        assert!(cache.load().await.unwrap().is_none());
        // Clearing an empty slot is fine too.
        cache.clear().await.unwrap();
    }
}

//! Aggregation orchestrator: composes the source adapters, normalizer,
//! deduplicator, and cache store behind the one public entry point.
//!
//! The cascade is an explicit ordered sequence, one level per block, each
//! logged when it takes over:
//!   1. fresh-enough cache (skipped on force refresh)
//!   2. full refresh from both sources, persisted
//!   3. last cache entry regardless of staleness
//!   4. direct source fetch with a large page, bypassing the cache
//!   5. hardcoded placeholder record
//! Availability wins over freshness and completeness at every level; no
//! error ever crosses `get_producer_data`.

use crate::core::coords;
use crate::core::dedupe::dedupe;
use crate::core::geodata::GeoCatalog;
use crate::core::license::LicenseRegistry;
use crate::core::normalize::normalize;
use crate::domain::model::{
    Capacity, Location, ProducerRecord, QueryParams, RawRecord, ScoreBreakdown, TransitAccess,
    CITY_CENTER_LAT, CITY_CENTER_LNG,
};
use crate::domain::ports::{CacheStore, ConfigProvider, ProducerSource};
use crate::utils::error::Result;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use tokio::sync::Mutex;

/// Page size for the last-resort direct fetch.
const LAST_RESORT_LIMIT: usize = 999;

pub struct ProducerAggregator<S: CacheStore, C: ConfigProvider> {
    registry: LicenseRegistry,
    geodata: GeoCatalog,
    cache: S,
    config: C,
    rng: Mutex<StdRng>,
}

impl<S: CacheStore, C: ConfigProvider> ProducerAggregator<S, C> {
    pub fn new(cache: S, config: C) -> Self {
        Self::with_rng(cache, config, StdRng::from_entropy())
    }

    /// Seeded variant for deterministic synthesized fields.
    pub fn with_seed(cache: S, config: C, seed: u64) -> Self {
        Self::with_rng(cache, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(cache: S, config: C, rng: StdRng) -> Self {
        let registry = LicenseRegistry::with_timeout(
            config.api_endpoint().to_string(),
            Duration::from_secs(config.request_timeout_secs()),
        );
        Self {
            registry,
            geodata: GeoCatalog::new(),
            cache,
            config,
            rng: Mutex::new(rng),
        }
    }

    /// The only entry point the UI layer consumes. Always resolves to a
    /// non-empty list; degrades in freshness and completeness, never fails.
    pub async fn get_producer_data(
        &self,
        params: &QueryParams,
        force_refresh: bool,
    ) -> Vec<ProducerRecord> {
        if !force_refresh {
            match self.cache.load().await {
                Ok(Some(entry)) => {
                    tracing::info!("Serving {} producers from cache", entry.records.len());
                    return entry.records;
                }
                Ok(None) => {}
                Err(e) => tracing::warn!("Cache load failed: {}", e),
            }
        }

        match self.refresh(params).await {
            Ok(records) if !records.is_empty() => return records,
            Ok(_) => tracing::warn!("Refresh produced no records"),
            Err(e) => tracing::warn!("Refresh failed: {}", e),
        }

        if let Ok(Some(entry)) = self.cache.load().await {
            tracing::warn!(
                "Serving degraded cache data ({} producers)",
                entry.records.len()
            );
            return entry.records;
        }

        let direct = self.direct_fetch().await;
        if !direct.is_empty() {
            return direct;
        }

        tracing::error!("All data sources failed, returning placeholder producer");
        vec![placeholder_producer()]
    }

    /// Advisory signal: true when the UI should kick off a background
    /// refresh. Absent or unreadable cache counts as stale.
    pub async fn is_cache_stale(&self) -> bool {
        match self.cache.load().await {
            Ok(Some(entry)) => entry.is_stale(Utc::now()),
            _ => true,
        }
    }

    /// Level 2: pull both sources, normalize, repair, dedupe, persist.
    /// License-sourced records are concatenated ahead of geodata records so
    /// registry provenance wins dedupe ties. A failed persist fails the
    /// level; the cascade takes over from there.
    async fn refresh(&self, params: &QueryParams) -> Result<Vec<ProducerRecord>> {
        tracing::info!("Refreshing producer data from sources");

        let mut effective = params.clone();
        if effective.limit.is_none() {
            effective.limit = Some(self.config.page_limit());
        }

        let geo_raw = self.geodata.sites();
        let license_raw = self.registry.fetch_printing(&effective).await;
        tracing::debug!(
            "Fetched {} license records, {} geodata sites",
            license_raw.len(),
            geo_raw.len()
        );

        let mut rng = self.rng.lock().await;
        let mut records: Vec<ProducerRecord> = Vec::new();
        for raw in license_raw {
            records.push(normalize(RawRecord::License(raw), &mut *rng));
        }
        for raw in geo_raw {
            records.push(normalize(RawRecord::Geo(raw), &mut *rng));
        }

        // Idempotent second pass; the normalizer already repaired each one.
        for record in &mut records {
            coords::repair(record, &mut *rng);
        }
        drop(rng);

        let records = dedupe(records);
        tracing::info!("Aggregated {} producers after dedupe", records.len());

        self.cache.save(&records).await?;
        Ok(records)
    }

    /// Level 4: both sources again with a large page, no caching at all.
    async fn direct_fetch(&self) -> Vec<ProducerRecord> {
        tracing::warn!(
            "Last resort: direct source fetch with page size {}",
            LAST_RESORT_LIMIT
        );

        let mut raw = ProducerSource::fetch(&self.registry, LAST_RESORT_LIMIT).await;
        raw.extend(ProducerSource::fetch(&self.geodata, LAST_RESORT_LIMIT).await);

        let mut rng = self.rng.lock().await;
        raw.into_iter()
            .map(|record| normalize(record, &mut *rng))
            .collect()
    }
}

/// Level 5: the unconditional floor of the cascade. One synthetic producer
/// at the city center so the non-empty contract holds even if every source
/// and cache level fails.
pub fn placeholder_producer() -> ProducerRecord {
    ProducerRecord {
        id: "emergency-fallback-1".to_string(),
        name: "Chicago Printing Services".to_string(),
        rating: 4.5,
        reviews: 27,
        location: Location {
            lat: CITY_CENTER_LAT,
            lng: CITY_CENTER_LNG,
            city: "Chicago".to_string(),
            address: "123 Main St, Chicago, IL 60601".to_string(),
            neighborhood: "Downtown".to_string(),
            zip: Some("60601".to_string()),
            ward: None,
            industrial_corridor: None,
        },
        distance: 0.0,
        capabilities: vec![
            "Digital Printing".to_string(),
            "Offset Printing".to_string(),
        ],
        specialties: vec!["Business Cards".to_string(), "Flyers".to_string()],
        turnaround: "3-5 business days".to_string(),
        price_range: "$$".to_string(),
        availability_percent: 75,
        sustainability_score: 80,
        website: None,
        email: Some("info@chicagoprinting.com".to_string()),
        wifi_enabled: false,
        verification_sources: vec!["Emergency Backup Data".to_string()],
        last_verified: Utc::now().date_naive(),
        naics_code: "323111".to_string(),
        zoning_compliant: true,
        sustainability_badges: vec!["Energy Efficient".to_string()],
        equipment: vec!["HP Indigo 12000".to_string()],
        economic_zones: vec![],
        transit_access: TransitAccess {
            truck_route: false,
            public_transit: true,
            bikeways: false,
        },
        capacity: Capacity {
            available_hours: 20,
            lead_time: "3-5 days".to_string(),
            max_size: "24 x 36 inches".to_string(),
        },
        scores: ScoreBreakdown {
            trust: 75,
            capability: 70,
            accessibility: 70,
            sustainability: 80,
            equity: 70,
        },
        license_data: None,
        osm_data: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::domain::model::CacheEntry;
    use crate::utils::error::AggError;
    use chrono::Duration as ChronoDuration;
    use httpmock::prelude::*;

    struct TestConfig {
        endpoint: String,
        timeout_secs: u64,
    }

    impl TestConfig {
        fn new(endpoint: String) -> Self {
            Self {
                endpoint,
                timeout_secs: 2,
            }
        }
    }

    impl ConfigProvider for TestConfig {
        fn api_endpoint(&self) -> &str {
            &self.endpoint
        }

        fn cache_path(&self) -> &str {
            "./cache"
        }

        fn output_path(&self) -> &str {
            "./output"
        }

        fn request_timeout_secs(&self) -> u64 {
            self.timeout_secs
        }

        fn page_limit(&self) -> usize {
            50
        }
    }

    /// Cache double whose save always fails, for driving the lower cascade
    /// levels.
    #[derive(Clone, Default)]
    struct BrokenSaveCache {
        inner: MemoryCache,
    }

    impl CacheStore for BrokenSaveCache {
        async fn save(&self, _records: &[ProducerRecord]) -> crate::utils::error::Result<()> {
            Err(AggError::CacheError {
                message: "disk full".to_string(),
            })
        }

        async fn load(&self) -> crate::utils::error::Result<Option<CacheEntry>> {
            self.inner.load().await
        }

        async fn clear(&self) -> crate::utils::error::Result<()> {
            self.inner.clear().await
        }
    }

    fn healthy_license_body() -> serde_json::Value {
        serde_json::json!([
            {
                "license_number": "9001",
                "legal_name": "WEST TOWN PRESS LLC",
                "doing_business_as_name": "WEST TOWN PRESS",
                "naics_code": "323111",
                "ward": "27",
                "latitude": "41.89",
                "longitude": "-87.67"
            }
        ])
    }

    #[tokio::test]
    async fn test_healthy_aggregation_merges_both_sources() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/licenses");
            then.status(200).json_body(healthy_license_body());
        });

        let aggregator = ProducerAggregator::with_seed(
            MemoryCache::new(),
            TestConfig::new(server.url("/licenses")),
            11,
        );
        let records = aggregator
            .get_producer_data(&QueryParams::default(), false)
            .await;

        api_mock.assert();
        assert!(records.len() > 10);
        assert!(records.iter().any(|r| r.name == "WEST TOWN PRESS"));
        assert!(records.iter().any(|r| r.name == "Spudnik Press Cooperative"));

        // License records come first.
        assert_eq!(records[0].name, "WEST TOWN PRESS");

        for record in &records {
            assert!(record.location.has_finite_coords());
            assert!(!record.verification_sources.is_empty());
            assert!(!record.name.is_empty());
        }
    }

    #[tokio::test]
    async fn test_second_call_is_served_from_cache() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/licenses");
            then.status(200).json_body(healthy_license_body());
        });

        let aggregator = ProducerAggregator::with_seed(
            MemoryCache::new(),
            TestConfig::new(server.url("/licenses")),
            11,
        );

        let first = aggregator
            .get_producer_data(&QueryParams::default(), false)
            .await;
        let second = aggregator
            .get_producer_data(&QueryParams::default(), false)
            .await;

        assert_eq!(api_mock.hits(), 1);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_force_refresh_skips_cache() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/licenses");
            then.status(200).json_body(healthy_license_body());
        });

        let aggregator = ProducerAggregator::with_seed(
            MemoryCache::new(),
            TestConfig::new(server.url("/licenses")),
            11,
        );

        aggregator
            .get_producer_data(&QueryParams::default(), false)
            .await;
        aggregator
            .get_producer_data(&QueryParams::default(), true)
            .await;

        assert_eq!(api_mock.hits(), 2);
    }

    #[tokio::test]
    async fn test_primed_cache_is_returned_unchanged() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/licenses");
            then.status(200).json_body(healthy_license_body());
        });

        let cache = MemoryCache::new();
        let cached: Vec<ProducerRecord> = (0..5)
            .map(|i| {
                let mut record = placeholder_producer();
                record.id = format!("cached-{}", i);
                record.name = format!("Cached Producer {}", i);
                record
            })
            .collect();
        let mut entry = CacheEntry::new(cached.clone());
        entry.saved_at = Utc::now() - ChronoDuration::days(2);
        cache.put(entry).await;

        let aggregator = ProducerAggregator::with_seed(
            cache,
            TestConfig::new(server.url("/licenses")),
            11,
        );
        let records = aggregator
            .get_producer_data(&QueryParams::default(), false)
            .await;

        // Two days old is stale but not expired: served as-is, no network.
        assert_eq!(records, cached);
        assert_eq!(api_mock.hits(), 0);
        assert!(aggregator.is_cache_stale().await);
    }

    #[tokio::test]
    async fn test_expired_cache_triggers_fresh_aggregation() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/licenses");
            then.status(200).json_body(healthy_license_body());
        });

        let cache = MemoryCache::new();
        let mut entry = CacheEntry::new(vec![placeholder_producer()]);
        entry.saved_at = Utc::now() - ChronoDuration::days(8);
        cache.put(entry).await;

        let aggregator = ProducerAggregator::with_seed(
            cache,
            TestConfig::new(server.url("/licenses")),
            11,
        );
        let records = aggregator
            .get_producer_data(&QueryParams::default(), false)
            .await;

        assert_eq!(api_mock.hits(), 1);
        assert!(records.iter().any(|r| r.name == "WEST TOWN PRESS"));
    }

    #[tokio::test]
    async fn test_registry_outage_still_yields_merged_data() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/licenses");
            then.status(500);
        });

        let aggregator = ProducerAggregator::with_seed(
            MemoryCache::new(),
            TestConfig::new(server.url("/licenses")),
            11,
        );
        let records = aggregator
            .get_producer_data(&QueryParams::default(), false)
            .await;

        // Bundled license data plus geodata, deduplicated.
        assert!(records.len() > 20);
        assert!(records
            .iter()
            .any(|r| r.name == "MIDAMERICAN PRINTING SYSTEMS"));
        assert!(records.iter().any(|r| r.name == "Spudnik Press Cooperative"));

        // Chain shops with several bundled licenses collapse to one record.
        let fedex: Vec<_> = records
            .iter()
            .filter(|r| r.name.eq_ignore_ascii_case("fedex office"))
            .collect();
        assert_eq!(fedex.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_persist_degrades_to_stale_cache() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/licenses");
            then.status(200).json_body(healthy_license_body());
        });

        let cache = BrokenSaveCache::default();
        let mut stale = placeholder_producer();
        stale.name = "Stale But Present".to_string();
        let mut entry = CacheEntry::new(vec![stale]);
        entry.saved_at = Utc::now() - ChronoDuration::days(6);
        cache.inner.put(entry).await;

        let aggregator = ProducerAggregator::with_seed(
            cache,
            TestConfig::new(server.url("/licenses")),
            11,
        );
        let records = aggregator
            .get_producer_data(&QueryParams::default(), true)
            .await;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Stale But Present");
    }

    #[tokio::test]
    async fn test_failed_persist_without_cache_falls_to_direct_fetch() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/licenses");
            then.status(200).json_body(healthy_license_body());
        });

        let aggregator = ProducerAggregator::with_seed(
            BrokenSaveCache::default(),
            TestConfig::new(server.url("/licenses")),
            11,
        );
        let records = aggregator
            .get_producer_data(&QueryParams::default(), false)
            .await;

        // Refresh hit once, direct fetch hit once more.
        assert_eq!(api_mock.hits(), 2);
        assert!(!records.is_empty());
        assert!(records.iter().any(|r| r.name == "WEST TOWN PRESS"));
    }

    #[tokio::test]
    async fn test_is_cache_stale_signals() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/licenses");
            then.status(200).json_body(healthy_license_body());
        });

        let cache = MemoryCache::new();
        let aggregator = ProducerAggregator::with_seed(
            cache.clone(),
            TestConfig::new(server.url("/licenses")),
            11,
        );

        // No cache at all: stale.
        assert!(aggregator.is_cache_stale().await);

        aggregator
            .get_producer_data(&QueryParams::default(), false)
            .await;
        assert!(!aggregator.is_cache_stale().await);

        let mut entry = cache.load().await.unwrap().unwrap();
        entry.saved_at = Utc::now() - ChronoDuration::days(2);
        cache.put(entry).await;
        assert!(aggregator.is_cache_stale().await);
    }

    #[test]
    fn test_placeholder_satisfies_record_invariants() {
        let record = placeholder_producer();
        assert!(record.location.has_finite_coords());
        assert!(!record.name.is_empty());
        assert!(!record.verification_sources.is_empty());
        assert!(!record.equipment.is_empty());
    }
}

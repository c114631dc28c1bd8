//! Business license registry adapter.
//!
//! Wraps the city data portal's license endpoint behind a fetch that cannot
//! fail: any transport problem, upstream rejection, or malformed body is
//! answered with the bundled dataset instead.

use crate::core::license_fallback::fallback_licenses;
use crate::domain::model::{QueryParams, RawLicenseRecord, RawRecord};
use crate::domain::ports::ProducerSource;
use crate::utils::error::{AggError, Result};
use crate::utils::validation::validate_where_clause;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://data.cityofchicago.org/resource/r5kz-chrr.json";
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

const DEFAULT_PAGE_LIMIT: usize = 50;

/// NAICS family covering the printing industry.
const PRINTING_NAICS_PREFIX: &str = "323";
const PRINT_NAME_TERMS: &[&str] = &["print", "press", "media", "graphics", "publishing"];

/// When the printing filter strips every record, the WidenToUnfiltered
/// policy keeps this many unfiltered records instead of returning nothing.
const WIDEN_HEAD: usize = 10;

pub struct LicenseRegistry {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl LicenseRegistry {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            timeout,
        }
    }

    /// One attempt against the live registry. Query parameters are limited
    /// to simple equality filters; `$where` clauses carrying pattern-match
    /// operators are dropped because the upstream rejects them with a 400.
    pub async fn fetch(&self, params: &QueryParams) -> Result<Vec<RawLicenseRecord>> {
        let mut query: Vec<(&str, String)> = vec![(
            "$limit",
            params.limit.unwrap_or(DEFAULT_PAGE_LIMIT).to_string(),
        )];

        if let Some(zip) = &params.zip_code {
            query.push(("zip_code", zip.clone()));
        }
        if let Some(license_type) = &params.license_type {
            query.push(("license_description", license_type.clone()));
        }
        if let Some(ward) = &params.ward {
            query.push(("ward", ward.clone()));
        }
        if let Some(clause) = &params.where_clause {
            if validate_where_clause(clause) {
                query.push(("$where", clause.clone()));
            } else {
                tracing::debug!("Dropping $where clause with pattern-match operator");
            }
        }

        tracing::debug!("Requesting licenses from {}", self.base_url);
        let response = self
            .client
            .get(&self.base_url)
            .query(&query)
            .header("Accept", "application/json")
            .timeout(self.timeout)
            .send()
            .await?;

        tracing::debug!("Registry response status: {}", response.status());
        if !response.status().is_success() {
            return Err(AggError::UpstreamError {
                status: response.status().as_u16(),
                endpoint: self.base_url.clone(),
            });
        }

        let records: Vec<RawLicenseRecord> = response.json().await?;
        Ok(records)
    }

    /// The failure-tolerant fetch: the bundled dataset stands in whenever
    /// the registry cannot answer. Never fails; an empty-but-successful
    /// upstream response is passed through as-is.
    pub async fn fetch_or_fallback(&self, params: &QueryParams) -> Vec<RawLicenseRecord> {
        match self.fetch(params).await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("License registry unavailable ({}), using bundled dataset", e);
                fallback_licenses()
            }
        }
    }

    /// Narrowing adapter for printing businesses. Pulls a bounded page and
    /// filters locally (the upstream's LIKE operator is off-limits); when
    /// the filter strips everything, widens back to the first unfiltered
    /// records so callers still get output whenever the source produced any.
    pub async fn fetch_printing(&self, params: &QueryParams) -> Vec<RawLicenseRecord> {
        let data = self.fetch_or_fallback(params).await;

        let printing: Vec<RawLicenseRecord> = data
            .iter()
            .filter(|record| is_printing_business(record))
            .cloned()
            .collect();

        if !printing.is_empty() {
            return printing;
        }

        if !data.is_empty() {
            tracing::warn!(
                "No printing-industry matches among {} records, widening to first {}",
                data.len(),
                WIDEN_HEAD
            );
        }
        data.into_iter().take(WIDEN_HEAD).collect()
    }
}

#[async_trait]
impl ProducerSource for LicenseRegistry {
    fn name(&self) -> &'static str {
        "license-registry"
    }

    async fn fetch(&self, limit: usize) -> Vec<RawRecord> {
        self.fetch_or_fallback(&QueryParams::with_limit(limit))
            .await
            .into_iter()
            .map(RawRecord::License)
            .collect()
    }
}

/// Printing relevance: NAICS prefix match, or a print-related term in the
/// trade name.
fn is_printing_business(record: &RawLicenseRecord) -> bool {
    let naics_match = record
        .naics_code
        .as_deref()
        .is_some_and(|code| code.starts_with(PRINTING_NAICS_PREFIX));

    let name_match = record.doing_business_as_name.as_deref().is_some_and(|name| {
        let lowered = name.to_lowercase();
        PRINT_NAME_TERMS.iter().any(|term| lowered.contains(term))
    });

    naics_match || name_match
}

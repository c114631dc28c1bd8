pub mod cache;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::toml_config::TomlConfig;

pub use cache::{FileCache, MemoryCache};
pub use crate::core::aggregator::ProducerAggregator;
pub use crate::core::geodata::GeoCatalog;
pub use crate::core::license::LicenseRegistry;
pub use domain::model::{CacheEntry, ProducerRecord, QueryParams};
pub use domain::ports::{CacheStore, ConfigProvider, ProducerSource};
pub use utils::error::{AggError, Result};

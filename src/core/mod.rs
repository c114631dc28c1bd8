pub mod aggregator;
pub mod coords;
pub mod dedupe;
pub mod geodata;
pub mod license;
pub mod license_fallback;
pub mod normalize;

pub use crate::domain::model::{CacheEntry, ProducerRecord, QueryParams, RawRecord};
pub use crate::domain::ports::{CacheStore, ConfigProvider, ProducerSource};
pub use crate::utils::error::Result;

use crate::core::license::DEFAULT_ENDPOINT;
use crate::core::ConfigProvider;
use crate::domain::model::QueryParams;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "producer-data")]
#[command(about = "Aggregate local producer data from the license registry and open geodata")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub api_endpoint: String,

    #[arg(long, default_value = "./cache")]
    pub cache_path: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value = "50")]
    pub limit: usize,

    #[arg(long, help = "Filter by ZIP code")]
    pub zip: Option<String>,

    #[arg(long, help = "Filter by ward number")]
    pub ward: Option<String>,

    #[arg(long, help = "Filter by license description")]
    pub license_type: Option<String>,

    #[arg(long, default_value = "10")]
    pub timeout_secs: u64,

    #[arg(long, help = "Bypass the cache and refresh from sources")]
    pub force_refresh: bool,

    #[arg(long, value_delimiter = ',', default_value = "json")]
    pub formats: Vec<String>,

    #[arg(long, help = "Read settings from a TOML file instead of flags")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn query_params(&self) -> QueryParams {
        QueryParams {
            limit: Some(self.limit),
            zip_code: self.zip.clone(),
            license_type: self.license_type.clone(),
            ward: self.ward.clone(),
            where_clause: None,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn cache_path(&self) -> &str {
        &self.cache_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn request_timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    fn page_limit(&self) -> usize {
        self.limit
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api_endpoint", &self.api_endpoint)?;
        validation::validate_path("cache_path", &self.cache_path)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_range("limit", self.limit, 1, 999)?;
        validation::validate_positive_number("timeout_secs", self.timeout_secs as usize, 1)?;
        Ok(())
    }
}

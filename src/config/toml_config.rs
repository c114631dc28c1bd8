use crate::core::ConfigProvider;
use crate::domain::model::QueryParams;
use crate::utils::error::{AggError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub query: Option<QueryConfig>,
    pub cache: CacheConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    pub limit: Option<usize>,
    pub zip_code: Option<String>,
    pub license_type: Option<String>,
    pub ward: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub formats: Vec<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AggError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| AggError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR_NAME}` with the environment value; unknown variables
    /// are left in place.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        crate::utils::validation::validate_url("source.endpoint", &self.source.endpoint)?;
        crate::utils::validation::validate_path("cache.path", &self.cache.path)?;
        crate::utils::validation::validate_path("output.path", &self.output.path)?;

        if let Some(limit) = self.query.as_ref().and_then(|q| q.limit) {
            crate::utils::validation::validate_range("query.limit", limit, 1, 999)?;
        }

        let valid_formats = ["json", "csv"];
        for format in &self.output.formats {
            if !valid_formats.contains(&format.as_str()) {
                return Err(AggError::InvalidConfigValueError {
                    field: "output.formats".to_string(),
                    value: format.clone(),
                    reason: format!(
                        "Unsupported format. Valid formats: {}",
                        valid_formats.join(", ")
                    ),
                });
            }
        }

        Ok(())
    }

    pub fn query_params(&self) -> QueryParams {
        let query = self.query.clone().unwrap_or(QueryConfig {
            limit: None,
            zip_code: None,
            license_type: None,
            ward: None,
        });
        QueryParams {
            limit: query.limit,
            zip_code: query.zip_code,
            license_type: query.license_type,
            ward: query.ward,
            where_clause: None,
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn api_endpoint(&self) -> &str {
        &self.source.endpoint
    }

    fn cache_path(&self) -> &str {
        &self.cache.path
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn request_timeout_secs(&self) -> u64 {
        self.source.timeout_seconds.unwrap_or(10)
    }

    fn page_limit(&self) -> usize {
        self.query
            .as_ref()
            .and_then(|q| q.limit)
            .unwrap_or(50)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[source]
endpoint = "https://data.cityofchicago.org/resource/r5kz-chrr.json"
timeout_seconds = 10

[query]
limit = 25
ward = "27"

[cache]
path = "./cache"

[output]
path = "./out"
formats = ["json", "csv"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.request_timeout_secs(), 10);
        assert_eq!(config.page_limit(), 25);
        assert_eq!(config.query_params().ward.as_deref(), Some("27"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_REGISTRY_ENDPOINT", "https://test.registry.com/data.json");

        let toml_content = r#"
[source]
endpoint = "${TEST_REGISTRY_ENDPOINT}"

[cache]
path = "./cache"

[output]
path = "./out"
formats = ["json"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.source.endpoint, "https://test.registry.com/data.json");

        std::env::remove_var("TEST_REGISTRY_ENDPOINT");
    }

    #[test]
    fn test_invalid_endpoint_fails_validation() {
        let toml_content = r#"
[source]
endpoint = "not-a-url"

[cache]
path = "./cache"

[output]
path = "./out"
formats = ["json"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_output_format_rejected() {
        let toml_content = r#"
[source]
endpoint = "https://example.com/data.json"

[cache]
path = "./cache"

[output]
path = "./out"
formats = ["xml"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[source]
endpoint = "https://example.com/data.json"

[cache]
path = "./cache"

[output]
path = "./out"
formats = ["json"]
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.source.endpoint, "https://example.com/data.json");
    }
}

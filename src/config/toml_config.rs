use crate::adapters::http::DEFAULT_BASE_URL;
use crate::core::project::DEFAULT_PROJECT_PREFIX;
use crate::core::ConfigProvider;
use crate::domain::model::Credentials;
use crate::utils::error::{Result, SyncError};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub project: ProjectConfig,
    pub products: ProductsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name_prefix: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductsConfig {
    pub input_path: String,
    pub output_path: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SyncError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SyncError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn base_url(&self) -> &str {
        &self.api.base_url
    }

    fn credentials(&self) -> Credentials {
        Credentials {
            client_id: self.api.client_id.clone(),
            client_secret: self.api.client_secret.clone(),
        }
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.api.timeout_seconds.map(Duration::from_secs)
    }

    fn project_prefix(&self) -> &str {
        self.project
            .name_prefix
            .as_deref()
            .unwrap_or(DEFAULT_PROJECT_PREFIX)
    }

    fn products_input(&self) -> &str {
        &self.products.input_path
    }

    fn products_output(&self) -> &str {
        &self.products.output_path
    }
}

impl TomlConfig {
    /// Checks only what a run without network access needs: project prefix and file paths.
    pub fn validate_offline(&self) -> Result<()> {
        if let Some(prefix) = &self.project.name_prefix {
            validate_non_empty_string("project.name_prefix", prefix)?;
        }

        validate_path("products.input_path", &self.products.input_path)?;
        validate_path("products.output_path", &self.products.output_path)?;

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api.base_url", &self.api.base_url)?;
        validate_non_empty_string("api.client_id", &self.api.client_id)?;
        validate_non_empty_string("api.client_secret", &self.api.client_secret)?;

        if let Some(timeout) = self.api.timeout_seconds {
            validate_positive_number("api.timeout_seconds", timeout, 1)?;
        }

        self.validate_offline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC: &str = r#"
[api]
client_id = "4907c6f3"
client_secret = "s3cret"

[products]
input_path = "products.csv"
output_path = "out/classified.csv"
"#;

    #[test]
    fn test_parse_basic_toml_config() {
        let config = TomlConfig::from_toml_str(BASIC).unwrap();

        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.credentials().client_id, "4907c6f3");
        assert_eq!(config.project_prefix(), DEFAULT_PROJECT_PREFIX);
        assert_eq!(config.request_timeout(), None);
        assert_eq!(config.products_output(), "out/classified.csv");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TARIFF_SYNC_TEST_SECRET", "from-env");

        let config = TomlConfig::from_toml_str(
            r#"
[api]
base_url = "http://localhost:9000/v1"
client_id = "client"
client_secret = "${TARIFF_SYNC_TEST_SECRET}"
timeout_seconds = 15

[project]
name_prefix = "Nightly"

[products]
input_path = "in.csv"
output_path = "out.csv"
"#,
        )
        .unwrap();

        assert_eq!(config.api.client_secret, "from-env");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.project_prefix(), "Nightly");

        std::env::remove_var("TARIFF_SYNC_TEST_SECRET");
    }

    #[test]
    fn test_unset_env_var_fails_validation() {
        let config = TomlConfig::from_toml_str(
            r#"
[api]
client_id = "client"
client_secret = "${TARIFF_SYNC_TEST_NEVER_SET}"

[products]
input_path = "in.csv"
output_path = "out.csv"
"#,
        )
        .unwrap();

        assert_eq!(config.api.client_secret, "${TARIFF_SYNC_TEST_NEVER_SET}");
        assert!(config.validate().is_err());
        assert!(config.validate_offline().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = TomlConfig::from_toml_str(BASIC).unwrap();
        config.api.base_url = "invalid-url".to_string();
        assert!(config.validate().is_err());

        let mut config = TomlConfig::from_toml_str(BASIC).unwrap();
        config.api.timeout_seconds = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_offline_validation_still_checks_paths() {
        let mut config = TomlConfig::from_toml_str(BASIC).unwrap();
        config.api.client_id = String::new();
        assert!(config.validate_offline().is_ok());

        config.products.input_path = String::new();
        assert!(config.validate_offline().is_err());
    }

    #[test]
    fn test_missing_section_is_a_parse_error() {
        let err = TomlConfig::from_toml_str("[api]\nclient_id = \"x\"\n").unwrap_err();
        assert!(matches!(err, SyncError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.products_input(), "products.csv");
    }
}

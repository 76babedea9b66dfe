use crate::config::Settings;
use crate::utils::error::{Result, StoreError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional `shopswift.toml` file. Every key may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: Option<SourceConfig>,
    pub images: Option<ImageConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageConfig {
    pub fallback_url: Option<String>,
    pub check_images: Option<bool>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(StoreError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| StoreError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| StoreError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Overwrites the fields of `settings` that this file sets.
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(source) = &self.source {
            if let Some(base_url) = &source.base_url {
                settings.api_base_url = base_url.clone();
            }
            if let Some(timeout) = source.timeout_seconds {
                settings.timeout_seconds = timeout;
            }
        }
        if let Some(images) = &self.images {
            if let Some(fallback_url) = &images.fallback_url {
                settings.fallback_image_url = fallback_url.clone();
            }
            if let Some(check) = images.check_images {
                settings.check_images = check;
            }
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(source) = &self.source {
            if let Some(base_url) = &source.base_url {
                validation::validate_url("source.base_url", base_url)?;
            }
            if let Some(timeout) = source.timeout_seconds {
                validation::validate_range("source.timeout_seconds", timeout, 1, 300)?;
            }
        }
        if let Some(fallback_url) = self.images.as_ref().and_then(|i| i.fallback_url.as_ref()) {
            validation::validate_url("images.fallback_url", fallback_url)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[source]
base_url = "https://store.example.com/api"
timeout_seconds = 3

[images]
fallback_url = "https://cdn.example.com/placeholder.png"
check_images = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());

        let mut settings = Settings::default();
        config.apply_to(&mut settings);
        assert_eq!(settings.api_base_url, "https://store.example.com/api");
        assert_eq!(settings.timeout_seconds, 3);
        assert_eq!(settings.fallback_image_url, "https://cdn.example.com/placeholder.png");
        assert!(settings.check_images);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = TomlConfig::from_toml_str("[source]\ntimeout_seconds = 20\n").unwrap();

        let mut settings = Settings::default();
        config.apply_to(&mut settings);
        assert_eq!(settings.api_base_url, Settings::default().api_base_url);
        assert_eq!(settings.timeout_seconds, 20);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SHOPSWIFT_TEST_BASE_URL", "https://test.api.com");

        let config =
            TomlConfig::from_toml_str("[source]\nbase_url = \"${SHOPSWIFT_TEST_BASE_URL}\"\n")
                .unwrap();
        assert_eq!(
            config.source.unwrap().base_url.as_deref(),
            Some("https://test.api.com")
        );

        std::env::remove_var("SHOPSWIFT_TEST_BASE_URL");
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let bad_url = TomlConfig::from_toml_str("[source]\nbase_url = \"invalid-url\"\n").unwrap();
        assert!(bad_url.validate().is_err());

        let bad_timeout = TomlConfig::from_toml_str("[source]\ntimeout_seconds = 0\n").unwrap();
        assert!(bad_timeout.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[source\nbase_url = 1").unwrap_err();
        assert!(matches!(err, StoreError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[images]\nfallback_url = \"https://cdn.example.com/x.png\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(
            config.images.unwrap().fallback_url.as_deref(),
            Some("https://cdn.example.com/x.png")
        );
    }
}

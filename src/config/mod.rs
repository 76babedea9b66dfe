#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::http::DEFAULT_TIMEOUT_SECONDS;
use crate::adapters::image::DEFAULT_FALLBACK_IMAGE_URL;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "https://fakestoreapi.com";

/// Effective settings after defaults, config file and command line are merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub api_base_url: String,
    pub timeout_seconds: u64,
    pub fallback_image_url: String,
    pub check_images: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            fallback_image_url: DEFAULT_FALLBACK_IMAGE_URL.to_string(),
            check_images: false,
        }
    }
}

impl ConfigProvider for Settings {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn fallback_image_url(&self) -> &str {
        &self.fallback_image_url
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api_base_url", &self.api_base_url)?;
        validation::validate_range("timeout_seconds", self.timeout_seconds, 1, 300)?;
        validation::validate_non_empty_string("fallback_image_url", &self.fallback_image_url)?;
        validation::validate_url("fallback_image_url", &self.fallback_image_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.api_base_url(), "https://fakestoreapi.com");
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let settings = Settings {
            api_base_url: "fakestoreapi".to_string(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }
}

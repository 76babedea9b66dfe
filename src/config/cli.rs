use crate::config::toml_config::TomlConfig;
use crate::config::Settings;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "shopswift")]
#[command(about = "Browse the ShopSwift catalogue and build a shopping cart")]
pub struct CliConfig {
    /// Base URL of the product API [default: https://fakestoreapi.com]
    #[arg(long, env = "SHOPSWIFT_API_BASE_URL", global = true)]
    pub api_base_url: Option<String>,

    #[arg(long, global = true)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, global = true)]
    pub fallback_image_url: Option<String>,

    /// Probe product image URLs and show the fallback for broken ones
    #[arg(long, global = true)]
    pub check_images: bool,

    /// TOML config file; command-line flags take precedence over it
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the catalogue
    Products {
        #[arg(long)]
        category: Option<String>,
    },
    /// List product categories
    Categories,
    /// Show one product
    Product { id: u64 },
    /// Build a cart from product ids and print it
    Cart {
        /// Add one unit of a product (repeatable)
        #[arg(long = "add", value_name = "ID")]
        add: Vec<u64>,

        /// Set a line's quantity; 0 or less removes it (repeatable)
        #[arg(long = "set", value_name = "ID=QTY", value_parser = parse_quantity_update)]
        set: Vec<QuantityUpdate>,

        /// Remove a product (repeatable)
        #[arg(long = "remove", value_name = "ID")]
        remove: Vec<u64>,

        /// Empty the cart after applying the other commands
        #[arg(long)]
        clear: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityUpdate {
    pub id: u64,
    pub quantity: i64,
}

fn parse_quantity_update(raw: &str) -> std::result::Result<QuantityUpdate, String> {
    let (id, quantity) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ID=QTY, got '{}'", raw))?;
    let id = id
        .trim()
        .parse()
        .map_err(|e| format!("invalid product id '{}': {}", id, e))?;
    let quantity = quantity
        .trim()
        .parse()
        .map_err(|e| format!("invalid quantity '{}': {}", quantity, e))?;
    Ok(QuantityUpdate { id, quantity })
}

impl CliConfig {
    /// Merges defaults, the optional config file and command-line flags, in
    /// that order, and validates the result.
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::default();

        if let Some(path) = &self.config {
            let file = TomlConfig::from_file(path)?;
            file.validate()?;
            file.apply_to(&mut settings);
            tracing::debug!("Loaded config file {}", path);
        }

        if let Some(base_url) = &self.api_base_url {
            settings.api_base_url = base_url.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            settings.timeout_seconds = timeout;
        }
        if let Some(fallback_url) = &self.fallback_image_url {
            settings.fallback_image_url = fallback_url.clone();
        }
        if self.check_images {
            settings.check_images = true;
        }

        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_cart_command() {
        let config = CliConfig::try_parse_from([
            "shopswift", "cart", "--add", "1", "--add", "2", "--set", "1=5", "--remove", "2",
        ])
        .unwrap();

        match config.command {
            Command::Cart {
                add,
                set,
                remove,
                clear,
            } => {
                assert_eq!(add, vec![1, 2]);
                assert_eq!(set, vec![QuantityUpdate { id: 1, quantity: 5 }]);
                assert_eq!(remove, vec![2]);
                assert!(!clear);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_rejects_malformed_quantity_update() {
        assert!(parse_quantity_update("1:5").is_err());
        assert!(parse_quantity_update("x=5").is_err());
        assert_eq!(
            parse_quantity_update("3=-1").unwrap(),
            QuantityUpdate { id: 3, quantity: -1 }
        );
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[source]\nbase_url = \"https://file.example.com\"\ntimeout_seconds = 7\n")
            .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = CliConfig::try_parse_from([
            "shopswift",
            "--config",
            &path,
            "--api-base-url",
            "https://flag.example.com",
            "categories",
        ])
        .unwrap();

        let settings = config.settings().unwrap();
        assert_eq!(settings.api_base_url, "https://flag.example.com");
        assert_eq!(settings.timeout_seconds, 7);
    }

    #[test]
    fn test_invalid_flag_fails_validation() {
        let config =
            CliConfig::try_parse_from(["shopswift", "--timeout-seconds", "0", "categories"])
                .unwrap();
        assert!(config.settings().is_err());
    }
}

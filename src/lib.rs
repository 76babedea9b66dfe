pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::{CliConfig, Command};

pub use crate::adapters::http::HttpProductSource;
pub use crate::adapters::image::{ImageResolver, ResolvedImage};
pub use crate::config::Settings;
pub use crate::core::cart::CartStore;
pub use crate::core::catalogue::Catalogue;
pub use crate::core::detail::{LoadState, ProductDetailView};
pub use crate::domain::model::{Cart, CartLine, Product, Rating};
pub use crate::domain::ports::ProductSource;
pub use crate::utils::error::{Result, StoreError};

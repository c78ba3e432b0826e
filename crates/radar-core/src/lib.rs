//! Shared configuration and data types for the answer enrichment pipeline.

pub mod app_config;
pub mod brands;
pub mod categories;
pub mod config;
pub mod records;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use brands::{load_brand_registry, BrandProfile, BrandRegistry};
pub use categories::{brand_from_title, load_category_source, CategorySheet, CategorySource};
pub use config::{load_app_config, load_app_config_from_env};
pub use records::{
    load_records, write_records, Classification, Record, StoreError, Trigger,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read brands file {path}: {source}")]
    BrandsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse brands file: {0}")]
    BrandsFileParse(#[source] serde_yaml::Error),

    #[error("failed to read categories file {path}: {source}")]
    CategoriesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse categories file: {0}")]
    CategoriesFileParse(#[source] serde_yaml::Error),

    #[error("config validation failed: {0}")]
    Validation(String),
}

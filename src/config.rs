//! Config module contains the top-level config for the app.

use config_crate::{Config as RawConfig, ConfigError, Environment, File};
use std::env;

/// Basic settings - search engine index and browse defaults
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub search: Search,
}

/// Search engine settings
#[derive(Debug, Deserialize, Clone)]
pub struct Search {
    /// Index the product catalog is served from
    pub product_index: String,
    /// Placeholder indexes for grouped products, excluded from results
    pub grouped_product_indexes: Vec<String>,
    /// Page size applied when a browse request does not carry one
    pub default_page_size: u32,
}

/// Creates new app config struct
/// #Examples
/// ```
/// use storefront_lib::config::*;
///
/// let config = Config::new();
/// ```
impl Config {
    pub fn new() -> Result<Self, ConfigError> {
        let mut s = RawConfig::new();
        s.merge(File::with_name("config/base"))?;

        // Note that this file is _optional_
        let env = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        s.merge(File::with_name(&format!("config/{}", env)).required(false))?;

        // Add in settings from the environment (with a prefix of STOREFRONT)
        s.merge(Environment::with_prefix("STOREFRONT"))?;

        s.try_into()
    }
}

//! Configuration Module
//!
//! Deployment configuration loaded from TOML: site labels, the narrative
//! advisory service, the HTTP server, and report export. The estimation
//! constants are not configurable and live in [`defaults`].
//!
//! ## Loading Order
//!
//! 1. `SUBMINE_CONFIG` environment variable (path to TOML file)
//! 2. `submine.toml` in the current working directory
//! 3. Built-in defaults
//!
//! ## Usage
//!
//! ```ignore
//! let config = SubmineConfig::load();
//! let advisor = AdvisoryService::from_config(&config.advisory, api_key_from_env().as_deref());
//! ```

mod submine_config;
pub mod defaults;
pub mod validation;

pub use submine_config::*;

/// Read the advisory API credential from the environment.
///
/// The key is never part of the TOML config. Empty values count as unset.
pub fn api_key_from_env() -> Option<String> {
    defaults::API_KEY_ENV_VARS
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}

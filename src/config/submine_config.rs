//! SubMine Configuration - site labels, advisory service, server, and report export
//!
//! Each struct implements `Default`, so a missing file or a partial TOML
//! file always yields a complete, valid configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for a SubMine deployment.
///
/// Load with `SubmineConfig::load()` which searches:
/// 1. `$SUBMINE_CONFIG` env var
/// 2. `./submine.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmineConfig {
    /// Site / operator identification
    #[serde(default)]
    pub site: SiteInfo,

    /// Narrative advisory service
    #[serde(default)]
    pub advisory: AdvisoryConfig,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Report export
    #[serde(default)]
    pub report: ReportConfig,
}

impl SubmineConfig {
    /// Load configuration using the standard search order:
    /// 1. `$SUBMINE_CONFIG` environment variable
    /// 2. `./submine.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(defaults::CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(
                            path = %p.display(),
                            site = %config.site.name,
                            "Loaded config from SUBMINE_CONFIG"
                        );
                        return config;
                    }
                    Err(e) => {
                        warn!(
                            path = %p.display(),
                            error = %e,
                            "Failed to load config from SUBMINE_CONFIG, falling back"
                        );
                    }
                }
            } else {
                warn!(path = %path, "SUBMINE_CONFIG points to non-existent file, falling back");
            }
        }

        // 2. Check ./submine.toml
        let local = PathBuf::from(defaults::CONFIG_FILE_NAME);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!(site = %config.site.name, "Loaded config from ./submine.toml");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./submine.toml, using defaults");
                }
            }
        }

        // 3. Defaults
        info!("No submine.toml found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate a TOML document. Unknown keys only warn.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(PathBuf::from("<inline>"), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Validate every section, collecting all problems at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = super::validation::validate_values(self);

        if let Some(secs) = self.advisory.timeout_secs {
            if secs == 0 {
                errors.push("advisory.timeout_secs must be > 0 when set".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),
    #[error("Config parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),
    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

// ============================================================================
// Site Info
// ============================================================================

/// Identification metadata for logs and reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteInfo {
    /// Mine / site name
    #[serde(default = "default_site_name")]
    pub name: String,

    /// Contractor or operator running the face
    #[serde(default)]
    pub operator: String,
}

fn default_site_name() -> String {
    "SubMine".to_string()
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            operator: String::new(),
        }
    }
}

// ============================================================================
// Advisory Config
// ============================================================================

/// Language used for prompts, persona, apologies, and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Es,
    En,
}

/// Narrative advisory (Gemini) settings. The API key is never stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryConfig {
    /// REST endpoint root
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Response language
    #[serde(default)]
    pub language: Language,

    /// Request timeout. Unset means the transport default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    defaults::ADVISORY_BASE_URL.to_string()
}
fn default_model() -> String {
    defaults::ADVISORY_MODEL.to_string()
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            language: Language::default(),
            timeout_secs: None,
        }
    }
}

// ============================================================================
// Server Config
// ============================================================================

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server bind address.
    ///
    /// Can be overridden by `SUBMINE_SERVER_ADDR` env var or `--addr` CLI flag.
    #[serde(default = "default_server_addr")]
    pub addr: String,
}

fn default_server_addr() -> String {
    defaults::SERVER_ADDR.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_server_addr(),
        }
    }
}

// ============================================================================
// Report Config
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(defaults::REPORT_OUTPUT_DIR)
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = SubmineConfig::default();
        assert!(config.validate().is_ok(), "Default config must always validate");
    }

    #[test]
    fn test_empty_toml_produces_defaults() {
        let config: SubmineConfig = toml::from_str("").expect("empty TOML should parse");
        assert_eq!(config, SubmineConfig::default());
        assert_eq!(config.advisory.model, "gemini-3-flash-preview");
        assert_eq!(config.advisory.language, Language::Es);
    }

    #[test]
    fn test_partial_toml_override() {
        let toml_str = r#"
[site]
name = "Mina Esperanza"

[advisory]
language = "en"
timeout_secs = 20
"#;
        let config = SubmineConfig::from_toml_str(toml_str).expect("partial TOML should parse");
        assert_eq!(config.site.name, "Mina Esperanza");
        assert_eq!(config.advisory.language, Language::En);
        assert_eq!(config.advisory.timeout_secs, Some(20));
        // Non-overridden values retain defaults
        assert_eq!(config.advisory.model, "gemini-3-flash-preview");
        assert_eq!(config.server.addr, "127.0.0.1:8080");
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = SubmineConfig::default();
        config.advisory.timeout_secs = Some(0);
        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert!(errors.iter().any(|e| e.contains("timeout_secs")));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_language_is_parse_error() {
        let result = SubmineConfig::from_toml_str("[advisory]\nlanguage = \"fr\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_, _))));
    }

    #[test]
    fn test_roundtrip_toml() {
        let original = SubmineConfig::default();
        let toml_str = original.to_toml().expect("serialization should work");
        assert!(toml_str.contains("[advisory]"));
        assert!(toml_str.contains("[report]"));
        let back: SubmineConfig = toml::from_str(&toml_str).expect("deserialization should work");
        assert_eq!(original, back);
    }

    #[test]
    fn test_load_from_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("submine.toml");
        std::fs::write(&path, "[server]\naddr = ").unwrap();
        let err = SubmineConfig::load_from_file(&path).unwrap_err();
        assert!(err.to_string().contains("submine.toml"), "got: {err}");
    }
}

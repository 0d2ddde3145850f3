//! Config Validation Tests
//!
//! Typo detection, value validation, and file loading for `submine.toml`,
//! exercised independently from the server.

use std::io::Write;

use submine::config::validation::{known_config_keys, suggest_correction, validate_unknown_keys};
use submine::config::{ConfigError, Language, SubmineConfig};

// ============================================================================
// Typo Detection
// ============================================================================

#[test]
fn typo_in_advisory_section_warns_with_suggestion() {
    let toml_str = r#"
[advisory]
langauge = "en"
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1, "Expected exactly 1 warning");
    assert!(warnings[0].field.contains("langauge"));
    assert_eq!(
        warnings[0].suggestion.as_deref(),
        Some("advisory.language"),
        "Should suggest the correct spelling"
    );
}

#[test]
fn typo_in_site_section_warns() {
    let toml_str = r#"
[site]
naem = "Mina Esperanza"
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1);
    // "naem" is distance 2 from "name" → should suggest
    assert_eq!(warnings[0].suggestion.as_deref(), Some("site.name"));
}

#[test]
fn valid_config_produces_zero_warnings() {
    let toml_str = r#"
[site]
name = "Mina Esperanza"
operator = "Contratista Andes"

[advisory]
base_url = "https://generativelanguage.googleapis.com"
model = "gemini-3-flash-preview"
language = "es"
timeout_secs = 30

[server]
addr = "0.0.0.0:9090"

[report]
output_dir = "/var/lib/submine/reports"
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
}

#[test]
fn unrelated_key_gets_no_suggestion() {
    let warnings = validate_unknown_keys("completely_unrelated_section_name = 1\n");
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].suggestion.is_none());
}

#[test]
fn suggestion_uses_known_key_set() {
    let known = known_config_keys();
    assert_eq!(
        suggest_correction("report.output_dri", &known).as_deref(),
        Some("report.output_dir")
    );
}

#[test]
fn unknown_keys_do_not_break_loading() {
    let config = SubmineConfig::from_toml_str(
        r#"
[server]
adr = "0.0.0.0:1"
"#,
    )
    .unwrap();
    // Misspelled key ignored, default kept
    assert_eq!(config.server.addr, "127.0.0.1:8080");
}

// ============================================================================
// Value Validation
// ============================================================================

#[test]
fn empty_model_and_bad_scheme_are_both_reported() {
    let err = SubmineConfig::from_toml_str(
        r#"
[advisory]
model = ""
base_url = "generativelanguage.googleapis.com"
"#,
    )
    .unwrap_err();

    match err {
        ConfigError::Validation(errors) => {
            assert_eq!(errors.len(), 2, "{errors:?}");
            assert!(errors.iter().any(|e| e.contains("advisory.model")));
            assert!(errors.iter().any(|e| e.contains("advisory.base_url")));
        }
        other => panic!("expected validation error, got {other}"),
    }
}

#[test]
fn zero_timeout_is_rejected() {
    let err = SubmineConfig::from_toml_str("[advisory]\ntimeout_secs = 0\n").unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
}

#[test]
fn unknown_language_is_a_parse_error() {
    let err = SubmineConfig::from_toml_str("[advisory]\nlanguage = \"fr\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_, _)));
}

// ============================================================================
// File Loading
// ============================================================================

#[test]
fn load_from_file_reads_all_sections() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[site]
name = "Mina Esperanza"

[advisory]
language = "en"

[report]
output_dir = "out/reports"
"#
    )
    .unwrap();

    let config = SubmineConfig::load_from_file(file.path()).unwrap();
    assert_eq!(config.site.name, "Mina Esperanza");
    assert_eq!(config.advisory.language, Language::En);
    assert_eq!(config.report.output_dir, std::path::PathBuf::from("out/reports"));
}

#[test]
fn load_from_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = SubmineConfig::load_from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_, _)));
}

#[test]
fn round_trip_through_toml_preserves_config() {
    let mut config = SubmineConfig::default();
    config.site.operator = "Contratista Andes".to_string();
    config.advisory.timeout_secs = Some(20);

    let text = config.to_toml().unwrap();
    assert!(!text.contains("api_key"));
    assert_eq!(SubmineConfig::from_toml_str(&text).unwrap(), config);
}

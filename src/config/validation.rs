//! Config validation: unknown-key detection with Levenshtein suggestions
//! and value checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Unknown keys never break an existing config.

use std::collections::HashSet;

use super::SubmineConfig;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, "; did you mean '{s}'?")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for `SubmineConfig`.
///
/// Maintained by hand against submine_config.rs; a new field must be added here too.
pub fn known_config_keys() -> HashSet<&'static str> {
    [
        // [site]
        "site",
        "site.name",
        "site.operator",
        // [advisory]
        "advisory",
        "advisory.base_url",
        "advisory.model",
        "advisory.language",
        "advisory.timeout_secs",
        // [server]
        "server",
        "server.addr",
        // [report]
        "report",
        "report.output_dir",
    ]
    .into_iter()
    .collect()
}

/// Recursively collect dotted key paths from a TOML value.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let toml::Value::Table(table) = value {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let b_len = b_chars.len();
    if a.is_empty() {
        return b_len;
    }
    if b_len == 0 {
        return a.chars().count();
    }

    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_len]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|k| (*k, levenshtein(unknown, k)))
        .filter(|(_, dist)| *dist <= 3)
        .min_by(|(ka, da), (kb, db)| da.cmp(db).then_with(|| ka.cmp(kb)))
        .map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are handled by serde later
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Value Validation
// ============================================================================

/// Check values that would make the service unusable. Returns error strings.
pub fn validate_values(config: &SubmineConfig) -> Vec<String> {
    let mut errors = Vec::new();
    let a = &config.advisory;

    if a.model.trim().is_empty() {
        errors.push("advisory.model must not be empty".to_string());
    }
    if !(a.base_url.starts_with("http://") || a.base_url.starts_with("https://")) {
        errors.push(format!(
            "advisory.base_url = '{}' must start with http:// or https://",
            a.base_url
        ));
    }
    if config.server.addr.trim().is_empty() {
        errors.push("server.addr must not be empty".to_string());
    }
    if config.report.output_dir.as_os_str().is_empty() {
        errors.push("report.output_dir must not be empty".to_string());
    }

    errors
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein("model", "model"), 0);
    }

    #[test]
    fn test_levenshtein_one_edit() {
        assert_eq!(levenshtein("langauge", "language"), 2);
        assert_eq!(levenshtein("modle", "model"), 2);
        assert_eq!(levenshtein("adr", "addr"), 1);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    #[test]
    fn test_walk_toml_keys_nested() {
        let toml: toml::Value = r#"
            [advisory]
            model = "x"
        "#
        .parse()
        .unwrap();
        let keys = walk_toml_keys(&toml, "");
        assert!(keys.contains(&"advisory".to_string()));
        assert!(keys.contains(&"advisory.model".to_string()));
    }

    #[test]
    fn test_typo_key_produces_warning_with_suggestion() {
        let toml_str = r#"
[server]
adr = "0.0.0.0:9000"
"#;
        let warnings = validate_unknown_keys(toml_str);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field, "server.adr");
        assert_eq!(warnings[0].suggestion.as_deref(), Some("server.addr"));
        assert!(warnings[0].to_string().contains("did you mean 'server.addr'"));
    }

    #[test]
    fn test_all_valid_keys_produce_zero_warnings() {
        let toml_str = r#"
[site]
name = "Mina Norte"

[advisory]
model = "gemini-2.0-flash"
language = "en"

[report]
output_dir = "/tmp/reports"
"#;
        let warnings = validate_unknown_keys(toml_str);
        assert!(warnings.is_empty(), "Expected 0 warnings, got: {warnings:?}");
    }

    #[test]
    fn test_suggest_correction_no_match_for_garbage() {
        let known = known_config_keys();
        assert!(suggest_correction("completely_unrelated_garbage_key_xyz", &known).is_none());
    }

    #[test]
    fn test_values_defaults_clean() {
        assert!(validate_values(&SubmineConfig::default()).is_empty());
    }

    #[test]
    fn test_values_catch_bad_url_and_model() {
        let mut config = SubmineConfig::default();
        config.advisory.base_url = "ftp://example".to_string();
        config.advisory.model = "  ".to_string();
        let errors = validate_values(&config);
        assert!(errors.iter().any(|e| e.contains("base_url")));
        assert!(errors.iter().any(|e| e.contains("advisory.model")));
    }
}

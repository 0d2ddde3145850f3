//! System-wide default constants.
//!
//! Centralises the empirical coefficients and unit prices used by the
//! estimation engine, plus service defaults. Grouped by subsystem.
//! Engine constants are fixed and deliberately not exposed in the TOML config.

use crate::types::RockCoefficients;

// ============================================================================
// Rock Coefficients
// ============================================================================

/// Soft rock: burden 0.8 m, spacing 0.9 m, 1.2 kg/m.
pub const SOFT_ROCK: RockCoefficients = RockCoefficients {
    burden: 0.8,
    spacing: 0.9,
    charge_density: 1.2,
};

/// Medium rock: burden 1.0 m, spacing 1.1 m, 1.5 kg/m.
pub const MEDIUM_ROCK: RockCoefficients = RockCoefficients {
    burden: 1.0,
    spacing: 1.1,
    charge_density: 1.5,
};

/// Hard rock: burden 1.2 m, spacing 1.3 m, 2.0 kg/m.
pub const HARD_ROCK: RockCoefficients = RockCoefficients {
    burden: 1.2,
    spacing: 1.3,
    charge_density: 2.0,
};

// ============================================================================
// Pattern Factors
// ============================================================================

/// Hole-count safety margin. Face pattern only; the manual blast pattern
/// never applies it.
pub const FACE_SAFETY_FACTOR: f64 = 1.3;

/// Fraction of hole length occupied by the charge.
pub const CHARGE_LENGTH_FRACTION: f64 = 0.8;

/// Charge density for the manual blast pattern (kg/m), regardless of rock.
pub const MANUAL_CHARGE_DENSITY: f64 = 1.5;

/// Detonating cord length allowed per hole (m).
pub const CORD_LENGTH_PER_HOLE: f64 = 2.0;

/// Face cross-section assumed by the operation cost summary (m²).
pub const STANDARD_FACE_AREA: f64 = 15.0;

// ============================================================================
// Unit Prices (S/)
// ============================================================================

/// Dynamite, per kg.
pub const DYNAMITE_PRICE_PER_KG: f64 = 25.0;

/// Detonator, per unit (one per hole).
pub const DETONATOR_PRICE: f64 = 5.0;

/// Detonating cord, per metre.
pub const CORD_PRICE_PER_M: f64 = 2.0;

// ============================================================================
// Advisory Service
// ============================================================================

/// Gemini REST endpoint root.
pub const ADVISORY_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Generative model used for analysis and chat.
pub const ADVISORY_MODEL: &str = "gemini-3-flash-preview";

/// Environment variables searched (in order) for the API credential.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

// ============================================================================
// Server & Report
// ============================================================================

/// HTTP bind address.
pub const SERVER_ADDR: &str = "127.0.0.1:8080";

/// Directory that receives exported reports.
pub const REPORT_OUTPUT_DIR: &str = "./reports";

/// Config file searched in the working directory.
pub const CONFIG_FILE_NAME: &str = "submine.toml";

/// Environment variable pointing at an explicit config file.
pub const CONFIG_ENV_VAR: &str = "SUBMINE_CONFIG";

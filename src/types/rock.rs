//! Rock hardness classes and face geometry.

use serde::{Deserialize, Serialize};

use crate::config::defaults;

/// Empirical coefficients selected by rock hardness.
///
/// Burden and spacing are linear distances (m); `charge_density` is
/// kilograms of explosive per metre of charged hole.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RockCoefficients {
    pub burden: f64,
    pub spacing: f64,
    pub charge_density: f64,
}

/// Categorical hardness bucket driving the coefficient lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RockClass {
    Soft,
    #[default]
    Medium,
    Hard,
}

impl RockClass {
    /// Fixed coefficient triple for this class. No interpolation.
    pub const fn coefficients(self) -> RockCoefficients {
        match self {
            Self::Soft => defaults::SOFT_ROCK,
            Self::Medium => defaults::MEDIUM_ROCK,
            Self::Hard => defaults::HARD_ROCK,
        }
    }

    /// English display name
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Soft => "Soft",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    /// Spanish label used by the field crews and the original forms
    pub const fn label_es(self) -> &'static str {
        match self {
            Self::Soft => "Blanda",
            Self::Medium => "Media",
            Self::Hard => "Dura",
        }
    }
}

impl std::fmt::Display for RockClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Unrecognised rock class label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown rock class '{0}' (expected soft, medium or hard)")]
pub struct UnknownRockClass(pub String);

impl std::str::FromStr for RockClass {
    type Err = UnknownRockClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "soft" | "blanda" => Ok(Self::Soft),
            "medium" | "media" => Ok(Self::Medium),
            "hard" | "dura" => Ok(Self::Hard),
            _ => Err(UnknownRockClass(s.to_string())),
        }
    }
}

/// Excavation face: cross-section plus advance per round (all metres).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceGeometry {
    pub width: f64,
    pub height: f64,
    /// Linear excavation depth per blast round
    pub advance: f64,
}

impl FaceGeometry {
    pub const fn new(width: f64, height: f64, advance: f64) -> Self {
        Self {
            width,
            height,
            advance,
        }
    }

    /// Face cross-section area (m²).
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

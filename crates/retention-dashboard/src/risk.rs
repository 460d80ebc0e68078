//! Recruitment-risk prediction over aggregated event totals.

use crate::employee_events::{EntityKind, EventTotals};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum RiskModelError {
    #[error("failed to read risk model from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid risk model in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Logistic model over `[positive_events, negative_events]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskModel {
    pub intercept: f64,
    pub coefficients: [f64; 2],
}

impl Default for RiskModel {
    fn default() -> Self {
        Self {
            intercept: -1.2,
            coefficients: [-0.25, 0.45],
        }
    }
}

impl RiskModel {
    /// Reads a JSON export such as `{"intercept": -1.2, "coefficients": [-0.25, 0.45]}`.
    pub fn load(path: &Path) -> Result<Self, RiskModelError> {
        let raw = fs::read_to_string(path).map_err(|source| RiskModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let model: Self = serde_json::from_str(&raw).map_err(|source| RiskModelError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        info!(model = %path.display(), "loaded recruitment risk model");
        Ok(model)
    }

    /// Loads from `path` when given, otherwise falls back to the built-in coefficients.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, RiskModelError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                info!("using built-in recruitment risk coefficients");
                Ok(Self::default())
            }
        }
    }

    /// Probability of the positive (at-risk) class for each row.
    pub fn predict_proba(&self, rows: &[EventTotals]) -> Vec<f64> {
        rows.iter()
            .map(|row| {
                let z = self.intercept
                    + self.coefficients[0] * row.positive_events as f64
                    + self.coefficients[1] * row.negative_events as f64;
                sigmoid(z)
            })
            .collect()
    }

    /// Teams report the mean member risk; employees report their own row.
    /// No rows at all means no evidence of risk.
    pub fn entity_risk(&self, kind: EntityKind, rows: &[EventTotals]) -> f64 {
        let probabilities = self.predict_proba(rows);
        if probabilities.is_empty() {
            return 0.0;
        }

        match kind {
            EntityKind::Team => probabilities.iter().sum::<f64>() / probabilities.len() as f64,
            EntityKind::Employee => probabilities[0],
        }
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_probability(probability: f64) -> Self {
        if probability < 0.3 {
            Self::Low
        } else if probability < 0.6 {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low Risk",
            Self::Medium => "Medium Risk",
            Self::High => "High Risk",
        }
    }

    /// Bar color as `(r, g, b)`.
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Low => (0x4C, 0xAF, 0x50),
            Self::Medium => (0xFF, 0x98, 0x00),
            Self::High => (0xF4, 0x43, 0x36),
        }
    }
}

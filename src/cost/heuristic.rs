//! Heuristic (eta) matrix.
//!
//! Base desirability of an edge is the inverse of its static changeover
//! cost. A profitability bias optionally scales every destination column by
//! the job's attractiveness (price per processing minute).
//!
//! # Modes
//!
//! | Mode | Column factor |
//! |------|---------------|
//! | `Off` | 1 |
//! | `High` | `attractiveness^exponent` |
//! | `Low` | `(1 / attractiveness)^exponent` |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::HeuristicConfig;
use crate::error::SequencerError;
use crate::models::{Job, Matrix};

/// Profitability bias of the heuristic matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ProfitabilityMode {
    /// No bias.
    #[default]
    Off,
    /// Prefer jobs that earn more per processing minute.
    High,
    /// Prefer jobs that earn less per processing minute.
    Low,
}

impl ProfitabilityMode {
    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfitabilityMode::Off => "off",
            ProfitabilityMode::High => "high",
            ProfitabilityMode::Low => "low",
        }
    }
}

impl fmt::Display for ProfitabilityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfitabilityMode {
    type Err = SequencerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" | "none" => Ok(ProfitabilityMode::Off),
            "high" => Ok(ProfitabilityMode::High),
            "low" => Ok(ProfitabilityMode::Low),
            _ => Err(SequencerError::InvalidProfitabilityMode(s.to_string())),
        }
    }
}

impl TryFrom<String> for ProfitabilityMode {
    type Error = SequencerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ProfitabilityMode> for String {
    fn from(mode: ProfitabilityMode) -> Self {
        mode.as_str().to_string()
    }
}

/// Price per processing minute, with the duration floored at `floor`.
pub fn job_attractiveness(job: &Job, floor: f64) -> f64 {
    job.price / job.total_minutes().max(floor)
}

/// Upper bound of a column factor.
const MAX_COLUMN_FACTOR: f64 = 1e150;

/// Column factor of a destination job under `config`.
///
/// In `Low` mode attractiveness is floored at `config.epsilon` before it is
/// inverted, so zero-price jobs rank first instead of overflowing. Factors
/// are capped at [`MAX_COLUMN_FACTOR`]; NaN or negative factors fall back
/// to 1.0.
fn column_factor(job: &Job, config: &HeuristicConfig) -> f64 {
    let attractiveness = job_attractiveness(job, config.duration_floor);
    let factor = match config.mode {
        ProfitabilityMode::Off => return 1.0,
        ProfitabilityMode::High => attractiveness.powf(config.exponent),
        ProfitabilityMode::Low => {
            (1.0 / attractiveness.max(config.epsilon)).powf(config.exponent)
        }
    };
    if factor.is_nan() || factor < 0.0 {
        1.0
    } else {
        factor.min(MAX_COLUMN_FACTOR)
    }
}

/// Builds the heuristic matrix from the static cost matrix.
///
/// The diagonal (infinite cost) maps to zero desirability.
pub fn build_heuristic_matrix(jobs: &[Job], cost: &Matrix, config: &HeuristicConfig) -> Matrix {
    let factors: Vec<f64> = jobs.iter().map(|j| column_factor(j, config)).collect();
    Matrix::from_fn(cost.size(), |i, j| {
        let c = cost.get(i, j);
        if i == j || !c.is_finite() {
            0.0
        } else {
            factors[j] / (c + config.epsilon)
        }
    })
}

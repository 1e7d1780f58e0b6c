//! Sequencer configuration.
//!
//! Every knob of a run lives here: changeover penalty weights, the due-date
//! policy, the profitability bias, and the ACO hyperparameters. All structs
//! implement `Default`, expose `with_*` builders and deserialize from JSON
//! with missing fields falling back to their defaults.
//!
//! # Examples
//!
//! ```
//! use u_sequence::config::{AcoParams, SequencerConfig};
//!
//! let config = SequencerConfig::default()
//!     .with_aco(AcoParams::default().with_ants(10).with_iterations(50).with_seed(7));
//! assert!(config.validate().is_ok());
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::cost::ProfitabilityMode;
use crate::error::{Result, SequencerError};
use crate::models::WorkCalendar;

/// Changeover penalty weights, applied in full when the field differs
/// between consecutive jobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangeoverWeights {
    /// Penalty for a raw-material change.
    pub raw_material: f64,
    /// Penalty for a material / tooling family change.
    pub material: f64,
    /// Penalty for a tool-ID change.
    pub tool: f64,
}

impl Default for ChangeoverWeights {
    fn default() -> Self {
        Self {
            raw_material: 300.0,
            material: 100.0,
            tool: 50.0,
        }
    }
}

impl ChangeoverWeights {
    /// Creates weights from the three penalties.
    pub fn new(raw_material: f64, material: f64, tool: f64) -> Self {
        Self {
            raw_material,
            material,
            tool,
        }
    }

    /// All penalties zero.
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

/// Due-date pressure policy.
///
/// Slack is measured in working days. Jobs with more than `buffer_days` of
/// slack cost nothing; inside the buffer the penalty ramps linearly up to
/// `scale`; overdue jobs pay `overdue² · scale`, capped at `cap`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DueDatePolicy {
    /// Whether due-date penalties are applied at all.
    pub enabled: bool,
    /// Working-day buffer below which the linear ramp starts.
    pub buffer_days: f64,
    /// Penalty at zero slack (and quadratic coefficient when overdue).
    pub scale: f64,
    /// Upper bound of the overdue penalty.
    pub cap: f64,
}

impl Default for DueDatePolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            buffer_days: 5.0,
            scale: 100.0,
            cap: 10_000.0,
        }
    }
}

impl DueDatePolicy {
    /// A policy that never penalizes.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Sets the working-day window before the due date where the linear penalty applies.
    pub fn with_buffer_days(mut self, days: f64) -> Self {
        self.buffer_days = days;
        self
    }

    /// Sets the penalty scale.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the overdue penalty cap.
    pub fn with_cap(mut self, cap: f64) -> Self {
        self.cap = cap;
        self
    }
}

/// Heuristic (eta) construction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicConfig {
    /// Profitability bias applied per destination job.
    pub mode: ProfitabilityMode,
    /// Exponent applied to the attractiveness factor.
    pub exponent: f64,
    /// Guard added to costs before inversion; also the attractiveness
    /// floor in `Low` mode.
    pub epsilon: f64,
    /// Lower bound on job duration when computing attractiveness.
    pub duration_floor: f64,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            mode: ProfitabilityMode::Off,
            exponent: 1.0,
            epsilon: 1e-6,
            duration_floor: 1e-6,
        }
    }
}

impl HeuristicConfig {
    /// Sets the profitability bias.
    pub fn with_mode(mut self, mode: ProfitabilityMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the attractiveness exponent.
    pub fn with_exponent(mut self, exponent: f64) -> Self {
        self.exponent = exponent;
        self
    }
}

/// ACO hyperparameters.
///
/// # Parameters
///
/// | Field | Meaning |
/// |-------|---------|
/// | `alpha` | pheromone exponent |
/// | `beta` | heuristic exponent |
/// | `rho` | evaporation fraction in `[0, 1]` |
/// | `q` | deposit constant |
/// | `tau_min`, `tau_max` | pheromone bounds, `tau_min > 0` |
/// | `epsilon_*` | exploration rate start, floor and geometric decay |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcoParams {
    /// Pheromone influence (α).
    pub alpha: f64,
    /// Heuristic influence (β).
    pub beta: f64,
    /// Evaporation rate (ρ).
    pub rho: f64,
    /// Deposit constant (Q).
    pub q: f64,
    /// Initial pheromone on every edge.
    pub tau_init: f64,
    /// Lower pheromone bound.
    pub tau_min: f64,
    /// Upper pheromone bound.
    pub tau_max: f64,
    /// Ants per iteration.
    pub ants: usize,
    /// Number of iterations.
    pub iterations: usize,
    /// Exploration rate of the first iteration.
    pub epsilon_init: f64,
    /// Exploration rate floor.
    pub epsilon_min: f64,
    /// Per-iteration exploration decay factor.
    pub epsilon_decay: f64,
    /// Guard added to tour costs before inversion in deposits.
    pub cost_epsilon: f64,
    /// Multiplier of the elitist deposit (1.0 = one extra best-tour deposit).
    pub elitist_weight: f64,
    /// Build ant tours on the rayon thread pool.
    pub parallel: bool,
    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for AcoParams {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            beta: 2.0,
            rho: 0.1,
            q: 100.0,
            tau_init: 1.0,
            tau_min: 0.01,
            tau_max: 10.0,
            ants: 20,
            iterations: 100,
            epsilon_init: 0.3,
            epsilon_min: 0.01,
            epsilon_decay: 0.95,
            cost_epsilon: 1e-6,
            elitist_weight: 1.0,
            parallel: true,
            seed: None,
        }
    }
}

impl AcoParams {
    /// Sets the pheromone (`alpha`) and heuristic (`beta`) exponents.
    pub fn with_exponents(mut self, alpha: f64, beta: f64) -> Self {
        self.alpha = alpha;
        self.beta = beta;
        self
    }

    /// Sets the evaporation rate.
    pub fn with_rho(mut self, rho: f64) -> Self {
        self.rho = rho;
        self
    }

    /// Sets the deposit constant.
    pub fn with_q(mut self, q: f64) -> Self {
        self.q = q;
        self
    }

    /// Sets the pheromone clamp range.
    pub fn with_pheromone_bounds(mut self, tau_min: f64, tau_max: f64) -> Self {
        self.tau_min = tau_min;
        self.tau_max = tau_max;
        self
    }

    /// Sets the initial pheromone level.
    pub fn with_initial_pheromone(mut self, tau_init: f64) -> Self {
        self.tau_init = tau_init;
        self
    }

    /// Sets the number of ants per iteration.
    pub fn with_ants(mut self, ants: usize) -> Self {
        self.ants = ants;
        self
    }

    /// Sets the iteration count.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the exploration schedule: start rate, floor and decay factor.
    pub fn with_exploration(mut self, initial: f64, min: f64, decay: f64) -> Self {
        self.epsilon_init = initial;
        self.epsilon_min = min;
        self.epsilon_decay = decay;
        self
    }

    /// Disables random exploration entirely.
    pub fn without_exploration(self) -> Self {
        self.with_exploration(0.0, 0.0, 1.0)
    }

    /// Sets the weight of the best-tour deposit.
    pub fn with_elitist_weight(mut self, weight: f64) -> Self {
        self.elitist_weight = weight;
        self
    }

    /// Enables or disables parallel ant construction.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Fixes the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the hyperparameters.
    pub fn validate(&self) -> Result<()> {
        if !(self.alpha.is_finite() && self.alpha >= 0.0) {
            return Err(invalid(format!("alpha must be finite and >= 0, got {}", self.alpha)));
        }
        if !(self.beta.is_finite() && self.beta >= 0.0) {
            return Err(invalid(format!("beta must be finite and >= 0, got {}", self.beta)));
        }
        if !(0.0..=1.0).contains(&self.rho) {
            return Err(invalid(format!("rho must be in [0, 1], got {}", self.rho)));
        }
        if !(self.q.is_finite() && self.q >= 0.0) {
            return Err(invalid(format!("q must be finite and >= 0, got {}", self.q)));
        }
        if !(self.tau_min > 0.0 && self.tau_min.is_finite()) {
            return Err(invalid(format!("tau_min must be > 0, got {}", self.tau_min)));
        }
        if !(self.tau_max >= self.tau_min && self.tau_max.is_finite()) {
            return Err(invalid(format!(
                "tau_max must be finite and >= tau_min ({}), got {}",
                self.tau_min, self.tau_max
            )));
        }
        if !(self.tau_init > 0.0 && self.tau_init.is_finite()) {
            return Err(invalid(format!("tau_init must be > 0, got {}", self.tau_init)));
        }
        if self.ants == 0 {
            return Err(invalid("ants must be positive"));
        }
        if self.iterations == 0 {
            return Err(invalid("iterations must be positive"));
        }
        for (name, value) in [
            ("epsilon_init", self.epsilon_init),
            ("epsilon_min", self.epsilon_min),
            ("epsilon_decay", self.epsilon_decay),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(format!("{name} must be in [0, 1], got {value}")));
            }
        }
        if !(self.cost_epsilon > 0.0 && self.cost_epsilon.is_finite()) {
            return Err(invalid("cost_epsilon must be > 0"));
        }
        if !(self.elitist_weight >= 0.0 && self.elitist_weight.is_finite()) {
            return Err(invalid("elitist_weight must be finite and >= 0"));
        }
        Ok(())
    }
}

/// Complete configuration of one sequencing run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequencerConfig {
    /// Changeover penalty weights.
    pub changeover: ChangeoverWeights,
    /// Due-date penalty policy.
    pub due_date: DueDatePolicy,
    /// Heuristic matrix settings.
    pub heuristic: HeuristicConfig,
    /// ACO hyperparameters.
    pub aco: AcoParams,
    /// Working-day calendar for due-date slack.
    pub calendar: WorkCalendar,
    /// Reference date; `None` = the current local date.
    pub today: Option<NaiveDate>,
}

impl SequencerConfig {
    /// Parses and validates a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the changeover weights.
    pub fn with_changeover(mut self, weights: ChangeoverWeights) -> Self {
        self.changeover = weights;
        self
    }

    /// Sets the due-date policy.
    pub fn with_due_date(mut self, policy: DueDatePolicy) -> Self {
        self.due_date = policy;
        self
    }

    /// Sets the heuristic settings.
    pub fn with_heuristic(mut self, heuristic: HeuristicConfig) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Sets the ACO hyperparameters.
    pub fn with_aco(mut self, aco: AcoParams) -> Self {
        self.aco = aco;
        self
    }

    /// Sets the working-day calendar.
    pub fn with_calendar(mut self, calendar: WorkCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Pins the reference date (deterministic due-date evaluation).
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Validates every section.
    pub fn validate(&self) -> Result<()> {
        let w = &self.changeover;
        for (name, value) in [
            ("raw_material", w.raw_material),
            ("material", w.material),
            ("tool", w.tool),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(format!(
                    "changeover weight {name} must be finite and >= 0, got {value}"
                )));
            }
        }

        let d = &self.due_date;
        if !(d.buffer_days > 0.0 && d.buffer_days.is_finite()) {
            return Err(invalid(format!("buffer_days must be > 0, got {}", d.buffer_days)));
        }
        if !(d.scale >= 0.0 && d.scale.is_finite()) {
            return Err(invalid(format!("due-date scale must be >= 0, got {}", d.scale)));
        }
        if !(d.cap >= 0.0 && d.cap.is_finite()) {
            return Err(invalid(format!("due-date cap must be >= 0, got {}", d.cap)));
        }

        let h = &self.heuristic;
        if !h.exponent.is_finite() {
            return Err(invalid("profitability exponent must be finite"));
        }
        if !(h.epsilon > 0.0 && h.epsilon.is_finite()) {
            return Err(invalid("heuristic epsilon must be > 0"));
        }
        if !(h.duration_floor > 0.0 && h.duration_floor.is_finite()) {
            return Err(invalid("duration_floor must be > 0"));
        }

        self.aco.validate()
    }
}

fn invalid(message: impl Into<String>) -> SequencerError {
    SequencerError::InvalidConfig(message.into())
}

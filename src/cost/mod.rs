//! Cost landscape of a sequencing run.
//!
//! Translates business rules into the numbers the search navigates:
//!
//! - [`build_cost_matrix`]: static changeover penalties per ordered job pair
//! - [`DueDateEvaluator`]: due-date pressure at the time a job would start
//! - [`build_heuristic_matrix`]: inverse cost with optional profitability bias
//!
//! [`CostModel`] bundles all three, built once per run and shared read-only
//! by every ant.

mod changeover;
mod due_date;
mod heuristic;

pub use changeover::{build_cost_matrix, changeover_penalty};
pub use due_date::{
    due_date_penalty, penalty_for_buffer, DueDateEvaluator, MINUTES_PER_DAY,
};
pub use heuristic::{build_heuristic_matrix, job_attractiveness, ProfitabilityMode};

use chrono::Local;

use crate::config::SequencerConfig;
use crate::error::{Result, SequencerError};
use crate::models::{Job, Matrix};

/// Immutable cost data for one run.
#[derive(Debug, Clone)]
pub struct CostModel {
    cost: Matrix,
    heuristic: Matrix,
    due: DueDateEvaluator,
    durations: Vec<f64>,
}

impl CostModel {
    /// Validates `config` and builds every matrix for `jobs`.
    ///
    /// # Errors
    /// `EmptyJobs` for an empty slice, `InvalidConfig` for out-of-range
    /// settings. Nothing is built when an error is returned.
    pub fn build(jobs: &[Job], config: &SequencerConfig) -> Result<Self> {
        if jobs.is_empty() {
            return Err(SequencerError::EmptyJobs);
        }
        config.validate()?;

        let today = config.today.unwrap_or_else(|| Local::now().date_naive());
        let cost = build_cost_matrix(jobs, &config.changeover);
        let heuristic = build_heuristic_matrix(jobs, &cost, &config.heuristic);
        let due = DueDateEvaluator::new(jobs, &config.due_date, &config.calendar, today);
        let durations = jobs.iter().map(Job::total_minutes).collect();

        Ok(Self {
            cost,
            heuristic,
            due,
            durations,
        })
    }

    /// Number of jobs.
    #[inline]
    pub fn len(&self) -> usize {
        self.durations.len()
    }

    /// Always false for a built model (at least one job).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }

    /// Changeover cost matrix.
    pub fn cost_matrix(&self) -> &Matrix {
        &self.cost
    }

    /// Heuristic (eta) matrix.
    pub fn heuristic_matrix(&self) -> &Matrix {
        &self.heuristic
    }

    /// Due-date evaluator.
    pub fn due_dates(&self) -> &DueDateEvaluator {
        &self.due
    }

    /// Processing duration of `job` (minutes).
    #[inline]
    pub fn duration(&self, job: usize) -> f64 {
        self.durations[job]
    }

    /// Cost of starting the sequence with `job`.
    #[inline]
    pub fn start_cost(&self, job: usize) -> f64 {
        self.due.penalty(job, 0.0)
    }

    /// Cost of moving from `from` to `to` when `to` starts after
    /// `elapsed_minutes`: changeover plus due-date penalty.
    #[inline]
    pub fn transition_cost(&self, from: usize, to: usize, elapsed_minutes: f64) -> f64 {
        self.cost.get(from, to) + self.due.penalty(to, elapsed_minutes)
    }

    /// Total cost of a complete tour, accumulated the same way an ant does.
    pub fn evaluate_tour(&self, tour: &[usize]) -> f64 {
        let Some((&first, rest)) = tour.split_first() else {
            return 0.0;
        };
        let mut total = self.start_cost(first);
        let mut elapsed = self.duration(first);
        let mut current = first;
        for &next in rest {
            total += self.transition_cost(current, next, elapsed);
            elapsed += self.duration(next);
            current = next;
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ChangeoverWeights, DueDatePolicy};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn jobs() -> Vec<Job> {
        vec![
            Job::new("A", date(2024, 3, 5))
                .with_quantity(1.0)
                .with_time_per_piece(1440.0)
                .with_tool("T1"),
            Job::new("B", date(2030, 1, 1))
                .with_quantity(2.0)
                .with_time_per_piece(720.0)
                .with_tool("T2"),
        ]
    }

    fn config() -> SequencerConfig {
        SequencerConfig::default()
            .with_changeover(ChangeoverWeights::new(0.0, 0.0, 50.0))
            .with_due_date(DueDatePolicy::default().with_scale(100.0))
            .with_today(date(2024, 3, 4))
    }

    #[test]
    fn test_build_rejects_empty() {
        assert_eq!(
            CostModel::build(&[], &config()).unwrap_err(),
            SequencerError::EmptyJobs
        );
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let bad = config().with_changeover(ChangeoverWeights::new(f64::NAN, 0.0, 0.0));
        assert!(matches!(
            CostModel::build(&jobs(), &bad),
            Err(SequencerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_model_dimensions() {
        let model = CostModel::build(&jobs(), &config()).unwrap();
        assert_eq!(model.len(), 2);
        assert!(!model.is_empty());
        assert_eq!(model.cost_matrix().size(), 2);
        assert_eq!(model.heuristic_matrix().size(), 2);
        assert!((model.duration(1) - 1440.0).abs() < 1e-10);
        assert_eq!(model.due_dates().today(), date(2024, 3, 4));
    }

    #[test]
    fn test_evaluate_tour() {
        let model = CostModel::build(&jobs(), &config()).unwrap();

        // A first: 1 working day of slack → (5-1)/5*100 = 80, then B far future + 50 changeover
        assert!((model.evaluate_tour(&[0, 1]) - 130.0).abs() < 1e-9);

        // B first (free), A starts after one day: slack 0 → 100, plus 50 changeover
        assert!((model.evaluate_tour(&[1, 0]) - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_evaluate_empty_tour() {
        let model = CostModel::build(&jobs(), &config()).unwrap();
        assert_eq!(model.evaluate_tour(&[]), 0.0);
    }
}

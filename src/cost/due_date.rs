//! Time-dependent due-date penalty.
//!
//! The penalty depends on when a job would *start*, so it cannot be baked
//! into the static heuristic matrix; ants evaluate it during construction
//! with their own elapsed processing time.
//!
//! # Penalty Shape
//!
//! `buffer = working_days(today, due) − elapsed_minutes / 1440`
//!
//! | Buffer | Penalty |
//! |--------|---------|
//! | `> buffer_days` | 0 |
//! | `[0, buffer_days]` | `(buffer_days − buffer) / buffer_days · scale` |
//! | `< 0` | `min(buffer² · scale, cap)` |

use chrono::{Local, NaiveDate};

use crate::config::DueDatePolicy;
use crate::models::{Job, WorkCalendar};

/// Minutes in one day of elapsed processing time.
pub const MINUTES_PER_DAY: f64 = 1440.0;

/// Penalty for a given working-day buffer.
pub fn penalty_for_buffer(buffer: f64, policy: &DueDatePolicy) -> f64 {
    if !policy.enabled {
        return 0.0;
    }
    if buffer > policy.buffer_days {
        0.0
    } else if buffer >= 0.0 {
        (policy.buffer_days - buffer) / policy.buffer_days * policy.scale
    } else {
        (buffer * buffer * policy.scale).min(policy.cap)
    }
}

/// Due-date penalty of starting `job` after `elapsed_minutes` of processing.
///
/// `today` defaults to the current local date when `None`.
pub fn due_date_penalty(
    job: &Job,
    elapsed_minutes: f64,
    policy: &DueDatePolicy,
    calendar: &WorkCalendar,
    today: Option<NaiveDate>,
) -> f64 {
    if !policy.enabled {
        return 0.0;
    }
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let working_days = calendar.business_days_between(today, job.due_date) as f64;
    penalty_for_buffer(working_days - elapsed_minutes / MINUTES_PER_DAY, policy)
}

/// Per-run due-date evaluator.
///
/// Working days until each job's due date do not change during a run, so
/// they are counted once up front; only the elapsed term varies per call.
#[derive(Debug, Clone)]
pub struct DueDateEvaluator {
    policy: DueDatePolicy,
    working_days: Vec<f64>,
    today: NaiveDate,
}

impl DueDateEvaluator {
    /// Counts working days for every job relative to `today`.
    pub fn new(
        jobs: &[Job],
        policy: &DueDatePolicy,
        calendar: &WorkCalendar,
        today: NaiveDate,
    ) -> Self {
        let working_days = jobs
            .iter()
            .map(|j| calendar.business_days_between(today, j.due_date) as f64)
            .collect();
        Self {
            policy: policy.clone(),
            working_days,
            today,
        }
    }

    /// Reference date of this evaluator.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Working-day slack of `job` if it starts after `elapsed_minutes`.
    #[inline]
    pub fn buffer(&self, job: usize, elapsed_minutes: f64) -> f64 {
        self.working_days[job] - elapsed_minutes / MINUTES_PER_DAY
    }

    /// Penalty of starting `job` after `elapsed_minutes`.
    #[inline]
    pub fn penalty(&self, job: usize, elapsed_minutes: f64) -> f64 {
        if !self.policy.enabled {
            return 0.0;
        }
        penalty_for_buffer(self.buffer(job, elapsed_minutes), &self.policy)
    }
}

//! Schedule quality metrics (KPIs).
//!
//! Computes shop-floor indicators from a timed schedule and the due-date
//! evaluator of the run that produced it.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan (C_max) | Latest completion time |
//! | Busy minutes | Processing time per machine |
//! | Utilization | Busy minutes / makespan per machine |
//! | Total changeover | Sum of changeover penalties |
//! | Late jobs | Working-day buffer at completion below 0 |
//! | Max lateness | Largest negative buffer, in working days |
//! | On-Time Rate | Fraction of jobs not late |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use std::collections::BTreeMap;

use crate::cost::DueDateEvaluator;
use crate::models::{Job, Schedule};

/// Schedule performance indicators.
///
/// All time values are in minutes unless noted.
#[derive(Debug, Clone)]
pub struct ScheduleKpi {
    /// Makespan: latest completion time.
    pub makespan_min: f64,
    /// Busy minutes per machine.
    pub busy_by_machine: BTreeMap<usize, f64>,
    /// Utilization per machine (0.0..1.0).
    pub utilization_by_machine: BTreeMap<usize, f64>,
    /// Average machine utilization (0.0..1.0).
    pub avg_utilization: f64,
    /// Sum of changeover penalties.
    pub total_changeover: f64,
    /// Jobs completing after their due date.
    pub late_jobs: usize,
    /// Fraction of jobs completing on time (0.0..1.0).
    pub on_time_rate: f64,
    /// Largest lateness of any job, in working days (0 when none is late).
    pub max_lateness_days: f64,
}

impl ScheduleKpi {
    /// Computes KPIs from a schedule.
    ///
    /// # Arguments
    /// * `schedule` - The timed schedule.
    /// * `jobs` - The jobs the schedule was built from.
    /// * `due` - Due-date evaluator built over the same `jobs`.
    pub fn calculate(schedule: &Schedule, jobs: &[Job], due: &DueDateEvaluator) -> Self {
        let makespan = schedule.makespan_min();
        let mut late_jobs = 0;
        let mut counted = 0;
        let mut max_lateness: f64 = 0.0;

        for a in &schedule.assignments {
            if a.job_index >= jobs.len() {
                continue;
            }
            counted += 1;
            let buffer = due.buffer(a.job_index, a.end_min);
            if buffer < 0.0 {
                late_jobs += 1;
                max_lateness = max_lateness.max(-buffer);
            }
        }

        let busy_by_machine = schedule.busy_minutes();
        let utilization_by_machine: BTreeMap<usize, f64> = busy_by_machine
            .iter()
            .map(|(&m, &busy)| {
                let u = if makespan > 0.0 { busy / makespan } else { 0.0 };
                (m, u)
            })
            .collect();
        let avg_utilization = if utilization_by_machine.is_empty() {
            0.0
        } else {
            utilization_by_machine.values().sum::<f64>() / utilization_by_machine.len() as f64
        };

        let on_time_rate = if counted == 0 {
            1.0
        } else {
            (counted - late_jobs) as f64 / counted as f64
        };

        Self {
            makespan_min: makespan,
            busy_by_machine,
            utilization_by_machine,
            avg_utilization,
            total_changeover: schedule.total_changeover(),
            late_jobs,
            on_time_rate,
            max_lateness_days: max_lateness,
        }
    }

    /// Whether the schedule meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_lateness_days: f64, min_utilization: f64) -> bool {
        self.max_lateness_days <= max_lateness_days && self.avg_utilization >= min_utilization
    }
}

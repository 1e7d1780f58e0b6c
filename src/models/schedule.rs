//! Machine timeline model.
//!
//! A schedule places every job of a sequenced tour on a machine and a time
//! slot. It is produced after the search by the machine assignment mapper
//! and consumed by KPI evaluation and external exporters.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A complete machine timeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Job placements in tour order.
    pub assignments: Vec<Assignment>,
    /// Number of machines the tour was split across.
    pub machine_count: usize,
}

/// A job-machine-time placement.
///
/// Times are minutes from the start of the production horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Job index in the input slice.
    pub job_index: usize,
    /// Job identifier (denormalized for exporters).
    pub job_id: String,
    /// Machine index (`0..machine_count`).
    pub machine: usize,
    /// Position of the job in the sequenced tour.
    pub tour_position: usize,
    /// Start time (minutes).
    pub start_min: f64,
    /// End time (minutes).
    pub end_min: f64,
    /// Changeover penalty from the previous job on the same machine.
    pub changeover_penalty: f64,
}

impl Assignment {
    /// Creates a new assignment.
    pub fn new(
        job_index: usize,
        job_id: impl Into<String>,
        machine: usize,
        start_min: f64,
        end_min: f64,
    ) -> Self {
        Self {
            job_index,
            job_id: job_id.into(),
            machine,
            tour_position: 0,
            start_min,
            end_min,
            changeover_penalty: 0.0,
        }
    }

    /// Sets the tour position.
    pub fn at_position(mut self, position: usize) -> Self {
        self.tour_position = position;
        self
    }

    /// Sets the changeover penalty.
    pub fn with_changeover(mut self, penalty: f64) -> Self {
        self.changeover_penalty = penalty;
        self
    }

    /// Processing duration (minutes).
    #[inline]
    pub fn duration_min(&self) -> f64 {
        self.end_min - self.start_min
    }
}

impl Schedule {
    /// Creates an empty schedule over `machine_count` machines.
    pub fn new(machine_count: usize) -> Self {
        Self {
            assignments: Vec::new(),
            machine_count,
        }
    }

    /// Adds an assignment.
    pub fn add_assignment(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    /// Makespan: latest end time across all machines (minutes).
    pub fn makespan_min(&self) -> f64 {
        self.assignments
            .iter()
            .map(|a| a.end_min)
            .fold(0.0, f64::max)
    }

    /// Finds the assignment for a job.
    pub fn assignment_for_job(&self, job_id: &str) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.job_id == job_id)
    }

    /// Returns the assignments of one machine in processing order.
    pub fn assignments_for_machine(&self, machine: usize) -> Vec<&Assignment> {
        let mut on_machine: Vec<&Assignment> = self
            .assignments
            .iter()
            .filter(|a| a.machine == machine)
            .collect();
        on_machine.sort_by(|a, b| a.start_min.total_cmp(&b.start_min));
        on_machine
    }

    /// Job sequence per machine (job indices in processing order).
    pub fn machine_sequences(&self) -> Vec<Vec<usize>> {
        (0..self.machine_count)
            .map(|m| {
                self.assignments_for_machine(m)
                    .iter()
                    .map(|a| a.job_index)
                    .collect()
            })
            .collect()
    }

    /// Busy minutes per machine (machines without jobs report 0).
    pub fn busy_minutes(&self) -> BTreeMap<usize, f64> {
        let mut busy: BTreeMap<usize, f64> = (0..self.machine_count).map(|m| (m, 0.0)).collect();
        for a in &self.assignments {
            *busy.entry(a.machine).or_insert(0.0) += a.duration_min();
        }
        busy
    }

    /// Sum of changeover penalties across all machines.
    pub fn total_changeover(&self) -> f64 {
        self.assignments.iter().map(|a| a.changeover_penalty).sum()
    }

    /// Number of assignments.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }
}

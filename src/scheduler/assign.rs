//! Tour-to-machine assignment.
//!
//! # Algorithm
//!
//! 1. Walk the sequenced tour in order.
//! 2. Tour position `k` goes to machine `k mod m`.
//! 3. Each machine runs its jobs back to back from time 0.
//! 4. The changeover penalty of a job is charged against the previous job
//!    on the same machine; the first job on a machine is free.
//!
//! Sequencing and assignment stay decoupled: the tour is optimized for a
//! single machine and only split afterwards.
//!
//! # Complexity
//! O(n) for n jobs.

use tracing::{debug, warn};

use crate::error::{Result, SequencerError};
use crate::models::{Assignment, Job, Matrix, Schedule};

/// Maps a job sequence onto parallel machines.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_sequence::config::ChangeoverWeights;
/// use u_sequence::cost::build_cost_matrix;
/// use u_sequence::models::Job;
/// use u_sequence::scheduler::MachineAssigner;
///
/// let due = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
/// let jobs: Vec<Job> = (0..4)
///     .map(|i| Job::new(format!("J{i}"), due).with_quantity(1.0).with_time_per_piece(60.0))
///     .collect();
/// let cost = build_cost_matrix(&jobs, &ChangeoverWeights::default());
///
/// let schedule = MachineAssigner::round_robin(2)
///     .unwrap()
///     .assign(&[0, 1, 2, 3], &jobs, &cost);
/// assert_eq!(schedule.machine_sequences(), vec![vec![0, 2], vec![1, 3]]);
/// assert_eq!(schedule.makespan_min(), 120.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MachineAssigner {
    machine_count: usize,
}

impl MachineAssigner {
    /// Round-robin assigner over `machine_count` machines.
    ///
    /// # Errors
    /// `InvalidMachineCount` when `machine_count` is 0.
    pub fn round_robin(machine_count: usize) -> Result<Self> {
        if machine_count == 0 {
            return Err(SequencerError::InvalidMachineCount);
        }
        Ok(Self { machine_count })
    }

    /// Number of machines.
    pub fn machine_count(&self) -> usize {
        self.machine_count
    }

    /// Machine for tour position `position`.
    #[inline]
    pub fn machine_for(&self, position: usize) -> usize {
        position % self.machine_count
    }

    /// Builds a timed schedule from `tour`.
    ///
    /// `cost` must be the changeover matrix of `jobs`. Tour entries with no
    /// matching job are skipped, as [`ScheduleKpi`](super::ScheduleKpi) does.
    pub fn assign(&self, tour: &[usize], jobs: &[Job], cost: &Matrix) -> Schedule {
        let mut schedule = Schedule::new(self.machine_count);
        let mut available = vec![0.0_f64; self.machine_count];
        let mut last: Vec<Option<usize>> = vec![None; self.machine_count];

        for (position, &job_index) in tour.iter().enumerate() {
            let Some(job) = jobs.get(job_index) else {
                warn!(job_index, position, "tour index out of range, skipped");
                continue;
            };
            let machine = self.machine_for(position);
            let start = available[machine];
            let end = start + job.total_minutes();
            let changeover = last[machine].map_or(0.0, |prev| cost.get(prev, job_index));

            schedule.add_assignment(
                Assignment::new(job_index, job.id.as_str(), machine, start, end)
                    .at_position(position)
                    .with_changeover(changeover),
            );
            available[machine] = end;
            last[machine] = Some(job_index);
        }

        debug!(
            jobs = tour.len(),
            machines = self.machine_count,
            makespan = schedule.makespan_min(),
            "tour assigned"
        );
        schedule
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChangeoverWeights;
    use crate::cost::build_cost_matrix;
    use chrono::NaiveDate;

    fn jobs() -> Vec<Job> {
        let due = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        vec![
            Job::new("J0", due).with_tool("T1").with_quantity(2.0).with_time_per_piece(30.0),
            Job::new("J1", due).with_tool("T2").with_quantity(1.0).with_time_per_piece(90.0),
            Job::new("J2", due).with_tool("T2").with_quantity(4.0).with_time_per_piece(10.0),
            Job::new("J3", due).with_tool("T1").with_quantity(1.0).with_time_per_piece(20.0),
            Job::new("J4", due).with_tool("T1").with_quantity(3.0).with_time_per_piece(10.0),
        ]
    }

    fn cost(jobs: &[Job]) -> Matrix {
        build_cost_matrix(jobs, &ChangeoverWeights::new(0.0, 0.0, 50.0))
    }

    #[test]
    fn test_zero_machines_rejected() {
        assert_eq!(
            MachineAssigner::round_robin(0).unwrap_err(),
            SequencerError::InvalidMachineCount
        );
    }

    #[test]
    fn test_machine_for_wraps() {
        let a = MachineAssigner::round_robin(3).unwrap();
        assert_eq!(a.machine_count(), 3);
        let machines: Vec<usize> = (0..7).map(|k| a.machine_for(k)).collect();
        assert_eq!(machines, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn test_single_machine_keeps_tour() {
        let js = jobs();
        let tour = [3, 0, 4, 1, 2];
        let schedule = MachineAssigner::round_robin(1)
            .unwrap()
            .assign(&tour, &js, &cost(&js));

        assert_eq!(schedule.machine_sequences(), vec![tour.to_vec()]);
        // 20 + 60 + 30 + 90 + 40
        assert!((schedule.makespan_min() - 240.0).abs() < 1e-10);
        // Only the T1 → T2 switch between J4 and J1 costs
        assert!((schedule.total_changeover() - 50.0).abs() < 1e-10);
    }

    #[test]
    fn test_round_robin_partitions_tour() {
        let js = jobs();
        let tour = [4, 2, 0, 3, 1];
        let schedule = MachineAssigner::round_robin(2)
            .unwrap()
            .assign(&tour, &js, &cost(&js));

        assert_eq!(schedule.assignment_count(), 5);
        let seqs = schedule.machine_sequences();
        assert_eq!(seqs, vec![vec![4, 0, 1], vec![2, 3]]);

        let mut all: Vec<usize> = seqs.into_iter().flatten().collect();
        all.sort_unstable();
        assert_eq!(all, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_machine_timing_back_to_back() {
        let js = jobs();
        let schedule = MachineAssigner::round_robin(2)
            .unwrap()
            .assign(&[4, 2, 0, 3, 1], &js, &cost(&js));

        let m0 = schedule.assignments_for_machine(0);
        assert_eq!(m0[0].start_min, 0.0);
        for pair in m0.windows(2) {
            assert_eq!(pair[0].end_min, pair[1].start_min);
        }
        // M0: J4 30 + J0 60 + J1 90; M1: J2 40 + J3 20
        assert!((schedule.makespan_min() - 180.0).abs() < 1e-10);
        assert!((schedule.busy_minutes()[&1] - 60.0).abs() < 1e-10);
    }

    #[test]
    fn test_changeover_relative_to_machine_predecessor() {
        let js = jobs();
        let schedule = MachineAssigner::round_robin(2)
            .unwrap()
            .assign(&[4, 2, 0, 3, 1], &js, &cost(&js));

        let penalty = |id: &str| schedule.assignment_for_job(id).unwrap().changeover_penalty;
        // Machine heads are free
        assert_eq!(penalty("J4"), 0.0);
        assert_eq!(penalty("J2"), 0.0);
        // J4 (T1) → J0 (T1), J0 (T1) → J1 (T2), J2 (T2) → J3 (T1)
        assert_eq!(penalty("J0"), 0.0);
        assert_eq!(penalty("J1"), 50.0);
        assert_eq!(penalty("J3"), 50.0);
        assert_eq!(schedule.assignment_for_job("J3").unwrap().tour_position, 3);
    }

    #[test]
    fn test_more_machines_than_jobs() {
        let js = jobs();
        let schedule = MachineAssigner::round_robin(8)
            .unwrap()
            .assign(&[1, 0], &js, &cost(&js));

        assert_eq!(schedule.machine_count, 8);
        assert!(schedule.machine_sequences()[2..].iter().all(Vec::is_empty));
        assert_eq!(schedule.total_changeover(), 0.0);
        assert!((schedule.makespan_min() - 90.0).abs() < 1e-10);
    }

    #[test]
    fn test_out_of_range_index_skipped() {
        let js = jobs();
        let schedule = MachineAssigner::round_robin(2)
            .unwrap()
            .assign(&[0, 9, 1], &js, &cost(&js));

        assert_eq!(schedule.assignment_count(), 2);
        assert_eq!(schedule.machine_sequences(), vec![vec![0, 1], vec![]]);
        assert_eq!(schedule.assignment_for_job("J1").unwrap().tour_position, 2);
    }

    #[test]
    fn test_empty_tour() {
        let js = jobs();
        let schedule = MachineAssigner::round_robin(2)
            .unwrap()
            .assign(&[], &js, &cost(&js));
        assert_eq!(schedule.assignment_count(), 0);
        assert_eq!(schedule.makespan_min(), 0.0);
    }
}

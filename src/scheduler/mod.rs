//! Machine assignment and KPI evaluation.
//!
//! Turns a sequenced tour into a timed multi-machine schedule and scores it.
//!
//! # Assignment
//!
//! `MachineAssigner` splits the tour round-robin across parallel machines.
//! It does not reorder jobs; the ACO search owns the order.
//!
//! # KPI
//!
//! `ScheduleKpi` computes makespan, utilization, changeover totals and
//! working-day lateness.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 5
//! - Baker & Trietsch (2019), "Principles of Sequencing and Scheduling"

mod assign;
mod kpi;

pub use assign::MachineAssigner;
pub use kpi::ScheduleKpi;

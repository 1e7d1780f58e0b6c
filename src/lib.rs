//! Ant Colony Optimization job sequencer for the U-Engine ecosystem.
//!
//! Orders production jobs on a machine to minimize changeover penalties
//! and due-date pressure, optionally biased toward profitable work, then
//! maps the sequence onto parallel machines.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Job`, `WorkCalendar`, `Matrix`,
//!   `Schedule`, `Assignment`
//! - **`config`**: Serde-loadable run configuration with validation
//! - **`cost`**: Changeover matrix, due-date penalty, heuristic matrix
//! - **`aco`**: Ants, pheromone, colony loop and `AcoSolver`
//! - **`scheduler`**: Round-robin machine assignment and KPIs
//! - **`validation`**: Input integrity checks (duplicate IDs, bad numbers)
//!
//! # Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use u_sequence::aco::AcoSolver;
//! use u_sequence::config::{AcoParams, SequencerConfig};
//! use u_sequence::cost::CostModel;
//! use u_sequence::models::Job;
//! use u_sequence::scheduler::{MachineAssigner, ScheduleKpi};
//! use u_sequence::validation::validate_jobs;
//!
//! let due = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
//! let jobs = vec![
//!     Job::new("J1", due).with_raw_material("steel").with_tool("T1").with_quantity(10.0).with_time_per_piece(6.0),
//!     Job::new("J2", due).with_raw_material("brass").with_tool("T2").with_quantity(5.0).with_time_per_piece(12.0),
//!     Job::new("J3", due).with_raw_material("steel").with_tool("T1").with_quantity(8.0).with_time_per_piece(4.0),
//! ];
//! validate_jobs(&jobs).unwrap();
//!
//! let config = SequencerConfig::default()
//!     .with_today(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap())
//!     .with_aco(AcoParams::default().with_ants(10).with_iterations(30).with_seed(42));
//! let result = AcoSolver::new(config.clone()).solve(&jobs).unwrap();
//!
//! let model = CostModel::build(&jobs, &config).unwrap();
//! let schedule = MachineAssigner::round_robin(2)
//!     .unwrap()
//!     .assign(&result.best_tour, &jobs, model.cost_matrix());
//! let kpi = ScheduleKpi::calculate(&schedule, &jobs, model.due_dates());
//! assert_eq!(kpi.late_jobs, 0);
//! ```
//!
//! # Architecture
//!
//! This crate sits at Layer 3 (Frameworks) in the U-Engine ecosystem.
//! Sequencing works on a single machine; assignment to parallel machines
//! is a separate step on the finished tour.
//!
//! # References
//!
//! - Dorigo & Stützle (2004), "Ant Colony Optimization"
//! - Stützle & Hoos (2000), "MAX–MIN Ant System"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod aco;
pub mod config;
pub mod cost;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use aco::{AcoResult, AcoSolver};
pub use config::SequencerConfig;
pub use error::{Result, SequencerError};
pub use models::Job;

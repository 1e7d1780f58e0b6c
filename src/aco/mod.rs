//! Ant Colony Optimization for job sequencing.
//!
//! Finds an order of jobs on a single machine minimizing accumulated
//! changeover and due-date cost.
//!
//! # Components
//!
//! - [`Ant`]: builds one tour by probabilistic transitions
//! - [`PheromoneMatrix`]: learned edge preferences, bounded
//! - [`Colony`]: one population step per call
//! - [`AcoSolver`]: configured run with termination and logging
//!
//! # Reference
//! Dorigo & Stützle (2004), "Ant Colony Optimization", MIT Press

mod ant;
mod colony;
mod pheromone;
mod termination;

pub use ant::Ant;
pub use colony::{AcoResult, AcoSolver, Colony};
pub use pheromone::PheromoneMatrix;
pub use termination::{Termination, TerminationReason};

//! Cooperative termination between iterations.
//!
//! The colony always runs its configured iteration count unless an
//! interrupt flag is raised or a wall-clock limit passes. Both are checked
//! only at iteration boundaries, after the pheromone update, so a stopped
//! run still returns a complete best tour.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationReason {
    /// All configured iterations ran.
    Completed,
    /// The interrupt flag was raised.
    Interrupted,
    /// The time limit elapsed.
    TimeLimit,
}

/// Optional stop conditions checked between iterations.
#[derive(Debug, Clone, Default)]
pub struct Termination {
    interrupt: Option<Arc<AtomicBool>>,
    time_limit: Option<Duration>,
}

impl Termination {
    /// No stop conditions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops once `flag` is set to `true`.
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = Some(flag);
        self
    }

    /// Stops once `limit` has elapsed since the run started.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Returns the stop reason, if any, for a run started at `started`.
    pub fn check(&self, started: Instant) -> Option<TerminationReason> {
        if let Some(flag) = &self.interrupt {
            if flag.load(Ordering::Relaxed) {
                return Some(TerminationReason::Interrupted);
            }
        }
        match self.time_limit {
            Some(limit) if started.elapsed() >= limit => Some(TerminationReason::TimeLimit),
            _ => None,
        }
    }
}

//! Colony loop and solver entry point.
//!
//! # Iteration
//!
//! 1. Draw a start job and an RNG seed per ant from the run's RNG.
//! 2. Build every ant's tour (in parallel on the rayon pool when enabled).
//! 3. Track the global best by strict improvement.
//! 4. Evaporate: `tau *= 1 − rho`.
//! 5. Deposit `Q / (cost + eps)` along every ant's tour, in ant order.
//! 6. Deposit the elitist bonus `w · Q / (best + eps)` along the best tour.
//! 7. Clamp into `[tau_min, tau_max]`.
//! 8. Decay exploration: `epsilon = max(epsilon · decay, epsilon_min)`.
//!
//! Per-ant seeds are drawn before construction and deposits are applied
//! serially, so a fixed seed reproduces the same run for any thread count.
//!
//! # Reference
//! Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
//! Colony of Cooperating Agents"

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, warn};

use super::{Ant, PheromoneMatrix, Termination, TerminationReason};
use crate::config::{AcoParams, SequencerConfig};
use crate::cost::CostModel;
use crate::error::Result;
use crate::models::{Job, Matrix};

/// Outcome of a sequencing run.
///
/// All fields are owned snapshots; nothing refers back into the solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcoResult {
    /// Best tour found (job indices in processing order).
    pub best_tour: Vec<usize>,
    /// Cost of the best tour.
    pub best_cost: f64,
    /// Best-so-far cost after each iteration (non-increasing).
    pub cost_history: Vec<f64>,
    /// Pheromone levels after the last iteration.
    pub pheromone: Matrix,
    /// Iterations actually run.
    pub iterations: usize,
    /// Why the run stopped.
    pub termination: TerminationReason,
    /// Wall-clock duration of the search.
    pub elapsed: Duration,
}

impl AcoResult {
    /// Job IDs of the best tour.
    pub fn best_job_ids<'a>(&self, jobs: &'a [Job]) -> Vec<&'a str> {
        self.best_tour
            .iter()
            .filter_map(|&i| jobs.get(i).map(|j| j.id.as_str()))
            .collect()
    }
}

/// State of one colony: pheromone, exploration rate, best tour, history.
pub struct Colony<'a> {
    model: &'a CostModel,
    params: &'a AcoParams,
    pheromone: PheromoneMatrix,
    epsilon: f64,
    best: Option<(Vec<usize>, f64)>,
    history: Vec<f64>,
}

impl<'a> Colony<'a> {
    /// Creates a colony with uniform pheromone.
    pub fn new(model: &'a CostModel, params: &'a AcoParams) -> Self {
        Self {
            model,
            params,
            pheromone: PheromoneMatrix::new(
                model.len(),
                params.tau_init,
                params.tau_min,
                params.tau_max,
            ),
            epsilon: params.epsilon_init,
            best: None,
            history: Vec::with_capacity(params.iterations),
        }
    }

    /// Runs one iteration. Returns `true` when the global best improved.
    pub fn run_iteration<R: Rng>(&mut self, rng: &mut R) -> bool {
        let tours = self.construct_tours(rng);

        let mut improved = false;
        for (tour, cost) in &tours {
            let better = match &self.best {
                Some((_, best)) => *cost < *best,
                None => true,
            };
            if better {
                self.best = Some((tour.clone(), *cost));
                improved = true;
            }
        }

        self.update_pheromone(&tours);

        if let Some((_, best)) = &self.best {
            self.history.push(*best);
        }
        self.epsilon = (self.epsilon * self.params.epsilon_decay).max(self.params.epsilon_min);
        improved
    }

    /// Builds one tour per ant.
    fn construct_tours<R: Rng>(&self, rng: &mut R) -> Vec<(Vec<usize>, f64)> {
        let n = self.model.len();
        let seeds: Vec<(usize, u64)> = (0..self.params.ants)
            .map(|_| (rng.random_range(0..n), rng.random::<u64>()))
            .collect();

        let build = |&(start, seed): &(usize, u64)| {
            let mut ant_rng = SmallRng::seed_from_u64(seed);
            let mut ant = Ant::new(start, self.model);
            ant.construct(
                self.model,
                &self.pheromone,
                self.params,
                self.epsilon,
                &mut ant_rng,
            );
            ant.into_solution()
        };

        if self.params.parallel {
            seeds.par_iter().map(build).collect()
        } else {
            seeds.iter().map(build).collect()
        }
    }

    /// Evaporation, population and elitist deposits, clamping.
    fn update_pheromone(&mut self, tours: &[(Vec<usize>, f64)]) {
        let p = self.params;
        self.pheromone.evaporate(p.rho);
        for (tour, cost) in tours {
            self.pheromone.deposit(tour, p.q / (cost + p.cost_epsilon));
        }
        if let Some((tour, cost)) = &self.best {
            self.pheromone
                .deposit(tour, p.elitist_weight * p.q / (cost + p.cost_epsilon));
        }
        self.pheromone.clamp();
    }

    /// Exploration rate used by the next iteration.
    pub fn exploration_rate(&self) -> f64 {
        self.epsilon
    }

    /// Current pheromone levels.
    pub fn pheromone(&self) -> &PheromoneMatrix {
        &self.pheromone
    }

    /// Best tour and cost so far.
    pub fn best(&self) -> Option<(&[usize], f64)> {
        self.best.as_ref().map(|(t, c)| (t.as_slice(), *c))
    }

    /// Best-so-far cost per completed iteration.
    pub fn history(&self) -> &[f64] {
        &self.history
    }

    fn into_parts(self) -> (Option<(Vec<usize>, f64)>, Vec<f64>, Matrix) {
        (self.best, self.history, self.pheromone.snapshot())
    }
}

/// ACO job sequencer.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_sequence::aco::AcoSolver;
/// use u_sequence::config::{AcoParams, SequencerConfig};
/// use u_sequence::models::Job;
///
/// let due = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
/// let jobs = vec![
///     Job::new("J1", due).with_tool("T1"),
///     Job::new("J2", due).with_tool("T2"),
///     Job::new("J3", due).with_tool("T1"),
/// ];
/// let config = SequencerConfig::default()
///     .with_today(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap())
///     .with_aco(AcoParams::default().with_ants(5).with_iterations(10).with_seed(42));
///
/// let result = AcoSolver::new(config).solve(&jobs).unwrap();
/// assert_eq!(result.best_tour.len(), 3);
/// assert_eq!(result.cost_history.len(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct AcoSolver {
    config: SequencerConfig,
    termination: Termination,
}

impl AcoSolver {
    /// Creates a solver; the configuration is validated when solving.
    pub fn new(config: SequencerConfig) -> Self {
        Self {
            config,
            termination: Termination::new(),
        }
    }

    /// Sets the stop conditions checked between iterations.
    pub fn with_termination(mut self, termination: Termination) -> Self {
        self.termination = termination;
        self
    }

    /// Stops the run once `flag` is raised.
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.termination = self.termination.with_interrupt(flag);
        self
    }

    /// Stops the run once `limit` has elapsed.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.termination = self.termination.with_time_limit(limit);
        self
    }

    /// Solver configuration.
    pub fn config(&self) -> &SequencerConfig {
        &self.config
    }

    /// Sequences `jobs` with an RNG seeded from `aco.seed`, or from the OS
    /// when no seed is configured.
    pub fn solve(&self, jobs: &[Job]) -> Result<AcoResult> {
        let mut rng = match self.config.aco.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_rng(&mut rand::rng()),
        };
        self.solve_with_rng(jobs, &mut rng)
    }

    /// Sequences `jobs` drawing all randomness from `rng`.
    ///
    /// # Errors
    /// Fails before any search on empty input or invalid configuration.
    pub fn solve_with_rng<R: Rng>(&self, jobs: &[Job], rng: &mut R) -> Result<AcoResult> {
        let model = CostModel::build(jobs, &self.config)?;
        Ok(self.run(&model, rng))
    }

    fn run<R: Rng>(&self, model: &CostModel, rng: &mut R) -> AcoResult {
        let params = &self.config.aco;
        let started = Instant::now();
        let _span = info_span!(
            "aco",
            jobs = model.len(),
            ants = params.ants,
            iterations = params.iterations
        )
        .entered();
        info!(parallel = params.parallel, "colony started");

        let mut colony = Colony::new(model, params);
        let mut termination = TerminationReason::Completed;
        let mut iterations = 0;

        while iterations < params.iterations {
            let epsilon = colony.exploration_rate();
            let improved = colony.run_iteration(rng);
            iterations += 1;

            if improved {
                if let Some((_, cost)) = colony.best() {
                    debug!(iteration = iterations, cost, epsilon, "new best tour");
                }
            }

            if iterations < params.iterations {
                if let Some(reason) = self.termination.check(started) {
                    warn!(?reason, iterations, "colony stopped early");
                    termination = reason;
                    break;
                }
            }
        }

        let (best, cost_history, pheromone) = colony.into_parts();
        let (best_tour, best_cost) = best.unwrap_or_default();
        let elapsed = started.elapsed();
        info!(best_cost, iterations, ?elapsed, "colony finished");

        AcoResult {
            best_tour,
            best_cost,
            cost_history,
            pheromone,
            iterations,
            termination,
            elapsed,
        }
    }
}

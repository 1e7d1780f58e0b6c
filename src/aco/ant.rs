//! Ant tour construction.
//!
//! An ant starts on one job and repeatedly picks an unvisited job until
//! none remain.
//!
//! # States
//! - **Active**: unvisited jobs remain; [`Ant::step`] moves to one of them.
//! - **Complete**: every job visited; tour and cost are final.
//!
//! # Transition Rule
//! With probability `epsilon` the next job is drawn uniformly from the
//! unvisited set. Otherwise job `j` is drawn with probability proportional
//! to `tau[current][j]^alpha · eta[current][j]^beta`. Weights are computed
//! relative to the largest one, so they never overflow; only when every
//! weight is zero does the draw fall back to uniform.
//!
//! # Reference
//! Dorigo & Stützle (2004), "Ant Colony Optimization", Ch. 3

use rand::Rng;

use super::PheromoneMatrix;
use crate::config::AcoParams;
use crate::cost::CostModel;

/// One candidate-solution builder.
#[derive(Debug, Clone)]
pub struct Ant {
    tour: Vec<usize>,
    remaining: Vec<usize>,
    current: usize,
    cost: f64,
    elapsed_minutes: f64,
}

impl Ant {
    /// Places an ant on `start`.
    ///
    /// The start job pays its own due-date penalty at elapsed time 0.
    pub fn new(start: usize, model: &CostModel) -> Self {
        let n = model.len();
        let mut tour = Vec::with_capacity(n);
        tour.push(start);
        Self {
            tour,
            remaining: (0..n).filter(|&j| j != start).collect(),
            current: start,
            cost: model.start_cost(start),
            elapsed_minutes: model.duration(start),
        }
    }

    /// Whether every job has been visited.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Jobs visited so far, in order.
    pub fn tour(&self) -> &[usize] {
        &self.tour
    }

    /// Jobs not yet visited.
    pub fn remaining(&self) -> &[usize] {
        &self.remaining
    }

    /// Last visited job.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Accumulated cost.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Processing minutes of all visited jobs.
    pub fn elapsed_minutes(&self) -> f64 {
        self.elapsed_minutes
    }

    /// Picks the next job without moving.
    ///
    /// Must only be called while the ant is active.
    pub fn choose_next<R: Rng>(
        &self,
        model: &CostModel,
        pheromone: &PheromoneMatrix,
        params: &AcoParams,
        epsilon: f64,
        rng: &mut R,
    ) -> usize {
        if epsilon > 0.0 && rng.random_bool(epsilon.min(1.0)) {
            return self.pick_uniform(rng);
        }

        // Weights are formed in log space and shifted by the largest one, so
        // overflow of `tau^alpha * eta^beta` cannot hide the best edge.
        let eta = model.heuristic_matrix();
        let logs: Vec<f64> = self
            .remaining
            .iter()
            .map(|&j| {
                log_pow(pheromone.get(self.current, j), params.alpha)
                    + log_pow(eta.get(self.current, j), params.beta)
            })
            .collect();
        let top = logs
            .iter()
            .copied()
            .filter(|l| !l.is_nan())
            .fold(f64::NEG_INFINITY, f64::max);

        if top == f64::NEG_INFINITY {
            return self.pick_uniform(rng);
        }

        let weights: Vec<f64> = logs
            .iter()
            .map(|&l| {
                if l.is_nan() {
                    0.0
                } else if top == f64::INFINITY {
                    if l == top {
                        1.0
                    } else {
                        0.0
                    }
                } else {
                    (l - top).exp()
                }
            })
            .collect();
        let total: f64 = weights.iter().sum();

        if !(total > 0.0 && total.is_finite()) {
            return self.pick_uniform(rng);
        }

        let mut target = rng.random::<f64>() * total;
        let mut fallback = self.remaining[self.remaining.len() - 1];
        for (&job, &w) in self.remaining.iter().zip(&weights) {
            if w <= 0.0 {
                continue;
            }
            if target < w {
                return job;
            }
            target -= w;
            fallback = job;
        }
        // Rounding left `target` past the last positive weight
        fallback
    }

    /// Moves to `next`, charging changeover plus due-date penalty.
    ///
    /// Returns `false` and leaves the ant untouched when `next` is not an
    /// unvisited job.
    pub fn visit(&mut self, next: usize, model: &CostModel) -> bool {
        let Some(pos) = self.remaining.iter().position(|&j| j == next) else {
            return false;
        };
        self.remaining.remove(pos);
        self.cost += model.transition_cost(self.current, next, self.elapsed_minutes);
        self.elapsed_minutes += model.duration(next);
        self.tour.push(next);
        self.current = next;
        true
    }

    /// Performs one transition. Returns `false` once the ant is complete.
    pub fn step<R: Rng>(
        &mut self,
        model: &CostModel,
        pheromone: &PheromoneMatrix,
        params: &AcoParams,
        epsilon: f64,
        rng: &mut R,
    ) -> bool {
        if self.is_complete() {
            return false;
        }
        let next = self.choose_next(model, pheromone, params, epsilon, rng);
        self.visit(next, model)
    }

    /// Runs transitions until the ant is complete.
    pub fn construct<R: Rng>(
        &mut self,
        model: &CostModel,
        pheromone: &PheromoneMatrix,
        params: &AcoParams,
        epsilon: f64,
        rng: &mut R,
    ) {
        while self.step(model, pheromone, params, epsilon, rng) {}
    }

    /// Consumes the ant, returning its tour and total cost.
    pub fn into_solution(self) -> (Vec<usize>, f64) {
        (self.tour, self.cost)
    }

    fn pick_uniform<R: Rng>(&self, rng: &mut R) -> usize {
        self.remaining[rng.random_range(0..self.remaining.len())]
    }
}

/// `ln(base^exp)`, with `x^0 = 1` for every base.
#[inline]
fn log_pow(base: f64, exp: f64) -> f64 {
    if exp == 0.0 {
        0.0
    } else {
        exp * base.ln()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ChangeoverWeights, DueDatePolicy, SequencerConfig};
    use crate::models::Job;
    use chrono::NaiveDate;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn far() -> NaiveDate {
        NaiveDate::from_ymd_opt(2999, 1, 1).unwrap()
    }

    fn model(jobs: &[Job]) -> CostModel {
        let config = SequencerConfig::default()
            .with_due_date(DueDatePolicy::disabled())
            .with_today(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        CostModel::build(jobs, &config).unwrap()
    }

    fn jobs(n: usize) -> Vec<Job> {
        (0..n)
            .map(|i| {
                Job::new(format!("J{i}"), far())
                    .with_tool(format!("T{}", i % 3))
                    .with_quantity(10.0)
                    .with_time_per_piece(3.0)
            })
            .collect()
    }

    #[test]
    fn test_new_ant_state() {
        let m = model(&jobs(4));
        let ant = Ant::new(2, &m);
        assert_eq!(ant.tour(), &[2]);
        assert_eq!(ant.remaining(), &[0, 1, 3]);
        assert_eq!(ant.current(), 2);
        assert_eq!(ant.cost(), 0.0);
        assert!((ant.elapsed_minutes() - 30.0).abs() < 1e-10);
        assert!(!ant.is_complete());
    }

    #[test]
    fn test_single_job_ant_is_complete() {
        let m = model(&jobs(1));
        let mut ant = Ant::new(0, &m);
        assert!(ant.is_complete());
        let p = PheromoneMatrix::new(1, 1.0, 0.01, 10.0);
        let mut rng = SmallRng::seed_from_u64(42);
        assert!(!ant.step(&m, &p, &AcoParams::default(), 0.0, &mut rng));
        assert_eq!(ant.into_solution(), (vec![0], 0.0));
    }

    #[test]
    fn test_construct_visits_every_job_once() {
        let m = model(&jobs(7));
        let p = PheromoneMatrix::new(7, 1.0, 0.01, 10.0);
        let mut rng = SmallRng::seed_from_u64(42);

        let mut ant = Ant::new(3, &m);
        ant.construct(&m, &p, &AcoParams::default(), 0.5, &mut rng);

        assert!(ant.is_complete());
        let mut tour = ant.tour().to_vec();
        tour.sort_unstable();
        assert_eq!(tour, (0..7).collect::<Vec<_>>());
        assert!((ant.elapsed_minutes() - 210.0).abs() < 1e-9);
    }

    #[test]
    fn test_cost_matches_model_evaluation() {
        let m = model(&jobs(6));
        let p = PheromoneMatrix::new(6, 1.0, 0.01, 10.0);
        let mut rng = SmallRng::seed_from_u64(7);

        let mut ant = Ant::new(0, &m);
        ant.construct(&m, &p, &AcoParams::default(), 0.2, &mut rng);
        let (tour, cost) = ant.into_solution();
        assert!((cost - m.evaluate_tour(&tour)).abs() < 1e-9);
    }

    #[test]
    fn test_greedy_prefers_cheap_edge() {
        // From J0 (T0) only J3 shares the tool; huge beta makes it near-certain
        let m = model(&jobs(4));
        let p = PheromoneMatrix::new(4, 1.0, 0.01, 10.0);
        let params = AcoParams::default().with_exponents(1.0, 10.0);
        let mut rng = SmallRng::seed_from_u64(42);

        let ant = Ant::new(0, &m);
        for _ in 0..20 {
            assert_eq!(ant.choose_next(&m, &p, &params, 0.0, &mut rng), 3);
        }
    }

    #[test]
    fn test_overflowing_weight_takes_best_edge() {
        // eta(J0 -> J3) = 1e6 and 1e6^60 overflows f64
        let m = model(&jobs(5));
        let p = PheromoneMatrix::new(5, 1.0, 0.01, 10.0);
        let params = AcoParams::default().with_exponents(1.0, 60.0);
        let mut rng = SmallRng::seed_from_u64(42);

        let ant = Ant::new(0, &m);
        let mut counts = [0usize; 5];
        for _ in 0..1000 {
            counts[ant.choose_next(&m, &p, &params, 0.0, &mut rng)] += 1;
        }
        assert_eq!(counts[3], 1000, "draws: {counts:?}");
    }

    #[test]
    fn test_log_pow_zero_exponent() {
        assert_eq!(log_pow(0.0, 0.0), 0.0);
        assert_eq!(log_pow(0.0, 2.0), f64::NEG_INFINITY);
        assert!((log_pow(10.0, 2.0) - 100f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_underflowing_weights_stay_balanced() {
        // tiny pheromone to a huge alpha underflows every raw weight to 0
        let m = model(&jobs(5));
        let p = PheromoneMatrix::new(5, 1e-300, 1e-300, 1.0);
        let params = AcoParams::default().with_exponents(50.0, 0.0);
        let mut rng = SmallRng::seed_from_u64(42);

        let ant = Ant::new(0, &m);
        let mut seen = [false; 5];
        for _ in 0..200 {
            let next = ant.choose_next(&m, &p, &params, 0.0, &mut rng);
            assert_ne!(next, 0);
            seen[next] = true;
        }
        assert!(seen[1..].iter().all(|&s| s));
    }

    #[test]
    fn test_full_exploration_is_uniform_over_remaining() {
        let m = model(&jobs(4));
        let p = PheromoneMatrix::new(4, 1.0, 0.01, 10.0);
        let params = AcoParams::default().with_exponents(1.0, 10.0);
        let mut rng = SmallRng::seed_from_u64(3);

        let ant = Ant::new(0, &m);
        let mut counts = [0usize; 4];
        for _ in 0..3000 {
            counts[ant.choose_next(&m, &p, &params, 1.0, &mut rng)] += 1;
        }
        assert_eq!(counts[0], 0);
        for &c in &counts[1..] {
            assert!(c > 800, "uniform pick skewed: {counts:?}");
        }
    }

    #[test]
    fn test_visit_rejects_visited_or_unknown_job() {
        let weights = ChangeoverWeights::default();
        let js = jobs(3);
        let config = SequencerConfig::default()
            .with_changeover(weights)
            .with_due_date(DueDatePolicy::disabled());
        let m = CostModel::build(&js, &config).unwrap();

        let mut ant = Ant::new(0, &m);
        assert!(ant.visit(1, &m));
        let cost = ant.cost();
        assert!(!ant.visit(1, &m));
        assert!(!ant.visit(0, &m));
        assert!(!ant.visit(7, &m));
        assert_eq!(ant.tour(), &[0, 1]);
        assert_eq!(ant.remaining(), &[2]);
        assert_eq!(ant.cost(), cost);
    }
}

//! Bounded pheromone matrix.
//!
//! The only long-lived mutable state of a run. Owned exclusively by the
//! colony; ants only read it through a shared reference while building
//! tours.
//!
//! # Bounds
//! After every [`PheromoneMatrix::clamp`] all entries lie in
//! `[tau_min, tau_max]` with `tau_min > 0`, so every transition stays
//! reachable and no single edge can dominate without limit.
//!
//! # Reference
//! Stützle & Hoos (2000), "MAX–MIN Ant System"

use crate::models::Matrix;

/// Pheromone levels per directed job pair.
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneMatrix {
    tau: Matrix,
    tau_min: f64,
    tau_max: f64,
}

impl PheromoneMatrix {
    /// Creates a uniform matrix; `initial` is clamped into the bounds.
    pub fn new(size: usize, initial: f64, tau_min: f64, tau_max: f64) -> Self {
        Self {
            tau: Matrix::filled(size, initial.clamp(tau_min, tau_max)),
            tau_min,
            tau_max,
        }
    }

    /// Pheromone on edge `(i, j)`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.tau.get(i, j)
    }

    /// Lower and upper bound.
    pub fn bounds(&self) -> (f64, f64) {
        (self.tau_min, self.tau_max)
    }

    /// Multiplies every entry by `1 − rho`.
    pub fn evaporate(&mut self, rho: f64) {
        let keep = 1.0 - rho;
        self.tau.map_in_place(|v| v * keep);
    }

    /// Adds `amount` to every consecutive edge `(tour[k], tour[k+1])`.
    ///
    /// Edges are directed and the tour is open: there is no edge from the
    /// last job back to the first.
    pub fn deposit(&mut self, tour: &[usize], amount: f64) {
        for edge in tour.windows(2) {
            *self.tau.get_mut(edge[0], edge[1]) += amount;
        }
    }

    /// Clamps every entry into `[tau_min, tau_max]`.
    pub fn clamp(&mut self) {
        let (lo, hi) = (self.tau_min, self.tau_max);
        self.tau.map_in_place(|v| if v.is_nan() { lo } else { v.clamp(lo, hi) });
    }

    /// Read-only view of the levels.
    pub fn matrix(&self) -> &Matrix {
        &self.tau
    }

    /// Owned copy of the levels for callers outside the run.
    pub fn snapshot(&self) -> Matrix {
        self.tau.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_clamped() {
        let p = PheromoneMatrix::new(3, 50.0, 0.1, 10.0);
        assert!(p.matrix().values().iter().all(|&v| v == 10.0));
        assert_eq!(p.bounds(), (0.1, 10.0));
    }

    #[test]
    fn test_evaporate() {
        let mut p = PheromoneMatrix::new(2, 1.0, 0.01, 10.0);
        p.evaporate(0.25);
        assert!(p.matrix().values().iter().all(|&v| (v - 0.75).abs() < 1e-12));
    }

    #[test]
    fn test_deposit_open_directed_edges() {
        let mut p = PheromoneMatrix::new(3, 1.0, 0.01, 10.0);
        p.deposit(&[2, 0, 1], 0.5);

        assert!((p.get(2, 0) - 1.5).abs() < 1e-12);
        assert!((p.get(0, 1) - 1.5).abs() < 1e-12);
        // Reverse and wrap-around edges untouched
        assert!((p.get(0, 2) - 1.0).abs() < 1e-12);
        assert!((p.get(1, 2) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_deposit_single_job_tour_is_noop() {
        let mut p = PheromoneMatrix::new(1, 1.0, 0.01, 10.0);
        p.deposit(&[0], 5.0);
        assert_eq!(p.get(0, 0), 1.0);
    }

    #[test]
    fn test_clamp() {
        let mut p = PheromoneMatrix::new(2, 1.0, 0.5, 2.0);
        p.deposit(&[0, 1], 100.0);
        p.evaporate(0.9);
        p.clamp();

        assert_eq!(p.get(0, 1), 2.0);
        assert_eq!(p.get(1, 0), 0.5);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut p = PheromoneMatrix::new(2, 1.0, 0.01, 10.0);
        let snap = p.snapshot();
        p.deposit(&[0, 1], 1.0);
        assert_eq!(snap.get(0, 1), 1.0);
        assert_eq!(p.get(0, 1), 2.0);
    }
}

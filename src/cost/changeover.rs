//! Static changeover cost matrix.
//!
//! `cost[i][j]` is the penalty of running job `j` directly after job `i`:
//! the sum of the raw-material, material and tool penalties for every field
//! that differs. Penalties apply in full, never partially. The diagonal is
//! `+∞` so an ant can never stay on the same job.
//!
//! # Reference
//! Allahverdi et al. (2008), "A survey of scheduling problems with
//! setup times or costs"

use crate::config::ChangeoverWeights;
use crate::models::{Job, Matrix};

/// Changeover penalty of running `to` directly after `from`.
pub fn changeover_penalty(from: &Job, to: &Job, weights: &ChangeoverWeights) -> f64 {
    let mut penalty = 0.0;
    if from.raw_material != to.raw_material {
        penalty += weights.raw_material;
    }
    if from.material != to.material {
        penalty += weights.material;
    }
    if from.tool_id != to.tool_id {
        penalty += weights.tool;
    }
    penalty
}

/// Builds the directed `N × N` changeover cost matrix.
pub fn build_cost_matrix(jobs: &[Job], weights: &ChangeoverWeights) -> Matrix {
    Matrix::from_fn(jobs.len(), |i, j| {
        if i == j {
            f64::INFINITY
        } else {
            changeover_penalty(&jobs[i], &jobs[j], weights)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn job(id: &str, raw: &str, material: &str, tool: &str) -> Job {
        Job::new(id, NaiveDate::from_ymd_opt(2030, 1, 1).unwrap())
            .with_raw_material(raw)
            .with_material(material)
            .with_tool(tool)
    }

    #[test]
    fn test_penalty_components() {
        let w = ChangeoverWeights::new(300.0, 100.0, 50.0);
        let a = job("A", "steel", "S1", "T1");

        assert_eq!(changeover_penalty(&a, &job("B", "steel", "S1", "T1"), &w), 0.0);
        assert_eq!(changeover_penalty(&a, &job("B", "brass", "S1", "T1"), &w), 300.0);
        assert_eq!(changeover_penalty(&a, &job("B", "steel", "S2", "T1"), &w), 100.0);
        assert_eq!(changeover_penalty(&a, &job("B", "steel", "S1", "T2"), &w), 50.0);
        assert_eq!(changeover_penalty(&a, &job("B", "brass", "S2", "T2"), &w), 450.0);
    }

    #[test]
    fn test_matrix_diagonal_infinite() {
        let jobs = vec![
            job("A", "steel", "S1", "T1"),
            job("B", "brass", "S1", "T1"),
            job("C", "steel", "S2", "T3"),
        ];
        let cost = build_cost_matrix(&jobs, &ChangeoverWeights::default());

        assert_eq!(cost.size(), 3);
        for i in 0..3 {
            assert_eq!(cost.get(i, i), f64::INFINITY);
            for j in 0..3 {
                if i != j {
                    assert!(cost.get(i, j) >= 0.0 && cost.get(i, j).is_finite());
                }
            }
        }
        assert_eq!(cost.get(0, 1), 300.0);
        assert_eq!(cost.get(0, 2), 150.0);
        assert_eq!(cost.get(1, 2), 450.0);
    }

    #[test]
    fn test_zero_weights_degenerate() {
        let jobs = vec![job("A", "x", "y", "z"), job("B", "p", "q", "r")];
        let cost = build_cost_matrix(&jobs, &ChangeoverWeights::zero());
        assert_eq!(cost.get(0, 1), 0.0);
        assert_eq!(cost.get(1, 0), 0.0);
        assert_eq!(cost.get(0, 0), f64::INFINITY);
    }

    #[test]
    fn test_single_job() {
        let cost = build_cost_matrix(&[job("A", "x", "y", "z")], &ChangeoverWeights::default());
        assert_eq!(cost.size(), 1);
        assert_eq!(cost.get(0, 0), f64::INFINITY);
    }
}

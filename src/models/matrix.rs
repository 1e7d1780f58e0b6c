//! Dense square matrix over job pairs.
//!
//! Row `i`, column `j` holds the value for scheduling job `j` immediately
//! after job `i`. Storage is a single row-major `Vec<f64>`.

use serde::{Deserialize, Serialize};

/// Square `n × n` matrix of `f64`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    size: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Creates an `n × n` matrix filled with `value`.
    pub fn filled(size: usize, value: f64) -> Self {
        Self {
            size,
            data: vec![value; size * size],
        }
    }

    /// Creates a matrix by evaluating `f(i, j)` for every cell.
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(size * size);
        for i in 0..size {
            for j in 0..size {
                data.push(f(i, j));
            }
        }
        Self { size, data }
    }

    /// Number of rows (= columns).
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Value at `(i, j)`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.size + j]
    }

    /// Sets the value at `(i, j)`.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        self.data[i * self.size + j] = value;
    }

    /// Mutable reference to `(i, j)`.
    #[inline]
    pub fn get_mut(&mut self, i: usize, j: usize) -> &mut f64 {
        &mut self.data[i * self.size + j]
    }

    /// Row `i` as a slice.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.size..(i + 1) * self.size]
    }

    /// All cells in row-major order.
    pub fn values(&self) -> &[f64] {
        &self.data
    }

    /// Applies `f` to every cell in place.
    pub fn map_in_place(&mut self, f: impl Fn(f64) -> f64) {
        for v in &mut self.data {
            *v = f(*v);
        }
    }

    /// Copies the matrix into nested rows (for exporters and heatmaps).
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.chunks(self.size.max(1)).map(|r| r.to_vec()).collect()
    }
}

use rand::Rng;
use serde::{Serialize, Deserialize};
use std::f64::consts::PI;

/// Dense row-major weight storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Uniform samples in [-1, 1).
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);
        for row in res.data.iter_mut() {
            for v in row.iter_mut() {
                *v = rng.gen::<f64>() * 2.0 - 1.0;
            }
        }
        res
    }

    /// Samples a single value from N(0, 1) using the Box-Muller transform.
    fn sample_standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
        // Uniforms in (0, 1] to avoid log(0).
        let u1: f64 = 1.0 - rng.gen::<f64>();
        let u2: f64 = 1.0 - rng.gen::<f64>();
        (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
    }

    /// He initialization: samples from N(0, sqrt(2 / fan_in)).
    ///
    /// Shape: (rows, cols) where `rows` is the fan-in, matching the
    /// `input × weights` orientation used by dense layers.
    pub fn he<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let std_dev = (2.0 / rows.max(1) as f64).sqrt();
        let mut res = Matrix::zeros(rows, cols);
        for row in res.data.iter_mut() {
            for v in row.iter_mut() {
                *v = Matrix::sample_standard_normal(rng) * std_dev;
            }
        }
        res
    }

    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::{math::matrix::Matrix, activation::activation::ActivationFunction};

/// A fully connected layer with freshly initialized parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub size: usize,
    pub input_size: usize,
    /// Shape `(input_size, size)`.
    pub weights: Matrix,
    /// Shape `(1, size)`.
    pub biases: Matrix,
    pub activator: ActivationFunction,
}

impl Layer {
    /// Rectifier layers get He-initialized weights, everything else uniform
    /// [-1, 1). Biases start at zero.
    pub fn new<R: Rng + ?Sized>(
        size: usize,
        input_size: usize,
        activation: ActivationFunction,
        rng: &mut R,
    ) -> Layer {
        let weights = if activation.is_rectifier() {
            Matrix::he(input_size, size, rng)
        } else {
            Matrix::random(input_size, size, rng)
        };
        let biases = Matrix::zeros(1, size);

        Layer {
            size,
            input_size,
            weights,
            biases,
            activator: activation,
        }
    }

    pub fn parameter_count(&self) -> usize {
        self.weights.len() + self.biases.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn shapes_follow_fan_in_and_size() {
        let layer = Layer::new(3, 5, ActivationFunction::Sigmoid, &mut StdRng::seed_from_u64(1));
        assert_eq!((layer.weights.rows, layer.weights.cols), (5, 3));
        assert_eq!((layer.biases.rows, layer.biases.cols), (1, 3));
        assert_eq!(layer.parameter_count(), 18);
        assert!(layer.biases.data[0].iter().all(|b| *b == 0.0));
    }
}

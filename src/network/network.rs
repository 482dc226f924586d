use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::layers::dense::Layer;
use crate::network::spec::NetworkConfig;

/// A trainable model handle: the allocated layers of a `NetworkConfig`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub input_size: usize,
    pub layers: Vec<Layer>,
}

impl Model {
    /// Allocates one dense layer per configured layer. Reads `config` only.
    pub fn from_config<R: Rng + ?Sized>(config: &NetworkConfig, rng: &mut R) -> Model {
        let layers = config
            .layer_shapes()
            .map(|(fan_in, size, activation)| Layer::new(size, fan_in, activation, rng))
            .collect();
        Model { input_size: config.input_size, layers }
    }

    pub fn parameter_count(&self) -> usize {
        self.layers.iter().map(Layer::parameter_count).sum()
    }

    /// Neuron counts from the input layer to the output layer.
    pub fn layer_sizes(&self) -> Vec<usize> {
        std::iter::once(self.input_size)
            .chain(self.layers.iter().map(|l| l.size))
            .collect()
    }
}

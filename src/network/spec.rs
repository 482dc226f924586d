use serde::{Serialize, Deserialize};
use crate::activation::activation::ActivationFunction;

/// Widest input the editor accepts (MNIST needs 784).
pub const MAX_INPUT_SIZE: usize = 4096;
/// Most layers a network may have.
pub const MAX_LAYERS: usize = 8;
/// Widest layer the editor accepts.
pub const MAX_NEURONS: usize = 1024;

/// Why a `NetworkConfig` fails the editor's rules. Messages are shown to
/// the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidNetwork {
    #[error("Input size must be between 1 and {}.", MAX_INPUT_SIZE)]
    InputSize,
    #[error("Add at least one layer.")]
    NoLayers,
    #[error("At most {} layers are supported.", MAX_LAYERS)]
    TooManyLayers,
    /// 1-based layer number.
    #[error("Layer {0} must have between 1 and {max} neurons.", max = MAX_NEURONS)]
    LayerWidth(usize),
    #[error("Softmax can only be used on the output layer.")]
    HiddenSoftmax,
}

/// One layer as the network editor describes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerConfig {
    /// Number of neurons in this layer.
    pub neurons: usize,
    /// Activation applied after the linear transform.
    pub activation: ActivationFunction,
}

impl LayerConfig {
    pub fn new(neurons: usize, activation: ActivationFunction) -> Self {
        LayerConfig { neurons, activation }
    }
}

/// Architecture of the network being built: the raw input width plus the
/// ordered list of layers (input → output).
///
/// `Controller::set_network_config` takes any config as-is, so one may be
/// empty or otherwise odd. `validate` holds the editor's rules; imported
/// configurations go through it too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub input_size: usize,
    pub layers: Vec<LayerConfig>,
}

impl Default for NetworkConfig {
    /// Baseline used at session start: a small two-hidden-layer classifier
    /// sized for the 2-D toy datasets.
    fn default() -> Self {
        NetworkConfig {
            input_size: 2,
            layers: vec![
                LayerConfig::new(4, ActivationFunction::ReLU),
                LayerConfig::new(4, ActivationFunction::ReLU),
                LayerConfig::new(1, ActivationFunction::Sigmoid),
            ],
        }
    }
}

impl NetworkConfig {
    /// Yields `(fan_in, neurons, activation)` per layer.
    pub fn layer_shapes(&self) -> impl Iterator<Item = (usize, usize, ActivationFunction)> + '_ {
        let fan_ins = std::iter::once(self.input_size).chain(self.layers.iter().map(|l| l.neurons));
        fan_ins
            .zip(self.layers.iter())
            .map(|(fan_in, layer)| (fan_in, layer.neurons, layer.activation))
    }

    /// Checks the bounds every editable network must respect. Widths are
    /// capped so building the model stays a small allocation.
    pub fn validate(&self) -> Result<(), InvalidNetwork> {
        if !(1..=MAX_INPUT_SIZE).contains(&self.input_size) {
            return Err(InvalidNetwork::InputSize);
        }
        if self.layers.is_empty() {
            return Err(InvalidNetwork::NoLayers);
        }
        if self.layers.len() > MAX_LAYERS {
            return Err(InvalidNetwork::TooManyLayers);
        }
        if let Some(i) = self.layers.iter().position(|l| !(1..=MAX_NEURONS).contains(&l.neurons)) {
            return Err(InvalidNetwork::LayerWidth(i + 1));
        }
        let hidden = &self.layers[..self.layers.len() - 1];
        if hidden.iter().any(|l| l.activation == ActivationFunction::Softmax) {
            return Err(InvalidNetwork::HiddenSoftmax);
        }
        Ok(())
    }

    /// Width of the last layer, or the input width when there are no layers.
    pub fn output_size(&self) -> usize {
        self.layers.last().map(|l| l.neurons).unwrap_or(self.input_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_shapes_chain_fan_in_from_previous_layer() {
        let cfg = NetworkConfig::default();
        let shapes: Vec<_> = cfg.layer_shapes().map(|(i, n, _)| (i, n)).collect();
        assert_eq!(shapes, vec![(2, 4), (4, 4), (4, 1)]);
        assert_eq!(cfg.output_size(), 1);
    }

    #[test]
    fn empty_config_reports_input_width() {
        let cfg = NetworkConfig { input_size: 3, layers: Vec::new() };
        assert_eq!(cfg.layer_shapes().count(), 0);
        assert_eq!(cfg.output_size(), 3);
    }

    #[test]
    fn default_and_mnist_sized_configs_are_valid() {
        assert_eq!(NetworkConfig::default().validate(), Ok(()));
        let mnist = NetworkConfig {
            input_size: 784,
            layers: vec![
                LayerConfig::new(MAX_NEURONS, ActivationFunction::ReLU),
                LayerConfig::new(10, ActivationFunction::Softmax),
            ],
        };
        assert_eq!(mnist.validate(), Ok(()));
    }

    #[test]
    fn oversized_widths_are_rejected() {
        let wide_input = NetworkConfig { input_size: 100_000, ..NetworkConfig::default() };
        assert_eq!(wide_input.validate(), Err(InvalidNetwork::InputSize));

        let mut wide_layer = NetworkConfig::default();
        wide_layer.layers[1].neurons = 4_611_686_018_427_387_904;
        assert_eq!(wide_layer.validate(), Err(InvalidNetwork::LayerWidth(2)));
        assert_eq!(
            InvalidNetwork::LayerWidth(2).to_string(),
            "Layer 2 must have between 1 and 1024 neurons."
        );
    }

    #[test]
    fn structural_rules() {
        let empty = NetworkConfig { input_size: 2, layers: Vec::new() };
        assert_eq!(empty.validate(), Err(InvalidNetwork::NoLayers));

        let deep = NetworkConfig {
            input_size: 2,
            layers: vec![LayerConfig::new(2, ActivationFunction::Tanh); MAX_LAYERS + 1],
        };
        assert_eq!(deep.validate(), Err(InvalidNetwork::TooManyLayers));

        let mut hidden = NetworkConfig::default();
        hidden.layers[0].activation = ActivationFunction::Softmax;
        assert_eq!(hidden.validate(), Err(InvalidNetwork::HiddenSoftmax));

        let mut zero = NetworkConfig::default();
        zero.layers[0].neurons = 0;
        assert_eq!(zero.validate(), Err(InvalidNetwork::LayerWidth(1)));
    }
}

use std::sync::Mutex;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::network::network::Model;
use crate::network::spec::NetworkConfig;

/// Turns a network description into a trainable model handle.
///
/// Implementations must treat the config as read-only.
pub trait ModelFactory: Send + Sync {
    fn build(&self, config: &NetworkConfig) -> Model;
}

/// Default factory: dense layers with randomly initialized weights.
#[derive(Debug, Default)]
pub struct DenseModelFactory {
    rng: Option<Mutex<StdRng>>,
}

impl DenseModelFactory {
    /// Draws weights from the thread-local RNG.
    pub fn new() -> Self {
        DenseModelFactory { rng: None }
    }

    /// Reproducible weights: every factory built with the same seed yields
    /// the same sequence of models.
    pub fn seeded(seed: u64) -> Self {
        DenseModelFactory { rng: Some(Mutex::new(StdRng::seed_from_u64(seed))) }
    }
}

impl ModelFactory for DenseModelFactory {
    fn build(&self, config: &NetworkConfig) -> Model {
        match &self.rng {
            Some(rng) => {
                let mut rng = rng.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
                Model::from_config(config, &mut *rng)
            }
            None => Model::from_config(config, &mut rand::thread_rng()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::ActivationFunction;
    use crate::network::spec::LayerConfig;

    #[test]
    fn builds_one_layer_per_config_entry() {
        let config = NetworkConfig::default();
        let model = DenseModelFactory::new().build(&config);
        assert_eq!(model.layers.len(), 3);
        assert_eq!(model.layer_sizes(), vec![2, 4, 4, 1]);
        // (2*4 + 4) + (4*4 + 4) + (4*1 + 1)
        assert_eq!(model.parameter_count(), 37);
    }

    #[test]
    fn seeded_factories_agree() {
        let config = NetworkConfig {
            input_size: 3,
            layers: vec![LayerConfig::new(2, ActivationFunction::Tanh)],
        };
        let a = DenseModelFactory::seeded(9).build(&config);
        let b = DenseModelFactory::seeded(9).build(&config);
        assert_eq!(a, b);
    }

    #[test]
    fn build_leaves_config_untouched() {
        let config = NetworkConfig::default();
        let before = config.clone();
        let _ = DenseModelFactory::seeded(1).build(&config);
        assert_eq!(config, before);
    }
}

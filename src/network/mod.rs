pub mod factory;
pub mod network;
pub mod spec;

pub use factory::{DenseModelFactory, ModelFactory};
pub use network::Model;
pub use spec::{InvalidNetwork, LayerConfig, NetworkConfig, MAX_INPUT_SIZE, MAX_LAYERS, MAX_NEURONS};

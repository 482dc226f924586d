pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod dataset;
pub mod overlay;
pub mod train;
pub mod controller;
pub mod error;
pub mod share;

// Convenience re-exports
pub use activation::activation::ActivationFunction;
pub use controller::{Controller, Notice, NoticeKind, SessionSnapshot, TrainingPhase, VisualizationInput};
pub use dataset::DatasetType;
pub use error::ControllerError;
pub use network::{DenseModelFactory, InvalidNetwork, LayerConfig, Model, ModelFactory, NetworkConfig};
pub use overlay::{OverlayContent, OverlayState, OverlayTopic};
pub use train::{DemoEngine, EpochStats, InvalidTraining, RunControl, TrainingConfig, TrainingEngine, TrainingJob};

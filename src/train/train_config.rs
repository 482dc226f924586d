use serde::{Serialize, Deserialize};

/// Training hyperparameters.
///
/// Kept separate from `NetworkConfig` so the architecture can be edited
/// independently of how it is trained. `Controller::set_training_config`
/// stores any value; `validate` holds the settings form's rules.
///
/// # Fields
/// - `epochs`        — total number of full passes over the training data
/// - `learning_rate` — step size handed to the engine's optimizer
/// - `batch_size`    — samples per mini-batch; use `1` for online SGD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    pub epochs: usize,
    pub learning_rate: f64,
    pub batch_size: usize,
}

/// Why a `TrainingConfig` fails the settings form's rules.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidTraining {
    #[error("Epochs must be a positive integer.")]
    Epochs,
    #[error("Learning rate must be a positive number.")]
    LearningRate,
    #[error("Batch size must be a positive integer.")]
    BatchSize,
}

impl TrainingConfig {
    pub fn validate(&self) -> Result<(), InvalidTraining> {
        if self.epochs == 0 {
            return Err(InvalidTraining::Epochs);
        }
        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return Err(InvalidTraining::LearningRate);
        }
        if self.batch_size == 0 {
            return Err(InvalidTraining::BatchSize);
        }
        Ok(())
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        TrainingConfig { epochs: 50, learning_rate: 0.01, batch_size: 32 }
    }
}

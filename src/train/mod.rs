pub mod demo;
pub mod engine;
pub mod epoch_stats;
pub mod train_config;

pub use demo::DemoEngine;
pub use engine::{drive_epochs, RunControl, TrainingEngine, TrainingJob};
pub use epoch_stats::{EpochMetrics, EpochStats};
pub use train_config::{InvalidTraining, TrainingConfig};

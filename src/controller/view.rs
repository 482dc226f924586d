use serde::Serialize;

use crate::dataset::DatasetType;
use crate::network::spec::NetworkConfig;
use crate::overlay::OverlayState;
use crate::train::train_config::TrainingConfig;

/// Training lifecycle state derived from the two lifecycle flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingPhase {
    Idle,
    Running,
    Paused,
}

impl TrainingPhase {
    pub fn from_flags(is_training: bool, is_paused: bool) -> Self {
        match (is_training, is_paused) {
            (false, _)    => TrainingPhase::Idle,
            (true, false) => TrainingPhase::Running,
            (true, true)  => TrainingPhase::Paused,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrainingPhase::Idle    => "idle",
            TrainingPhase::Running => "running",
            TrainingPhase::Paused  => "paused",
        }
    }
}

/// Read-only inputs for the network visualization.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct VisualizationInput<'a> {
    pub network: &'a NetworkConfig,
    pub is_training: bool,
    pub is_paused: bool,
    pub current_epoch: usize,
}

/// Owned copy of the whole session, serialized for the browser.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub network: NetworkConfig,
    pub training: TrainingConfig,
    pub dataset: Option<DatasetType>,
    pub phase: TrainingPhase,
    pub is_training: bool,
    pub is_paused: bool,
    pub current_epoch: usize,
    pub run_generation: u64,
    pub loss: Vec<f64>,
    pub accuracy: Vec<f64>,
    pub overlay: OverlayState,
}

use serde::{Serialize, Deserialize};

/// Per-epoch progress emitted by a training engine.
///
/// Engines send one `EpochStats` over their progress channel at the end of
/// every completed epoch. The controller folds these into its epoch counter
/// and metric histories; the studio forwards them to the browser as SSE.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Mean training loss over the epoch.
    pub loss: f64,
    /// Training accuracy as a fraction in [0, 1].
    pub accuracy: f64,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}

/// What an engine computes for one epoch; `drive_epochs` adds the bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochMetrics {
    pub loss: f64,
    pub accuracy: f64,
}

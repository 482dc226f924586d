//! The session controller: owns all UI state and enforces the training
//! lifecycle.
//!
//! Lifecycle:
//! ```text
//! Idle --start (dataset)--> Running <--pause_resume--> Paused
//! Running | Paused --stop / engine finished--> Idle
//! ```
//! A start without a dataset is rejected with a notice and changes nothing.

pub mod export;
pub mod notice;
pub mod view;

use std::sync::mpsc::{self, TryRecvError};
use std::sync::Arc;
use std::thread;

use tracing::{debug, info, warn};

use crate::dataset::DatasetType;
use crate::error::ControllerError;
use crate::network::{DenseModelFactory, Model, ModelFactory, NetworkConfig};
use crate::overlay::{OverlayState, OverlayTopic};
use crate::train::{EpochStats, RunControl, TrainingConfig, TrainingEngine, TrainingJob};

pub use export::{ConfigExport, ResultsExport};
pub use notice::{Notice, NoticeKind};
pub use view::{SessionSnapshot, TrainingPhase, VisualizationInput};

/// An engine run in flight: its control flags and the receiving end of its
/// progress channel.
struct ActiveRun {
    control: RunControl,
    progress: mpsc::Receiver<EpochStats>,
}

pub struct Controller {
    network: NetworkConfig,
    training: TrainingConfig,
    dataset: Option<DatasetType>,
    is_training: bool,
    is_paused: bool,
    current_epoch: usize,
    loss: Vec<f64>,
    accuracy: Vec<f64>,
    /// Bumped by every accepted start.
    run_generation: u64,
    /// Epoch count the latest run was started with.
    run_total_epochs: Option<usize>,
    overlay: OverlayState,
    notices: Vec<Notice>,
    /// Model built by the most recent start.
    model: Option<Model>,
    factory: Box<dyn ModelFactory>,
    engine: Option<Arc<dyn TrainingEngine>>,
    run: Option<ActiveRun>,
}

impl Default for Controller {
    fn default() -> Self {
        Controller::new()
    }
}

impl Controller {
    /// Baseline session: default configs, no dataset, idle, no engine.
    pub fn new() -> Self {
        Controller {
            network: NetworkConfig::default(),
            training: TrainingConfig::default(),
            dataset: None,
            is_training: false,
            is_paused: false,
            current_epoch: 0,
            loss: Vec::new(),
            accuracy: Vec::new(),
            run_generation: 0,
            run_total_epochs: None,
            overlay: OverlayState::default(),
            notices: Vec::new(),
            model: None,
            factory: Box::new(DenseModelFactory::new()),
            engine: None,
            run: None,
        }
    }

    pub fn with_factory(mut self, factory: Box<dyn ModelFactory>) -> Self {
        self.factory = factory;
        self
    }

    /// Attaches the engine each start hands its model to.
    pub fn with_engine(mut self, engine: Arc<dyn TrainingEngine>) -> Self {
        self.engine = Some(engine);
        self
    }

    // -----------------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------------

    /// Replaces the architecture. Lifecycle state is untouched, even mid-run.
    pub fn set_network_config(&mut self, config: NetworkConfig) {
        debug!(layers = config.layers.len(), input_size = config.input_size, "network config updated");
        self.network = config;
    }

    pub fn set_training_config(&mut self, config: TrainingConfig) {
        debug!(?config, "training config updated");
        self.training = config;
    }

    pub fn set_dataset(&mut self, dataset: Option<DatasetType>) {
        debug!(dataset = dataset.map(|d| d.as_str()), "dataset selection updated");
        self.dataset = dataset;
    }

    // -----------------------------------------------------------------------
    // Training lifecycle
    // -----------------------------------------------------------------------

    /// Starts a fresh run: builds a model from the current network config,
    /// resets the epoch counter and both histories, and hands the model to
    /// the attached engine, if any. Any run already in flight is cancelled.
    ///
    /// Without a dataset this queues one error notice and returns
    /// `NoDatasetSelected`; no state changes. The model is built before
    /// anything else is touched, so a factory that panics leaves the
    /// session as it was.
    pub fn start_training(&mut self) -> Result<(), ControllerError> {
        let Some(dataset) = self.dataset else {
            warn!("training start rejected: no dataset selected");
            self.notices.push(Notice::error(ControllerError::NoDatasetSelected.to_string()));
            return Err(ControllerError::NoDatasetSelected);
        };

        let model = self.factory.build(&self.network);

        self.cancel_run();

        self.is_training = true;
        self.is_paused = false;
        self.current_epoch = 0;
        self.loss.clear();
        self.accuracy.clear();
        self.run_generation += 1;
        self.run_total_epochs = Some(self.training.epochs);

        info!(
            dataset = dataset.as_str(),
            layers = model.layers.len(),
            parameters = model.parameter_count(),
            epochs = self.training.epochs,
            "training started"
        );

        if let Some(engine) = &self.engine {
            let (tx, rx) = mpsc::channel();
            let control = RunControl::new();
            let job = TrainingJob {
                model: model.clone(),
                config: self.training.clone(),
                dataset,
            };
            let engine = Arc::clone(engine);
            let worker_control = control.clone();
            thread::spawn(move || engine.run(job, worker_control, tx));

            self.run = Some(ActiveRun { control, progress: rx });
        }

        self.model = Some(model);
        Ok(())
    }

    /// Toggles between Running and Paused. Idle sessions ignore the call.
    pub fn pause_resume(&mut self) -> TrainingPhase {
        if !self.is_training {
            debug!("pause/resume ignored: not training");
            return self.phase();
        }

        self.is_paused = !self.is_paused;
        if let Some(run) = &self.run {
            run.control.set_paused(self.is_paused);
        }
        info!(paused = self.is_paused, epoch = self.current_epoch, "training pause toggled");
        self.phase()
    }

    /// Returns to Idle. The epoch counter and histories stay as the last
    /// run's snapshot until the next start.
    pub fn stop_training(&mut self) {
        if self.is_training {
            info!(epoch = self.current_epoch, "training stopped");
        }
        self.is_training = false;
        self.is_paused = false;
        self.cancel_run();
    }

    /// Applies any progress the engine has reported since the last call.
    /// Never blocks. Returns the number of epochs applied.
    ///
    /// When the engine has finished, the session returns to Idle and a
    /// notice reports how far the run got.
    pub fn poll_progress(&mut self) -> usize {
        let Some(run) = self.run.take() else {
            return 0;
        };

        let mut applied = 0;
        let finished = loop {
            match run.progress.try_recv() {
                Ok(stats) => {
                    if self.record_epoch(&stats) {
                        applied += 1;
                    }
                }
                Err(TryRecvError::Empty) => break false,
                Err(TryRecvError::Disconnected) => break true,
            }
        };

        if finished {
            self.is_training = false;
            self.is_paused = false;
            let total = self.run_total_epochs();
            info!(epochs = self.current_epoch, total, "training finished");
            self.notices.push(Notice::success(format!(
                "Training finished after {} of {} epochs.",
                self.current_epoch, total
            )));
        } else {
            self.run = Some(run);
        }
        applied
    }

    /// Folds one epoch into the counter and histories. Progress is only
    /// accepted while training, and each epoch number at most once, so the
    /// histories stay `current_epoch` long.
    fn record_epoch(&mut self, stats: &EpochStats) -> bool {
        if !self.is_training || stats.epoch <= self.current_epoch {
            return false;
        }
        self.current_epoch = stats.epoch;
        self.loss.push(stats.loss);
        self.accuracy.push(stats.accuracy);
        true
    }

    fn cancel_run(&mut self) {
        if let Some(run) = self.run.take() {
            run.control.request_stop();
            debug!("engine run cancelled");
        }
    }

    // -----------------------------------------------------------------------
    // Overlay
    // -----------------------------------------------------------------------

    /// Opens the overlay on `topic`, replacing whatever was shown.
    pub fn show_overlay(&mut self, topic: OverlayTopic) {
        self.overlay = OverlayState { visible: true, topic: Some(topic) };
    }

    /// Like `show_overlay`, for a raw key. Unknown keys leave the overlay as
    /// it was.
    pub fn show_overlay_key(&mut self, key: &str) -> Result<OverlayTopic, ControllerError> {
        let topic: OverlayTopic = key.parse()?;
        self.show_overlay(topic);
        Ok(topic)
    }

    pub fn dismiss_overlay(&mut self) {
        self.overlay.visible = false;
    }

    // -----------------------------------------------------------------------
    // Notices and views
    // -----------------------------------------------------------------------

    pub fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    /// Drains the queued notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn phase(&self) -> TrainingPhase {
        TrainingPhase::from_flags(self.is_training, self.is_paused)
    }

    pub fn network_config(&self) -> &NetworkConfig {
        &self.network
    }

    pub fn training_config(&self) -> &TrainingConfig {
        &self.training
    }

    pub fn dataset(&self) -> Option<DatasetType> {
        self.dataset
    }

    pub fn dataset_choices(&self) -> &'static [DatasetType] {
        &DatasetType::ALL
    }

    pub fn is_training(&self) -> bool {
        self.is_training
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn current_epoch(&self) -> usize {
        self.current_epoch
    }

    pub fn loss_history(&self) -> &[f64] {
        &self.loss
    }

    pub fn accuracy_history(&self) -> &[f64] {
        &self.accuracy
    }

    /// Identifies the run the histories belong to; changes on every start.
    pub fn run_generation(&self) -> u64 {
        self.run_generation
    }

    /// Epoch count of the latest run, or the configured count before the
    /// first start. Later config edits do not change it.
    pub fn run_total_epochs(&self) -> usize {
        self.run_total_epochs.unwrap_or(self.training.epochs)
    }

    pub fn overlay(&self) -> OverlayState {
        self.overlay
    }

    pub fn model(&self) -> Option<&Model> {
        self.model.as_ref()
    }

    /// Whether a start would currently be accepted.
    pub fn can_start(&self) -> bool {
        self.dataset.is_some()
    }

    pub fn visualization(&self) -> VisualizationInput<'_> {
        VisualizationInput {
            network: &self.network,
            is_training: self.is_training,
            is_paused: self.is_paused,
            current_epoch: self.current_epoch,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            network: self.network.clone(),
            training: self.training.clone(),
            dataset: self.dataset,
            phase: self.phase(),
            is_training: self.is_training,
            is_paused: self.is_paused,
            current_epoch: self.current_epoch,
            run_generation: self.run_generation,
            loss: self.loss.clone(),
            accuracy: self.accuracy.clone(),
            overlay: self.overlay,
        }
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        self.cancel_run();
    }
}

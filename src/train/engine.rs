use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::{Duration, Instant};

use crate::dataset::DatasetType;
use crate::network::network::Model;
use crate::train::epoch_stats::{EpochMetrics, EpochStats};
use crate::train::train_config::TrainingConfig;

/// How often a paused run re-checks its flags.
pub const PAUSE_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Everything an engine needs to run one training session.
#[derive(Debug, Clone)]
pub struct TrainingJob {
    pub model: Model,
    pub config: TrainingConfig,
    pub dataset: DatasetType,
}

/// Cooperative stop/pause signals shared between the controller and a
/// running engine. Clones observe the same flags.
#[derive(Debug, Clone, Default)]
pub struct RunControl {
    stop: Arc<AtomicBool>,
    paused: Arc<AtomicBool>,
}

impl RunControl {
    pub fn new() -> Self {
        RunControl::default()
    }

    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    pub fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::Relaxed);
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Relaxed)
    }

    /// Blocks while paused. Returns `false` if a stop arrived instead.
    pub fn wait_while_paused(&self) -> bool {
        while self.is_paused() && !self.is_stopped() {
            thread::sleep(PAUSE_POLL_INTERVAL);
        }
        !self.is_stopped()
    }
}

/// Consumes a model and streams per-epoch progress.
///
/// `run` is called on a dedicated background thread and may block for the
/// whole session. It must observe `control` between epochs and return
/// promptly after a stop or once the progress receiver is gone. Returning
/// drops `progress`, which the controller reads as "run finished".
pub trait TrainingEngine: Send + Sync {
    fn run(&self, job: TrainingJob, control: RunControl, progress: mpsc::Sender<EpochStats>);
}

/// The epoch loop shared by engines: `step` computes one epoch, everything
/// else (pausing, stopping, timing, reporting) happens here.
///
/// Returns the number of epochs completed and reported.
///
/// # Early termination
/// The loop breaks early if:
/// - `control` is stopped (checked before each epoch and after it), **or**
/// - the progress receiver has been dropped.
pub fn drive_epochs<F>(
    total_epochs: usize,
    control: &RunControl,
    progress: &mpsc::Sender<EpochStats>,
    mut step: F,
) -> usize
where
    F: FnMut(usize) -> EpochMetrics,
{
    let mut completed = 0;

    for epoch in 1..=total_epochs {
        if !control.wait_while_paused() {
            break;
        }

        let t_start = Instant::now();
        let metrics = step(epoch);
        let elapsed_ms = t_start.elapsed().as_millis() as u64;

        // A stop during the step discards that epoch.
        if control.is_stopped() {
            break;
        }

        let stats = EpochStats {
            epoch,
            total_epochs,
            loss: metrics.loss,
            accuracy: metrics.accuracy,
            elapsed_ms,
        };
        if progress.send(stats).is_err() {
            break;
        }
        completed = epoch;
    }

    completed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(epoch: usize) -> EpochMetrics {
        EpochMetrics { loss: 1.0 / epoch as f64, accuracy: 0.5 }
    }

    #[test]
    fn reports_every_epoch_in_order() {
        let (tx, rx) = mpsc::channel();
        let done = drive_epochs(4, &RunControl::new(), &tx, metrics);
        drop(tx);
        let epochs: Vec<usize> = rx.iter().map(|s| s.epoch).collect();
        assert_eq!(done, 4);
        assert_eq!(epochs, vec![1, 2, 3, 4]);
    }

    #[test]
    fn stop_during_a_step_ends_the_run() {
        let (tx, rx) = mpsc::channel();
        let control = RunControl::new();
        let inner = control.clone();
        let done = drive_epochs(10, &control, &tx, |epoch| {
            if epoch == 3 {
                inner.request_stop();
            }
            metrics(epoch)
        });
        drop(tx);
        assert_eq!(done, 2);
        assert_eq!(rx.iter().count(), 2);
    }

    #[test]
    fn dropped_receiver_ends_the_run() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let mut calls = 0;
        let done = drive_epochs(10, &RunControl::new(), &tx, |epoch| {
            calls += 1;
            metrics(epoch)
        });
        assert_eq!(done, 0);
        assert_eq!(calls, 1);
    }

    #[test]
    fn paused_run_resumes_when_flag_clears() {
        let (tx, rx) = mpsc::channel();
        let control = RunControl::new();
        control.set_paused(true);

        let worker = {
            let control = control.clone();
            thread::spawn(move || drive_epochs(2, &control, &tx, metrics))
        };

        thread::sleep(PAUSE_POLL_INTERVAL * 3);
        assert!(rx.try_recv().is_err(), "no epoch may run while paused");

        control.set_paused(false);
        assert_eq!(worker.join().unwrap(), 2);
        assert_eq!(rx.iter().count(), 2);
    }

    #[test]
    fn stop_while_paused_unblocks_without_running() {
        let (tx, _rx) = mpsc::channel();
        let control = RunControl::new();
        control.set_paused(true);
        control.request_stop();
        let mut calls = 0;
        let done = drive_epochs(5, &control, &tx, |epoch| {
            calls += 1;
            metrics(epoch)
        });
        assert_eq!((done, calls), (0, 0));
    }
}

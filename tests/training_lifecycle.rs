//! End-to-end lifecycle runs against a scripted engine on a real thread.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use synaptix::train::{drive_epochs, EpochMetrics};
use synaptix::{
    ActivationFunction, Controller, DatasetType, EpochStats, LayerConfig, NetworkConfig,
    NoticeKind, RunControl, TrainingConfig, TrainingEngine, TrainingJob, TrainingPhase,
};

/// Emits `loss = 1 / epoch`, `accuracy = epoch / total`, sleeping `delay`
/// per epoch. Counts every step it runs and records each job it receives.
struct ScriptedEngine {
    delay: Duration,
    steps: Arc<AtomicUsize>,
    jobs: Arc<Mutex<Vec<TrainingJob>>>,
}

impl ScriptedEngine {
    fn new(delay: Duration) -> Self {
        ScriptedEngine {
            delay,
            steps: Arc::new(AtomicUsize::new(0)),
            jobs: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl TrainingEngine for ScriptedEngine {
    fn run(&self, job: TrainingJob, control: RunControl, progress: mpsc::Sender<EpochStats>) {
        let total = job.config.epochs;
        self.jobs.lock().unwrap().push(job);
        drive_epochs(total, &control, &progress, |epoch| {
            thread::sleep(self.delay);
            self.steps.fetch_add(1, Ordering::SeqCst);
            EpochMetrics { loss: 1.0 / epoch as f64, accuracy: epoch as f64 / total as f64 }
        });
    }
}

fn controller(engine: ScriptedEngine, epochs: usize) -> Controller {
    let mut c = Controller::new().with_engine(Arc::new(engine));
    c.set_dataset(Some(DatasetType::Circles));
    c.set_training_config(TrainingConfig { epochs, ..TrainingConfig::default() });
    c
}

/// Polls until `cond` holds or five seconds pass.
fn wait_until<F: Fn(&Controller) -> bool>(c: &mut Controller, cond: F) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        c.poll_progress();
        if cond(c) {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    false
}

#[test]
fn completed_run_returns_to_idle_with_full_history() {
    let engine = ScriptedEngine::new(Duration::ZERO);
    let jobs = engine.jobs.clone();
    let mut c = controller(engine, 6);
    let network = NetworkConfig {
        input_size: 2,
        layers: vec![
            LayerConfig::new(5, ActivationFunction::ReLU),
            LayerConfig::new(2, ActivationFunction::Softmax),
        ],
    };
    c.set_network_config(network);

    c.start_training().unwrap();
    assert!(wait_until(&mut c, |c| c.phase() == TrainingPhase::Idle));

    assert_eq!(c.current_epoch(), 6);
    assert_eq!(c.loss_history(), &[1.0, 0.5, 1.0 / 3.0, 0.25, 0.2, 1.0 / 6.0]);
    assert_eq!(c.accuracy_history().len(), 6);
    assert_eq!(c.accuracy_history().last(), Some(&1.0));

    let notices = c.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::Success);
    assert_eq!(notices[0].text, "Training finished after 6 of 6 epochs.");

    let jobs = jobs.lock().unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].dataset, DatasetType::Circles);
    assert_eq!(jobs[0].model.layer_sizes(), vec![2, 5, 2]);
    assert_eq!(jobs[0].config.epochs, 6);
}

#[test]
fn pause_holds_the_engine_until_resumed() {
    let engine = ScriptedEngine::new(Duration::from_millis(10));
    let steps = engine.steps.clone();
    let mut c = controller(engine, 10_000);

    c.start_training().unwrap();
    assert!(wait_until(&mut c, |c| c.current_epoch() >= 2));

    assert_eq!(c.pause_resume(), TrainingPhase::Paused);
    // Let any epoch already in flight land.
    thread::sleep(Duration::from_millis(60));
    c.poll_progress();
    let held_steps = steps.load(Ordering::SeqCst);
    let held_epoch = c.current_epoch();

    thread::sleep(Duration::from_millis(150));
    c.poll_progress();
    assert_eq!(steps.load(Ordering::SeqCst), held_steps);
    assert_eq!(c.current_epoch(), held_epoch);
    assert_eq!(c.phase(), TrainingPhase::Paused);

    assert_eq!(c.pause_resume(), TrainingPhase::Running);
    assert!(wait_until(&mut c, |c| c.current_epoch() > held_epoch));
    c.stop_training();
}

#[test]
fn stop_freezes_the_snapshot_and_halts_the_engine() {
    let engine = ScriptedEngine::new(Duration::from_millis(5));
    let steps = engine.steps.clone();
    let mut c = controller(engine, 10_000);

    c.start_training().unwrap();
    assert!(wait_until(&mut c, |c| c.current_epoch() >= 3));

    c.stop_training();
    let epoch = c.current_epoch();
    let loss = c.loss_history().to_vec();
    assert_eq!(c.phase(), TrainingPhase::Idle);

    thread::sleep(Duration::from_millis(50));
    let after_stop = steps.load(Ordering::SeqCst);
    thread::sleep(Duration::from_millis(100));
    assert_eq!(steps.load(Ordering::SeqCst), after_stop, "engine kept running after stop");

    assert_eq!(c.poll_progress(), 0);
    assert_eq!(c.current_epoch(), epoch);
    assert_eq!(c.loss_history(), loss.as_slice());
    assert!(c.take_notices().is_empty(), "a stopped run reports no completion");
}

#[test]
fn restart_discards_the_previous_run() {
    let engine = ScriptedEngine::new(Duration::from_millis(5));
    let jobs = engine.jobs.clone();
    let mut c = controller(engine, 10_000);

    c.start_training().unwrap();
    assert!(wait_until(&mut c, |c| c.current_epoch() >= 3));

    c.start_training().unwrap();
    assert_eq!(c.phase(), TrainingPhase::Running);
    assert_eq!(c.current_epoch(), 0);
    assert!(c.loss_history().is_empty());
    assert!(c.accuracy_history().is_empty());

    // The fresh run counts from epoch 1 again.
    assert!(wait_until(&mut c, |c| c.current_epoch() >= 1));
    assert_eq!(c.loss_history()[0], 1.0);
    assert!(wait_until(&mut c, |_| jobs.lock().unwrap().len() == 2));
    c.stop_training();
}

#[test]
fn start_without_dataset_never_reaches_the_engine() {
    let engine = ScriptedEngine::new(Duration::ZERO);
    let jobs = engine.jobs.clone();
    let mut c = Controller::new().with_engine(Arc::new(engine));

    assert!(c.start_training().is_err());
    thread::sleep(Duration::from_millis(20));
    assert!(jobs.lock().unwrap().is_empty());
    assert_eq!(c.take_notices().len(), 1);
    assert_eq!(c.phase(), TrainingPhase::Idle);
}

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use rand::Rng;
use tracing::{debug, info};

use crate::train::engine::{drive_epochs, RunControl, TrainingEngine, TrainingJob};
use crate::train::epoch_stats::{EpochMetrics, EpochStats};

/// Stand-in engine that plays back a plausible learning curve.
///
/// Loss decays exponentially toward a floor and accuracy climbs from chance
/// level toward a ceiling, both with a little jitter. The decay rate grows
/// with the learning rate and the floor with the dataset's difficulty. The
/// model's weights are never touched.
#[derive(Debug, Clone)]
pub struct DemoEngine {
    epoch_delay: Duration,
}

impl DemoEngine {
    pub fn new(epoch_delay: Duration) -> Self {
        DemoEngine { epoch_delay }
    }
}

impl Default for DemoEngine {
    fn default() -> Self {
        DemoEngine::new(Duration::from_millis(150))
    }
}

/// Shape of the synthetic curve for one run.
#[derive(Debug, Clone, Copy)]
struct Curve {
    initial_loss: f64,
    floor: f64,
    rate: f64,
    chance: f64,
    ceiling: f64,
}

impl Curve {
    fn for_job(job: &TrainingJob) -> Curve {
        let classes = job.dataset.class_count().max(2) as f64;
        let difficulty = match job.dataset {
            crate::dataset::DatasetType::Blobs => 0.2,
            crate::dataset::DatasetType::Xor => 0.4,
            crate::dataset::DatasetType::Circles => 0.5,
            crate::dataset::DatasetType::Mnist => 0.6,
            crate::dataset::DatasetType::Spiral => 0.9,
        };
        // Bigger networks fit the toy sets a little better.
        let capacity = (job.model.parameter_count() as f64).ln_1p() / 10.0;
        Curve {
            initial_loss: classes.ln().max(0.7),
            floor: (0.05 * difficulty / capacity.max(0.1)).min(0.5),
            rate: (0.04 + job.config.learning_rate * 4.0).min(0.6),
            chance: 1.0 / classes,
            ceiling: (1.0 - 0.08 * difficulty).clamp(0.5, 0.99),
        }
    }

    fn at<R: Rng + ?Sized>(&self, epoch: usize, rng: &mut R) -> EpochMetrics {
        let progress = 1.0 - (-self.rate * epoch as f64).exp();
        let jitter: f64 = rng.gen_range(-1.0..1.0);

        let loss = self.floor + (self.initial_loss - self.floor) * (1.0 - progress);
        let accuracy = self.chance + (self.ceiling - self.chance) * progress;

        EpochMetrics {
            loss: (loss * (1.0 + 0.04 * jitter)).max(0.0),
            accuracy: (accuracy + 0.01 * jitter).clamp(0.0, 1.0),
        }
    }
}

impl TrainingEngine for DemoEngine {
    fn run(&self, job: TrainingJob, control: RunControl, progress: mpsc::Sender<EpochStats>) {
        let curve = Curve::for_job(&job);
        debug!(?curve, dataset = job.dataset.as_str(), "demo engine curve");

        let mut rng = rand::thread_rng();
        let completed = drive_epochs(job.config.epochs, &control, &progress, |epoch| {
            thread::sleep(self.epoch_delay);
            curve.at(epoch, &mut rng)
        });

        info!(completed, total = job.config.epochs, "demo engine finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DatasetType;
    use crate::network::{DenseModelFactory, ModelFactory, NetworkConfig};
    use crate::train::train_config::TrainingConfig;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn job(epochs: usize) -> TrainingJob {
        TrainingJob {
            model: DenseModelFactory::seeded(3).build(&NetworkConfig::default()),
            config: TrainingConfig { epochs, ..TrainingConfig::default() },
            dataset: DatasetType::Circles,
        }
    }

    #[test]
    fn curve_trends_down_for_loss_and_up_for_accuracy() {
        let curve = Curve::for_job(&job(50));
        let mut rng = StdRng::seed_from_u64(11);
        let first = curve.at(1, &mut rng);
        let last = curve.at(200, &mut rng);
        assert!(last.loss < first.loss);
        assert!(last.accuracy > first.accuracy);
        assert!((0.0..=1.0).contains(&last.accuracy));
    }

    #[test]
    fn run_streams_every_requested_epoch() {
        let (tx, rx) = mpsc::channel();
        DemoEngine::new(Duration::ZERO).run(job(5), RunControl::new(), tx);
        let stats: Vec<EpochStats> = rx.iter().collect();
        assert_eq!(stats.len(), 5);
        assert!(stats.iter().all(|s| s.total_epochs == 5));
    }
}

//! Help overlay topics and their static explanatory content.

use serde::{Serialize, Deserialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlayTopic {
    About,
    Help,
    Visualization,
    Layers,
    Activations,
    Datasets,
    LearningRate,
    BatchSize,
    Epochs,
    Metrics,
}

/// Title plus body paragraphs for one topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OverlayContent {
    pub title: &'static str,
    pub paragraphs: &'static [&'static str],
}

impl OverlayTopic {
    pub const ALL: [OverlayTopic; 10] = [
        OverlayTopic::About,
        OverlayTopic::Help,
        OverlayTopic::Visualization,
        OverlayTopic::Layers,
        OverlayTopic::Activations,
        OverlayTopic::Datasets,
        OverlayTopic::LearningRate,
        OverlayTopic::BatchSize,
        OverlayTopic::Epochs,
        OverlayTopic::Metrics,
    ];

    /// URL-safe key, as used in `/overlay/<key>`.
    pub fn key(&self) -> &'static str {
        match self {
            OverlayTopic::About         => "about",
            OverlayTopic::Help          => "help",
            OverlayTopic::Visualization => "visualization",
            OverlayTopic::Layers        => "layers",
            OverlayTopic::Activations   => "activations",
            OverlayTopic::Datasets      => "datasets",
            OverlayTopic::LearningRate  => "learning-rate",
            OverlayTopic::BatchSize     => "batch-size",
            OverlayTopic::Epochs        => "epochs",
            OverlayTopic::Metrics       => "metrics",
        }
    }

    pub fn content(&self) -> OverlayContent {
        match self {
            OverlayTopic::About => OverlayContent {
                title: "About Synaptix",
                paragraphs: &[
                    "Synaptix is a playground for learning how neural networks are put together and how they learn.",
                    "Design an architecture, pick a dataset, start training and watch the loss fall epoch by epoch.",
                ],
            },
            OverlayTopic::Help => OverlayContent {
                title: "Getting started",
                paragraphs: &[
                    "1. Use the Network tab to choose how many layers the network has, how wide each one is and which activation it uses.",
                    "2. Pick a dataset in the Dataset tab. Training cannot start without one.",
                    "3. Set epochs, learning rate and batch size in the Training tab, then press Start.",
                    "Pause holds training where it is; Stop ends the run but keeps its charts until the next start.",
                ],
            },
            OverlayTopic::Visualization => OverlayContent {
                title: "Reading the visualization",
                paragraphs: &[
                    "Each column is a layer and each circle a neuron. The leftmost column is the input.",
                    "Every neuron is connected to every neuron in the next column; those connections carry the weights training adjusts.",
                ],
            },
            OverlayTopic::Layers => OverlayContent {
                title: "Layers",
                paragraphs: &[
                    "A dense layer multiplies its inputs by a weight matrix, adds a bias and applies an activation.",
                    "Hidden layers let the network build features out of features. The last layer's width must match the number of outputs you want.",
                ],
            },
            OverlayTopic::Activations => OverlayContent {
                title: "Activation functions",
                paragraphs: &[
                    "Without a non-linear activation, any stack of layers collapses into a single linear map.",
                    "ReLU is a sound default for hidden layers. Sigmoid suits a single yes/no output and Softmax a choice among several classes.",
                ],
            },
            OverlayTopic::Datasets => OverlayContent {
                title: "Datasets",
                paragraphs: &[
                    "The built-in datasets range from trivially separable blobs to intertwined spirals.",
                    "XOR is the smallest problem a network without hidden layers cannot solve.",
                ],
            },
            OverlayTopic::LearningRate => OverlayContent {
                title: "Learning rate",
                paragraphs: &[
                    "The learning rate scales every weight update.",
                    "Too small and training crawls; too large and the loss bounces around or diverges.",
                ],
            },
            OverlayTopic::BatchSize => OverlayContent {
                title: "Batch size",
                paragraphs: &[
                    "Gradients are averaged over a mini-batch of samples before the weights move.",
                    "Small batches give noisy but frequent updates; large batches give smooth but fewer updates per epoch.",
                ],
            },
            OverlayTopic::Epochs => OverlayContent {
                title: "Epochs",
                paragraphs: &[
                    "One epoch is one full pass over the training data.",
                    "More epochs give the network more chances to improve, and more chances to memorize the training set.",
                ],
            },
            OverlayTopic::Metrics => OverlayContent {
                title: "Loss and accuracy",
                paragraphs: &[
                    "Loss measures how wrong the predictions are; training tries to push it down.",
                    "Accuracy is the fraction of samples classified correctly. It usually rises as loss falls, but not always in lockstep.",
                ],
            },
        }
    }
}

impl fmt::Display for OverlayTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown overlay topic '{0}'")]
pub struct UnknownTopic(pub String);

impl FromStr for OverlayTopic {
    type Err = UnknownTopic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OverlayTopic::ALL
            .into_iter()
            .find(|t| t.key() == s)
            .ok_or_else(|| UnknownTopic(s.to_owned()))
    }
}

/// Whether the overlay is open and which topic it shows.
///
/// `topic` is left in place on dismiss and only read while `visible`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OverlayState {
    pub visible: bool,
    pub topic: Option<OverlayTopic>,
}

impl OverlayState {
    /// The topic on screen, if any.
    pub fn shown(&self) -> Option<OverlayTopic> {
        if self.visible { self.topic } else { None }
    }
}

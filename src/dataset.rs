//! Built-in dataset identifiers offered by the dataset selector.
//!
//! Only the identity of each dataset lives here. Loading samples is the
//! training engine's concern.

use serde::{Serialize, Deserialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetType {
    Xor,
    Circles,
    Blobs,
    Spiral,
    Mnist,
}

impl DatasetType {
    /// Every selectable dataset, in the order the selector lists them.
    pub const ALL: [DatasetType; 5] = [
        DatasetType::Xor,
        DatasetType::Circles,
        DatasetType::Blobs,
        DatasetType::Spiral,
        DatasetType::Mnist,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetType::Xor     => "xor",
            DatasetType::Circles => "circles",
            DatasetType::Blobs   => "blobs",
            DatasetType::Spiral  => "spiral",
            DatasetType::Mnist   => "mnist",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DatasetType::Xor     => "XOR",
            DatasetType::Circles => "Concentric circles",
            DatasetType::Blobs   => "Gaussian blobs",
            DatasetType::Spiral  => "Two spirals",
            DatasetType::Mnist   => "MNIST digits",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DatasetType::Xor => "Four points no straight line can separate. The classic reason hidden layers exist.",
            DatasetType::Circles => "An inner ring inside an outer ring; needs a curved decision boundary.",
            DatasetType::Blobs => "Three well separated clusters. Almost any network solves it.",
            DatasetType::Spiral => "Two interleaved spirals. A hard problem for small networks.",
            DatasetType::Mnist => "28x28 grayscale handwritten digits, ten classes.",
        }
    }

    /// Width of one input sample.
    pub fn feature_count(&self) -> usize {
        match self {
            DatasetType::Mnist => 784,
            _ => 2,
        }
    }

    pub fn class_count(&self) -> usize {
        match self {
            DatasetType::Blobs => 3,
            DatasetType::Mnist => 10,
            _ => 2,
        }
    }
}

impl fmt::Display for DatasetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dataset '{0}'")]
pub struct UnknownDataset(pub String);

impl FromStr for DatasetType {
    type Err = UnknownDataset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        DatasetType::ALL
            .into_iter()
            .find(|d| d.as_str() == key)
            .ok_or(UnknownDataset(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_dataset_parses_from_its_key() {
        for ds in DatasetType::ALL {
            assert_eq!(ds.as_str().parse::<DatasetType>(), Ok(ds));
        }
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert_eq!("iris".parse::<DatasetType>(), Err(UnknownDataset("iris".into())));
    }

    #[test]
    fn mnist_is_wide_and_ten_way() {
        assert_eq!(DatasetType::Mnist.feature_count(), 784);
        assert_eq!(DatasetType::Mnist.class_count(), 10);
    }
}

use serde::{Serialize, Deserialize};
use std::fmt;
use std::str::FromStr;

/// Activation applied after a layer's linear transform.
///
/// Only the identity of the function lives here; evaluating it is the
/// training engine's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivationFunction {
    #[serde(rename = "sigmoid")]
    Sigmoid,
    #[serde(rename = "relu")]
    ReLU,
    #[serde(rename = "leaky_relu")]
    LeakyReLU,
    #[serde(rename = "tanh")]
    Tanh,
    #[serde(rename = "identity")]
    Identity,
    #[serde(rename = "gelu")]
    Gelu,
    #[serde(rename = "swish")]
    Swish,
    /// Vector-valued; only meaningful on the output layer.
    #[serde(rename = "softmax")]
    Softmax,
}

impl ActivationFunction {
    /// Choices offered by the network editor, in display order.
    pub const ALL: [ActivationFunction; 8] = [
        ActivationFunction::ReLU,
        ActivationFunction::LeakyReLU,
        ActivationFunction::Sigmoid,
        ActivationFunction::Tanh,
        ActivationFunction::Identity,
        ActivationFunction::Gelu,
        ActivationFunction::Swish,
        ActivationFunction::Softmax,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivationFunction::Sigmoid   => "sigmoid",
            ActivationFunction::ReLU      => "relu",
            ActivationFunction::LeakyReLU => "leaky_relu",
            ActivationFunction::Tanh      => "tanh",
            ActivationFunction::Identity  => "identity",
            ActivationFunction::Gelu      => "gelu",
            ActivationFunction::Swish     => "swish",
            ActivationFunction::Softmax   => "softmax",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActivationFunction::Sigmoid   => "Sigmoid",
            ActivationFunction::ReLU      => "ReLU",
            ActivationFunction::LeakyReLU => "Leaky ReLU",
            ActivationFunction::Tanh      => "Tanh",
            ActivationFunction::Identity  => "Identity",
            ActivationFunction::Gelu      => "GELU",
            ActivationFunction::Swish     => "Swish",
            ActivationFunction::Softmax   => "Softmax",
        }
    }

    /// Rectifier-style activations take He initialization.
    pub fn is_rectifier(&self) -> bool {
        matches!(
            self,
            ActivationFunction::ReLU
                | ActivationFunction::LeakyReLU
                | ActivationFunction::Gelu
                | ActivationFunction::Swish
        )
    }
}

impl fmt::Display for ActivationFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown activation function '{0}'")]
pub struct UnknownActivation(pub String);

impl FromStr for ActivationFunction {
    type Err = UnknownActivation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        ActivationFunction::ALL
            .into_iter()
            .find(|a| a.as_str() == key)
            .ok_or(UnknownActivation(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_editor_keys() {
        assert_eq!("relu".parse::<ActivationFunction>(), Ok(ActivationFunction::ReLU));
        assert_eq!(" Softmax ".parse::<ActivationFunction>(), Ok(ActivationFunction::Softmax));
        assert_eq!("leaky_relu".parse::<ActivationFunction>(), Ok(ActivationFunction::LeakyReLU));
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = "mish".parse::<ActivationFunction>().unwrap_err();
        assert_eq!(err.to_string(), "unknown activation function 'mish'");
    }

    #[test]
    fn serde_uses_editor_keys() {
        let json = serde_json::to_string(&ActivationFunction::LeakyReLU).unwrap();
        assert_eq!(json, "\"leaky_relu\"");
    }
}

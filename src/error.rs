use thiserror::Error;

/// Failures surfaced by the session controller.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// Start was requested before a dataset was chosen.
    #[error("Please select a dataset first")]
    NoDatasetSelected,
    /// An overlay key outside the known topic set.
    #[error(transparent)]
    UnknownOverlayTopic(#[from] crate::overlay::UnknownTopic),
    /// An imported network breaks the editor's rules.
    #[error(transparent)]
    InvalidNetwork(#[from] crate::network::InvalidNetwork),
    #[error(transparent)]
    InvalidTraining(#[from] crate::train::InvalidTraining),
    #[error("failed to encode or decode configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A share link without a usable `config` parameter.
    #[error("share link does not carry a configuration")]
    InvalidShareLink,
}

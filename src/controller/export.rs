//! Export & share: configuration JSON, share links and training results.

use serde::{Serialize, Deserialize};
use tracing::info;

use crate::controller::Controller;
use crate::dataset::DatasetType;
use crate::error::ControllerError;
use crate::network::spec::NetworkConfig;
use crate::share::{encode_component, parse_query};
use crate::train::train_config::TrainingConfig;

/// Query parameter a share link stores its configuration under.
pub const SHARE_PARAM: &str = "config";

/// Everything needed to rebuild a session's setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigExport {
    pub network: NetworkConfig,
    pub training: TrainingConfig,
}

/// The last run's outcome, as written by "Export training results".
#[derive(Debug, Clone, Serialize)]
pub struct ResultsExport<'a> {
    pub dataset: Option<DatasetType>,
    pub epochs_completed: usize,
    pub total_epochs: usize,
    pub loss: &'a [f64],
    pub accuracy: &'a [f64],
    pub network: &'a NetworkConfig,
}

impl Controller {
    fn config_export(&self) -> ConfigExport {
        ConfigExport {
            network: self.network_config().clone(),
            training: self.training_config().clone(),
        }
    }

    /// Pretty JSON of the network and training configuration.
    pub fn export_configuration(&self) -> Result<String, ControllerError> {
        Ok(serde_json::to_string_pretty(&self.config_export())?)
    }

    /// Applies a JSON document produced by `export_configuration`. Both
    /// configs are replaced, or neither if the document does not parse or
    /// fails the editor's rules.
    pub fn import_configuration(&mut self, json: &str) -> Result<(), ControllerError> {
        let ConfigExport { network, training } = serde_json::from_str(json)?;
        network.validate()?;
        training.validate()?;
        self.set_network_config(network);
        self.set_training_config(training);
        info!("configuration imported");
        Ok(())
    }

    /// `config=<percent-encoded JSON>`, ready to append to the studio URL.
    pub fn share_query(&self) -> Result<String, ControllerError> {
        let json = serde_json::to_string(&self.config_export())?;
        Ok(format!("{}={}", SHARE_PARAM, encode_component(&json)))
    }

    /// Restores the configuration carried by a share link's query string.
    pub fn apply_share_query(&mut self, query: &str) -> Result<(), ControllerError> {
        let json = parse_query(query)
            .into_iter()
            .find(|(k, _)| k == SHARE_PARAM)
            .map(|(_, v)| v)
            .ok_or(ControllerError::InvalidShareLink)?;
        self.import_configuration(&json)
    }

    /// Pretty JSON of the current (or last) run's metric histories. Before
    /// any run, `total_epochs` is the configured count.
    pub fn export_results(&self) -> Result<String, ControllerError> {
        let results = ResultsExport {
            dataset: self.dataset(),
            epochs_completed: self.current_epoch(),
            total_epochs: self.run_total_epochs(),
            loss: self.loss_history(),
            accuracy: self.accuracy_history(),
            network: self.network_config(),
        };
        Ok(serde_json::to_string_pretty(&results)?)
    }
}

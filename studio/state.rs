use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use synaptix::{Controller, DemoEngine};

use crate::config::{EngineKind, StudioConfig};

/// Shared state type — the one session controller, handed to every handler.
pub type SharedState = Arc<Mutex<Controller>>;

pub fn new_shared(config: &StudioConfig) -> SharedState {
    let controller = match config.engine {
        EngineKind::Demo => Controller::new().with_engine(Arc::new(DemoEngine::new(config.epoch_delay()))),
        EngineKind::None => Controller::new(),
    };
    Arc::new(Mutex::new(controller))
}

/// Locks the controller, recovering from a handler that panicked mid-request.
pub fn lock(state: &SharedState) -> MutexGuard<'_, Controller> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Synaptix Studio
///
/// A browser-based playground for building, visualizing and training small
/// neural networks. Served by a synchronous tiny_http server; no JavaScript
/// frameworks required.
///
/// Run with:
///   cargo run --bin studio --release
/// Then open http://127.0.0.1:7878
///
/// Settings come from `synaptix.toml` (or the file named by
/// `SYNAPTIX_CONFIG`); `RUST_LOG` overrides the log filter.

mod config;
mod handlers;
mod logging;
mod render;
mod routes;
mod state;
mod util;

use std::process::ExitCode;

use tiny_http::Server;
use tracing::{error, info, warn};

use config::StudioConfig;

fn main() -> ExitCode {
    let config = match StudioConfig::load() {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = logging::init(&config.log_filter) {
        eprintln!("{}", err);
    }

    let server = match Server::http(config.bind_addr.as_str()) {
        Ok(server) => server,
        Err(err) => {
            error!(addr = %config.bind_addr, %err, "failed to bind HTTP server");
            return ExitCode::FAILURE;
        }
    };

    let shared_state = state::new_shared(&config);
    info!(addr = %config.bind_addr, engine = ?config.engine, "Synaptix studio listening on http://{}", config.bind_addr);

    // Each request is dispatched on its own thread so the SSE handler
    // (which blocks for the whole run) does not stall page loads.
    for request in server.incoming_requests() {
        let state_clone = shared_state.clone();
        if let Err(err) = std::thread::Builder::new()
            .name("studio-request".into())
            .spawn(move || routes::dispatch(request, state_clone))
        {
            warn!(%err, "could not spawn request thread");
        }
    }

    ExitCode::SUCCESS
}

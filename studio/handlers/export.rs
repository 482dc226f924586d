use synaptix::Notice;

use crate::routes::{json_download_response, redirect, server_error, HttpResponse};
use crate::state::{lock, SharedState};

/// `GET /export/config` — network + training configuration as JSON.
pub fn handle_config(state: &SharedState) -> HttpResponse {
    let exported = lock(state).export_configuration();
    match exported {
        Ok(json) => json_download_response(json, "synaptix-config.json"),
        Err(err) => {
            tracing::error!(%err, "configuration export failed");
            server_error("Could not export configuration.")
        }
    }
}

/// `GET /export/results` — loss and accuracy histories of the last run.
pub fn handle_results(state: &SharedState) -> HttpResponse {
    let exported = {
        let mut ctl = lock(state);
        ctl.poll_progress();
        ctl.export_results()
    };
    match exported {
        Ok(json) => json_download_response(json, "synaptix-results.json"),
        Err(err) => {
            tracing::error!(%err, "results export failed");
            server_error("Could not export training results.")
        }
    }
}

/// `POST /share` — queues a notice carrying the share link.
pub fn handle_share(state: &SharedState) -> HttpResponse {
    let mut ctl = lock(state);
    match ctl.share_query() {
        Ok(query) => ctl.notify(Notice::success(format!("Share link: /?{}", query))),
        Err(err)  => ctl.notify(Notice::error(format!("Could not create share link: {}", err))),
    }
    drop(ctl);
    redirect("/")
}

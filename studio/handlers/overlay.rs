use synaptix::Notice;

use crate::routes::{redirect, HttpResponse};
use crate::state::{lock, SharedState};

/// `GET /overlay/{topic}` — opens the overlay. Unknown topics leave it as it
/// was and queue an error notice.
pub fn handle_show(key: &str, state: &SharedState) -> HttpResponse {
    let mut ctl = lock(state);
    if let Err(err) = ctl.show_overlay_key(key) {
        tracing::debug!(key, "unknown overlay topic requested");
        ctl.notify(Notice::error(err.to_string()));
    }
    drop(ctl);
    redirect("/")
}

/// `POST /overlay/dismiss`
pub fn handle_dismiss(state: &SharedState) -> HttpResponse {
    lock(state).dismiss_overlay();
    redirect("/")
}

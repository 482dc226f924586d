use std::io::Cursor;
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::state::SharedState;
use crate::handlers;

pub type HttpResponse = Response<Cursor<Vec<u8>>>;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

/// Builds a header from trusted bytes. Values that tiny_http rejects
/// (non-ASCII) are dropped rather than sent malformed.
fn header(field: &str, value: &str) -> Option<Header> {
    Header::from_bytes(field.as_bytes(), value.as_bytes()).ok()
}

fn response(status: u16, headers: Vec<Option<Header>>, body: Vec<u8>) -> HttpResponse {
    let len = body.len();
    Response::new(
        StatusCode(status),
        headers.into_iter().flatten().collect(),
        Cursor::new(body),
        Some(len),
        None,
    )
}

pub fn html_response(body: String) -> HttpResponse {
    response(200, vec![header("Content-Type", "text/html; charset=utf-8")], body.into_bytes())
}

pub fn redirect(location: &str) -> HttpResponse {
    response(303, vec![header("Location", location)], Vec::new())
}

pub fn json_download_response(body: String, filename: &str) -> HttpResponse {
    let disposition = format!("attachment; filename=\"{}\"", filename);
    response(
        200,
        vec![
            header("Content-Type", "application/json"),
            header("Content-Disposition", &disposition),
        ],
        body.into_bytes(),
    )
}

pub fn not_found() -> HttpResponse {
    response(404, vec![header("Content-Type", "text/plain")], b"404 Not Found".to_vec())
}

pub fn server_error(message: &str) -> HttpResponse {
    response(500, vec![header("Content-Type", "text/plain")], message.as_bytes().to_vec())
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// Dispatches incoming requests to the appropriate handler.
///
/// All handlers (except SSE) build a response that the dispatcher sends.
/// The SSE handler takes ownership to perform long-lived streaming.
pub fn dispatch(mut request: Request, state: SharedState) {
    let method = request.method().clone();
    let url    = request.url().to_owned();

    let (path, query) = match url.split_once('?') {
        Some((p, q)) => (p.to_owned(), q.to_owned()),
        None         => (url.clone(), String::new()),
    };
    tracing::debug!(%method, %path, "request");

    // SSE — long-lived; handler takes ownership and drives the stream loop.
    if method == Method::Get && path == "/training/events" {
        handlers::events::handle(request, state);
        return;
    }

    let response = match (&method, path.as_str()) {
        // ── Page ─────────────────────────────────────────────────────────
        (Method::Get, "/") => handlers::page::handle_get(&query, &state),

        // ── Editors ──────────────────────────────────────────────────────
        (Method::Post, "/network")         => handlers::network::handle_post(&mut request, &state),
        (Method::Post, "/training/config") => handlers::training::handle_config(&mut request, &state),
        (Method::Post, "/dataset")         => handlers::dataset::handle_post(&mut request, &state),

        // ── Lifecycle ────────────────────────────────────────────────────
        (Method::Post, "/training/start") => handlers::training::handle_start(&state),
        (Method::Post, "/training/pause") => handlers::training::handle_pause_resume(&state),
        (Method::Post, "/training/stop")  => handlers::training::handle_stop(&state),

        // ── Overlay ──────────────────────────────────────────────────────
        (Method::Post, "/overlay/dismiss") => handlers::overlay::handle_dismiss(&state),
        (Method::Get, p) if p.starts_with("/overlay/") => {
            handlers::overlay::handle_show(&p["/overlay/".len()..], &state)
        }

        // ── Export & share ───────────────────────────────────────────────
        (Method::Get,  "/export/config")  => handlers::export::handle_config(&state),
        (Method::Get,  "/export/results") => handlers::export::handle_results(&state),
        (Method::Post, "/share")          => handlers::export::handle_share(&state),

        // ── 404 ──────────────────────────────────────────────────────────
        _ => not_found(),
    };

    let _ = request.respond(response);
}

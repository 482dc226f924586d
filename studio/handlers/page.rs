use synaptix::share::parse_query;
use synaptix::{Notice, OverlayTopic, VisualizationInput};

use crate::handlers::{dataset, network, render_notices_html, training};
use crate::render::{html_escape, render_page, Tab};
use crate::routes::{html_response, redirect, HttpResponse};
use crate::state::{lock, SharedState};

// ---------------------------------------------------------------------------
// GET /
// ---------------------------------------------------------------------------

/// Renders the studio. `?tab=` selects the side panel; `?config=` (a share
/// link) imports a configuration and redirects to the clean URL.
pub fn handle_get(query: &str, state: &SharedState) -> HttpResponse {
    let params = parse_query(query);
    let tab = Tab::from_key(params.iter().find(|(k, _)| k == "tab").map(|(_, v)| v.as_str()));

    let mut ctl = lock(state);

    if params.iter().any(|(k, _)| k == synaptix::controller::export::SHARE_PARAM) {
        match ctl.apply_share_query(query) {
            Ok(())   => ctl.notify(Notice::success("Shared configuration loaded.")),
            Err(err) => ctl.notify(Notice::error(format!("Could not load shared configuration: {}", err))),
        }
        drop(ctl);
        return redirect(&format!("/?tab={}", tab.key()));
    }

    ctl.poll_progress();
    let notices  = ctl.take_notices();
    let snapshot = ctl.snapshot();
    let viz      = build_viz(ctl.visualization());
    drop(ctl);

    let notices_html  = render_notices_html(&notices);
    let network_html  = network::build_panel(&snapshot.network);
    let dataset_html  = dataset::build_panel(snapshot.dataset, snapshot.network.input_size);
    let training_html = training::build_panel(&snapshot);
    let overlay_html  = snapshot.overlay.shown().map(build_overlay).unwrap_or_default();

    html_response(render_page(tab, snapshot.is_training, |tmpl| {
        tmpl
            .replace("{{NOTICES}}", &notices_html)
            .replace("{{VIZ_STATUS}}", &viz.status)
            .replace("{{VIZ_LAYERS}}", &viz.layers)
            .replace("{{VIZ_JSON}}", &viz.json)
            .replace("{{PANEL_NETWORK}}", &network_html)
            .replace("{{PANEL_DATASET}}", &dataset_html)
            .replace("{{PANEL_TRAINING}}", &training_html)
            .replace("{{OVERLAY}}", &overlay_html)
    }))
}

struct VizHtml {
    status: String,
    layers: String,
    json: String,
}

/// Text rendition of the visualization inputs plus the raw inputs as JSON
/// for a client-side renderer.
fn build_viz(input: VisualizationInput<'_>) -> VizHtml {
    let status = match (input.is_training, input.is_paused) {
        (false, _)    => "Idle".to_owned(),
        (true, false) => format!("Training, epoch {}", input.current_epoch),
        (true, true)  => format!("Paused at epoch {}", input.current_epoch),
    };

    let mut rows = vec![format!("<li>Input: {} neurons</li>", input.network.input_size)];
    for (i, layer) in input.network.layers.iter().enumerate() {
        rows.push(format!(
            "<li>Layer {}: {} neurons, {}</li>",
            i + 1,
            layer.neurons,
            html_escape(layer.activation.label())
        ));
    }

    // `</` would end the surrounding <script> element early.
    let json = serde_json::to_string(&input)
        .unwrap_or_else(|_| "null".to_owned())
        .replace("</", "<\\/");

    VizHtml {
        status,
        layers: format!("<ol>{}</ol>", rows.concat()),
        json,
    }
}

fn build_overlay(topic: OverlayTopic) -> String {
    let content = topic.content();
    let body: String = content
        .paragraphs
        .iter()
        .map(|p| format!("<p>{}</p>", html_escape(p)))
        .collect();
    format!(
        r#"<div id="overlay" role="dialog" aria-modal="true" aria-labelledby="overlay-title">
  <h2 id="overlay-title">{title}</h2>
  {body}
  <form method="post" action="/overlay/dismiss"><button type="submit">Close</button></form>
</div>"#,
        title = html_escape(content.title),
        body  = body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use synaptix::share::encode_component;
    use synaptix::{Controller, NetworkConfig, NoticeKind};

    #[test]
    fn invalid_share_link_is_refused_with_a_notice() {
        let state: SharedState = Arc::new(Mutex::new(Controller::new()));
        let bad = r#"{"network":{"input_size":2,"layers":[]},"training":{"epochs":10,"learning_rate":0.1,"batch_size":4}}"#;
        let query = format!("tab=network&config={}", encode_component(bad));

        let _ = handle_get(&query, &state);

        let mut ctl = lock(&state);
        assert_eq!(ctl.network_config(), &NetworkConfig::default());
        let notices = ctl.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind, NoticeKind::Error);
        assert_eq!(notices[0].text, "Could not load shared configuration: Add at least one layer.");
    }

    #[test]
    fn viz_reports_phase_and_layers() {
        let network = NetworkConfig::default();
        let viz = build_viz(VisualizationInput {
            network: &network,
            is_training: true,
            is_paused: true,
            current_epoch: 7,
        });
        assert_eq!(viz.status, "Paused at epoch 7");
        assert!(viz.layers.starts_with("<ol><li>Input: 2 neurons</li>"));
        assert!(viz.layers.contains("Layer 3: 1 neurons, Sigmoid"));
        assert!(viz.json.contains("\"current_epoch\":7"));
    }

    #[test]
    fn overlay_has_dismiss_form() {
        let html = build_overlay(OverlayTopic::Help);
        assert!(html.contains("Getting started"));
        assert!(html.contains("action=\"/overlay/dismiss\""));
    }
}

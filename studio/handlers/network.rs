use tiny_http::Request;

use synaptix::network::{MAX_INPUT_SIZE, MAX_LAYERS, MAX_NEURONS};
use synaptix::{ActivationFunction, InvalidNetwork, LayerConfig, NetworkConfig, Notice, OverlayTopic};

use crate::handlers::info_link;
use crate::routes::{redirect, HttpResponse};
use crate::state::{lock, SharedState};
use crate::util::form::{form_get, read_form};

// ---------------------------------------------------------------------------
// POST /network
// ---------------------------------------------------------------------------

pub fn handle_post(request: &mut Request, state: &SharedState) -> HttpResponse {
    let pairs = read_form(request);

    match parse_network_form(&pairs) {
        Ok(config) => {
            let mut ctl = lock(state);
            let layers = config.layers.len();
            ctl.set_network_config(config);
            ctl.notify(Notice::success(format!("Network updated: {} layers.", layers)));
        }
        Err(msg) => lock(state).notify(Notice::error(msg)),
    }

    redirect("/?tab=network")
}

/// Validates the editor form. Rows with a blank neuron count are skipped;
/// errors name the form row. The assembled config must also pass
/// `NetworkConfig::validate`.
pub fn parse_network_form(pairs: &[(String, String)]) -> Result<NetworkConfig, String> {
    let input_size: usize = match form_get(pairs, "input_size").unwrap_or("").trim().parse() {
        Ok(v) if (1..=MAX_INPUT_SIZE).contains(&v) => v,
        _ => return Err(InvalidNetwork::InputSize.to_string()),
    };

    let mut layers = Vec::new();
    for i in 1..=MAX_LAYERS {
        let neurons_s = form_get(pairs, &format!("neurons_{}", i)).unwrap_or("").trim();
        if neurons_s.is_empty() {
            continue;
        }
        let neurons: usize = match neurons_s.parse() {
            Ok(v) if (1..=MAX_NEURONS).contains(&v) => v,
            _ => return Err(InvalidNetwork::LayerWidth(i).to_string()),
        };
        let activation: ActivationFunction = form_get(pairs, &format!("activation_{}", i))
            .unwrap_or("relu")
            .parse()
            .map_err(|e| format!("Layer {}: {}.", i, e))?;
        layers.push(LayerConfig { neurons, activation });
    }

    let config = NetworkConfig { input_size, layers };
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// Panel
// ---------------------------------------------------------------------------

pub fn build_panel(config: &NetworkConfig) -> String {
    // One spare row beyond the current layers, so a layer can be added.
    let row_count = (config.layers.len() + 1).min(MAX_LAYERS);
    let rows: String = (0..row_count)
        .map(|i| build_layer_row(i + 1, config.layers.get(i)))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<h2>Network architecture {layers_info}</h2>
<form method="post" action="/network">
  <label>Input size <input type="number" name="input_size" value="{input_size}" min="1" max="{max_input}"></label>
  <table>
    <thead><tr><th>#</th><th>Neurons</th><th>Activation {act_info}</th></tr></thead>
    <tbody>
{rows}
    </tbody>
  </table>
  <p class="hint">Clear a neuron count to remove that layer; fill the blank row to add one.</p>
  <button type="submit">Apply</button>
</form>"#,
        layers_info = info_link(OverlayTopic::Layers),
        act_info    = info_link(OverlayTopic::Activations),
        input_size  = config.input_size,
        max_input   = MAX_INPUT_SIZE,
        rows        = rows,
    )
}

fn build_layer_row(idx: usize, layer: Option<&LayerConfig>) -> String {
    let neurons = layer.map(|l| l.neurons.to_string()).unwrap_or_default();
    let current = layer.map(|l| l.activation).unwrap_or(ActivationFunction::ReLU);
    let opts: String = ActivationFunction::ALL
        .iter()
        .map(|a| {
            let sel = if *a == current { " selected" } else { "" };
            format!(r#"<option value="{}"{}>{}</option>"#, a.as_str(), sel, a.label())
        })
        .collect();
    format!(
        r#"      <tr><td>{idx}</td><td><input type="number" name="neurons_{idx}" value="{neurons}" min="1" max="{max}"></td><td><select name="activation_{idx}">{opts}</select></td></tr>"#,
        idx = idx, neurons = neurons, max = MAX_NEURONS, opts = opts
    )
}

use tiny_http::Request;

use synaptix::{DatasetType, Notice, OverlayTopic};

use crate::handlers::info_link;
use crate::render::html_escape;
use crate::routes::{redirect, HttpResponse};
use crate::state::{lock, SharedState};
use crate::util::form::{form_get, read_form};

// ---------------------------------------------------------------------------
// POST /dataset
// ---------------------------------------------------------------------------

/// `dataset=<key>` selects a dataset; an empty value clears the selection.
pub fn handle_post(request: &mut Request, state: &SharedState) -> HttpResponse {
    let pairs = read_form(request);
    let key = form_get(&pairs, "dataset").unwrap_or("").trim();

    let mut ctl = lock(state);
    if key.is_empty() {
        ctl.set_dataset(None);
        ctl.notify(Notice::success("Dataset selection cleared."));
    } else {
        match key.parse::<DatasetType>() {
            Ok(ds) => {
                ctl.set_dataset(Some(ds));
                ctl.notify(Notice::success(format!("Dataset '{}' selected.", ds.label())));
            }
            Err(e) => ctl.notify(Notice::error(e.to_string())),
        }
    }
    drop(ctl);

    redirect("/?tab=dataset")
}

// ---------------------------------------------------------------------------
// Panel
// ---------------------------------------------------------------------------

pub fn build_panel(selected: Option<DatasetType>, input_size: usize) -> String {
    let none_checked = if selected.is_none() { " checked" } else { "" };
    let options: String = DatasetType::ALL
        .iter()
        .map(|ds| {
            let checked = if Some(*ds) == selected { " checked" } else { "" };
            format!(
                r#"<li><label><input type="radio" name="dataset" value="{key}"{checked}> <strong>{label}</strong>: {desc}</label></li>"#,
                key = ds.as_str(),
                checked = checked,
                label = html_escape(ds.label()),
                desc = html_escape(ds.description()),
            )
        })
        .collect();

    let mismatch = selected
        .filter(|ds| ds.feature_count() != input_size)
        .map(|ds| {
            format!(
                r#"<p class="hint">'{}' has {} features per sample but the network takes {} inputs.</p>"#,
                html_escape(ds.label()),
                ds.feature_count(),
                input_size
            )
        })
        .unwrap_or_default();

    format!(
        r#"<h2>Dataset {info}</h2>
<form method="post" action="/dataset">
  <ul>
    <li><label><input type="radio" name="dataset" value=""{none_checked}> None</label></li>
    {options}
  </ul>
  <button type="submit">Select</button>
</form>
{mismatch}"#,
        info = info_link(OverlayTopic::Datasets),
        none_checked = none_checked,
        options = options,
        mismatch = mismatch,
    )
}

use tiny_http::Request;

use std::str::FromStr;

use synaptix::{InvalidTraining, Notice, OverlayTopic, SessionSnapshot, TrainingConfig, TrainingPhase};

use crate::handlers::info_link;
use crate::routes::{redirect, HttpResponse};
use crate::state::{lock, SharedState};
use crate::util::form::{form_get, read_form};

/// Most recent epochs listed in the history table.
const HISTORY_ROWS: usize = 10;

// ---------------------------------------------------------------------------
// POST /training/config
// ---------------------------------------------------------------------------

pub fn handle_config(request: &mut Request, state: &SharedState) -> HttpResponse {
    let pairs = read_form(request);

    match parse_training_form(&pairs) {
        Ok(config) => {
            let mut ctl = lock(state);
            ctl.set_training_config(config);
            ctl.notify(Notice::success("Training settings saved."));
        }
        Err(err) => lock(state).notify(Notice::error(err.to_string())),
    }

    redirect("/?tab=training")
}

pub fn parse_training_form(pairs: &[(String, String)]) -> Result<TrainingConfig, InvalidTraining> {
    let config = TrainingConfig {
        epochs: field(pairs, "epochs").ok_or(InvalidTraining::Epochs)?,
        learning_rate: field(pairs, "learning_rate").ok_or(InvalidTraining::LearningRate)?,
        batch_size: field(pairs, "batch_size").ok_or(InvalidTraining::BatchSize)?,
    };
    config.validate()?;
    Ok(config)
}

fn field<T: FromStr>(pairs: &[(String, String)], key: &str) -> Option<T> {
    form_get(pairs, key)?.trim().parse().ok()
}

// ---------------------------------------------------------------------------
// POST /training/start | /training/pause | /training/stop
// ---------------------------------------------------------------------------

pub fn handle_start(state: &SharedState) -> HttpResponse {
    // A rejected start queues its own notice.
    let _ = lock(state).start_training();
    redirect("/?tab=training")
}

pub fn handle_pause_resume(state: &SharedState) -> HttpResponse {
    lock(state).pause_resume();
    redirect("/?tab=training")
}

pub fn handle_stop(state: &SharedState) -> HttpResponse {
    let mut ctl = lock(state);
    // Fold in whatever the engine reported before the stop lands.
    ctl.poll_progress();
    ctl.stop_training();
    drop(ctl);
    redirect("/?tab=training")
}

// ---------------------------------------------------------------------------
// Panel
// ---------------------------------------------------------------------------

pub fn build_panel(snap: &SessionSnapshot) -> String {
    let cfg = &snap.training;
    let disabled = if snap.is_training { " disabled" } else { "" };

    let controls = match snap.phase {
        TrainingPhase::Idle => {
            r#"<form method="post" action="/training/start"><button type="submit">Start training</button></form>"#.to_owned()
        }
        TrainingPhase::Running | TrainingPhase::Paused => {
            let label = if snap.phase == TrainingPhase::Paused { "Resume" } else { "Pause" };
            format!(
                r#"<form method="post" action="/training/pause"><button type="submit">{}</button></form>
<form method="post" action="/training/stop"><button type="submit">Stop</button></form>"#,
                label
            )
        }
    };

    let last_loss = snap.loss.last().map(|l| format!("{:.4}", l)).unwrap_or_else(|| "—".into());
    let last_acc = snap.accuracy.last().map(|a| format!("{:.1}%", a * 100.0)).unwrap_or_else(|| "—".into());

    format!(
        r#"<h2>Training</h2>
<form method="post" action="/training/config">
  <label>Epochs {epochs_info} <input type="number" name="epochs" value="{epochs}" min="1"{disabled}></label>
  <label>Learning rate {lr_info} <input type="number" name="learning_rate" value="{lr}" step="any" min="0"{disabled}></label>
  <label>Batch size {bs_info} <input type="number" name="batch_size" value="{bs}" min="1"{disabled}></label>
  <button type="submit"{disabled}>Save settings</button>
</form>
{controls}
<h3>Progress {metrics_info}</h3>
<dl>
  <dt>Status</dt><dd>{phase}</dd>
  <dt>Epoch</dt><dd><span id="current-epoch">{epoch}</span> / {total}</dd>
  <dt>Loss</dt><dd id="last-loss">{last_loss}</dd>
  <dt>Accuracy</dt><dd id="last-accuracy">{last_acc}</dd>
</dl>
{history}"#,
        epochs_info  = info_link(OverlayTopic::Epochs),
        lr_info      = info_link(OverlayTopic::LearningRate),
        bs_info      = info_link(OverlayTopic::BatchSize),
        metrics_info = info_link(OverlayTopic::Metrics),
        epochs       = cfg.epochs,
        lr           = cfg.learning_rate,
        bs           = cfg.batch_size,
        disabled     = disabled,
        controls     = controls,
        phase        = snap.phase.as_str(),
        epoch        = snap.current_epoch,
        total        = cfg.epochs,
        last_loss    = last_loss,
        last_acc     = last_acc,
        history      = build_history(&snap.loss, &snap.accuracy),
    )
}

/// The last few epochs as a table, newest first.
fn build_history(loss: &[f64], accuracy: &[f64]) -> String {
    if loss.is_empty() {
        return String::new();
    }
    let rows: String = loss
        .iter()
        .zip(accuracy.iter())
        .enumerate()
        .rev()
        .take(HISTORY_ROWS)
        .map(|(i, (l, a))| format!("<tr><td>{}</td><td>{:.4}</td><td>{:.1}%</td></tr>", i + 1, l, a * 100.0))
        .collect();
    format!(
        "<table><thead><tr><th>Epoch</th><th>Loss</th><th>Accuracy</th></tr></thead><tbody>{}</tbody></table>",
        rows
    )
}

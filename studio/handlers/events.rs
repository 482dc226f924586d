use std::io::Write;
use std::thread;
use std::time::Duration;

use tiny_http::Request;

use synaptix::{EpochStats, TrainingPhase};

use crate::state::{lock, SharedState};
use crate::util::sse::{format_sse_event, format_sse_keepalive, write_sse, SSE_RESPONSE_HEAD};

/// How often the stream polls the controller for engine progress.
const POLL_INTERVAL: Duration = Duration::from_millis(250);
/// Quiet polls between keep-alive pings.
const PINGS_EVERY: u32 = 8;

/// `GET /training/events` — Server-Sent Events handler.
///
/// Consumes `request` and drives a long-lived loop that:
/// 1. Replays the current run's history as `epoch` events.
/// 2. Polls the controller; each new epoch becomes an `epoch` event.
/// 3. Emits `state` when the phase changes between Running and Paused.
/// 4. Emits `done` once the session is Idle, then closes.
///
/// Idle keeps the stream alive with `: ping` comments.
pub fn handle(request: Request, state: SharedState) {
    let mut writer = request.into_writer();
    if write_sse(&mut writer, SSE_RESPONSE_HEAD).is_err() {
        return;
    }
    if stream(&mut writer, &state).is_err() {
        tracing::debug!("SSE client disconnected");
    }
}

fn stream<W: Write>(writer: &mut W, state: &SharedState) -> std::io::Result<()> {
    let mut cursor = EpochCursor::default();
    let mut last_phase = None;
    let mut quiet_polls = 0u32;

    loop {
        let (phase, fresh, current_epoch, total_epochs) = {
            let mut ctl = lock(state);
            ctl.poll_progress();
            let fresh = cursor.advance(ctl.run_generation(), ctl.loss_history(), ctl.accuracy_history());
            (ctl.phase(), fresh, ctl.current_epoch(), ctl.run_total_epochs())
        };

        if phase == TrainingPhase::Idle {
            let data = serde_json::json!({ "epochs_completed": current_epoch }).to_string();
            return write_sse(writer, &format_sse_event("done", &data));
        }

        let had_news = !fresh.is_empty() || last_phase.is_some_and(|p| p != phase);

        for (epoch, loss, accuracy) in fresh {
            let stats = EpochStats { epoch, total_epochs, loss, accuracy, elapsed_ms: 0 };
            if let Ok(json) = serde_json::to_string(&stats) {
                write_sse(writer, &format_sse_event("epoch", &json))?;
            }
        }

        if let Some(prev) = last_phase {
            if prev != phase {
                let data = serde_json::json!({ "phase": phase.as_str() }).to_string();
                write_sse(writer, &format_sse_event("state", &data))?;
            }
        }
        last_phase = Some(phase);

        if had_news {
            quiet_polls = 0;
        } else {
            quiet_polls += 1;
            if quiet_polls >= PINGS_EVERY {
                write_sse(writer, format_sse_keepalive())?;
                quiet_polls = 0;
            }
        }

        thread::sleep(POLL_INTERVAL);
    }
}

/// How far into which run's history the stream has got.
#[derive(Debug, Default)]
struct EpochCursor {
    generation: Option<u64>,
    sent: usize,
}

impl EpochCursor {
    /// `(epoch, loss, accuracy)` for every entry not yet streamed. A new run
    /// generation starts again from its first epoch.
    fn advance(&mut self, generation: u64, loss: &[f64], accuracy: &[f64]) -> Vec<(usize, f64, f64)> {
        if self.generation != Some(generation) {
            self.generation = Some(generation);
            self.sent = 0;
        }
        let fresh: Vec<_> = loss
            .iter()
            .zip(accuracy.iter())
            .enumerate()
            .skip(self.sent)
            .map(|(i, (l, a))| (i + 1, *l, *a))
            .collect();
        self.sent += fresh.len();
        fresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use synaptix::{Controller, DatasetType};
    use std::sync::{Arc, Mutex};

    #[test]
    fn cursor_skips_already_sent_epochs() {
        let mut cursor = EpochCursor::default();
        assert_eq!(cursor.advance(1, &[0.9, 0.7], &[0.5, 0.6]), vec![(1, 0.9, 0.5), (2, 0.7, 0.6)]);
        assert_eq!(cursor.advance(1, &[0.9, 0.7, 0.5], &[0.5, 0.6, 0.7]), vec![(3, 0.5, 0.7)]);
        assert!(cursor.advance(1, &[0.9, 0.7, 0.5], &[0.5, 0.6, 0.7]).is_empty());
    }

    #[test]
    fn cursor_replays_a_restarted_run_that_outgrew_the_old_one() {
        let mut cursor = EpochCursor::default();
        cursor.advance(1, &[0.9, 0.8], &[0.1, 0.2]);
        // The new run is already past two epochs when next polled.
        let fresh = cursor.advance(2, &[0.6, 0.5, 0.4], &[0.3, 0.4, 0.5]);
        assert_eq!(fresh, vec![(1, 0.6, 0.3), (2, 0.5, 0.4), (3, 0.4, 0.5)]);
    }

    #[test]
    fn idle_session_gets_done_immediately() {
        let state = Arc::new(Mutex::new(Controller::new()));
        let mut out = Vec::new();
        stream(&mut out, &state).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "event: done\ndata: {\"epochs_completed\":0}\n\n");
    }

    #[test]
    fn stopped_run_reports_done() {
        let mut ctl = Controller::new();
        ctl.set_dataset(Some(DatasetType::Xor));
        ctl.start_training().unwrap();
        ctl.stop_training();
        let state = Arc::new(Mutex::new(ctl));
        let mut out = Vec::new();
        stream(&mut out, &state).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("event: done\n"));
    }
}

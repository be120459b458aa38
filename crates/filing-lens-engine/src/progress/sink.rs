use serde::Serialize;
use tokio::{sync::mpsc, time::Instant};

use super::step::{StepId, StepState};

/// Display target for progress, implemented by the UI layer.
pub trait ProgressSink {
    fn set_step_state(&mut self, step: StepId, state: StepState);
    fn set_progress_percent(&mut self, percent: u8);
    fn set_status_text(&mut self, text: &str);
    /// Returns the display to its initial state: all steps pending, 0%.
    fn reset(&mut self);
}

impl<S: ProgressSink + ?Sized> ProgressSink for &mut S {
    fn set_step_state(&mut self, step: StepId, state: StepState) {
        (**self).set_step_state(step, state);
    }

    fn set_progress_percent(&mut self, percent: u8) {
        (**self).set_progress_percent(percent);
    }

    fn set_status_text(&mut self, text: &str) {
        (**self).set_status_text(text);
    }

    fn reset(&mut self) {
        (**self).reset();
    }
}

/// A sink call as data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ProgressUpdate {
    StepState { step: StepId, state: StepState },
    Percent(u8),
    Status(String),
    Reset,
}

impl ProgressUpdate {
    /// Replays this update onto another sink.
    pub fn apply_to<S: ProgressSink + ?Sized>(&self, sink: &mut S) {
        match self {
            ProgressUpdate::StepState { step, state } => sink.set_step_state(*step, *state),
            ProgressUpdate::Percent(percent) => sink.set_progress_percent(*percent),
            ProgressUpdate::Status(text) => sink.set_status_text(text),
            ProgressUpdate::Reset => sink.reset(),
        }
    }
}

/// Forwards every sink call over an unbounded channel.
///
/// A closed receiver is ignored: the choreography still runs to completion.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<ProgressUpdate>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::UnboundedSender<ProgressUpdate>) -> Self {
        Self { tx }
    }

    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ProgressUpdate>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    fn send(&self, update: ProgressUpdate) {
        if self.tx.send(update).is_err() {
            log::trace!("progress receiver dropped");
        }
    }
}

impl ProgressSink for ChannelSink {
    fn set_step_state(&mut self, step: StepId, state: StepState) {
        self.send(ProgressUpdate::StepState { step, state });
    }

    fn set_progress_percent(&mut self, percent: u8) {
        self.send(ProgressUpdate::Percent(percent));
    }

    fn set_status_text(&mut self, text: &str) {
        self.send(ProgressUpdate::Status(text.to_string()));
    }

    fn reset(&mut self) {
        self.send(ProgressUpdate::Reset);
    }
}

/// Records every update with the (tokio) time it arrived.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub updates: Vec<(Instant, ProgressUpdate)>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, update: ProgressUpdate) {
        self.updates.push((Instant::now(), update));
    }

    /// The updates without timestamps.
    pub fn updates(&self) -> impl Iterator<Item = &ProgressUpdate> {
        self.updates.iter().map(|(_, u)| u)
    }

    /// Every state `step` was put into, in order.
    pub fn states_of(&self, step: StepId) -> Vec<StepState> {
        self.updates()
            .filter_map(|u| match u {
                ProgressUpdate::StepState { step: s, state } if *s == step => Some(*state),
                _ => None,
            })
            .collect()
    }

    /// When `step` first entered `state`.
    pub fn time_of(&self, step: StepId, state: StepState) -> Option<Instant> {
        self.updates.iter().find_map(|(at, u)| match u {
            ProgressUpdate::StepState { step: s, state: st } if *s == step && *st == state => {
                Some(*at)
            }
            _ => None,
        })
    }
}

impl ProgressSink for RecordingSink {
    fn set_step_state(&mut self, step: StepId, state: StepState) {
        self.record(ProgressUpdate::StepState { step, state });
    }

    fn set_progress_percent(&mut self, percent: u8) {
        self.record(ProgressUpdate::Percent(percent));
    }

    fn set_status_text(&mut self, text: &str) {
        self.record(ProgressUpdate::Status(text.to_string()));
    }

    fn reset(&mut self) {
        self.record(ProgressUpdate::Reset);
    }
}

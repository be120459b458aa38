use super::{
    sink::{ProgressSink, ProgressUpdate},
    step::{READY_TEXT, StepId, StepState},
};

/// Current display state, reduced from sink calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressView {
    steps: [StepState; 4],
    percent: u8,
    status: String,
}

impl Default for ProgressView {
    fn default() -> Self {
        Self {
            steps: [StepState::Pending; 4],
            percent: 0,
            status: READY_TEXT.to_string(),
        }
    }
}

impl ProgressView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, update: &ProgressUpdate) {
        update.apply_to(self);
    }

    pub fn state_of(&self, step: StepId) -> StepState {
        self.steps[step.index()]
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Whether the view is back in its initial state.
    pub fn is_reset(&self) -> bool {
        *self == Self::default()
    }
}

impl ProgressSink for ProgressView {
    fn set_step_state(&mut self, step: StepId, state: StepState) {
        self.steps[step.index()] = state;
    }

    fn set_progress_percent(&mut self, percent: u8) {
        self.percent = percent.min(100);
    }

    fn set_status_text(&mut self, text: &str) {
        self.status = text.to_string();
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

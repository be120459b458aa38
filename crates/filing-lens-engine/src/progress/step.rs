use std::{fmt, time::Duration};

use serde::Serialize;

/// Number of steps that always play before a result can be shown.
pub const LEAD_IN_STEPS: usize = 3;

pub const STILL_PROCESSING_TEXT: &str = "Still processing, this can take a minute...";
pub const COMPLETE_TEXT: &str = "Analysis complete";
pub const READY_TEXT: &str = "Ready";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StepId {
    ParseQuery,
    SearchFilings,
    RunAnalysis,
    GenerateReport,
}

impl StepId {
    pub const ALL: [StepId; 4] = [
        StepId::ParseQuery,
        StepId::SearchFilings,
        StepId::RunAnalysis,
        StepId::GenerateReport,
    ];

    pub fn index(self) -> usize {
        match self {
            StepId::ParseQuery => 0,
            StepId::SearchFilings => 1,
            StepId::RunAnalysis => 2,
            StepId::GenerateReport => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StepId::ParseQuery => "parse-query",
            StepId::SearchFilings => "search-filings",
            StepId::RunAnalysis => "run-analysis",
            StepId::GenerateReport => "generate-report",
        }
    }

    pub fn status_text(self) -> &'static str {
        match self {
            StepId::ParseQuery => "Parsing your query...",
            StepId::SearchFilings => "Searching SEC filings...",
            StepId::RunAnalysis => "Running AI analysis...",
            StepId::GenerateReport => "Generating report...",
        }
    }

    /// Progress shown while this step is active: 25% per step.
    pub fn percent(self) -> u8 {
        25 * (self.index() as u8 + 1)
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visible state of one step.
///
/// `Waiting` is only ever entered by the last lead-in step, when the
/// lead-in has finished before the remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum StepState {
    #[default]
    Pending,
    Active,
    Waiting,
    Completed,
}

impl StepState {
    /// Order in which states may be entered. Transitions never go down.
    pub fn rank(self) -> u8 {
        match self {
            StepState::Pending => 0,
            StepState::Active => 1,
            StepState::Waiting => 2,
            StepState::Completed => 3,
        }
    }
}

/// One entry of the fixed step sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressStep {
    pub id: StepId,
    /// How long the step is held active. For the completion step this is
    /// the visual pause before it activates.
    pub duration: Duration,
    pub status: &'static str,
    pub percent: u8,
}

impl ProgressStep {
    pub fn new(id: StepId, duration: Duration) -> Self {
        Self {
            id,
            duration,
            status: id.status_text(),
            percent: id.percent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_steps_by_quarter() {
        let percents: Vec<u8> = StepId::ALL.iter().map(|s| s.percent()).collect();
        assert_eq!(percents, vec![25, 50, 75, 100]);
    }

    #[test]
    fn ranks_are_strictly_increasing() {
        let order = [
            StepState::Pending,
            StepState::Active,
            StepState::Waiting,
            StepState::Completed,
        ];
        assert!(order.windows(2).all(|w| w[0].rank() < w[1].rank()));
    }

    #[test]
    fn index_matches_position() {
        for (i, id) in StepId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
        }
    }
}

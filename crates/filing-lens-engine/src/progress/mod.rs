//! # Progress Choreography
//!
//! Plays a fixed step sequence on a [`ProgressSink`] while one remote call
//! runs. Three lead-in steps always play in full; the completion step
//! starts only once both the lead-in and the call are done.
//!
//! ```text
//! parse-query ─▶ search-filings ─▶ run-analysis ─┬─▶ (waiting) ─┐
//!                                                 └─────────────┴─▶ generate-report ─▶ done
//! ```
//!
//! The [`AnalysisGate`] keeps at most one choreography in flight.

mod choreographer;
mod gate;
mod sink;
mod step;
mod view;

pub use choreographer::{Choreographer, ChoreographyTimings, StepLedger, run_choreography};
pub use gate::{AnalysisGate, AnalysisPermit};
pub use sink::{ChannelSink, ProgressSink, ProgressUpdate, RecordingSink};
pub use step::{
    COMPLETE_TEXT, LEAD_IN_STEPS, ProgressStep, READY_TEXT, STILL_PROCESSING_TEXT, StepId,
    StepState,
};
pub use view::ProgressView;

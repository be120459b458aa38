pub mod markup;
pub mod progress;
pub mod report;
pub mod session;

// Re-export key types for easier usage
pub use markup::{Block, BlockEvent, Markup, PlainLine, PlainStyle, transform};
pub use progress::{
    AnalysisGate, ChannelSink, Choreographer, ChoreographyTimings, ProgressSink, ProgressUpdate,
    ProgressView, StepId, StepState, run_choreography,
};
pub use report::{
    AnalysisResult, AnalysisService, ReportDirectoryService, ReportError, load_report_text,
    validate_reports_dir,
};
pub use session::{QueryError, QueryOutcome, QueryRunner};

use std::{future::Future, pin::Pin, pin::pin, time::Duration};

use tokio::time::sleep;

use super::{
    sink::ProgressSink,
    step::{COMPLETE_TEXT, LEAD_IN_STEPS, ProgressStep, STILL_PROCESSING_TEXT, StepId, StepState},
};

/// Hold durations for the visible step sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoreographyTimings {
    /// Hold time of each lead-in step, in order.
    pub lead_in: [Duration; LEAD_IN_STEPS],
    /// Pause between the lead-in finishing and the completion step.
    pub completion_pause: Duration,
    /// How long the finished state stays up before results may render.
    pub final_hold: Duration,
}

impl Default for ChoreographyTimings {
    fn default() -> Self {
        Self {
            lead_in: [
                Duration::from_millis(800),
                Duration::from_millis(1200),
                Duration::from_millis(1500),
            ],
            completion_pause: Duration::from_millis(300),
            final_hold: Duration::from_millis(600),
        }
    }
}

impl ChoreographyTimings {
    pub fn lead_in_total(&self) -> Duration {
        self.lead_in.iter().sum()
    }

    /// The four steps with their hold times attached.
    pub fn steps(&self) -> [ProgressStep; 4] {
        [
            ProgressStep::new(StepId::ParseQuery, self.lead_in[0]),
            ProgressStep::new(StepId::SearchFilings, self.lead_in[1]),
            ProgressStep::new(StepId::RunAnalysis, self.lead_in[2]),
            ProgressStep::new(StepId::GenerateReport, self.completion_pause),
        ]
    }
}

/// Sink wrapper that only lets step states move forward.
pub struct StepLedger<'a, S: ProgressSink + ?Sized> {
    sink: &'a mut S,
    states: [StepState; 4],
}

impl<'a, S: ProgressSink + ?Sized> StepLedger<'a, S> {
    pub fn new(sink: &'a mut S) -> Self {
        Self {
            sink,
            states: [StepState::Pending; 4],
        }
    }

    pub fn state_of(&self, step: StepId) -> StepState {
        self.states[step.index()]
    }

    /// Moves `step` to `state`. Returns false (and leaves the sink alone)
    /// when that would not move the step forward.
    pub fn transition(&mut self, step: StepId, state: StepState) -> bool {
        let current = self.states[step.index()];
        if state.rank() <= current.rank() {
            if state != current {
                log::warn!("ignoring {step} transition {current:?} -> {state:?}");
            }
            return false;
        }
        log::debug!("{step}: {current:?} -> {state:?}");
        self.states[step.index()] = state;
        self.sink.set_step_state(step, state);
        true
    }

    /// Activates `step` and shows its percent and status text.
    pub fn activate(&mut self, step: &ProgressStep) {
        if self.transition(step.id, StepState::Active) {
            self.sink.set_progress_percent(step.percent);
            self.sink.set_status_text(step.status);
        }
    }

    pub fn status(&mut self, text: &str) {
        self.sink.set_status_text(text);
    }
}

/// Holds for `duration`, polling the remote call meanwhile.
///
/// If the call resolves its output is parked in `resolved`; the hold
/// itself always runs to the end.
async fn hold<F: Future>(
    duration: Duration,
    remote: Pin<&mut F>,
    resolved: &mut Option<F::Output>,
) {
    let mut timer = pin!(sleep(duration));

    if resolved.is_none() {
        tokio::select! {
            biased;
            output = remote => *resolved = Some(output),
            () = &mut timer => return,
        }
    }

    timer.await;
}

/// Drives the step sequence around one remote call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Choreographer {
    timings: ChoreographyTimings,
}

impl Choreographer {
    pub fn new(timings: ChoreographyTimings) -> Self {
        Self { timings }
    }

    pub fn timings(&self) -> &ChoreographyTimings {
        &self.timings
    }

    /// Plays the lead-in concurrently with `remote`, then the completion
    /// tail, and returns the remote output once it is safe to render.
    ///
    /// The tail starts only after both the lead-in and the call have
    /// finished. A failed call is returned as-is after the tail has played.
    pub async fn run<S, F>(&self, sink: &mut S, remote: F) -> F::Output
    where
        S: ProgressSink + ?Sized,
        F: Future,
    {
        let [parse, search, analyze, report] = self.timings.steps();
        let mut ledger = StepLedger::new(sink);
        let mut remote = pin!(remote);
        let mut resolved = None;

        for step in [&parse, &search] {
            ledger.activate(step);
            hold(step.duration, remote.as_mut(), &mut resolved).await;
            ledger.transition(step.id, StepState::Completed);
        }

        ledger.activate(&analyze);
        hold(analyze.duration, remote.as_mut(), &mut resolved).await;

        let output = match resolved {
            Some(output) => output,
            None => {
                ledger.transition(analyze.id, StepState::Waiting);
                ledger.status(STILL_PROCESSING_TEXT);
                remote.await
            }
        };
        ledger.transition(analyze.id, StepState::Completed);

        sleep(report.duration).await;
        ledger.activate(&report);
        ledger.transition(report.id, StepState::Completed);
        ledger.status(COMPLETE_TEXT);

        sleep(self.timings.final_hold).await;
        output
    }
}

/// Runs the choreography with the default timings.
pub async fn run_choreography<S, F>(sink: &mut S, remote: F) -> F::Output
where
    S: ProgressSink + ?Sized,
    F: Future,
{
    Choreographer::default().run(sink, remote).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::{ProgressUpdate, RecordingSink};
    use pretty_assertions::assert_eq;
    use tokio::time::Instant;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    async fn answer_after(delay: Duration) -> Result<&'static str, &'static str> {
        sleep(delay).await;
        Ok("report")
    }

    #[test]
    fn ledger_ignores_regressions() {
        let mut sink = RecordingSink::new();
        let mut ledger = StepLedger::new(&mut sink);

        assert!(ledger.transition(StepId::ParseQuery, StepState::Active));
        assert!(ledger.transition(StepId::ParseQuery, StepState::Completed));
        assert!(!ledger.transition(StepId::ParseQuery, StepState::Active));
        assert!(!ledger.transition(StepId::ParseQuery, StepState::Completed));
        assert_eq!(ledger.state_of(StepId::ParseQuery), StepState::Completed);

        assert_eq!(
            sink.states_of(StepId::ParseQuery),
            vec![StepState::Active, StepState::Completed]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn instant_result_still_plays_full_lead_in() {
        let timings = ChoreographyTimings::default();
        let mut sink = RecordingSink::new();
        let start = Instant::now();

        let out = Choreographer::new(timings)
            .run(&mut sink, async { Ok::<_, ()>("report") })
            .await;

        assert_eq!(out, Ok("report"));
        let elapsed = start.elapsed();
        assert!(elapsed >= timings.lead_in_total());
        assert_eq!(elapsed, ms(800 + 1200 + 1500 + 300 + 600));
        let analyze_states = sink.states_of(StepId::RunAnalysis);
        assert!(!analyze_states.contains(&StepState::Waiting));
    }

    #[tokio::test(start_paused = true)]
    async fn instant_result_update_sequence() {
        let mut sink = RecordingSink::new();
        let _ = run_choreography(&mut sink, answer_after(ms(0))).await;

        let updates: Vec<ProgressUpdate> = sink.updates().cloned().collect();
        let active = |step| ProgressUpdate::StepState {
            step,
            state: StepState::Active,
        };
        let done = |step| ProgressUpdate::StepState {
            step,
            state: StepState::Completed,
        };
        assert_eq!(
            updates,
            vec![
                active(StepId::ParseQuery),
                ProgressUpdate::Percent(25),
                ProgressUpdate::Status("Parsing your query...".into()),
                done(StepId::ParseQuery),
                active(StepId::SearchFilings),
                ProgressUpdate::Percent(50),
                ProgressUpdate::Status("Searching SEC filings...".into()),
                done(StepId::SearchFilings),
                active(StepId::RunAnalysis),
                ProgressUpdate::Percent(75),
                ProgressUpdate::Status("Running AI analysis...".into()),
                done(StepId::RunAnalysis),
                active(StepId::GenerateReport),
                ProgressUpdate::Percent(100),
                ProgressUpdate::Status("Generating report...".into()),
                done(StepId::GenerateReport),
                ProgressUpdate::Status("Analysis complete".into()),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn slow_result_waits_once_on_last_lead_in_step() {
        let mut sink = RecordingSink::new();
        let start = Instant::now();

        let _ = run_choreography(&mut sink, answer_after(ms(10_000))).await;

        assert_eq!(start.elapsed(), ms(10_000 + 300 + 600));
        assert_eq!(
            sink.states_of(StepId::RunAnalysis),
            vec![StepState::Active, StepState::Waiting, StepState::Completed]
        );

        let waiting_at = sink
            .time_of(StepId::RunAnalysis, StepState::Waiting)
            .expect("entered waiting");
        assert_eq!(waiting_at - start, ms(3500));
        let completed_at = sink
            .time_of(StepId::RunAnalysis, StepState::Completed)
            .expect("completed");
        assert_eq!(completed_at - start, ms(10_000));
    }

    #[tokio::test(start_paused = true)]
    async fn result_during_lead_in_does_not_truncate_it() {
        let mut sink = RecordingSink::new();
        let start = Instant::now();

        let _ = run_choreography(&mut sink, answer_after(ms(1000))).await;

        let completed_at = sink
            .time_of(StepId::RunAnalysis, StepState::Completed)
            .expect("completed");
        assert_eq!(completed_at - start, ms(3500));
        assert_eq!(start.elapsed(), ms(4400));
    }

    #[tokio::test(start_paused = true)]
    async fn failure_is_returned_after_tail() {
        let mut sink = RecordingSink::new();
        let out = run_choreography(&mut sink, async {
            sleep(ms(5000)).await;
            Err::<(), _>("remote down")
        })
        .await;

        assert_eq!(out, Err("remote down"));
        assert_eq!(
            sink.states_of(StepId::GenerateReport),
            vec![StepState::Active, StepState::Completed]
        );
    }
}

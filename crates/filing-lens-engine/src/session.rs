//! One query from submission to rendered report.

use thiserror::Error;
use uuid::Uuid;

use crate::{
    markup::{Markup, transform},
    progress::{AnalysisGate, AnalysisPermit, Choreographer, ChoreographyTimings, ProgressSink},
    report::{AnalysisResult, AnalysisService},
};

#[derive(Debug, Error)]
pub enum QueryError<E> {
    #[error("an analysis is already in progress")]
    Busy,
    #[error("query is empty")]
    EmptyQuery,
    #[error("analysis failed: {0}")]
    Remote(#[source] E),
}

/// A finished query, ready to display.
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub id: Uuid,
    pub result: AnalysisResult,
    pub markup: Markup,
}

/// Holds the busy flag for one query.
///
/// However the query ends, including its future being dropped mid-flight,
/// the sink is reset first and the flag clears after.
struct Retirement<'s, S: ProgressSink + ?Sized> {
    sink: &'s mut S,
    _permit: AnalysisPermit,
}

impl<S: ProgressSink + ?Sized> Drop for Retirement<'_, S> {
    fn drop(&mut self) {
        self.sink.reset();
    }
}

/// Accepts queries one at a time.
///
/// Clones share the busy flag, so a clone handed to a UI task still
/// refuses work while another clone's query is in flight.
#[derive(Debug, Clone, Default)]
pub struct QueryRunner {
    gate: AnalysisGate,
    choreographer: Choreographer,
}

impl QueryRunner {
    pub fn new(timings: ChoreographyTimings) -> Self {
        Self {
            gate: AnalysisGate::new(),
            choreographer: Choreographer::new(timings),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.gate.is_busy()
    }

    /// Runs `query` against `service` with progress shown on `sink`.
    ///
    /// Blank queries and queries submitted while another is in flight are
    /// refused without touching the sink. The sink is reset before the
    /// busy flag clears, whether the call succeeded or not.
    pub async fn submit<S, A>(
        &self,
        sink: &mut S,
        service: &A,
        query: &str,
    ) -> Result<QueryOutcome, QueryError<A::Error>>
    where
        S: ProgressSink + ?Sized,
        A: AnalysisService,
    {
        let query = query.trim();
        if query.is_empty() {
            return Err(QueryError::EmptyQuery);
        }
        let Some(_permit) = self.gate.try_begin() else {
            log::warn!("rejected query while busy: {query:?}");
            return Err(QueryError::Busy);
        };

        let id = Uuid::new_v4();
        log::info!("query {id} started: {query:?}");

        let mut retirement = Retirement { sink, _permit };
        retirement.sink.reset();
        let outcome = self
            .choreographer
            .run(&mut *retirement.sink, service.analyze(query))
            .await;

        let outcome = match outcome {
            Ok(result) => {
                let markup = transform(result.report_body());
                log::info!("query {id} finished: {} blocks", markup.blocks().count());
                Ok(QueryOutcome { id, result, markup })
            }
            Err(err) => {
                log::warn!("query {id} failed: {err}");
                Err(QueryError::Remote(err))
            }
        };

        drop(retirement);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::{ProgressUpdate, RecordingSink};
    use std::time::Duration;

    #[derive(Debug, Error)]
    #[error("service unavailable")]
    struct Unavailable;

    struct Canned {
        body: Option<&'static str>,
        delay: Duration,
    }

    impl AnalysisService for Canned {
        type Error = Unavailable;

        async fn analyze(&self, query: &str) -> Result<AnalysisResult, Unavailable> {
            tokio::time::sleep(self.delay).await;
            let body = self.body.ok_or(Unavailable)?;
            Ok(AnalysisResult {
                query: query.to_string(),
                combined_analysis: body.to_string(),
                ..Default::default()
            })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn renders_report_and_resets_sink() {
        let runner = QueryRunner::default();
        let service = Canned {
            body: Some("## Findings\n- revenue up"),
            delay: Duration::from_millis(100),
        };
        let mut sink = RecordingSink::new();

        let outcome = runner
            .submit(&mut sink, &service, "  Apple  ")
            .await
            .unwrap();

        assert_eq!(outcome.result.query, "Apple");
        assert_eq!(
            outcome.markup.to_html(),
            "<h2>Findings</h2>\n<ul>\n<li>revenue up</li>\n</ul>"
        );
        assert_eq!(sink.updates().next(), Some(&ProgressUpdate::Reset));
        assert_eq!(sink.updates().last(), Some(&ProgressUpdate::Reset));
        assert!(!runner.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn second_query_while_busy_is_rejected() {
        let runner = QueryRunner::default();
        let service = Canned {
            body: Some("text"),
            delay: Duration::from_millis(100),
        };
        let mut first_sink = RecordingSink::new();
        let mut second_sink = RecordingSink::new();

        let (first, second) = tokio::join!(
            runner.submit(&mut first_sink, &service, "first"),
            runner.submit(&mut second_sink, &service, "second"),
        );

        assert!(first.is_ok());
        assert!(matches!(second, Err(QueryError::Busy)));
        assert!(second_sink.updates.is_empty());

        let third = runner.submit(&mut second_sink, &service, "third").await;
        assert!(third.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn failure_surfaces_after_tail_and_releases_gate() {
        let runner = QueryRunner::default();
        let service = Canned {
            body: None,
            delay: Duration::from_millis(100),
        };
        let mut sink = RecordingSink::new();

        let err = runner.submit(&mut sink, &service, "q").await.unwrap_err();

        assert!(matches!(err, QueryError::Remote(Unavailable)));
        let complete = ProgressUpdate::Status("Analysis complete".into());
        assert!(sink.updates().any(|u| *u == complete));
        assert_eq!(sink.updates().last(), Some(&ProgressUpdate::Reset));
        assert!(!runner.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn abandoned_query_resets_sink_and_releases_gate() {
        let runner = QueryRunner::default();
        let service = Canned {
            body: Some("late"),
            delay: Duration::from_secs(60),
        };
        let mut sink = RecordingSink::new();

        let abandoned = tokio::time::timeout(
            Duration::from_millis(1000),
            runner.submit(&mut sink, &service, "q"),
        )
        .await;

        assert!(abandoned.is_err());
        assert!(sink.updates().count() > 2);
        assert_eq!(sink.updates().last(), Some(&ProgressUpdate::Reset));
        assert!(!runner.is_busy());
    }

    #[tokio::test]
    async fn blank_query_is_refused() {
        let runner = QueryRunner::default();
        let service = Canned {
            body: Some("x"),
            delay: Duration::ZERO,
        };
        let mut sink = RecordingSink::new();

        let err = runner.submit(&mut sink, &service, " \t").await.unwrap_err();
        assert!(matches!(err, QueryError::EmptyQuery));
        assert!(sink.updates.is_empty());
    }
}

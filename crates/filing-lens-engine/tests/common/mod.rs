// Shared by several integration test binaries; not every binary uses every
// helper.
#![allow(dead_code)]

use std::time::Duration;

use filing_lens_engine::{AnalysisResult, AnalysisService};

pub fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!(
        "{}/tests/fixtures/{name}",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap()
}

#[derive(Debug, thiserror::Error)]
#[error("remote analysis failed")]
pub struct RemoteFailure;

/// Answers every query with a fixture after a fixed delay.
pub struct FixtureService {
    pub fixture: Option<&'static str>,
    pub delay: Duration,
}

impl AnalysisService for FixtureService {
    type Error = RemoteFailure;

    async fn analyze(&self, query: &str) -> Result<AnalysisResult, RemoteFailure> {
        tokio::time::sleep(self.delay).await;
        let name = self.fixture.ok_or(RemoteFailure)?;
        Ok(AnalysisResult {
            query: query.to_string(),
            combined_analysis: fixture(name),
            ..Default::default()
        })
    }
}

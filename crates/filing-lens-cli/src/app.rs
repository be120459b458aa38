use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use filing_lens_engine::{
    ChannelSink, PlainLine, PlainStyle, ProgressUpdate, ProgressView, QueryError, QueryOutcome,
    QueryRunner, ReportDirectoryService, ReportError,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

pub type QueryResult = Result<QueryOutcome, QueryError<ReportError>>;

/// What the event loop should do after a key press.
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    None,
    Submit(String),
    Quit,
}

pub struct App {
    pub input: String,
    pub view: ProgressView,
    pub report: Vec<PlainLine>,
    pub notice: Option<String>,
    pub scroll: u16,
    pub tick: u64,
    runner: QueryRunner,
    service: ReportDirectoryService,
    sink: ChannelSink,
    progress_rx: UnboundedReceiver<ProgressUpdate>,
    outcome_tx: UnboundedSender<QueryResult>,
    outcome_rx: UnboundedReceiver<QueryResult>,
}

impl App {
    pub fn new(runner: QueryRunner, service: ReportDirectoryService) -> Self {
        let (sink, progress_rx) = ChannelSink::channel();
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            input: String::new(),
            view: ProgressView::new(),
            report: vec![PlainLine {
                style: PlainStyle::Placeholder,
                text: "Ask a question about a company's SEC filings.".to_string(),
            }],
            notice: None,
            scroll: 0,
            tick: 0,
            runner,
            service,
            sink,
            progress_rx,
            outcome_tx,
            outcome_rx,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.runner.is_busy()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc => return Action::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Action::Quit;
            }
            KeyCode::Enter => return self.take_query(),
            KeyCode::Char(c) => self.input.push(c),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down => self.scroll = self.scroll.saturating_add(1),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(10),
            _ => {}
        }
        Action::None
    }

    /// Takes the typed query if it may be submitted now.
    ///
    /// While an analysis is in flight the input is kept and a notice shown.
    fn take_query(&mut self) -> Action {
        if self.input.trim().is_empty() {
            return Action::None;
        }
        if self.is_busy() {
            self.notice = Some("An analysis is already in progress, please wait.".to_string());
            return Action::None;
        }
        self.notice = None;
        Action::Submit(std::mem::take(&mut self.input))
    }

    /// Starts `query` on the current `LocalSet`.
    pub fn spawn_query(&self, query: String) {
        let runner = self.runner.clone();
        let service = self.service.clone();
        let mut sink = self.sink.clone();
        let outcome_tx = self.outcome_tx.clone();

        tokio::task::spawn_local(async move {
            let result = runner.submit(&mut sink, &service, &query).await;
            if outcome_tx.send(result).is_err() {
                log::debug!("app closed before query finished");
            }
        });
    }

    /// Applies pending progress updates and finished queries.
    pub fn drain(&mut self) {
        self.tick = self.tick.wrapping_add(1);

        while let Ok(update) = self.progress_rx.try_recv() {
            self.view.apply(&update);
        }
        while let Ok(result) = self.outcome_rx.try_recv() {
            self.finish(result);
        }
    }

    pub fn finish(&mut self, result: QueryResult) {
        match result {
            Ok(outcome) => {
                self.notice = Some(format!(
                    "Loaded {} file(s) from {}",
                    outcome.result.analysis_files.len(),
                    outcome
                        .result
                        .analysis_directory
                        .as_deref()
                        .unwrap_or("the reports directory")
                ));
                self.report = outcome.markup.to_plain_lines();
                self.scroll = 0;
            }
            Err(QueryError::Busy) => {
                self.notice = Some("An analysis is already in progress, please wait.".to_string());
            }
            Err(QueryError::EmptyQuery) => {}
            Err(QueryError::Remote(err)) => {
                log::error!("analysis failed: {err}");
                self.notice = Some(format!("Analysis failed: {err}"));
            }
        }
    }
}

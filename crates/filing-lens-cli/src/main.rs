mod app;
mod ui;

use anyhow::{Context, Result};
use app::{Action, App};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use filing_lens_config::{Config, ProgressConfig};
use filing_lens_engine::{
    ChoreographyTimings, QueryRunner, ReportDirectoryService, load_report_text, transform,
    validate_reports_dir,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    env,
    fs::File,
    io::{Stdout, stdout},
    path::{Path, PathBuf},
    process,
    time::Duration,
};
use tokio::task::LocalSet;

const TICK: Duration = Duration::from_millis(50);

fn timings(progress: &ProgressConfig) -> ChoreographyTimings {
    ChoreographyTimings {
        lead_in: progress.lead_in(),
        completion_pause: progress.completion_pause(),
        final_hold: progress.final_hold(),
    }
}

fn init_logging(to_file: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(log::LevelFilter::Info);

    // Keep log lines off the alternate screen
    if to_file {
        let log_path = env::temp_dir().join("filing-lens.log");
        match File::create(&log_path) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => eprintln!("Warning: cannot open log file {}: {e}", log_path.display()),
        }
    }
    builder.init();
}

/// Writes a config file naming `reports_path` so later runs need no argument.
fn remember_reports_path(reports_path: &Path) {
    let config_path = Config::config_path();
    match Config::new(reports_path).save() {
        Ok(()) => log::info!("created config file at {}", config_path.display()),
        Err(e) => log::warn!("could not save config to {}: {e}", config_path.display()),
    }
}

fn render(path: &str) -> Result<()> {
    init_logging(false);
    let text = load_report_text(Path::new(path)).with_context(|| format!("rendering {path}"))?;
    println!("{}", transform(text.as_str()).to_html());
    Ok(())
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() == 3 && args[1] == "render" {
        return render(&args[2]);
    }

    init_logging(true);
    log::info!("filing-lens starting up");

    // Determine reports path from CLI args or config file
    let config_path = Config::config_path();
    let loaded = Config::load();
    let first_run = matches!(loaded, Ok(None));
    let config = match loaded {
        Ok(config) => config,
        Err(e) if args.len() == 2 => {
            log::warn!("ignoring unreadable config: {e}");
            None
        }
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            eprintln!("Usage: {} <reports-folder-path>", args[0]);
            process::exit(1);
        }
    };

    let reports_path;
    let from_config;

    if args.len() == 2 {
        reports_path = PathBuf::from(&args[1]);
        from_config = false;
    } else if args.len() == 1 {
        match &config {
            Some(config) => {
                reports_path = config.reports_path.clone();
                from_config = true;
            }
            None => {
                eprintln!("Error: No reports path provided and no config file found");
                eprintln!("Usage: {} <reports-folder-path>", args[0]);
                eprintln!("Or create a config file at {}", config_path.display());
                process::exit(1);
            }
        }
    } else {
        eprintln!("Usage: {} [reports-folder-path]", args[0]);
        eprintln!("       {} render <report-file>", args[0]);
        process::exit(1);
    }

    if let Err(e) = validate_reports_dir(&reports_path) {
        let source = if from_config {
            format!(" from config file '{}'", config_path.display())
        } else {
            String::new()
        };
        eprintln!(
            "Error: Reports path '{}'{} is invalid: {e}",
            reports_path.display(),
            source
        );
        process::exit(1);
    }

    if first_run && !from_config {
        remember_reports_path(&reports_path);
    }

    let progress = config.map(|c| c.progress).unwrap_or_default();
    let runner = QueryRunner::new(timings(&progress));
    let mut app = App::new(runner, ReportDirectoryService::new(reports_path));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // One thread: queries run as local tasks beside the draw loop
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let res = LocalSet::new().block_on(&runtime, run_app(&mut terminal, &mut app));

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

async fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    let mut ticker = tokio::time::interval(TICK);

    loop {
        ticker.tick().await;
        app.drain();
        terminal.draw(|f| ui::draw(f, app))?;

        while event::poll(Duration::ZERO)? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match app.handle_key(key) {
                Action::Quit => return Ok(()),
                Action::Submit(query) => app.spawn_query(query),
                Action::None => {}
            }
        }
    }
}

use filing_lens_engine::{PlainStyle, StepId, StepState};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

use crate::app::App;

const STEP_LABELS: [(StepId, &str); 4] = [
    (StepId::ParseQuery, "Parse query"),
    (StepId::SearchFilings, "Search filings"),
    (StepId::RunAnalysis, "Run analysis"),
    (StepId::GenerateReport, "Generate report"),
];

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(8),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_progress(f, app, chunks[0]);
    draw_report(f, app, chunks[1]);

    let notice = Paragraph::new(app.notice.clone().unwrap_or_default())
        .style(Style::default().fg(Color::Yellow));
    f.render_widget(notice, chunks[2]);

    let input_title = if app.is_busy() {
        "Query (busy)"
    } else {
        "Query"
    };
    let input = Paragraph::new(app.input.as_str())
        .block(Block::default().borders(Borders::ALL).title(input_title));
    f.render_widget(input, chunks[3]);

    let help = Line::from(vec![
        Span::raw("Enter: Ask | "),
        Span::raw("↑/↓ PgUp/PgDn: Scroll | "),
        Span::raw("Esc: Quit"),
    ]);
    f.render_widget(Paragraph::new(help), chunks[4]);
}

fn draw_progress(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Progress");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let steps: Vec<Line> = STEP_LABELS
        .iter()
        .map(|(id, label)| step_line(app.view.state_of(*id), label, app.tick))
        .collect();
    f.render_widget(Paragraph::new(steps), rows[0]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Green))
        .percent(u16::from(app.view.percent()))
        .label(app.view.status().to_string());
    f.render_widget(gauge, rows[1]);
}

fn step_line(state: StepState, label: &str, tick: u64) -> Line<'_> {
    let (glyph, style) = match state {
        StepState::Pending => ("○", Style::default().fg(Color::DarkGray)),
        StepState::Active => ("●", Style::default().fg(Color::Cyan)),
        // Pulse between two glyphs so waiting reads differently from active
        StepState::Waiting if (tick / 8) % 2 == 0 => ("◉", Style::default().fg(Color::Yellow)),
        StepState::Waiting => ("○", Style::default().fg(Color::Yellow)),
        StepState::Completed => ("✓", Style::default().fg(Color::Green)),
    };
    Line::from(vec![
        Span::styled(format!(" {glyph} "), style),
        Span::styled(label, style),
    ])
}

fn draw_report(f: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = app
        .report
        .iter()
        .map(|line| Line::from(Span::styled(line.text.clone(), report_style(line.style))))
        .collect();

    let report = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Report"))
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0));
    f.render_widget(report, area);
}

fn report_style(style: PlainStyle) -> Style {
    match style {
        PlainStyle::Heading(1) => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        PlainStyle::Heading(_) => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        PlainStyle::Quote => Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::ITALIC),
        PlainStyle::Code => Style::default().fg(Color::Yellow),
        PlainStyle::Rule => Style::default().fg(Color::DarkGray),
        PlainStyle::Placeholder => Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
        PlainStyle::ListItem | PlainStyle::Text | PlainStyle::Blank => Style::default(),
    }
}

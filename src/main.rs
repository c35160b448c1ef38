use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Clear, Dataset, GraphType, Paragraph,
};

use returns_terminal::dataset::LeagueDataset;
use returns_terminal::league::League;
use returns_terminal::state::{Action, AppState, Screen, apply_action};
use returns_terminal::strategy::Strategy;
use returns_terminal::summary::{BestWorstRecord, format_gbp};

struct App {
    state: AppState,
    should_quit: bool,
}

impl App {
    fn new() -> Self {
        Self {
            state: AppState::new(),
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        let action = match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('?') => Some(Action::ToggleHelp),
            _ => match self.state.screen {
                Screen::Select => match key.code {
                    KeyCode::Char('j') | KeyCode::Down => Some(Action::CursorNext),
                    KeyCode::Char('k') | KeyCode::Up => Some(Action::CursorPrev),
                    KeyCode::Char(' ') => Some(Action::ToggleCursorLeague),
                    KeyCode::Char('a') => Some(Action::SelectAll),
                    KeyCode::Char('n') => Some(Action::ClearSelection),
                    KeyCode::Char('l') | KeyCode::Enter => Some(Action::LoadSelected),
                    KeyCode::Char('p') => Some(Action::ShowPlots),
                    KeyCode::Char('s') => Some(Action::ShowSummary),
                    _ => None,
                },
                Screen::Plots => match key.code {
                    KeyCode::Right | KeyCode::Char('l') => Some(Action::NextPlot),
                    KeyCode::Left | KeyCode::Char('h') => Some(Action::PrevPlot),
                    KeyCode::Char('b') | KeyCode::Esc => Some(Action::Back),
                    _ => None,
                },
                Screen::Summary => match key.code {
                    KeyCode::Char('b') | KeyCode::Esc => Some(Action::Back),
                    _ => None,
                },
            },
        };

        if let Some(action) = action {
            if let Err(err) = apply_action(&mut self.state, action) {
                self.state.push_log(format!("[ERROR] {err:#}"));
            }
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new();
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header =
        Paragraph::new(header_text(&app.state)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.screen {
        Screen::Select => render_select(frame, chunks[1], &app.state),
        Screen::Plots => render_plots(frame, chunks[1], &app.state),
        Screen::Summary => render_summary(frame, chunks[1], &app.state),
    }

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::TOP));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(&app.state));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let title = match state.screen {
        Screen::Select => format!(
            "RETURNS TERMINAL | {} selected | {} loaded",
            state.selected.len(),
            state.store.len()
        ),
        Screen::Plots => {
            let leagues = state.plot_leagues();
            format!(
                "RETURNS TERMINAL | Fixture plots | {} of {}",
                state.plot_index + 1,
                leagues.len()
            )
        }
        Screen::Summary => format!(
            "RETURNS TERMINAL | Best & worst returns | {} leagues",
            state.summary.len()
        ),
    };
    let line1 = format!("  .-.  {}", title);
    let line2 = " ( £ )".to_string();
    let line3 = "  '-'".to_string();
    format!("{line1}\n{line2}\n{line3}")
}

fn footer_text(state: &AppState) -> String {
    match state.screen {
        Screen::Select => {
            "j/k/↑/↓ Move | Space Toggle | a All | n None | l/Enter Load | p Plots | s Summary | ? Help | q Quit"
                .to_string()
        }
        Screen::Plots => {
            "←/→ or h/l League | b/Esc Back | ? Help | q Quit".to_string()
        }
        Screen::Summary => "b/Esc Back | ? Help | q Quit".to_string(),
    }
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "Select leagues and load data, then choose what to view".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_select(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let heading = Paragraph::new("Select league(s) to load")
        .style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(heading, sections[0]);

    let list_area = sections[1];
    for (idx, league) in League::ALL.into_iter().enumerate() {
        if idx as u16 >= list_area.height {
            break;
        }
        let row_area = Rect {
            x: list_area.x,
            y: list_area.y + idx as u16,
            width: list_area.width,
            height: 1,
        };

        let row_style = if idx == state.cursor {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };

        let mark = if state.selected.contains(&league) {
            "[x]"
        } else {
            "[ ]"
        };
        let loaded = match state.store.get(league) {
            Some(dataset) => format!(
                "  loaded: {} ({} fixtures)",
                dataset.season,
                dataset.rows.len()
            ),
            None => String::new(),
        };
        let line = format!("{mark} {:<22}{loaded}", league.label());
        frame.render_widget(Paragraph::new(line).style(row_style), row_area);
    }
}

fn render_plots(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(dataset) = state.current_plot() else {
        let empty = Paragraph::new("No loaded league in the selection")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    };

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(8)])
        .split(area);

    render_returns_chart(frame, sections[0], dataset);
    render_strategy_key(frame, sections[1]);
}

fn render_returns_chart(frame: &mut Frame, area: Rect, dataset: &LeagueDataset) {
    let title = format!(
        " {} ({}) — Fixture-by-Fixture Returns ",
        dataset.league_name, dataset.season
    );

    let x_max = (dataset.rows.len().saturating_sub(1)) as f64;
    let (y_min, y_max) = dataset.extrema();
    let y_lower = y_min.min(0.0);
    let y_upper = y_max.max(0.0);
    let y_range = y_upper - y_lower;
    let y_pad = if y_range > 0.0 { y_range * 0.05 } else { 10.0 };
    let y_lo = y_lower - y_pad;
    let y_hi = y_upper + y_pad;

    let series: Vec<(Strategy, Vec<(f64, f64)>)> = Strategy::ALL
        .into_iter()
        .map(|strategy| {
            let points = dataset
                .rows
                .iter()
                .enumerate()
                .map(|(i, row)| (i as f64, row.value(strategy)))
                .collect();
            (strategy, points)
        })
        .collect();
    let zero_line = [(0.0, 0.0), (x_max.max(1.0), 0.0)];

    // No built-in legend; the strategy key below the chart is the legend.
    let mut datasets: Vec<Dataset> = series
        .iter()
        .map(|(strategy, points)| {
            Dataset::default()
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(strategy.color()))
                .data(points)
        })
        .collect();
    datasets.push(
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::White))
            .data(&zero_line),
    );

    let x_labels = vec![
        Span::raw("0"),
        Span::raw(format!("{}", (x_max / 2.0) as usize)),
        Span::raw(format!("{}", x_max as usize)),
    ];
    let y_labels = vec![
        Span::raw(format_gbp(y_lo)),
        Span::raw(format_gbp((y_lo + y_hi) / 2.0)),
        Span::raw(format_gbp(y_hi)),
    ];

    let chart = Chart::new(datasets)
        .block(Block::default().title(title).borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .title(Span::styled(
                    "Fixture Number",
                    Style::default().fg(Color::Gray),
                ))
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, x_max.max(1.0)])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(
                    "Running Returns (£)",
                    Style::default().fg(Color::Gray),
                ))
                .style(Style::default().fg(Color::DarkGray))
                .bounds([y_lo, y_hi])
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
    tint_plot_regions(frame, area, y_lo, y_hi);
}

/// Tints the plot background green above the zero line and red below it.
/// The chart widget has no span shading, so this writes cell backgrounds
/// after the chart renders, approximating the plot region as the block
/// interior minus the y-axis label gutter and the x-axis rows.
fn tint_plot_regions(frame: &mut Frame, area: Rect, y_lo: f64, y_hi: f64) {
    const LABEL_GUTTER: u16 = 12;
    let inner = Block::default().borders(Borders::ALL).inner(area);
    let plot_left = inner.x + LABEL_GUTTER;
    let plot_width = inner.width.saturating_sub(LABEL_GUTTER);
    let plot_height = inner.height.saturating_sub(2);
    if plot_width == 0 || plot_height == 0 || y_hi <= y_lo {
        return;
    }

    let zero_frac = ((0.0 - y_lo) / (y_hi - y_lo)).clamp(0.0, 1.0);
    let zero_row = inner.y + ((plot_height as f64) * (1.0 - zero_frac)).round() as u16;

    let positive_bg = Color::Rgb(16, 48, 16);
    let negative_bg = Color::Rgb(56, 20, 20);
    let buf = frame.buffer_mut();
    for y in inner.y..inner.y + plot_height {
        let bg = if y < zero_row { positive_bg } else { negative_bg };
        for x in plot_left..plot_left + plot_width {
            buf.get_mut(x, y).set_bg(bg);
        }
    }
}

fn render_strategy_key(frame: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    let heading = Paragraph::new("Strategy Key:").style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(
        heading,
        Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: 1,
        },
    );

    for (idx, strategy) in Strategy::ALL.into_iter().enumerate() {
        let y = area.y + 1 + idx as u16;
        if y >= area.y + area.height {
            break;
        }
        let row = Rect {
            x: area.x,
            y,
            width: area.width,
            height: 1,
        };
        let line = Line::from(vec![
            Span::styled("  ■■ ", Style::default().fg(strategy.color())),
            Span::raw(strategy.description()),
        ]);
        frame.render_widget(Paragraph::new(line), row);
    }
}

fn render_summary(frame: &mut Frame, area: Rect, state: &AppState) {
    if state.summary.is_empty() {
        let empty = Paragraph::new("No summary computed yet")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    let table_height = state.summary.len() as u16 + 2;
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(table_height),
            Constraint::Min(8),
            Constraint::Length(8),
        ])
        .split(area);

    render_summary_table(frame, sections[0], &state.summary);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(sections[1]);
    render_return_bars(frame, charts[0], &state.summary, BarSide::Best);
    render_return_bars(frame, charts[1], &state.summary, BarSide::Worst);

    render_strategy_key(frame, sections[2]);
}

fn summary_columns() -> [Constraint; 5] {
    [
        Constraint::Length(22),
        Constraint::Length(14),
        Constraint::Min(24),
        Constraint::Length(14),
        Constraint::Min(24),
    ]
}

fn render_summary_table(frame: &mut Frame, area: Rect, records: &[BestWorstRecord]) {
    let widths = summary_columns();
    let header_area = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: 1,
    };
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(header_area);
    let style = Style::default().add_modifier(Modifier::BOLD);
    render_cell_text(frame, cols[0], "League", style);
    render_cell_text(frame, cols[1], "Best", style);
    render_cell_text(frame, cols[2], "Best Strategy", style);
    render_cell_text(frame, cols[3], "Worst", style);
    render_cell_text(frame, cols[4], "Worst Strategy", style);

    for (idx, record) in records.iter().enumerate() {
        let y = area.y + 1 + idx as u16;
        if y >= area.y + area.height {
            break;
        }
        let row_area = Rect {
            x: area.x,
            y,
            width: area.width,
            height: 1,
        };
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths)
            .split(row_area);

        render_cell_text(frame, cols[0], &record.league_name, Style::default());
        render_cell_text(
            frame,
            cols[1],
            &format_gbp(record.best_return),
            Style::default().fg(record.best_strategy.color()),
        );
        render_cell_text(
            frame,
            cols[2],
            record.best_strategy.description(),
            Style::default(),
        );
        render_cell_text(
            frame,
            cols[3],
            &format_gbp(record.worst_return),
            Style::default().fg(record.worst_strategy.color()),
        );
        render_cell_text(
            frame,
            cols[4],
            record.worst_strategy.description(),
            Style::default(),
        );
    }
}

#[derive(Clone, Copy)]
enum BarSide {
    Best,
    Worst,
}

/// One bar per league, colored by the winning (or losing) strategy. Bars are
/// unsigned lengths in ratatui, so the bar shows the magnitude and the label
/// carries the signed currency value; the block border is the zero baseline.
fn render_return_bars(frame: &mut Frame, area: Rect, records: &[BestWorstRecord], side: BarSide) {
    let title = match side {
        BarSide::Best => " Best Return Per League ",
        BarSide::Worst => " Worst Return Per League ",
    };

    let bars: Vec<Bar> = records
        .iter()
        .map(|record| {
            let (value, strategy) = match side {
                BarSide::Best => (record.best_return, record.best_strategy),
                BarSide::Worst => (record.worst_return, record.worst_strategy),
            };
            Bar::default()
                .value(value.abs().round() as u64)
                .text_value(format_gbp(value))
                .label(Line::from(record.league.short_label()))
                .style(Style::default().fg(strategy.color()))
        })
        .collect();

    let max = records
        .iter()
        .map(|record| match side {
            BarSide::Best => record.best_return.abs(),
            BarSide::Worst => record.worst_return.abs(),
        })
        .fold(0.0_f64, f64::max)
        .round() as u64;

    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .block(Block::default().title(title).borders(Borders::ALL))
        .bar_width(9)
        .bar_gap(1)
        .max(max.max(1));
    frame.render_widget(chart, area);
}

fn render_cell_text(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let paragraph = Paragraph::new(text).style(style);
    frame.render_widget(paragraph, area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Returns Terminal - Help",
        "",
        "Global:",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Select:",
        "  j/k or ↑/↓   Move",
        "  Space        Toggle league",
        "  a / n        Select all / none",
        "  l / Enter    Load selected leagues",
        "  p            Fixture-by-fixture plots",
        "  s            Best & worst summary",
        "",
        "Plots:",
        "  ←/→ or h/l   Previous / next league",
        "  b / Esc      Back",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

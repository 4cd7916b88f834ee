//! Ratatui-based terminal UI.
//!
//! The TUI provides editable left/right symbols (with a suggestion dropdown),
//! period cycling, and an inspect cursor over the unified axis, then renders
//! the percent-change overlay chart for the current comparison.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::app::pipeline::{self, RunOutput};
use crate::cli::CompareArgs;
use crate::data::{Suggestion, TickerDb};
use crate::domain::CompareConfig;
use crate::error::AppError;
use crate::report::format::{fmt_opt, fmt_pct};

mod plotters_chart;

use plotters_chart::CompareChart;

const FIELD_LEFT: usize = 0;
const FIELD_RIGHT: usize = 1;
const FIELD_PERIOD: usize = 2;
const FIELD_INSPECT: usize = 3;

const MAX_SUGGESTIONS: usize = 6;

/// Start the TUI.
pub fn run(args: CompareArgs) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::data(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(args);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::data(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::data(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

struct App {
    config: CompareConfig,
    tickers: TickerDb,
    selected_field: usize,
    editing: Option<Side>,
    input: String,
    suggestions: Vec<Suggestion>,
    suggestion_idx: usize,
    cursor: usize,
    status: String,
    run: Option<RunOutput>,
}

impl App {
    fn new(args: CompareArgs) -> Self {
        let config = crate::app::compare_config_from_args(&args);
        let mut app = Self {
            config,
            tickers: TickerDb::load_default(),
            selected_field: 0,
            editing: None,
            input: String::new(),
            suggestions: Vec::new(),
            suggestion_idx: 0,
            cursor: 0,
            status: "Fetching price histories...".to_string(),
            run: None,
        };
        app.refresh();
        app
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut dirty = true;
        loop {
            if dirty {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::data(format!("Terminal draw error: {e}")))?;
                dirty = false;
            }

            let ready = event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::data(format!("Event poll error: {e}")))?;
            if !ready {
                continue;
            }

            match event::read().map_err(|e| AppError::data(format!("Event read error: {e}")))? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if self.handle_key(key.code) {
                        return Ok(());
                    }
                    dirty = true;
                }
                Event::Resize(_, _) => dirty = true,
                _ => {}
            }
        }
    }

    /// Returns `true` when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing.is_some() {
            self.handle_symbol_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Up => {
                if self.selected_field > 0 {
                    self.selected_field -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected_field < FIELD_INSPECT {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Enter => match self.selected_field {
                FIELD_LEFT => self.start_symbol_edit(Side::Left),
                FIELD_RIGHT => self.start_symbol_edit(Side::Right),
                _ => {}
            },
            KeyCode::Char('r') => {
                self.refresh();
            }
            KeyCode::Char('o') => {
                self.config.offline = !self.config.offline;
                self.refresh();
            }
            _ => {}
        }

        false
    }

    fn adjust_field(&mut self, delta: i32) {
        match self.selected_field {
            FIELD_LEFT | FIELD_RIGHT => {
                self.status = "Press Enter to edit the symbol.".to_string();
            }
            FIELD_PERIOD => {
                self.config.period = if delta >= 0 {
                    self.config.period.next()
                } else {
                    self.config.period.prev()
                };
                self.refresh();
            }
            FIELD_INSPECT => {
                let n = self.axis_len();
                if n == 0 {
                    return;
                }
                self.cursor = if delta >= 0 {
                    (self.cursor + 1).min(n - 1)
                } else {
                    self.cursor.saturating_sub(1)
                };
            }
            _ => {}
        }
    }

    fn start_symbol_edit(&mut self, side: Side) {
        self.input = match side {
            Side::Left => self.config.left_symbol.clone(),
            Side::Right => self.config.right_symbol.clone(),
        };
        self.editing = Some(side);
        self.update_suggestions();
        self.status = "Editing symbol. Enter apply, Tab take suggestion, Esc cancel.".to_string();
    }

    fn handle_symbol_edit(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.editing = None;
                self.suggestions.clear();
                self.status = "Symbol edit canceled.".to_string();
            }
            KeyCode::Enter => {
                let symbol = self.input.trim().to_uppercase();
                if symbol.is_empty() {
                    self.status = "Symbol must not be empty.".to_string();
                    return;
                }
                match self.editing.take() {
                    Some(Side::Left) => self.config.left_symbol = symbol,
                    Some(Side::Right) => self.config.right_symbol = symbol,
                    None => {}
                }
                self.suggestions.clear();
                self.refresh();
            }
            KeyCode::Backspace => {
                self.input.pop();
                self.update_suggestions();
            }
            KeyCode::Tab => {
                if let Some(s) = self.suggestions.get(self.suggestion_idx) {
                    self.input = s.symbol.clone();
                    self.update_suggestions();
                }
            }
            KeyCode::Up => {
                self.suggestion_idx = self.suggestion_idx.saturating_sub(1);
            }
            KeyCode::Down => {
                if !self.suggestions.is_empty() {
                    self.suggestion_idx = (self.suggestion_idx + 1).min(self.suggestions.len() - 1);
                }
            }
            KeyCode::Char(c) => {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '=') {
                    self.input.push(c.to_ascii_uppercase());
                    self.update_suggestions();
                }
            }
            _ => {}
        }
    }

    /// Recompute suggestions for the current input.
    ///
    /// The lookup is synchronous and in-memory, so the result always belongs
    /// to the latest keystroke; there are no stale in-flight responses to
    /// discard.
    fn update_suggestions(&mut self) {
        self.suggestions = self.tickers.suggest(&self.input, MAX_SUGGESTIONS);
        self.suggestion_idx = 0;
    }

    /// Fetch both histories and rerun the comparison pipeline.
    ///
    /// On failure the previous run stays on screen and the error lands in
    /// the status line; the pipeline is never handed partial data.
    fn refresh(&mut self) {
        self.status = "Fetching price histories...".to_string();
        match pipeline::run_compare(&self.config) {
            Ok(run) => {
                self.cursor = run.comparison.len().saturating_sub(1);
                self.status = crate::report::format_summary_line(
                    &self.config.left_symbol,
                    &self.config.right_symbol,
                    &run.left_summary,
                    &run.right_summary,
                );
                self.run = Some(run);
            }
            Err(err) => {
                self.status = err.to_string();
            }
        }
    }

    fn axis_len(&self) -> usize {
        self.run.as_ref().map(|r| r.comparison.len()).unwrap_or(0)
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("rp", Style::default().fg(Color::Cyan)),
            Span::raw(" - relative performance of two tickers"),
        ]));

        let source = if self.config.offline {
            "offline sample"
        } else {
            "alphavantage"
        };
        let n = self.axis_len();
        lines.push(Line::from(Span::styled(
            format!(
                "left: {} | right: {} | period: {} | interval: {} | source: {source} | n={n}",
                self.config.left_symbol,
                self.config.right_symbol,
                self.config.period.display_name(),
                self.config.interval.display_name(),
            ),
            Style::default().fg(Color::Gray),
        )));

        if let Some(run) = &self.run {
            lines.push(Line::from(vec![
                Span::styled(
                    format!(
                        "{} {}",
                        self.config.left_symbol,
                        fmt_pct(run.left_summary.pct_change)
                    ),
                    Style::default().fg(Color::LightBlue),
                ),
                Span::raw(" | "),
                Span::styled(
                    format!(
                        "{} {}",
                        self.config.right_symbol,
                        fmt_pct(run.right_summary.pct_change)
                    ),
                    Style::default().fg(Color::Cyan),
                ),
            ]));
        }

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(8)])
            .split(area);

        self.draw_chart(frame, chunks[0]);
        self.draw_settings(frame, chunks[1]);

        if self.editing.is_some() {
            self.draw_suggestions(frame, chunks[0]);
        }
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Percent Change").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(run) = &self.run else {
            let msg = Paragraph::new("Waiting for data...")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        };

        let cmp = &run.comparison;
        let Some((left, right, x_bounds, y_bounds)) = chart_series(cmp) else {
            let msg = Paragraph::new("Nothing to plot for this comparison.")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        };

        let (chart_rect, insets) = chart_layout(inner);
        let widget = CompareChart {
            left: &left,
            right: &right,
            dates: &cmp.dates,
            x_bounds,
            y_bounds,
            y_label: format!("pct change ({})", self.config.period.display_name()),
        };

        frame.render_widget(widget, chart_rect);
        if let Some(insets) = insets {
            draw_axis_ticks(frame, inner, chart_rect, insets, &cmp.dates, y_bounds);
        }
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let left_label = match self.editing {
            Some(Side::Left) => format!("Left:    {}_", self.input),
            _ => format!("Left:    {}", self.config.left_symbol),
        };
        let right_label = match self.editing {
            Some(Side::Right) => format!("Right:   {}_", self.input),
            _ => format!("Right:   {}", self.config.right_symbol),
        };

        let items = vec![
            ListItem::new(left_label),
            ListItem::new(right_label),
            ListItem::new(format!("Period:  {}", self.config.period.display_name())),
            ListItem::new(self.inspect_line()),
        ];

        let list = List::new(items)
            .block(Block::default().title("Settings").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    /// Per-date readout for the inspect cursor: percent and raw close for
    /// both sides (the tooltip counterpart).
    fn inspect_line(&self) -> String {
        let Some(run) = &self.run else {
            return "Inspect: -".to_string();
        };
        let cmp = &run.comparison;
        if cmp.is_empty() {
            return "Inspect: -".to_string();
        }

        let i = self.cursor.min(cmp.len() - 1);
        format!(
            "Inspect: {}  {} {} ({})  {} {} ({})",
            cmp.dates[i],
            self.config.left_symbol,
            fmt_pct(cmp.left_pct[i]),
            fmt_opt(cmp.left_close[i], 2),
            self.config.right_symbol,
            fmt_pct(cmp.right_pct[i]),
            fmt_opt(cmp.right_close[i], 2),
        )
    }

    /// Suggestion dropdown, drawn over the lower-left corner of the chart.
    fn draw_suggestions(&self, frame: &mut ratatui::Frame<'_>, chart_area: Rect) {
        let height = (self.suggestions.len() as u16 + 2).max(3);
        let width = 36u16.min(chart_area.width.saturating_sub(2));
        if chart_area.height <= height || width < 10 {
            return;
        }

        let rect = Rect {
            x: chart_area.x + 1,
            y: chart_area.y + chart_area.height - height - 1,
            width,
            height,
        };
        frame.render_widget(Clear, rect);

        let mut lines: Vec<Line> = Vec::new();
        if self.suggestions.is_empty() {
            lines.push(Line::from(Span::styled(
                "(no matches)",
                Style::default().fg(Color::Gray),
            )));
        }
        for (i, s) in self.suggestions.iter().enumerate() {
            let style = if i == self.suggestion_idx {
                Style::default().fg(Color::Black).bg(Color::White)
            } else {
                Style::default().fg(Color::Gray)
            };
            lines.push(Line::from(Span::styled(
                format!("{:<7} {}", s.symbol, s.name),
                style,
            )));
        }

        let p = Paragraph::new(Text::from(lines))
            .block(Block::default().title("Suggestions").borders(Borders::ALL));
        frame.render_widget(p, rect);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  Enter edit symbol  r refresh  o offline  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Build chart series for Plotters: present points per side (as axis-index
/// coordinates) plus padded bounds. `None` when there is nothing chartable.
fn chart_series(
    cmp: &crate::compare::Comparison,
) -> Option<(Vec<(f64, f64)>, Vec<(f64, f64)>, [f64; 2], [f64; 2])> {
    if cmp.len() < 2 {
        return None;
    }

    let present = |series: &[Option<f64>]| -> Vec<(f64, f64)> {
        series
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.filter(|v| v.is_finite()).map(|v| (i as f64, v)))
            .collect()
    };

    let left = present(&cmp.left_pct);
    let right = present(&cmp.right_pct);
    if left.is_empty() && right.is_empty() {
        return None;
    }

    let x_bounds = [0.0, (cmp.len() - 1) as f64];

    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(_, y) in left.iter().chain(&right) {
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if !y_min.is_finite() || !y_max.is_finite() {
        return None;
    }

    let pad = ((y_max - y_min) * 0.08).max(5.0);
    let y_bounds = [y_min - pad, y_max + pad];

    Some((left, right, x_bounds, y_bounds))
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 7,
        right: 1,
        top: 1,
        bottom: 2,
    };

    let too_small = inner.width <= insets.left + insets.right + 10
        || inner.height <= insets.top + insets.bottom + 5;
    if too_small {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

/// Tick labels around the chart rect: dates along the bottom, percent levels
/// down the left edge. Drawn into the margins reserved by `chart_layout`.
fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    dates: &[chrono::NaiveDate],
    y_bounds: [f64; 2],
) {
    const TICKS: usize = 5;
    let style = Style::default().fg(Color::Gray);

    let tick_row = chart.y + chart.height;
    if !dates.is_empty() && tick_row + 1 < inner.y + inner.height {
        for i in 0..TICKS {
            let u = i as f64 / (TICKS - 1) as f64;
            let idx = (u * (dates.len() - 1) as f64).round() as usize;
            let label = dates[idx].format("%m/%d").to_string();
            let width = label.len() as u16;
            let center = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
            let x = center.saturating_sub(width / 2);
            frame.render_widget(
                Paragraph::new(label).style(style),
                Rect { x, y: tick_row, width, height: 1 },
            );
        }

        let caption = Paragraph::new("date")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));
        let caption_rect = Rect {
            x: chart.x,
            y: tick_row + 1,
            width: chart.width,
            height: 1,
        };
        frame.render_widget(caption, caption_rect);
    }

    for i in 0..TICKS {
        let u = i as f64 / (TICKS - 1) as f64;
        let value = y_bounds[0] + u * (y_bounds[1] - y_bounds[0]);
        let label = format!("{value:.0}%");
        let width = label.len() as u16;
        let row = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;

        // Right-align against the chart's left edge; skip labels that would
        // spill outside the reserved inset.
        let edge = inner.x + insets.left;
        if width + 1 > insets.left {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: edge - 1 - width,
                y: row,
                width,
                height: 1,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare;
    use crate::domain::DailyRecord;
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, day).unwrap()
    }

    #[test]
    fn chart_series_skips_gaps_and_pads_bounds() {
        let left = vec![
            DailyRecord::new(d(1), Some(100.0)),
            DailyRecord::new(d(2), None),
            DailyRecord::new(d(3), Some(110.0)),
        ];
        let cmp = compare::compare(&left, &[]);

        let (l, r, x_bounds, y_bounds) = chart_series(&cmp).unwrap();

        assert_eq!(l, vec![(0.0, 0.0), (2.0, 10.0)]);
        assert!(r.is_empty());
        assert_eq!(x_bounds, [0.0, 2.0]);
        // span 10 pads by the 5-point minimum
        assert_eq!(y_bounds, [-5.0, 15.0]);
    }

    #[test]
    fn chart_series_declines_degenerate_comparisons() {
        assert!(chart_series(&compare::compare(&[], &[])).is_none());

        let single = vec![DailyRecord::new(d(1), Some(5.0))];
        assert!(chart_series(&compare::compare(&single, &[])).is_none());

        let all_null = vec![DailyRecord::new(d(1), None), DailyRecord::new(d(2), None)];
        assert!(chart_series(&compare::compare(&all_null, &[])).is_none());
    }
}

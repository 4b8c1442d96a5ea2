//! Ratatui-based terminal dashboard.
//!
//! A sidebar menu switches between four pages:
//! - Home: what the dashboard does
//! - Sales: sector selector, the sector's rows, and its trend chart
//! - Forecast: sector/quarter choices, investment and growth sliders, predict
//! - About

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, Wrap},
    Frame, Terminal,
};
use tracing::debug;

use crate::app::pipeline::{select_sector, SectorView};
use crate::data::{amount_range, distinct_sectors, DataStore};
use crate::domain::{DuplicateMonths, Forecast, ForecastInput, ForecastSector, Quarter};
use crate::error::{AppError, EXIT_IO};
use crate::forecast::run_forecast;
use crate::report::{format_currency, format_grouped, format_load_report};

mod plotters_chart;

use plotters_chart::TrendPlottersChart;

const INVESTMENT_MAX: u32 = 200;
const GROWTH_MAX: u32 = 100;
const SLIDER_STEP: u32 = 5;

/// Start the TUI.
pub fn run(store: &DataStore) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(store);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::new(EXIT_IO, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(EXIT_IO, format!("Failed to enter alternate screen: {e}")));
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
enum Page {
    Home,
    Sales,
    Forecast,
    About,
}

impl Page {
    const ALL: [Page; 4] = [Page::Home, Page::Sales, Page::Forecast, Page::About];

    fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Sales => "Sales data",
            Page::Forecast => "Forecast",
            Page::About => "About",
        }
    }

    fn index(self) -> usize {
        match self {
            Page::Home => 0,
            Page::Sales => 1,
            Page::Forecast => 2,
            Page::About => 3,
        }
    }

    fn next(self) -> Self {
        Page::ALL[(self.index() + 1) % Page::ALL.len()]
    }

    fn prev(self) -> Self {
        Page::ALL[(self.index() + Page::ALL.len() - 1) % Page::ALL.len()]
    }
}

/// Forecast page fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Sector,
    Quarter,
    Investment,
    Growth,
}

impl Field {
    const ALL: [Field; 4] = [Field::Sector, Field::Quarter, Field::Investment, Field::Growth];
}

/// Forecast simulator state (slider values are whole units, as in the UI).
#[derive(Debug, Clone)]
struct ForecastForm {
    sector: ForecastSector,
    quarter: Quarter,
    investment: u32,
    growth: u32,
    field: usize,
    result: Option<Forecast>,
}

impl Default for ForecastForm {
    fn default() -> Self {
        Self {
            sector: ForecastSector::Tecnologia,
            quarter: Quarter::Q1,
            investment: 50,
            growth: 20,
            field: 0,
            result: None,
        }
    }
}

impl ForecastForm {
    fn input(&self) -> ForecastInput {
        ForecastInput {
            sector: self.sector,
            quarter: self.quarter,
            investment: f64::from(self.investment),
            growth_rate: f64::from(self.growth),
        }
    }

    fn adjust(&mut self, delta: i32) {
        match Field::ALL[self.field] {
            Field::Sector => {
                self.sector = if delta >= 0 { self.sector.next() } else { self.sector.prev() };
            }
            Field::Quarter => {
                self.quarter = if delta >= 0 { self.quarter.next() } else { self.quarter.prev() };
            }
            Field::Investment => self.investment = step(self.investment, delta, INVESTMENT_MAX),
            Field::Growth => self.growth = step(self.growth, delta, GROWTH_MAX),
        }
        // A result always reflects the inputs on screen.
        self.result = None;
    }
}

struct App<'s> {
    store: &'s DataStore,
    page: Page,
    sectors: Vec<String>,
    sector_idx: usize,
    duplicates: DuplicateMonths,
    view: Option<SectorView<'s>>,
    form: ForecastForm,
    status: String,
}

impl<'s> App<'s> {
    fn new(store: &'s DataStore) -> Self {
        let dataset = store.load();
        let sectors = distinct_sectors(dataset)
            .into_iter()
            .map(str::to_string)
            .collect();

        let status = match (store.advisory(), store.report()) {
            (Some(err), _) => err.to_string(),
            (None, Some(report)) => format_load_report(report),
            (None, None) => String::new(),
        };

        let mut app = Self {
            store,
            page: Page::Home,
            sectors,
            sector_idx: 0,
            duplicates: DuplicateMonths::KeepAll,
            view: None,
            form: ForecastForm::default(),
            status,
        };
        app.refresh_view();
        app
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(EXIT_IO, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(EXIT_IO, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(EXIT_IO, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Apply a key press. Returns `true` when the app should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Tab => self.page = self.page.next(),
            KeyCode::BackTab => self.page = self.page.prev(),
            KeyCode::Char(c @ '1'..='4') => {
                let idx = c as usize - '1' as usize;
                self.page = Page::ALL[idx];
            }
            _ => match self.page {
                Page::Sales => self.handle_sales_key(code),
                Page::Forecast => self.handle_forecast_key(code),
                Page::Home | Page::About => {}
            },
        }
        false
    }

    fn handle_sales_key(&mut self, code: KeyCode) {
        if self.sectors.is_empty() {
            return;
        }
        let n = self.sectors.len();
        match code {
            KeyCode::Left | KeyCode::Up => {
                self.sector_idx = (self.sector_idx + n - 1) % n;
                self.refresh_view();
            }
            KeyCode::Right | KeyCode::Down => {
                self.sector_idx = (self.sector_idx + 1) % n;
                self.refresh_view();
            }
            KeyCode::Char('d') => {
                self.duplicates = next_duplicate_policy(self.duplicates);
                self.refresh_view();
                self.status = format!("duplicate months: {}", duplicate_label(self.duplicates));
            }
            _ => {}
        }
    }

    fn handle_forecast_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => self.form.field = self.form.field.saturating_sub(1),
            KeyCode::Down => {
                if self.form.field + 1 < Field::ALL.len() {
                    self.form.field += 1;
                }
            }
            KeyCode::Left => self.form.adjust(-1),
            KeyCode::Right => self.form.adjust(1),
            KeyCode::Enter => {
                let forecast = run_forecast(self.form.input());
                debug!(amount = forecast.amount, "forecast requested");
                self.status = format!("forecast: {}", format_currency(forecast.amount));
                self.form.result = Some(forecast);
            }
            _ => {}
        }
    }

    fn refresh_view(&mut self) {
        self.view = self
            .sectors
            .get(self.sector_idx)
            .map(|sector| select_sector(self.store.load(), sector, self.duplicates));
    }

    fn draw(&self, frame: &mut Frame<'_>) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(frame.area());
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(22), Constraint::Min(0)])
            .split(rows[0]);

        self.draw_menu(frame, cols[0]);
        match self.page {
            Page::Home => draw_text_page(frame, cols[1], "Sales dashboard", HOME_TEXT),
            Page::Sales => self.draw_sales(frame, cols[1]),
            Page::Forecast => self.draw_forecast(frame, cols[1]),
            Page::About => draw_text_page(frame, cols[1], "About", ABOUT_TEXT),
        }
        self.draw_footer(frame, rows[1]);
    }

    fn draw_menu(&self, frame: &mut Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = Page::ALL
            .iter()
            .enumerate()
            .map(|(i, p)| ListItem::new(format!("{} {}", i + 1, p.title())))
            .collect();

        let list = List::new(items)
            .block(Block::default().title("Menu").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(self.page.index()));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_sales(&self, frame: &mut Frame<'_>, area: Rect) {
        let block = Block::default().title("Sales by sector").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(view) = &self.view else {
            let msg = format!(
                "Sales file '{}' not found or has no valid rows.",
                self.store.source().display()
            );
            let p = Paragraph::new(msg)
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
                .wrap(Wrap { trim: true });
            frame.render_widget(p, inner);
            return;
        };

        let table_height = (view.records.len() as u16 + 3).min(10);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(table_height),
                Constraint::Min(0),
            ])
            .split(inner);

        let selector = Line::from(vec![
            Span::raw("Sector: "),
            Span::styled(
                format!("◀ {} ▶", view.sector),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(
                    "  ({} of {}) | duplicates: {}",
                    self.sector_idx + 1,
                    self.sectors.len(),
                    duplicate_label(self.duplicates)
                ),
                Style::default().fg(Color::Gray),
            ),
        ]);
        frame.render_widget(Paragraph::new(selector), chunks[0]);

        let rows: Vec<Row> = view
            .records
            .iter()
            .map(|r| {
                Row::new(vec![
                    Cell::from(r.sector().to_string()),
                    Cell::from(r.month().to_string()),
                    Cell::from(format_grouped(r.amount(), 2)),
                ])
            })
            .collect();
        let table = Table::new(
            rows,
            [Constraint::Length(16), Constraint::Length(10), Constraint::Length(14)],
        )
        .header(
            Row::new(vec!["sector", "month", "sales"])
                .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::TOP));
        frame.render_widget(table, chunks[1]);

        self.draw_chart(frame, chunks[2], view);
    }

    fn draw_chart(&self, frame: &mut Frame<'_>, area: Rect, view: &SectorView<'_>) {
        let block = Block::default()
            .title(format!("Sales trend - {}", view.sector))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let (points, months, x_bounds, y_bounds) = chart_series(view);
        let widget = TrendPlottersChart {
            points: &points,
            months: &months,
            x_bounds,
            y_bounds,
            x_label: "month",
            y_label: "sales (R$)",
        };
        frame.render_widget(widget, inner);
    }

    fn draw_forecast(&self, frame: &mut Frame<'_>, area: Rect) {
        let block = Block::default().title("Sales forecast simulator").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Length(2), Constraint::Min(0)])
            .split(inner);

        let form = &self.form;
        let items = vec![
            ListItem::new(format!("Sector:  {}", form.sector)),
            ListItem::new(format!("Quarter: {}", form.quarter)),
            ListItem::new(format!(
                "Marketing investment (R$ mil): {} {:>3}",
                slider(form.investment, INVESTMENT_MAX, 20),
                form.investment
            )),
            ListItem::new(format!(
                "Expected growth (%):           {} {:>3}",
                slider(form.growth, GROWTH_MAX, 20),
                form.growth
            )),
        ];
        let list = List::new(items)
            .block(Block::default().borders(Borders::BOTTOM))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");
        let mut state = ListState::default();
        state.select(Some(form.field));
        frame.render_stateful_widget(list, chunks[0], &mut state);

        frame.render_widget(
            Paragraph::new("[ Enter ] Predict sales").style(Style::default().fg(Color::Cyan)),
            chunks[1],
        );

        if let Some(result) = &form.result {
            let text = Text::from(vec![Line::from(Span::styled(
                format!("Estimated sales forecast: {}", format_currency(result.amount)),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ))]);
            frame.render_widget(Paragraph::new(text), chunks[2]);
        }
    }

    fn draw_footer(&self, frame: &mut Frame<'_>, area: Rect) {
        let help = match self.page {
            Page::Sales => "Tab/1-4 page  ←/→ sector  d duplicates  q quit",
            Page::Forecast => "Tab/1-4 page  ↑/↓ field  ←/→ adjust  Enter predict  q quit",
            Page::Home | Page::About => "Tab/1-4 page  q quit",
        };
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

const HOME_TEXT: &str = "\
Welcome! This dashboard lets you:

  - browse sales by sector, as a table and a trend chart;
  - simulate a sales forecast from marketing investment and expected growth.

Use the menu on the left (Tab or 1-4) to move between pages.";

const ABOUT_TEXT: &str = "\
A terminal dashboard for sales-by-sector data.

Features:
  - sidebar menu;
  - sales data read from a CSV file (sector, month, sales);
  - trend chart per sector;
  - adjustable forecast simulator.

The forecast is a fixed weighting of sector, quarter, investment and growth,
not a statistical model.";

fn draw_text_page(frame: &mut Frame<'_>, area: Rect, title: &str, body: &str) {
    let p = Paragraph::new(body)
        .wrap(Wrap { trim: false })
        .block(Block::default().title(title.to_string()).borders(Borders::ALL));
    frame.render_widget(p, area);
}

/// Build chart points (index, amount) plus bounds for Plotters.
fn chart_series(view: &SectorView<'_>) -> (Vec<(f64, f64)>, Vec<String>, [f64; 2], [f64; 2]) {
    let points: Vec<(f64, f64)> = view
        .trend
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.amount))
        .collect();
    let months = view.trend.iter().map(|p| p.month.clone()).collect();

    let n = points.len().max(1) as f64;
    let x_bounds = [-0.5, n - 0.5];

    let (mut y_min, mut y_max) = amount_range(&view.trend).unwrap_or((0.0, 1.0));
    if y_max <= y_min {
        y_min -= 1.0;
        y_max += 1.0;
    }
    let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);
    let y_bounds = [y_min - pad, y_max + pad];

    (points, months, x_bounds, y_bounds)
}

/// Move a slider value by one step, staying within `0..=max`.
fn step(value: u32, delta: i32, max: u32) -> u32 {
    if delta >= 0 {
        value.saturating_add(SLIDER_STEP).min(max)
    } else {
        value.saturating_sub(SLIDER_STEP)
    }
}

/// Text slider, e.g. `[#####-----]`.
fn slider(value: u32, max: u32, width: usize) -> String {
    let filled = if max == 0 {
        0
    } else {
        ((value.min(max) as f64 / max as f64) * width as f64).round() as usize
    };
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

fn next_duplicate_policy(cur: DuplicateMonths) -> DuplicateMonths {
    match cur {
        DuplicateMonths::KeepAll => DuplicateMonths::LastWins,
        DuplicateMonths::LastWins => DuplicateMonths::Sum,
        DuplicateMonths::Sum => DuplicateMonths::KeepAll,
    }
}

fn duplicate_label(policy: DuplicateMonths) -> &'static str {
    match policy {
        DuplicateMonths::KeepAll => "keep all",
        DuplicateMonths::LastWins => "last wins",
        DuplicateMonths::Sum => "sum",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slider_rendering() {
        assert_eq!(slider(0, 200, 10), "[----------]");
        assert_eq!(slider(100, 200, 10), "[#####-----]");
        assert_eq!(slider(200, 200, 10), "[##########]");
        assert_eq!(slider(500, 200, 4), "[####]");
    }

    #[test]
    fn sliders_stay_in_range() {
        assert_eq!(step(195, 1, INVESTMENT_MAX), 200);
        assert_eq!(step(200, 1, INVESTMENT_MAX), 200);
        assert_eq!(step(0, -1, GROWTH_MAX), 0);
        assert_eq!(step(20, -1, GROWTH_MAX), 15);
    }

    #[test]
    fn page_navigation_wraps() {
        assert_eq!(Page::About.next(), Page::Home);
        assert_eq!(Page::Home.prev(), Page::About);
    }

    #[test]
    fn forecast_page_predicts_defaults() {
        let store = DataStore::new("missing/vendas.csv");
        let mut app = App::new(&store);
        assert!(app.view.is_none());

        app.handle_key(KeyCode::Char('3'));
        assert_eq!(app.page, Page::Forecast);

        // Defaults: Tecnologia, Q1, 50, 20 -> 1320 + 500 + 200
        assert!(!app.handle_key(KeyCode::Enter));
        let amount = app.form.result.map(|f| f.amount).unwrap();
        assert!((amount - 2020.0).abs() < 1e-9);

        // Changing an input clears the stale result.
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Right);
        assert_eq!(app.form.quarter, Quarter::Q2);
        assert!(app.form.result.is_none());

        assert!(app.handle_key(KeyCode::Char('q')));
    }
}

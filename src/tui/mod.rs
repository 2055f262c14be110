//! Ratatui-based plot view.
//!
//! [`show`] takes over the terminal, draws one [`PlotView`] full screen, and
//! blocks until the user dismisses it. It stands in for a plot window: the
//! caller resumes once the view is closed.

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
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::error::AppError;
use crate::plot::{FitPlot, PlotView, convergence_bounds, pad_range, value_range};

mod plotters_chart;

use plotters_chart::{ConvergenceChart, FitChart2d, FitChart3d};

/// Show `view` full screen until `q`, `Esc` or `Enter` is pressed.
pub fn show(view: &PlotView) -> Result<(), AppError> {
    // Log before the alternate screen is up; stderr output would land inside it.
    log::debug!("opening plot view: {}", view.title());
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::io("Failed to initialize terminal", e))?;

    PlotWindow { view }.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::io("Failed to enable raw mode", e))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::io("Failed to enter alternate screen", e));
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

struct PlotWindow<'a> {
    view: &'a PlotView,
}

impl PlotWindow<'_> {
    fn event_loop<B: ratatui::backend::Backend>(
        &self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::io("Terminal draw error", e))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::io("Event poll error", e))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::io("Event read error", e))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if closes_view(key.code) {
                        break;
                    }
                }
                Event::Resize(_, _) => needs_redraw = true,
                _ => {}
            }
        }
        Ok(())
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(frame.area());

        self.draw_header(frame, chunks[0]);
        self.draw_chart(frame, chunks[1]);
        draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines = vec![Line::from(vec![
            Span::styled("mcfit", Style::default().fg(Color::Cyan)),
            Span::raw(format!(" | {}", self.view.title())),
        ])];

        let detail = match self.view {
            PlotView::Fit2d(plot) | PlotView::Fit3d(plot) => plot.caption(),
            PlotView::Convergence(plot) => match plot.points.last() {
                Some(last) => format!(
                    "{} points | last: trials={} a = {:.4} ± {:.4} | true a = {}",
                    plot.points.len(),
                    last.trials,
                    last.mean,
                    last.std_error,
                    plot.truth
                ),
                None => "no points".to_string(),
            },
        };
        lines.push(Line::from(Span::styled(detail, Style::default().fg(Color::Gray))));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Plot").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        match self.view {
            PlotView::Fit2d(plot) => {
                let (x_bounds, y_bounds) = fit_bounds(plot);
                let (chart_rect, insets) = chart_layout(inner);
                frame.render_widget(FitChart2d { plot, x_bounds, y_bounds }, chart_rect);
                if let Some(insets) = insets {
                    let axes = AxisLabels {
                        x: "Pixel axis 1 (x1)",
                        y: "y",
                        fmt_x: |v| format!("{v:.1}"),
                    };
                    draw_axis_ticks(frame, inner, chart_rect, insets, x_bounds, y_bounds, &axes);
                }
            }
            PlotView::Fit3d(plot) => {
                let (x1_bounds, y_bounds) = fit_bounds(plot);
                let (b0, b1) = value_range(plot.x2.iter().copied()).unwrap_or((0.0, 1.0));
                let widget = FitChart3d {
                    plot,
                    x1_bounds,
                    x2_bounds: [b0, b1],
                    y_bounds,
                };
                frame.render_widget(widget, inner);
            }
            PlotView::Convergence(plot) => {
                let (x_bounds, y_bounds) = convergence_bounds(plot);
                let (chart_rect, insets) = chart_layout(inner);
                frame.render_widget(ConvergenceChart { plot, x_bounds, y_bounds }, chart_rect);
                if let Some(insets) = insets {
                    let axes = AxisLabels {
                        x: "Number of trials",
                        y: "a",
                        fmt_x: |v| format!("{:.0}", v.round()),
                    };
                    draw_axis_ticks(frame, inner, chart_rect, insets, x_bounds, y_bounds, &axes);
                }
            }
        }
    }
}

fn closes_view(code: KeyCode) -> bool {
    matches!(code, KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter)
}

fn draw_footer(frame: &mut ratatui::Frame<'_>, area: Rect) {
    let line = Line::from(Span::styled(
        "q / Esc / Enter  close plot and return to the menu",
        Style::default().fg(Color::Gray),
    ));
    let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(p, area);
}

/// X bounds from `x1`, Y bounds from observed and fitted values (padded).
fn fit_bounds(plot: &FitPlot) -> ([f64; 2], [f64; 2]) {
    let (x0, x1) = value_range(plot.x1.iter().copied()).unwrap_or((0.0, 1.0));
    let (y0, y1) = value_range(plot.observed.iter().chain(plot.fitted.iter()).copied())
        .unwrap_or((0.0, 1.0));
    let (y0, y1) = pad_range(y0, y1, 0.05);
    ([x0, x1], [y0, y1])
}

struct AxisLabels {
    x: &'static str,
    y: &'static str,
    fmt_x: fn(f64) -> String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 8,
        right: 2,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10
        || inner.height <= insets.top + insets.bottom + 5
    {
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

fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    axes: &AxisLabels,
) {
    const TICKS: u16 = 5;
    let tick_row = chart.y + chart.height;
    let bottom = inner.y + inner.height;

    for i in 0..TICKS {
        let u = f64::from(i) / f64::from(TICKS - 1);

        if tick_row + 1 < bottom {
            let text = (axes.fmt_x)(lerp(x_bounds, u));
            let col = chart.x + (f64::from(chart.width - 1) * u).round() as u16;
            let half = text.len() as u16 / 2;
            put_label(frame, col.saturating_sub(half), tick_row, text);
        }

        let text = format!("{:.1}", lerp(y_bounds, u));
        let row = chart.y + chart.height - 1 - (f64::from(chart.height - 1) * u).round() as u16;
        let right = inner.x + insets.left.saturating_sub(1);
        if let Some(col) = right.checked_sub(text.len() as u16).filter(|c| *c >= inner.x) {
            put_label(frame, col, row, text);
        }
    }

    if tick_row + 1 < bottom {
        let title = Paragraph::new(axes.x)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(title, Rect::new(chart.x, tick_row + 1, chart.width, 1));
    }

    let y_title = Paragraph::new(axes.y)
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));
    frame.render_widget(y_title, Rect::new(inner.x, inner.y, insets.left.saturating_sub(1), 1));
}

fn lerp(bounds: [f64; 2], u: f64) -> f64 {
    bounds[0] + u * (bounds[1] - bounds[0])
}

fn put_label(frame: &mut ratatui::Frame<'_>, x: u16, y: u16, text: String) {
    let width = text.len() as u16;
    let label = Paragraph::new(text).style(Style::default().fg(Color::Gray));
    frame.render_widget(label, Rect::new(x, y, width, 1));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_layout_reserves_axis_space() {
        let inner = Rect { x: 1, y: 1, width: 80, height: 30 };
        let (rect, insets) = chart_layout(inner);
        let insets = insets.unwrap();
        assert_eq!(rect.x, inner.x + insets.left);
        assert_eq!(rect.width, 80 - insets.left - insets.right);
        assert_eq!(rect.height, 30 - insets.top - insets.bottom);
    }

    #[test]
    fn chart_layout_falls_back_when_cramped() {
        let inner = Rect { x: 0, y: 0, width: 15, height: 6 };
        assert_eq!(chart_layout(inner), (inner, None));
    }

    #[test]
    fn close_keys() {
        assert!(closes_view(KeyCode::Char('q')));
        assert!(closes_view(KeyCode::Esc));
        assert!(closes_view(KeyCode::Enter));
        assert!(!closes_view(KeyCode::Char('x')));
    }
}

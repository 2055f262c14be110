//! Plotters-powered chart widgets for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using
//! `plotters-ratatui-backend`. Each widget is render-only: series and bounds
//! are computed outside the render call.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color as TuiColor, Style},
    widgets::Widget,
};

use crate::plot::{ConvergencePlot, FitPlot};

// High-contrast palette for terminal readability.
const DATA_COLOR: RGBColor = RGBColor(255, 0, 0); // red
const FIT_COLOR: RGBColor = RGBColor(0, 255, 255); // cyan
const REFERENCE_COLOR: RGBColor = RGBColor(160, 160, 160); // gray

/// Chart areas smaller than this get a hint instead of a chart.
fn too_small(area: Rect, buf: &mut Buffer) -> bool {
    if area.width < 20 || area.height < 8 {
        buf.set_string(
            area.x,
            area.y,
            "Chart area too small (resize terminal).",
            Style::default().fg(TuiColor::Yellow),
        );
        return true;
    }
    false
}

fn valid_bounds(x: [f64; 2], y: [f64; 2]) -> bool {
    x.iter().chain(y.iter()).all(|v| v.is_finite()) && x[1] > x[0] && y[1] > y[0]
}

/// Scatter of observations and the fitted line against `x1`.
pub struct FitChart2d<'a> {
    pub plot: &'a FitPlot,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

impl Widget for FitChart2d<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if too_small(area, buf) || !valid_bounds(self.x_bounds, self.y_bounds) {
            return;
        }
        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;
        let plot = self.plot;

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc("Pixel axis 1 (x1)")
                .y_desc("Pixel intensity (y)")
                .x_labels(5)
                .y_labels(5)
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(WHITE)
                .draw()?;

            chart.draw_series(
                plot.x1
                    .iter()
                    .zip(plot.observed.iter())
                    .map(|(&x, &y)| Pixel::new((x, y), DATA_COLOR)),
            )?;
            chart.draw_series(LineSeries::new(
                plot.x1.iter().copied().zip(plot.fitted.iter().copied()),
                &FIT_COLOR,
            ))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

/// Observations and the fitted line in `(x1, y, x2)` space.
///
/// Plotters' 3D coordinates put the second axis vertical, so `y` (intensity)
/// goes there and `x2` becomes depth.
pub struct FitChart3d<'a> {
    pub plot: &'a FitPlot,
    pub x1_bounds: [f64; 2],
    pub x2_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

impl Widget for FitChart3d<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if too_small(area, buf) || !valid_bounds(self.x1_bounds, self.y_bounds) {
            return;
        }
        let [a0, a1] = self.x1_bounds;
        let [b0, b1] = self.x2_bounds;
        let [y0, y1] = self.y_bounds;
        if !(b0.is_finite() && b1.is_finite() && b1 > b0) {
            return;
        }
        let plot = self.plot;

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .build_cartesian_3d(a0..a1, y0..y1, b0..b1)?;

            chart.with_projection(|mut pb| {
                pb.yaw = 0.6;
                pb.pitch = 0.35;
                pb.scale = 0.8;
                pb.into_matrix()
            });

            chart
                .configure_axes()
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .draw()?;

            chart.draw_series(
                plot.x1
                    .iter()
                    .zip(plot.observed.iter())
                    .zip(plot.x2.iter())
                    .map(|((&x1, &y), &x2)| Pixel::new((x1, y, x2), DATA_COLOR)),
            )?;
            chart.draw_series(LineSeries::new(
                plot.x1
                    .iter()
                    .zip(plot.fitted.iter())
                    .zip(plot.x2.iter())
                    .map(|((&x1, &y), &x2)| (x1, y, x2)),
                &FIT_COLOR,
            ))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

/// Sweep estimates with error bars and a horizontal reference at the true value.
pub struct ConvergenceChart<'a> {
    pub plot: &'a ConvergencePlot,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

impl Widget for ConvergenceChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if too_small(area, buf) || !valid_bounds(self.x_bounds, self.y_bounds) {
            return;
        }
        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;
        let plot = self.plot;

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            // Trial counts are integers; keep tick labels that way.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc("Number of trials")
                .y_desc("Best fit of the parameter a")
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| format!("{:.0}", v.round()))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(WHITE)
                .draw()?;

            chart.draw_series(LineSeries::new(
                [(x0, plot.truth), (x1, plot.truth)],
                &REFERENCE_COLOR,
            ))?;

            chart.draw_series(plot.points.iter().map(|p| {
                ErrorBar::new_vertical(
                    p.trials as f64,
                    p.mean - p.std_error,
                    p.mean,
                    p.mean + p.std_error,
                    DATA_COLOR.filled(),
                    2,
                )
            }))?;
            chart.draw_series(
                plot.points
                    .iter()
                    .map(|p| Pixel::new((p.trials as f64, p.mean), DATA_COLOR)),
            )?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

//! ASCII plotting for non-interactive terminals.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks when no full-screen view is available
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - observed points / estimates: `o`
//! - fitted curve: `*` line
//! - error bars: `|`
//! - reference value: `-` line

use super::{ConvergencePlot, FitPlot, PlotView, pad_range, value_range};

/// Render any view as text.
pub fn render_ascii(view: &PlotView, width: usize, height: usize) -> String {
    let mut out = format!("== {} ==\n", view.title());
    match view {
        PlotView::Fit2d(plot) => {
            out.push_str(&render_xy(&plot.x1, &plot.observed, &plot.fitted, "x1", width, height));
            out.push_str(&format!("{}\n", plot.caption()));
        }
        PlotView::Fit3d(plot) => out.push_str(&render_fit_panels(plot, width, height)),
        PlotView::Convergence(plot) => out.push_str(&render_convergence(plot, width, height)),
    }
    out
}

/// A 3D fit as two side projections: `y` against `x1` and against `x2`.
pub fn render_fit_panels(plot: &FitPlot, width: usize, height: usize) -> String {
    let mut out = String::new();
    out.push_str(&render_xy(&plot.x1, &plot.observed, &plot.fitted, "x1", width, height));
    out.push_str(&render_xy(&plot.x2, &plot.observed, &plot.fitted, "x2", width, height));
    out.push_str(&format!("{}\n", plot.caption()));
    out
}

/// Scatter of `observed` with the `fitted` line, both against `xs`.
pub fn render_xy(
    xs: &[f64],
    observed: &[f64],
    fitted: &[f64],
    x_label: &str,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = value_range(xs.iter().copied()).unwrap_or((0.0, 1.0));
    let (y_min, y_max) =
        value_range(observed.iter().chain(fitted.iter()).copied()).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Draw the fit first so points overlay it.
    let curve: Vec<(f64, f64)> = xs.iter().copied().zip(fitted.iter().copied()).collect();
    let mut prev = None;
    for &(x, y) in &curve {
        let cx = map_x(x, x_min, x_max, width);
        let cy = map_y(y, y_min, y_max, height);
        match prev {
            Some((x0, y0)) => draw_line(&mut grid, x0, y0, cx, cy, '*'),
            None => grid[cy][cx] = '*',
        }
        prev = Some((cx, cy));
    }

    for (&x, &y) in xs.iter().zip(observed) {
        if !y.is_finite() {
            continue;
        }
        grid[map_y(y, y_min, y_max, height)][map_x(x, x_min, x_max, width)] = 'o';
    }

    let mut out = format!(
        "Plot: {x_label}=[{x_min:.3}, {x_max:.3}] | y=[{y_min:.2}, {y_max:.2}]\n"
    );
    push_grid(&mut out, grid);
    out
}

/// Estimates with `±1 se` bars against trial count, and the true value as a line.
pub fn render_convergence(plot: &ConvergencePlot, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) =
        value_range(plot.points.iter().map(|p| p.trials as f64)).unwrap_or((0.0, 1.0));
    let ys = plot
        .points
        .iter()
        .flat_map(|p| [p.mean - p.std_error, p.mean + p.std_error])
        .chain(std::iter::once(plot.truth));
    let (y_min, y_max) = value_range(ys).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    let truth_row = map_y(plot.truth, y_min, y_max, height);
    for cell in grid[truth_row].iter_mut() {
        *cell = '-';
    }

    for p in &plot.points {
        let x = map_x(p.trials as f64, x_min, x_max, width);
        let top = map_y(p.mean + p.std_error, y_min, y_max, height);
        let bottom = map_y(p.mean - p.std_error, y_min, y_max, height);
        for row in grid.iter_mut().take(bottom + 1).skip(top) {
            row[x] = '|';
        }
    }
    for p in &plot.points {
        let x = map_x(p.trials as f64, x_min, x_max, width);
        grid[map_y(p.mean, y_min, y_max, height)][x] = 'o';
    }

    let mut out = format!(
        "Plot: trials=[{x_min:.0}, {x_max:.0}] | a=[{y_min:.2}, {y_max:.2}]\n"
    );
    push_grid(&mut out, grid);
    out
}

fn push_grid(out: &mut String, grid: Vec<Vec<char>>) {
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish). Only fills empty cells.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::McEstimate;

    #[test]
    fn xy_golden_snapshot_small() {
        let txt = render_xy(&[0.0, 4.0], &[0.0, 10.0], &[0.0, 10.0], "x1", 10, 5);
        let expected = concat!(
            "Plot: x1=[0.000, 4.000] | y=[-0.50, 10.50]\n",
            "        *o\n",
            "      **  \n",
            "    **    \n",
            "  **      \n",
            "o*        \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn convergence_golden_snapshot_small() {
        let plot = ConvergencePlot {
            points: vec![
                McEstimate { trials: 2, mean: 2.0, std_error: 1.0 },
                McEstimate { trials: 10, mean: 1.0, std_error: 0.0 },
            ],
            truth: 1.0,
        };
        let txt = render_convergence(&plot, 10, 5);
        let expected = concat!(
            "Plot: trials=[2, 10] | a=[0.90, 3.10]\n",
            "|         \n",
            "|         \n",
            "o         \n",
            "|         \n",
            "|--------o\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn fit_views_render_deterministically() {
        let plot = FitPlot {
            x1: vec![0.0, 1.0, 2.0],
            x2: vec![0.0, 1.0, 2.0],
            observed: vec![1.0, 0.0, -9.0],
            fitted: vec![1.0, 0.0, -9.0],
            params: vec![("a", 1.0, 0.0), ("b", 3.0, 0.0), ("c", -4.0, 0.0)],
        };
        let a = render_ascii(&PlotView::Fit3d(plot.clone()), 20, 6);
        let b = render_ascii(&PlotView::Fit3d(plot), 20, 6);
        assert_eq!(a, b);
        assert!(a.starts_with("== Fit (3D)"));
        assert!(a.contains("Plot: x1="));
        assert!(a.contains("Plot: x2="));
        assert!(a.trim_end().ends_with("c = -4.0000 ± 0.0000"));
    }
}

//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual comparison of counties in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - county lines: `.`
//! - reference key: `#` (drawn last, over county lines)

use crate::error::AppError;
use crate::plot::{ChartLabels, ChartRenderer, LineStyle, bounds};

/// Terminal chart that collects lines and prints them on `present`.
#[derive(Debug, Clone)]
pub struct AsciiChart {
    width: usize,
    height: usize,
    lines: Vec<(Vec<(f64, f64)>, LineStyle)>,
}

impl AsciiChart {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width.max(10),
            height: height.max(5),
            lines: Vec::new(),
        }
    }

    /// Render the chart as text.
    pub fn render(&self, labels: &ChartLabels) -> String {
        let mut out = String::new();
        out.push_str(&labels.title);
        out.push('\n');

        let Some(((x_min, x_max), (y_min, y_max))) = bounds(&self.lines) else {
            out.push_str("(no data to plot)\n");
            return out;
        };

        let mut grid = vec![vec![' '; self.width]; self.height];

        // County lines first so the key stays visible on top.
        for style in [LineStyle::County, LineStyle::Reference] {
            for (points, _) in self.lines.iter().filter(|(_, s)| *s == style) {
                draw_series(&mut grid, points, style, (x_min, x_max), (y_min, y_max));
            }
        }

        out.push_str(&format!(
            "Plot: age=[{x_min:.0}, {x_max:.0}] | normalized=[{y_min:.2}, {y_max:.2}]\n"
        ));
        for row in grid {
            out.push_str(&row.into_iter().collect::<String>());
            out.push('\n');
        }
        out.push_str(&format!("x: {}\n", labels.x_label));
        out.push_str(&format!("y: {}\n", labels.y_label));
        out
    }
}

impl ChartRenderer for AsciiChart {
    fn draw_line(&mut self, points: &[(f64, f64)], style: LineStyle) {
        self.lines.push((points.to_vec(), style));
    }

    fn present(&mut self, labels: &ChartLabels) -> Result<(), AppError> {
        println!("{}", self.render(labels));
        Ok(())
    }
}

fn glyph(style: LineStyle) -> char {
    match style {
        LineStyle::County => '.',
        LineStyle::Reference => '#',
    }
}

fn draw_series(
    grid: &mut [Vec<char>],
    points: &[(f64, f64)],
    style: LineStyle,
    x_range: (f64, f64),
    y_range: (f64, f64),
) {
    let height = grid.len();
    let width = grid[0].len();
    let ch = glyph(style);
    let overwrite = style == LineStyle::Reference;

    let mut prev = None;
    for &(x, y) in points {
        if !(x.is_finite() && y.is_finite()) {
            continue;
        }
        let col = map_x(x, x_range.0, x_range.1, width);
        let row = map_y(y, y_range.0, y_range.1, height);
        match prev {
            Some((c0, r0)) => draw_line(grid, c0, r0, col, row, ch, overwrite),
            None => draw_line(grid, col, row, col, row, ch, overwrite),
        }
        prev = Some((col, row));
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

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char, overwrite: bool) {
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
        if y0 >= 0 && (y0 as usize) < grid.len() && x0 >= 0 && (x0 as usize) < grid[0].len() {
            let cell = &mut grid[y0 as usize][x0 as usize];
            if overwrite || *cell == ' ' {
                *cell = ch;
            }
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

//! Chart rendering.
//!
//! The pipeline only talks to the `ChartRenderer` trait: it hands over one
//! line per call (points sorted by age) and finally asks the renderer to
//! present the result with caller-built labels.
//!
//! - terminal ASCII chart (`ascii`)
//! - SVG file via Plotters (`svg`)

pub mod ascii;
pub mod svg;

pub use ascii::AsciiChart;
pub use svg::SvgChart;

use crate::error::AppError;

/// Visual role of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    /// One county's normalized turnout.
    County,
    /// The cross-county reference key.
    Reference,
}

/// Title and axis descriptions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartLabels {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

pub trait ChartRenderer {
    /// Add one line. `points` are `(age, value)` sorted ascending by age.
    fn draw_line(&mut self, points: &[(f64, f64)], style: LineStyle);

    /// Label and emit everything drawn so far.
    fn present(&mut self, labels: &ChartLabels) -> Result<(), AppError>;
}

/// Fans out every call to a list of renderers.
#[derive(Default)]
pub struct ChartSet {
    renderers: Vec<Box<dyn ChartRenderer>>,
}

impl ChartSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, renderer: Box<dyn ChartRenderer>) {
        self.renderers.push(renderer);
    }
}

impl ChartRenderer for ChartSet {
    fn draw_line(&mut self, points: &[(f64, f64)], style: LineStyle) {
        for r in &mut self.renderers {
            r.draw_line(points, style);
        }
    }

    fn present(&mut self, labels: &ChartLabels) -> Result<(), AppError> {
        for r in &mut self.renderers {
            r.present(labels)?;
        }
        Ok(())
    }
}

/// Axis bounds `((x_min, x_max), (y_min, y_max))` over all lines, or `None` if empty.
///
/// The y-range is padded by 5% so lines don't sit on the frame.
pub(crate) fn bounds(lines: &[(Vec<(f64, f64)>, LineStyle)]) -> Option<((f64, f64), (f64, f64))> {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;

    for (points, _) in lines {
        for &(x, y) in points {
            if !(x.is_finite() && y.is_finite()) {
                continue;
            }
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
    }

    if !(x_min.is_finite() && x_max.is_finite() && y_min.is_finite() && y_max.is_finite()) {
        return None;
    }
    if x_max <= x_min {
        x_min -= 1.0;
        x_max += 1.0;
    }
    if y_max <= y_min {
        y_min -= 0.5;
        y_max += 0.5;
    }
    Some(((x_min, x_max), pad_range(y_min, y_max, 0.05)))
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Counting(Rc<RefCell<Vec<LineStyle>>>);

    impl ChartRenderer for Counting {
        fn draw_line(&mut self, _points: &[(f64, f64)], style: LineStyle) {
            self.0.borrow_mut().push(style);
        }

        fn present(&mut self, _labels: &ChartLabels) -> Result<(), AppError> {
            Ok(())
        }
    }

    #[test]
    fn chart_set_fans_out() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut set = ChartSet::new();
        set.push(Box::new(Counting(seen.clone())));
        set.push(Box::new(Counting(seen.clone())));

        set.draw_line(&[(18.0, 1.0)], LineStyle::County);
        set.draw_line(&[(18.0, 1.0)], LineStyle::Reference);
        assert_eq!(seen.borrow().len(), 4);
        assert_eq!(seen.borrow()[3], LineStyle::Reference);
    }

    #[test]
    fn bounds_pad_y_only() {
        let lines = vec![(vec![(20.0, 0.5), (30.0, 1.5)], LineStyle::County)];
        let ((x0, x1), (y0, y1)) = bounds(&lines).unwrap();
        assert_eq!((x0, x1), (20.0, 30.0));
        assert!((y0 - 0.45).abs() < 1e-12);
        assert!((y1 - 1.55).abs() < 1e-12);
        assert!(bounds(&[]).is_none());
    }
}

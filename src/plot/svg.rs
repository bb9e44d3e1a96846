//! Plotters-powered SVG chart.
//!
//! County lines use the Palette99 colors at partial opacity; the reference
//! key is a thick black line with point markers.

use std::path::PathBuf;

use plotters::prelude::*;
use tracing::{info, warn};

use crate::error::AppError;
use crate::plot::{ChartLabels, ChartRenderer, LineStyle, bounds};

/// Writes an SVG file on `present`.
#[derive(Debug, Clone)]
pub struct SvgChart {
    path: PathBuf,
    size: (u32, u32),
    lines: Vec<(Vec<(f64, f64)>, LineStyle)>,
}

impl SvgChart {
    pub fn new(path: impl Into<PathBuf>, size: (u32, u32)) -> Self {
        Self {
            path: path.into(),
            size,
            lines: Vec::new(),
        }
    }
}

impl ChartRenderer for SvgChart {
    fn draw_line(&mut self, points: &[(f64, f64)], style: LineStyle) {
        self.lines.push((points.to_vec(), style));
    }

    fn present(&mut self, labels: &ChartLabels) -> Result<(), AppError> {
        let Some(((x0, x1), (y0, y1))) = bounds(&self.lines) else {
            warn!(path = %self.path.display(), "nothing to plot; SVG chart not written");
            return Ok(());
        };

        let root = SVGBackend::new(&self.path, self.size).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&labels.title, ("sans-serif", 18))
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x0..x1, y0..y1)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .x_desc(labels.x_label.as_str())
            .y_desc(labels.y_label.as_str())
            .x_labels(10)
            .y_labels(8)
            .draw()
            .map_err(render_err)?;

        let mut county_idx = 0usize;
        for (points, _) in self.lines.iter().filter(|(_, s)| *s == LineStyle::County) {
            let color = Palette99::pick(county_idx).mix(0.7);
            county_idx += 1;
            chart
                .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(1)))
                .map_err(render_err)?;
        }

        // The key goes last so it sits on top of every county.
        for (points, _) in self.lines.iter().filter(|(_, s)| *s == LineStyle::Reference) {
            chart
                .draw_series(LineSeries::new(points.iter().copied(), BLACK.stroke_width(3)))
                .map_err(render_err)?;
            chart
                .draw_series(points.iter().map(|&p| Circle::new(p, 2, BLACK.filled())))
                .map_err(render_err)?;
        }

        root.present().map_err(render_err)?;
        info!(path = %self.path.display(), "wrote SVG chart");
        Ok(())
    }
}

fn render_err(e: impl std::fmt::Display) -> AppError {
    AppError::render(format!("Failed to render SVG chart: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    #[test]
    fn writes_svg_file() {
        let path = env::temp_dir().join(format!("turnout_chart_{}.svg", std::process::id()));
        let mut chart = SvgChart::new(&path, (640, 480));
        chart.draw_line(&[(20.0, 0.8), (40.0, 1.2)], LineStyle::County);
        chart.draw_line(&[(20.0, 0.9), (40.0, 1.1)], LineStyle::Reference);

        let labels = ChartLabels {
            title: "2020 Voter Turnout vs. Age".to_string(),
            x_label: "Age".to_string(),
            y_label: "Normalized voter turnout".to_string(),
        };
        chart.present(&labels).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("<svg"));
        assert!(text.contains("polyline"));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn empty_chart_writes_nothing() {
        let path = env::temp_dir().join(format!("turnout_empty_{}.svg", std::process::id()));
        let mut chart = SvgChart::new(&path, (640, 480));
        let labels = ChartLabels {
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
        };
        chart.present(&labels).unwrap();
        assert!(!path.exists());
    }
}

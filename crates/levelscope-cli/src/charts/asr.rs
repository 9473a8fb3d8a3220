use super::canvas::Canvas;
use super::frame::{PlotFrame, draw_title};
use super::placeholder::draw_placeholder;
use super::style::ChartStyle;
use super::{ChartOutcome, Drawing, values_by_level};
use levelscope_engine::stats::{self, GaussianKde, Histogram};
use levelscope_types::CleanedTable;

pub const ASR_TITLE: &str = "ASR Distribution (Density Curve per Level)";
const PLACEHOLDER_TITLE: &str = "Adaptive Speed Ratio (Density Plot)";
const KDE_POINTS: usize = 300;
const FALLBACK_BINS: usize = 20;
const FILL_ALPHA: f64 = 0.15;
const FALLBACK_ALPHA: f64 = 0.5;

/// One level's density estimate, in data coordinates.
#[derive(Debug, Clone, PartialEq)]
enum Density {
    Curve { xs: Vec<f64>, ys: Vec<f64> },
    Bins(Histogram),
}

impl Density {
    fn estimate(level: &str, values: &[f64]) -> Option<Self> {
        if let Some(kde) = GaussianKde::new(values) {
            let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let xs = stats::linspace(lo, hi, KDE_POINTS);
            let ys = xs.iter().map(|x| kde.evaluate(*x)).collect();
            return Some(Density::Curve { xs, ys });
        }
        log::warn!(
            "level {}: density estimate impossible for {} value(s); using histogram",
            level,
            values.len()
        );
        Histogram::new(values, FALLBACK_BINS).map(Density::Bins)
    }

    fn x_extent(&self) -> (f64, f64) {
        let edges = match self {
            Density::Curve { xs, .. } => xs,
            Density::Bins(hist) => &hist.edges,
        };
        match (edges.first(), edges.last()) {
            (Some(lo), Some(hi)) => (*lo, *hi),
            _ => (0.0, 1.0),
        }
    }

    fn peak(&self) -> f64 {
        let heights = match self {
            Density::Curve { ys, .. } => ys.clone(),
            Density::Bins(hist) => hist.densities(),
        };
        heights.into_iter().fold(0.0, f64::max)
    }
}

/// Per-level ASR density curves. Levels whose values cannot support a
/// kernel estimate fall back to a density-normalised histogram.
pub fn draw_asr_density(table: &CleanedTable, style: &ChartStyle) -> Drawing {
    let series: Vec<(String, Density)> = values_by_level(table, |m| m.asr)
        .into_iter()
        .filter_map(|(level, values)| {
            let density = Density::estimate(&level, &values)?;
            Some((level, density))
        })
        .collect();
    if series.is_empty() {
        log::info!("no ASR values; writing placeholder");
        return draw_placeholder(style, PLACEHOLDER_TITLE);
    }

    let (x_lo, x_hi) = series
        .iter()
        .map(|(_, d)| d.x_extent())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (a, b)| {
            (lo.min(a), hi.max(b))
        });
    let peak = series.iter().map(|(_, d)| d.peak()).fold(0.0, f64::max);
    let y_max = if peak > 0.0 { peak * 1.1 } else { 1.0 };

    let p = &style.palette;
    let mut canvas = Canvas::new(style.width, style.height, p.background);
    let frame = PlotFrame::new(style, (x_lo, x_hi), (0.0, y_max));
    draw_title(&mut canvas, style, ASR_TITLE);
    frame.draw_y_axis(&mut canvas, style, "Density");

    let mut fell_back = false;
    let mut legend = Vec::with_capacity(series.len());
    for (i, (level, density)) in series.iter().enumerate() {
        let color = p.series(i);
        match density {
            Density::Curve { xs, ys } => {
                fill_under_curve(&mut canvas, &frame, xs, ys, color);
                for k in 1..xs.len() {
                    canvas.line(
                        frame.x_px(xs[k - 1]),
                        frame.y_px(ys[k - 1]),
                        frame.x_px(xs[k]),
                        frame.y_px(ys[k]),
                        color,
                        2,
                    );
                }
            }
            Density::Bins(hist) => {
                fell_back = true;
                for (j, height) in hist.densities().iter().enumerate() {
                    if *height <= 0.0 {
                        continue;
                    }
                    canvas.blend_rect(
                        frame.x_px(hist.edges[j]),
                        frame.y_px(*height),
                        frame.x_px(hist.edges[j + 1]),
                        frame.bottom,
                        color,
                        FALLBACK_ALPHA,
                    );
                }
            }
        }
        legend.push((format!("Level {}", level), color));
    }

    frame.draw_x_axis(&mut canvas, style, "ASR");
    frame.draw_legend(&mut canvas, style, &legend);

    Drawing {
        image: canvas.into_image(),
        outcome: if fell_back {
            ChartOutcome::Fallback
        } else {
            ChartOutcome::Rendered
        },
    }
}

/// Shade the area between a sampled curve and zero, one pixel column at a
/// time so neighbouring segments never double-blend.
fn fill_under_curve(
    canvas: &mut Canvas,
    frame: &PlotFrame,
    xs: &[f64],
    ys: &[f64],
    color: image::Rgb<u8>,
) {
    let (Some(first), Some(last)) = (xs.first(), xs.last()) else {
        return;
    };
    for px in frame.x_px(*first)..=frame.x_px(*last) {
        let x = frame.x_value(px);
        let idx = xs.partition_point(|v| *v < x).clamp(1, xs.len() - 1);
        let (x0, x1, y0, y1) = (xs[idx - 1], xs[idx], ys[idx - 1], ys[idx]);
        let y = if x1 > x0 {
            y0 + (y1 - y0) * ((x - x0) / (x1 - x0)).clamp(0.0, 1.0)
        } else {
            y0
        };
        canvas.blend_rect(px, frame.y_px(y), px + 1, frame.bottom, color, FILL_ALPHA);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::test_support::{has_color, record, table};
    use levelscope_types::{CleanedRecord, DerivedMetrics};

    fn asr(level: &str, value: Option<f64>) -> CleanedRecord {
        record(
            level,
            DerivedMetrics {
                asr: value,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_all_null_asr_is_placeholder() {
        let style = ChartStyle::default();
        let drawing = draw_asr_density(&table(vec![asr("1", None), asr("2", None)]), &style);
        assert_eq!(drawing.outcome, ChartOutcome::Placeholder);
        assert!(has_color(&drawing.image, style.palette.red));
    }

    #[test]
    fn test_kde_levels_render_in_series_colors() {
        let style = ChartStyle::default();
        let t = table(vec![
            asr("A", Some(0.5)),
            asr("A", Some(1.0)),
            asr("A", Some(1.5)),
            asr("B", Some(1.0)),
            asr("B", Some(2.0)),
        ]);
        let drawing = draw_asr_density(&t, &style);
        assert_eq!(drawing.outcome, ChartOutcome::Rendered);
        assert!(has_color(&drawing.image, style.palette.series(0)));
        assert!(has_color(&drawing.image, style.palette.series(1)));
    }

    #[test]
    fn test_single_value_level_falls_back_to_histogram() {
        let style = ChartStyle::default();
        let t = table(vec![
            asr("A", Some(0.5)),
            asr("A", Some(1.5)),
            asr("B", Some(1.0)),
        ]);
        let drawing = draw_asr_density(&t, &style);
        assert_eq!(drawing.outcome, ChartOutcome::Fallback);
    }

    #[test]
    fn test_zero_variance_level_falls_back() {
        let density = Density::estimate("A", &[2.0, 2.0, 2.0]).unwrap();
        assert!(matches!(density, Density::Bins(_)));
        assert_eq!(density.x_extent(), (1.5, 2.5));
    }
}

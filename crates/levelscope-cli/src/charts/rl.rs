use super::canvas::{Canvas, DASH_DOT, DASHED};
use super::frame::{PlotFrame, draw_title};
use super::placeholder::draw_placeholder;
use super::style::ChartStyle;
use super::{ChartOutcome, Drawing};
use levelscope_engine::stats::{self, Histogram};
use levelscope_types::CleanedTable;

pub const RL_TITLE: &str = "Distribution of Reaction Latency";
const PLACEHOLDER_TITLE: &str = "Reaction Latency (Histogram)";
const BINS: usize = 20;
const BAR_ALPHA: f64 = 0.7;

/// 20-bin histogram of clamped reaction latency with mean and median
/// markers.
pub fn draw_rl_histogram(table: &CleanedTable, style: &ChartStyle) -> Drawing {
    let values: Vec<f64> = table.iter().filter_map(|r| r.metrics.rl_s_clamped).collect();
    let (Some(hist), Some(mean), Some(median)) = (
        Histogram::new(&values, BINS),
        stats::mean(&values),
        stats::median(&values),
    ) else {
        log::info!("no reaction latency values; writing placeholder");
        return draw_placeholder(style, PLACEHOLDER_TITLE);
    };

    let p = &style.palette;
    let mut canvas = Canvas::new(style.width, style.height, p.background);
    let peak = hist.counts.iter().copied().max().unwrap_or(0) as f64;
    let x_range = (hist.edges[0], hist.edges[hist.edges.len() - 1]);
    let frame = PlotFrame::new(style, x_range, (0.0, (peak * 1.1).max(1.0)));

    draw_title(&mut canvas, style, RL_TITLE);
    frame.draw_y_axis(&mut canvas, style, "Count");

    for (i, count) in hist.counts.iter().enumerate() {
        if *count == 0 {
            continue;
        }
        let x0 = frame.x_px(hist.edges[i]);
        let x1 = frame.x_px(hist.edges[i + 1]);
        let top = frame.y_px(*count as f64);
        canvas.blend_rect(x0, top, x1, frame.bottom, p.blue, BAR_ALPHA);
        canvas.stroke_rect(x0, top, x1 + 1, frame.bottom + 1, image::Rgb([0, 0, 0]));
    }

    let mean_x = frame.x_px(mean);
    canvas.patterned_line(mean_x, frame.top, mean_x, frame.bottom, p.red, 2, DASHED);
    let median_x = frame.x_px(median);
    canvas.patterned_line(median_x, frame.top, median_x, frame.bottom, p.green, 2, DASH_DOT);

    frame.draw_x_axis(&mut canvas, style, "Reaction Latency (s)");
    frame.draw_legend(
        &mut canvas,
        style,
        &[
            (format!("Mean = {:.2}s", mean), p.red),
            (format!("Median = {:.2}s", median), p.green),
        ],
    );

    Drawing {
        image: canvas.into_image(),
        outcome: ChartOutcome::Rendered,
    }
}

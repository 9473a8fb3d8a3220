use super::bars::{Bar, BarChart};
use super::placeholder::draw_placeholder;
use super::style::ChartStyle;
use super::{ChartOutcome, Drawing};
use levelscope_engine::LevelRmi;

pub const RMI_TITLE: &str = "Retry Motivation Index by Level";
const PLACEHOLDER_TITLE: &str = "Retry Motivation Index (Per Level)";

/// RMI percentage per level. A level with no failing sessions (null RMI) is
/// drawn as zero; when no level has an RMI the placeholder is drawn instead.
pub fn draw_rmi_bars(rmi: &[LevelRmi], style: &ChartStyle) -> Drawing {
    if rmi.iter().all(|row| row.rmi_pct.is_none()) {
        log::info!("no RMI values; writing placeholder");
        return draw_placeholder(style, PLACEHOLDER_TITLE);
    }

    let bars: Vec<Bar> = rmi
        .iter()
        .map(|row| {
            let value = row.rmi_pct.unwrap_or(0.0);
            Bar {
                category: row.level_id.clone(),
                value,
                error: None,
                label: format!("{:.1}%", value),
            }
        })
        .collect();

    let top = bars.iter().map(|b| b.value).fold(0.0_f64, f64::max);
    let y_max = (top * 1.15).max(10.0);
    let chart = BarChart {
        title: RMI_TITLE,
        x_label: "Level",
        y_label: "RMI (%)",
        y_range: (0.0, y_max),
        color: style.palette.green,
        label_offset: y_max * 0.02,
    };
    Drawing {
        image: chart.draw(style, &bars).into_image(),
        outcome: ChartOutcome::Rendered,
    }
}

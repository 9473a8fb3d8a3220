use super::bars::{Bar, BarChart};
use super::placeholder::draw_placeholder;
use super::style::ChartStyle;
use super::{ChartOutcome, Drawing};
use levelscope_engine::stats;
use levelscope_types::CleanedTable;
use std::collections::BTreeMap;

pub const DAR_TITLE: &str = "Decision Accuracy by Level";
const PLACEHOLDER_TITLE: &str = "Decision Accuracy Ratio (Per Level)";

/// Mean DAR per level with sample-standard-deviation error bars on a fixed
/// `[0, 1]` axis. Every level in the table gets a slot; a level without any
/// DAR value is an unlabelled zero bar.
pub fn draw_dar_bars(table: &CleanedTable, style: &ChartStyle) -> Drawing {
    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for record in table.iter() {
        let values = groups.entry(record.attempt.level_id.clone()).or_default();
        if let Some(dar) = record.metrics.dar {
            values.push(dar);
        }
    }
    if groups.values().all(Vec::is_empty) {
        log::info!("no DAR values; writing placeholder");
        return draw_placeholder(style, PLACEHOLDER_TITLE);
    }

    let bars: Vec<Bar> = groups
        .into_iter()
        .map(|(level, values)| match stats::mean(&values) {
            Some(mean) => Bar {
                category: level,
                value: mean,
                error: Some(stats::sample_std(&values).unwrap_or(0.0)),
                label: format!("{:.2}", mean),
            },
            None => Bar {
                category: level,
                value: 0.0,
                error: None,
                label: String::new(),
            },
        })
        .collect();

    let chart = BarChart {
        title: DAR_TITLE,
        x_label: "Level",
        y_label: "Decision Accuracy Ratio",
        y_range: (0.0, 1.0),
        color: style.palette.orange,
        label_offset: 0.02,
    };
    Drawing {
        image: chart.draw(style, &bars).into_image(),
        outcome: ChartOutcome::Rendered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::test_support::{has_color, record, table};
    use levelscope_types::DerivedMetrics;

    fn dar(level: &str, value: Option<f64>) -> levelscope_types::CleanedRecord {
        record(
            level,
            DerivedMetrics {
                dar: value,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_all_null_dar_is_placeholder() {
        let style = ChartStyle::default();
        let drawing = draw_dar_bars(&table(vec![dar("1", None)]), &style);
        assert_eq!(drawing.outcome, ChartOutcome::Placeholder);
        assert!(has_color(&drawing.image, style.palette.red));
    }

    #[test]
    fn test_empty_table_is_placeholder() {
        let drawing = draw_dar_bars(&table(vec![]), &ChartStyle::default());
        assert_eq!(drawing.outcome, ChartOutcome::Placeholder);
    }

    #[test]
    fn test_level_without_dar_keeps_its_slot() {
        let style = ChartStyle::default();
        let full = table(vec![dar("1", Some(1.0)), dar("2", None)]);
        let only_first = table(vec![dar("1", Some(1.0))]);

        let drawing = draw_dar_bars(&full, &style);
        assert_eq!(drawing.outcome, ChartOutcome::Rendered);
        // With two slots the level 1 bar is narrower than when it is alone.
        let count = |image: &image::RgbImage| {
            image.pixels().filter(|p| **p == style.palette.orange).count()
        };
        assert!(count(&drawing.image) < count(&draw_dar_bars(&only_first, &style).image));
    }

    #[test]
    fn test_dar_bars_render() {
        let style = ChartStyle::default();
        let t = table(vec![dar("1", Some(0.5)), dar("1", Some(1.0)), dar("2", Some(0.75))]);
        let drawing = draw_dar_bars(&t, &style);
        assert_eq!(drawing.outcome, ChartOutcome::Rendered);
        assert!(has_color(&drawing.image, style.palette.orange));
        assert!(!has_color(&drawing.image, style.palette.red));
    }
}

use super::canvas::Canvas;
use super::frame::draw_title;
use super::style::ChartStyle;
use super::{ChartOutcome, Drawing};

const MESSAGE: &str = "No Data Available";
const MESSAGE_SCALE: u32 = 3;

/// Blank chart carrying only `title` and a red "No Data Available" notice.
pub fn draw_placeholder(style: &ChartStyle, title: &str) -> Drawing {
    let mut canvas = Canvas::new(style.width, style.height, style.palette.background);
    draw_title(&mut canvas, style, title);
    let y = style.height as i64 / 2 - Canvas::line_height(MESSAGE_SCALE) / 2;
    canvas.text_centered(
        style.width as i64 / 2,
        y,
        MESSAGE,
        style.palette.red,
        MESSAGE_SCALE,
    );
    Drawing {
        image: canvas.into_image(),
        outcome: ChartOutcome::Placeholder,
    }
}

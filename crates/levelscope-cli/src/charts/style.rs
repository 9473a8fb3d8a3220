use crate::config::ChartSettings;
use image::Rgb;

const MIN_WIDTH: u32 = 320;
const MIN_HEIGHT: u32 = 240;

/// Okabe-Ito colour-blind safe palette plus neutral chart colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub blue: Rgb<u8>,
    pub orange: Rgb<u8>,
    pub green: Rgb<u8>,
    pub red: Rgb<u8>,
    pub purple: Rgb<u8>,
    pub gray: Rgb<u8>,
    pub yellow: Rgb<u8>,
    pub background: Rgb<u8>,
    pub ink: Rgb<u8>,
    pub grid: Rgb<u8>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            blue: Rgb([0x00, 0x72, 0xB2]),
            orange: Rgb([0xE6, 0x9F, 0x00]),
            green: Rgb([0x00, 0x9E, 0x73]),
            red: Rgb([0xD5, 0x5E, 0x00]),
            purple: Rgb([0xCC, 0x79, 0xA7]),
            gray: Rgb([0x99, 0x99, 0x99]),
            yellow: Rgb([0xF0, 0xE4, 0x42]),
            background: Rgb([0xFF, 0xFF, 0xFF]),
            ink: Rgb([0x22, 0x22, 0x22]),
            grid: Rgb([0xE0, 0xE0, 0xE0]),
        }
    }
}

impl Palette {
    /// Series colour for the `index`-th line or bar group.
    pub fn series(&self, index: usize) -> Rgb<u8> {
        let cycle = [
            self.blue,
            self.orange,
            self.green,
            self.red,
            self.purple,
            self.yellow,
        ];
        cycle[index % cycle.len()]
    }
}

/// Immutable styling shared by every chart in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub palette: Palette,
    /// Pixel scale of body text (tick labels, legends).
    pub text_scale: u32,
    /// Pixel scale of chart titles.
    pub title_scale: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self::from_settings(&ChartSettings::default())
    }
}

impl ChartStyle {
    pub fn from_settings(settings: &ChartSettings) -> Self {
        Self {
            width: settings.width.max(MIN_WIDTH),
            height: settings.height.max(MIN_HEIGHT),
            palette: Palette::default(),
            text_scale: 1,
            title_scale: 2,
        }
    }
}

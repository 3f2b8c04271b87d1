//! Maps a sampled pixel to a canonical facelet color.
//!
//! A near-white test runs first, then the 8-bit hue (0..=179, degrees halved)
//! is matched against closed bands in a fixed order. Inputs matching no band
//! get the configured fallback color.

use serde::{Deserialize, Serialize};

use crate::types::{Color, PixelSample};

/// Closed hue interval, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HueBand {
    pub low: u16,
    pub high: u16,
}

impl HueBand {
    pub const fn new(low: u16, high: u16) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, hue: u16) -> bool {
        hue >= self.low && hue <= self.high
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierParams {
    /// Every channel must exceed this for the white test.
    pub white_min: u8,
    /// Every pairwise channel difference must be below this for the white test.
    pub white_max_spread: u8,
    pub red: HueBand,
    pub orange: HueBand,
    pub yellow: HueBand,
    pub green: HueBand,
    pub blue: HueBand,
    /// Returned when no hue band matches.
    pub fallback: Color,
}

impl Default for ClassifierParams {
    fn default() -> Self {
        Self {
            white_min: 200,
            white_max_spread: 30,
            // Hue tops out at 179, so the upper end never matters.
            red: HueBand::new(160, 190),
            orange: HueBand::new(3, 19),
            yellow: HueBand::new(20, 30),
            green: HueBand::new(60, 90),
            blue: HueBand::new(100, 120),
            fallback: Color::White,
        }
    }
}

impl ClassifierParams {
    /// Bands in evaluation order.
    pub fn bands(&self) -> [(HueBand, Color); 5] {
        [
            (self.red, Color::Red),
            (self.orange, Color::Orange),
            (self.yellow, Color::Yellow),
            (self.green, Color::Green),
            (self.blue, Color::Blue),
        ]
    }
}

/// Hue of `sample` on the 8-bit scale (degrees / 2, rounded, wrapped to 0..=179).
/// Gray is 0.
pub fn hue_of(sample: PixelSample) -> u16 {
    let r = sample.r as f32;
    let g = sample.g as f32;
    let b = sample.b as f32;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let diff = max - min;
    if diff == 0.0 {
        return 0;
    }

    let mut deg = if max == r {
        60.0 * (g - b) / diff
    } else if max == g {
        120.0 + 60.0 * (b - r) / diff
    } else {
        240.0 + 60.0 * (r - g) / diff
    };
    if deg < 0.0 {
        deg += 360.0;
    }
    // 359.x degrees rounds to 180, which is the same hue as 0
    ((deg / 2.0).round() as u16) % 180
}

pub fn is_near_white(sample: PixelSample, params: &ClassifierParams) -> bool {
    let PixelSample { r, g, b } = sample;
    let bright = r > params.white_min && g > params.white_min && b > params.white_min;
    let spread = params.white_max_spread;
    bright && r.abs_diff(g) < spread && g.abs_diff(b) < spread && b.abs_diff(r) < spread
}

/// Band lookup only, without the white test.
pub fn color_for_hue(hue: u16, params: &ClassifierParams) -> Color {
    params
        .bands()
        .iter()
        .find(|(band, _)| band.contains(hue))
        .map(|(_, color)| *color)
        .unwrap_or(params.fallback)
}

pub fn classify(sample: PixelSample, params: &ClassifierParams) -> Color {
    if is_near_white(sample, params) {
        return Color::White;
    }
    color_for_hue(hue_of(sample), params)
}

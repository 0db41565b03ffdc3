//! Series and slice colors for the rendering backend.

use plotters::style::RGBColor;

/// An injectable slice/series color cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette(pub &'static [RGBColor]);

/// The dashboard's 8 slice colors, cycling by index.
pub const DASHBOARD8: Palette = Palette(&[
    RGBColor(0x00, 0x88, 0xFE), // blue    (#0088FE)
    RGBColor(0x00, 0xC4, 0x9F), // teal    (#00C49F)
    RGBColor(0xFF, 0xBB, 0x28), // gold    (#FFBB28)
    RGBColor(0xFF, 0x80, 0x42), // orange  (#FF8042)
    RGBColor(0xAF, 0x19, 0xFF), // violet  (#AF19FF)
    RGBColor(0xFF, 0x19, 0xA3), // magenta (#FF19A3)
    RGBColor(0x19, 0xFF, 0xDD), // aqua    (#19FFDD)
    RGBColor(0xFF, 0xA3, 0x19), // amber   (#FFA319)
]);

/// Fill used for single-series marks: bars and the fallback line. (#8884D8)
pub const SERIES_FILL: RGBColor = RGBColor(0x88, 0x84, 0xD8);

impl Palette {
    /// Color of the slice/series at `idx`, cycling past the end.
    #[inline]
    pub fn color(&self, idx: usize) -> RGBColor {
        self.0[idx % self.0.len()]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        DASHBOARD8
    }
}

/// Pixel metrics of a CSS font at its resolved size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    /// Em size in logical pixels.
    pub font_size: f32,
    /// Ascent above baseline (positive).
    pub ascent: f32,
    /// Descent below baseline (positive).
    pub descent: f32,
}

impl FontMetrics {
    /// Ascent plus descent.
    pub fn height(&self) -> f32 {
        self.ascent + self.descent
    }
}

use std::path::Path;

use crate::font::{FontMetrics, FontSpec, MeasureError, Result};

/// Average advance of a glyph relative to the font size.
const AVG_CHAR_EM: f32 = 0.55;
const ASCENT_EM: f32 = 0.8;
const DESCENT_EM: f32 = 0.2;

/// Style inputs that affect measured text extents.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// CSS font shorthand, e.g. `"14px Arial"`.
    pub font: String,
    /// Distance between baselines; `0` uses the font's natural line height.
    pub line_height: f32,
    /// Greedy word wrapping at this width when set.
    pub word_wrap_width: Option<f32>,
}

impl TextStyle {
    pub fn new(font: impl Into<String>, line_height: f32) -> Self {
        Self {
            font: font.into(),
            line_height,
            word_wrap_width: None,
        }
    }

    pub fn with_word_wrap(mut self, width: Option<f32>) -> Self {
        self.word_wrap_width = width;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextMetrics {
    pub width: f32,
    pub height: f32,
}

/// Text measurement supplied by the host renderer.
///
/// The width of a prefix must never decrease as the prefix grows; caret
/// hit-testing relies on it to terminate its scans.
pub trait TextMeasure {
    fn measure_text(&self, text: &str, style: &TextStyle) -> TextMetrics;
    fn measure_font(&self, font: &str) -> FontMetrics;
}

impl<T: TextMeasure + ?Sized> TextMeasure for &T {
    fn measure_text(&self, text: &str, style: &TextStyle) -> TextMetrics {
        (**self).measure_text(text, style)
    }

    fn measure_font(&self, font: &str) -> FontMetrics {
        (**self).measure_font(font)
    }
}

/// Lay `text` out into lines (explicit newlines plus optional word wrap) and
/// return the widest line and the total height.
fn measure_lines(
    text: &str,
    style: &TextStyle,
    natural_line_height: f32,
    advance: impl Fn(char) -> f32,
) -> TextMetrics {
    let line_height = if style.line_height > 0.0 {
        style.line_height
    } else {
        natural_line_height
    };
    let run_width = |s: &str| s.chars().map(&advance).sum::<f32>();

    let mut widest = 0.0f32;
    let mut lines = 0usize;
    for paragraph in text.split('\n') {
        let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);
        match style.word_wrap_width {
            Some(max) if max > 0.0 => {
                let space = advance(' ');
                let mut current = 0.0f32;
                let mut started = false;
                for word in paragraph.split(' ') {
                    let w = run_width(word);
                    if started && current + space + w > max {
                        widest = widest.max(current);
                        lines += 1;
                        current = w;
                    } else if started {
                        current += space + w;
                    } else {
                        current = w;
                        started = true;
                    }
                }
                widest = widest.max(current);
                lines += 1;
            }
            _ => {
                widest = widest.max(run_width(paragraph));
                lines += 1;
            }
        }
    }
    TextMetrics {
        width: widest,
        height: lines as f32 * line_height,
    }
}

/// Deterministic measurer: every character advances by `0.55 · fontSize`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicMeasure;

impl TextMeasure for HeuristicMeasure {
    fn measure_text(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let size = FontSpec::parse_or_default(&style.font).size_px;
        let advance = size * AVG_CHAR_EM;
        measure_lines(text, style, size * (ASCENT_EM + DESCENT_EM), |_| advance)
    }

    fn measure_font(&self, font: &str) -> FontMetrics {
        let size = FontSpec::parse_or_default(font).size_px;
        FontMetrics {
            font_size: size,
            ascent: size * ASCENT_EM,
            descent: size * DESCENT_EM,
        }
    }
}

/// Measurer backed by a single loaded font.
///
/// Uses plain advance widths without kerning so prefix widths stay monotonic.
pub struct FontdueMeasure {
    font: fontdue::Font,
}

impl FontdueMeasure {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(MeasureError::InvalidFont)?;
        Ok(Self { font })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    fn line_metrics(&self, px: f32) -> (f32, f32, f32) {
        match self.font.horizontal_line_metrics(px) {
            // Fontdue reports descent as a negative number.
            Some(lm) => (lm.ascent, lm.descent.abs(), lm.new_line_size),
            None => (px * ASCENT_EM, px * DESCENT_EM, px),
        }
    }
}

impl TextMeasure for FontdueMeasure {
    fn measure_text(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let px = FontSpec::parse_or_default(&style.font).size_px;
        let (_, _, natural) = self.line_metrics(px);
        measure_lines(text, style, natural, |c| {
            self.font.metrics(c, px).advance_width.max(0.0)
        })
    }

    fn measure_font(&self, font: &str) -> FontMetrics {
        let px = FontSpec::parse_or_default(font).size_px;
        let (ascent, descent, _) = self.line_metrics(px);
        FontMetrics {
            font_size: px,
            ascent,
            descent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heuristic_widths() {
        let style = TextStyle::new("20px Arial", 24.0);
        let m = HeuristicMeasure.measure_text("hello", &style);
        assert_eq!(m.width, 55.0);
        assert_eq!(m.height, 24.0);
        assert_eq!(HeuristicMeasure.measure_text("", &style).width, 0.0);
    }

    #[test]
    fn test_heuristic_font_metrics() {
        let m = HeuristicMeasure.measure_font("20px Arial");
        assert_eq!(m.font_size, 20.0);
        assert_eq!(m.height(), 20.0);
    }

    #[test]
    fn test_explicit_lines_and_natural_height() {
        let style = TextStyle::new("10px Arial", 0.0);
        let m = HeuristicMeasure.measure_text("ab\nabcd", &style);
        assert_eq!(m.width, 22.0);
        assert_eq!(m.height, 20.0);
    }

    #[test]
    fn test_word_wrap() {
        // 10px font: 5.5px per char, words of 4 chars are 22px wide.
        let style = TextStyle::new("10px Arial", 12.0).with_word_wrap(Some(50.0));
        let m = HeuristicMeasure.measure_text("aaaa bbbb cccc", &style);
        assert_eq!(m.height, 24.0);
        assert_eq!(m.width, 49.5);
    }

    #[test]
    fn test_prefix_widths_monotonic() {
        let style = TextStyle::new("14px Arial", 20.0);
        let text = "Hello, wörld";
        let mut last = 0.0;
        for (i, _) in text.char_indices().skip(1) {
            let w = HeuristicMeasure.measure_text(&text[..i], &style).width;
            assert!(w >= last);
            last = w;
        }
    }

    #[test]
    fn test_fontdue_rejects_garbage() {
        assert!(matches!(
            FontdueMeasure::from_bytes(b"not a font"),
            Err(MeasureError::InvalidFont(_))
        ));
    }
}

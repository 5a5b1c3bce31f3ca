use crate::measure::{TextMeasure, TextStyle};

/// Lazily measured widths of every character prefix of a string.
///
/// `width(k)` is the rendered width of the first `k` characters; each prefix
/// is measured at most once.
pub struct PrefixWidths<'a> {
    measure: &'a dyn TextMeasure,
    style: &'a TextStyle,
    text: &'a str,
    /// Byte offset where each character prefix ends (`len + 1` entries).
    byte_offsets: Vec<usize>,
    widths: Vec<Option<f32>>,
}

impl<'a> PrefixWidths<'a> {
    pub fn new(measure: &'a dyn TextMeasure, text: &'a str, style: &'a TextStyle) -> Self {
        let byte_offsets: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let widths = vec![None; byte_offsets.len()];
        Self {
            measure,
            style,
            text,
            byte_offsets,
            widths,
        }
    }

    /// Number of characters in the text.
    pub fn len(&self) -> usize {
        self.byte_offsets.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Width of the first `chars` characters (clamped to the text length).
    pub fn width(&mut self, chars: usize) -> f32 {
        let k = chars.min(self.len());
        if let Some(w) = self.widths[k] {
            return w;
        }
        let w = if k == 0 {
            0.0
        } else {
            self.measure
                .measure_text(&self.text[..self.byte_offsets[k]], self.style)
                .width
        };
        self.widths[k] = Some(w);
        w
    }

    /// Width of the whole text.
    pub fn total(&mut self) -> f32 {
        self.width(self.len())
    }
}

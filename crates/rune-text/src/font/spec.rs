/// Font used when a field does not name one.
pub const DEFAULT_FONT: &str = "14px Arial";

const DEFAULT_SIZE_PX: f32 = 14.0;

/// The size and family parts of a CSS `font` shorthand such as
/// `"italic bold 16px/20px Helvetica, sans-serif"`.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub size_px: f32,
    pub family: String,
}

impl FontSpec {
    /// Parse the shorthand; style and weight keywords before the size are skipped.
    pub fn parse(font: &str) -> Option<Self> {
        let mut tokens = font.split_whitespace();
        for token in tokens.by_ref() {
            let size = token.split('/').next().unwrap_or(token);
            if let Some(size_px) = parse_size(size) {
                let family = tokens.collect::<Vec<_>>().join(" ");
                return Some(Self { size_px, family });
            }
        }
        None
    }

    /// Like [`FontSpec::parse`], falling back to a 14px size with a warning.
    pub fn parse_or_default(font: &str) -> Self {
        Self::parse(font).unwrap_or_else(|| {
            log::warn!("cannot read a font size from {font:?}, assuming {DEFAULT_SIZE_PX}px");
            Self {
                size_px: DEFAULT_SIZE_PX,
                family: font.trim().to_string(),
            }
        })
    }
}

fn parse_size(token: &str) -> Option<f32> {
    let (number, scale) = if let Some(n) = token.strip_suffix("px") {
        (n, 1.0)
    } else if let Some(n) = token.strip_suffix("pt") {
        (n, 4.0 / 3.0)
    } else {
        return None;
    };
    let v = number.parse::<f32>().ok()?;
    (v.is_finite() && v > 0.0).then_some(v * scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let spec = FontSpec::parse("14px Arial").unwrap();
        assert_eq!(spec.size_px, 14.0);
        assert_eq!(spec.family, "Arial");
    }

    #[test]
    fn test_parse_with_keywords_and_line_height() {
        let spec = FontSpec::parse("italic bold 16px/20px Helvetica, sans-serif").unwrap();
        assert_eq!(spec.size_px, 16.0);
        assert_eq!(spec.family, "Helvetica, sans-serif");
    }

    #[test]
    fn test_points_convert_to_pixels() {
        assert_eq!(FontSpec::parse("12pt Times").unwrap().size_px, 16.0);
    }

    #[test]
    fn test_missing_size_falls_back() {
        assert!(FontSpec::parse("Arial").is_none());
        assert_eq!(FontSpec::parse_or_default("Arial").size_px, 14.0);
        assert!(FontSpec::parse("0px Arial").is_none());
    }
}

use std::str::FromStr;

use csscolorparser::Color as CssColor;
use palette::Srgba;

/// Non-premultiplied sRGB colour with float channels in `[0, 1]`.
pub type Color = Srgba<f32>;

/// Parse any CSS colour string (`#ccc`, `#rrggbbaa`, `rgba(...)`, named colours).
pub fn parse_color(raw: &str) -> Option<Color> {
    let v = raw.trim();
    if v.is_empty() {
        return None;
    }
    let c = CssColor::from_str(v).ok()?;
    Some(Srgba::new(c.r as f32, c.g as f32, c.b as f32, c.a as f32))
}

/// Colour for solid fills. Canvas keeps its default black for an invalid fill style.
pub fn fill_color(raw: &str) -> Color {
    parse_color(raw).unwrap_or_else(|| {
        log::warn!("invalid fill colour {raw:?}, using black");
        Srgba::new(0.0, 0.0, 0.0, 1.0)
    })
}

/// Colour for shadows. An empty or invalid colour yields a transparent shadow.
pub fn shadow_color(raw: &str) -> Color {
    if raw.trim().is_empty() {
        return Srgba::new(0.0, 0.0, 0.0, 0.0);
    }
    parse_color(raw).unwrap_or_else(|| {
        log::warn!("invalid shadow colour {raw:?}, shadow disabled");
        Srgba::new(0.0, 0.0, 0.0, 0.0)
    })
}

pub(crate) fn to_skia(c: Color) -> tiny_skia::Color {
    let u8c: Srgba<u8> = c.into_format();
    tiny_skia::Color::from_rgba8(u8c.red, u8c.green, u8c.blue, u8c.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba8(c: Color) -> [u8; 4] {
        let u: Srgba<u8> = c.into_format();
        [u.red, u.green, u.blue, u.alpha]
    }

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!(rgba8(parse_color("#ccc").unwrap()), [204, 204, 204, 255]);
        assert_eq!(rgba8(parse_color("#ff0000").unwrap()), [255, 0, 0, 255]);
        assert_eq!(rgba8(parse_color("#0000ff80").unwrap()), [0, 0, 255, 128]);
    }

    #[test]
    fn test_parse_functional_and_named() {
        assert_eq!(rgba8(parse_color("rgba(0, 0, 0, 0.5)").unwrap())[3], 128);
        assert_eq!(rgba8(parse_color("white").unwrap()), [255, 255, 255, 255]);
    }

    #[test]
    fn test_invalid_colors_degrade() {
        assert_eq!(parse_color("nope"), None);
        assert_eq!(rgba8(fill_color("nope")), [0, 0, 0, 255]);
        assert_eq!(rgba8(shadow_color("")), [0, 0, 0, 0]);
        assert_eq!(rgba8(shadow_color("#gggggg")), [0, 0, 0, 0]);
    }
}

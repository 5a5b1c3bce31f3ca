/// Which role a shadow expression plays in the field texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShadowKind {
    /// Drop shadow cast outside the border; needs extra canvas padding.
    Box,
    /// Inset shadow clipped to the background.
    Inner,
}

/// A parsed `"Xpx Ypx Bpx color"` expression.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Shadow {
    pub offset_x: f32,
    pub offset_y: f32,
    pub blur: f32,
    pub color: String,
}

impl Shadow {
    pub fn none() -> Self {
        Self::default()
    }

    /// Parse an optional expression. `None`, `""` and `none` yield the zero shadow,
    /// as does anything malformed (with a warning).
    pub fn parse(expr: Option<&str>) -> Self {
        let Some(raw) = expr.map(str::trim) else {
            return Self::none();
        };
        if raw.is_empty() || raw.eq_ignore_ascii_case("none") {
            return Self::none();
        }
        match parse_parts(raw) {
            Some(s) => s,
            None => {
                log::warn!("malformed shadow expression {raw:?}, ignoring");
                Self::none()
            }
        }
    }

    pub fn is_none(&self) -> bool {
        self.offset_x == 0.0 && self.offset_y == 0.0 && self.blur == 0.0 && self.color.is_empty()
    }

    /// Rebuild the CSS form used when mirroring onto a native control.
    pub fn to_css(&self) -> String {
        format!(
            "{}px {}px {}px {}",
            self.offset_x, self.offset_y, self.blur, self.color
        )
        .trim_end()
        .to_string()
    }

    /// Extra canvas room a drop shadow needs on each side.
    pub fn padding(&self) -> ShadowPadding {
        ShadowPadding {
            left: (self.blur - self.offset_x).max(0.0),
            right: (self.blur + self.offset_x).max(0.0),
            top: (self.blur - self.offset_y).max(0.0),
            bottom: (self.blur + self.offset_y).max(0.0),
        }
    }

    pub fn scaled(&self, s: f32) -> Self {
        Self {
            offset_x: self.offset_x * s,
            offset_y: self.offset_y * s,
            blur: self.blur * s,
            color: self.color.clone(),
        }
    }
}

fn parse_parts(raw: &str) -> Option<Shadow> {
    let mut parts = raw.splitn(4, "px ");
    let offset_x = parse_number(parts.next()?)?;
    let offset_y = parse_number(parts.next()?)?;
    let third = parts.next()?;
    let blur = parse_number(third.trim().strip_suffix("px").unwrap_or(third))?;
    let color = parts.next().unwrap_or("").trim().to_string();
    Some(Shadow {
        offset_x,
        offset_y,
        blur,
        color,
    })
}

fn parse_number(s: &str) -> Option<f32> {
    s.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}

/// Per-side room around the border box reserved for a drop shadow.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ShadowPadding {
    pub top: f32,
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
}

impl ShadowPadding {
    pub fn width(&self) -> f32 {
        self.left + self.right
    }

    pub fn height(&self) -> f32 {
        self.top + self.bottom
    }

    pub fn scaled(&self, s: f32) -> Self {
        Self {
            top: self.top * s,
            left: self.left * s,
            right: self.right * s,
            bottom: self.bottom * s,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedShadow {
    pub shadow: Shadow,
    /// Only present for [`ShadowKind::Box`].
    pub padding: Option<ShadowPadding>,
}

pub fn parse_shadow_expr(expr: Option<&str>, kind: ShadowKind) -> ParsedShadow {
    let shadow = Shadow::parse(expr);
    let padding = match kind {
        ShadowKind::Box => Some(shadow.padding()),
        ShadowKind::Inner => None,
    };
    ParsedShadow { shadow, padding }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_expression() {
        let s = Shadow::parse(Some("1px -2px 4px rgba(0, 0, 0, 0.5)"));
        assert_eq!(s.offset_x, 1.0);
        assert_eq!(s.offset_y, -2.0);
        assert_eq!(s.blur, 4.0);
        assert_eq!(s.color, "rgba(0, 0, 0, 0.5)");
    }

    #[test]
    fn test_absence_markers() {
        for expr in [None, Some(""), Some("none"), Some("NONE"), Some("  ")] {
            let s = Shadow::parse(expr);
            assert_eq!(s, Shadow::none());
            assert_eq!((s.offset_x, s.offset_y, s.blur, s.color.as_str()), (0.0, 0.0, 0.0, ""));
        }
    }

    #[test]
    fn test_malformed_degrades_to_zero() {
        assert!(Shadow::parse(Some("apx 2px 3px red")).is_none());
        assert!(Shadow::parse(Some("1px")).is_none());
        assert!(Shadow::parse(Some("1px 2px")).is_none());
    }

    #[test]
    fn test_missing_color_and_trailing_px() {
        let s = Shadow::parse(Some("0px 0px 3px"));
        assert_eq!(s.blur, 3.0);
        assert_eq!(s.color, "");
    }

    #[test]
    fn test_round_trip_numbers() {
        for (x, y, b) in [(0.0, 0.0, 0.0), (3.0, -4.0, 5.0), (-1.5, 2.25, 8.0), (10.0, 10.0, 0.5)] {
            let css = Shadow {
                offset_x: x,
                offset_y: y,
                blur: b,
                color: "#000".into(),
            }
            .to_css();
            let back = Shadow::parse(Some(&css));
            assert_eq!((back.offset_x, back.offset_y, back.blur), (x, y, b), "{css}");
            assert_eq!(back.color, "#000");
        }
    }

    #[test]
    fn test_padding_non_negative_and_sums() {
        let values = [-12.0, -3.5, 0.0, 1.0, 4.0, 20.0];
        for &x in &values {
            for &y in &values {
                for &b in &[0.0, 2.0, 7.5] {
                    let s = Shadow {
                        offset_x: x,
                        offset_y: y,
                        blur: b,
                        color: String::new(),
                    };
                    let p = s.padding();
                    assert!(p.top >= 0.0 && p.left >= 0.0 && p.right >= 0.0 && p.bottom >= 0.0);
                    assert_eq!(p.width(), p.left + p.right);
                    assert_eq!(p.height(), p.top + p.bottom);
                }
            }
        }
    }

    #[test]
    fn test_padding_values() {
        let p = Shadow::parse(Some("2px 3px 4px #000")).padding();
        assert_eq!((p.left, p.right, p.top, p.bottom), (2.0, 6.0, 1.0, 7.0));
    }

    #[test]
    fn test_inner_shadow_has_no_padding() {
        let parsed = parse_shadow_expr(Some("0px 1px 2px #000"), ShadowKind::Inner);
        assert!(parsed.padding.is_none());
        let parsed = parse_shadow_expr(Some("0px 1px 2px #000"), ShadowKind::Box);
        assert_eq!(parsed.padding.map(|p| p.height()), Some(4.0));
    }
}

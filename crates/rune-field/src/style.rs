use std::cell::OnceCell;

use rune_config::{BorderRadius, StyleConfig};
use rune_raster::{
    BoxLayout, BoxStyle, ParsedShadow, RoundedRadii, ShadowKind, parse_shadow_expr,
};
use rune_text::{TextAlign, TextStyle};

/// Values computed from a [`StyleConfig`] and cached until it changes.
#[derive(Clone, Debug, PartialEq)]
pub struct DerivedStyle {
    pub box_shadow: ParsedShadow,
    pub inner_shadow: ParsedShadow,
    pub box_style: BoxStyle,
    pub layout: BoxLayout,
}

impl DerivedStyle {
    fn compute(raw: &StyleConfig) -> Self {
        let box_shadow = parse_shadow_expr(raw.box_shadow.as_deref(), ShadowKind::Box);
        let inner_shadow = parse_shadow_expr(raw.inner_shadow.as_deref(), ShadowKind::Inner);
        let box_style = BoxStyle {
            width: raw.width,
            height: raw.height.unwrap_or(0.0),
            padding: raw.padding,
            border_width: raw.border_width,
            border_radius: RoundedRadii::from_corners(raw.border_radius.corners()),
            border_color: raw.border_color.clone(),
            background_color: raw.background_color.clone(),
            box_shadow: box_shadow.shadow.clone(),
            inner_shadow: inner_shadow.shadow.clone(),
        };
        let layout = box_style.layout_around(box_shadow.padding.unwrap_or_default());
        Self {
            box_shadow,
            inner_shadow,
            box_style,
            layout,
        }
    }
}

/// A field's style with lazily derived geometry.
///
/// Every mutation goes through [`FieldStyle::update`], which drops the cache.
#[derive(Clone, Debug)]
pub struct FieldStyle {
    raw: StyleConfig,
    derived: OnceCell<DerivedStyle>,
}

impl FieldStyle {
    pub fn new(raw: StyleConfig) -> Self {
        Self {
            raw,
            derived: OnceCell::new(),
        }
    }

    pub fn raw(&self) -> &StyleConfig {
        &self.raw
    }

    pub fn derived(&self) -> &DerivedStyle {
        self.derived.get_or_init(|| DerivedStyle::compute(&self.raw))
    }

    pub fn is_derived(&self) -> bool {
        self.derived.get().is_some()
    }

    /// Mutate the raw style and invalidate everything derived from it.
    pub fn update(&mut self, f: impl FnOnce(&mut StyleConfig)) {
        f(&mut self.raw);
        self.derived = OnceCell::new();
    }

    pub fn layout(&self) -> &BoxLayout {
        &self.derived().layout
    }

    pub fn box_style(&self) -> &BoxStyle {
        &self.derived().box_style
    }

    pub fn width(&self) -> f32 {
        self.layout().width
    }

    pub fn height(&self) -> f32 {
        self.layout().height
    }

    pub fn padding(&self) -> f32 {
        self.layout().padding
    }

    pub fn align(&self) -> TextAlign {
        self.raw.text.align
    }

    pub fn resolution(&self) -> f32 {
        self.raw.resolution
    }

    /// Measurement style of the text primitive.
    pub fn text_style(&self, word_wrap_width: Option<f32>) -> TextStyle {
        TextStyle::new(self.raw.text.font.clone(), self.raw.text.line_height)
            .with_word_wrap(word_wrap_width)
    }
}

/// Per-key overrides of the `text` block.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextOverrides {
    pub font: Option<String>,
    pub fill: Option<String>,
    pub align: Option<TextAlign>,
    pub line_height: Option<f32>,
}

/// Per-key overrides of the style defaults. Unset keys keep the default.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleOverrides {
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub padding: Option<f32>,
    pub border_color: Option<String>,
    pub border_width: Option<f32>,
    pub border_radius: Option<BorderRadius>,
    pub background_color: Option<String>,
    /// `"none"` clears a default shadow.
    pub box_shadow: Option<String>,
    pub inner_shadow: Option<String>,
    pub text: TextOverrides,
    pub resolution: Option<f32>,
}

impl StyleOverrides {
    pub fn apply(&self, base: &StyleConfig) -> StyleConfig {
        let mut out = base.clone();
        if let Some(v) = self.width {
            out.width = v;
        }
        if let Some(v) = self.height {
            out.height = Some(v);
        }
        if let Some(v) = self.padding {
            out.padding = v;
        }
        if let Some(v) = &self.border_color {
            out.border_color = v.clone();
        }
        if let Some(v) = self.border_width {
            out.border_width = v;
        }
        if let Some(v) = self.border_radius {
            out.border_radius = v;
        }
        if let Some(v) = &self.background_color {
            out.background_color = v.clone();
        }
        if let Some(v) = &self.box_shadow {
            out.box_shadow = Some(v.clone());
        }
        if let Some(v) = &self.inner_shadow {
            out.inner_shadow = Some(v.clone());
        }
        if let Some(v) = &self.text.font {
            out.text.font = v.clone();
        }
        if let Some(v) = &self.text.fill {
            out.text.fill = v.clone();
        }
        if let Some(v) = self.text.align {
            out.text.align = v;
        }
        if let Some(v) = self.text.line_height {
            out.text.line_height = v;
        }
        if let Some(v) = self.resolution {
            out.resolution = v;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_layout_from_defaults() {
        let mut raw = StyleConfig::default();
        raw.height = Some(30.0);
        let style = FieldStyle::new(raw);
        let layout = style.layout();
        assert_eq!(layout.outer_width, 202.0);
        assert_eq!(layout.outer_height, 32.0);
        assert_eq!(style.box_style().border_radius, RoundedRadii::uniform(3.0));
    }

    #[test]
    fn test_update_invalidates_derived() {
        let mut style = FieldStyle::new(StyleConfig::default());
        assert_eq!(style.derived().layout.shadow.width(), 0.0);
        assert!(style.is_derived());

        style.update(|raw| raw.box_shadow = Some("2px 0px 3px #000".into()));
        assert!(!style.is_derived());
        let layout = style.layout();
        assert_eq!((layout.shadow.left, layout.shadow.right), (1.0, 5.0));
        assert_eq!(layout.outer_width, 200.0 + 2.0 + 6.0);
        assert_eq!(style.derived().box_shadow.shadow.blur, 3.0);

        style.update(|raw| raw.width = 50.0);
        assert_eq!(style.width(), 50.0);
        assert_eq!(style.layout().outer_width, 50.0 + 2.0 + 6.0);
    }

    #[test]
    fn test_layout_uses_parsed_shadow_padding() {
        let mut raw = StyleConfig::default();
        raw.height = Some(30.0);
        raw.box_shadow = Some("2px 3px 4px #000".into());
        raw.inner_shadow = Some("0px 9px 9px #000".into());
        let style = FieldStyle::new(raw);
        let derived = style.derived();
        assert_eq!(derived.box_shadow.padding, Some(derived.layout.shadow));
        assert_eq!(derived.layout, derived.box_style.layout());
        let shadow = derived.layout.shadow;
        assert_eq!(
            (shadow.left, shadow.right, shadow.top, shadow.bottom),
            (2.0, 6.0, 1.0, 7.0)
        );
        assert_eq!(derived.layout.outer_width, 200.0 + 2.0 + 8.0);
        assert_eq!(derived.layout.outer_height, 30.0 + 2.0 + 8.0);
        // The inset shadow never pads the texture.
        assert!(derived.inner_shadow.padding.is_none());
    }

    #[test]
    fn test_overrides_merge_per_key() {
        let overrides = StyleOverrides {
            width: Some(100.0),
            border_radius: Some(BorderRadius::Corners([5.0, 0.0, 5.0, 0.0])),
            text: TextOverrides {
                align: Some(TextAlign::Right),
                ..TextOverrides::default()
            },
            ..StyleOverrides::default()
        };
        let merged = overrides.apply(&StyleConfig::default());
        assert_eq!(merged.width, 100.0);
        assert_eq!(merged.padding, 2.0);
        assert_eq!(merged.text.align, TextAlign::Right);
        assert_eq!(merged.text.font, "14px Arial");
        assert_eq!(merged.text.fill, "#000");
        assert_eq!(merged.border_radius.corners(), [5.0, 0.0, 5.0, 0.0]);
    }

    #[test]
    fn test_none_clears_shadow() {
        let mut base = StyleConfig::default();
        base.box_shadow = Some("0px 0px 2px #000".into());
        let overrides = StyleOverrides {
            box_shadow: Some("none".into()),
            ..StyleOverrides::default()
        };
        let style = FieldStyle::new(overrides.apply(&base));
        assert_eq!(style.layout().shadow.width(), 0.0);
    }
}

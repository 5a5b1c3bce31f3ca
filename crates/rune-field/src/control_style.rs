//! Presentation mirrored onto the native control so it lines up with the
//! rasterized field underneath.

use rune_config::InputType;
use rune_text::TextAlign;

use crate::options::FieldKind;
use crate::style::FieldStyle;

/// CSS box and text style of the native control.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlStyle {
    /// Border-box width (`width + 2·borderWidth`).
    pub width: f32,
    /// Border-box height (`height + 2·borderWidth`).
    pub height: f32,
    pub padding: f32,
    pub border_color: String,
    pub border_width: f32,
    pub border_radius: String,
    pub background_color: String,
    /// Combined outer and `inset` shadow list.
    pub box_shadow: Option<String>,
    pub font: String,
    pub color: String,
    pub text_align: TextAlign,
    /// Multi-line controls only.
    pub line_height: Option<f32>,
}

impl ControlStyle {
    pub fn from_field(style: &FieldStyle, kind: FieldKind) -> Self {
        let raw = style.raw();
        let layout = style.layout();
        let derived = style.derived();

        let mut shadows = Vec::new();
        if raw.box_shadow.is_some() && !derived.box_shadow.shadow.is_none() {
            shadows.push(derived.box_shadow.shadow.to_css());
        }
        if raw.inner_shadow.is_some() && !derived.inner_shadow.shadow.is_none() {
            shadows.push(format!("{} inset", derived.inner_shadow.shadow.to_css()));
        }

        Self {
            width: layout.width + 2.0 * layout.border_width,
            height: layout.height + 2.0 * layout.border_width,
            padding: layout.padding,
            border_color: raw.border_color.clone(),
            border_width: layout.border_width,
            border_radius: raw.border_radius.to_css(),
            background_color: raw.background_color.clone(),
            box_shadow: (!shadows.is_empty()).then(|| shadows.join(", ")),
            font: raw.text.font.clone(),
            color: raw.text.fill.clone(),
            text_align: raw.text.align,
            line_height: kind.is_multi_line().then_some(raw.text.line_height),
        }
    }

    /// `(property, value)` pairs in CSS syntax.
    pub fn declarations(&self) -> Vec<(&'static str, String)> {
        let mut out = vec![
            ("position", "absolute".to_string()),
            ("box-sizing", "border-box".to_string()),
            ("width", format!("{}px", self.width)),
            ("height", format!("{}px", self.height)),
            ("padding", format!("{}px", self.padding)),
            ("border-style", "solid".to_string()),
            ("border-color", self.border_color.clone()),
            ("border-width", format!("{}px", self.border_width)),
            ("border-radius", self.border_radius.clone()),
            ("background-color", self.background_color.clone()),
            ("box-shadow", self.box_shadow.clone().unwrap_or_else(|| "none".to_string())),
            ("font", self.font.clone()),
            ("color", self.color.clone()),
            ("text-align", self.text_align.to_string()),
        ];
        if let Some(lh) = self.line_height {
            out.push(("line-height", format!("{lh}px")));
        }
        out
    }

    /// Inline `style` attribute text.
    pub fn to_css(&self) -> String {
        self.declarations()
            .iter()
            .map(|(k, v)| format!("{k}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Element attributes written each time the control is shown.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlAttributes {
    /// Single-line controls only.
    pub input_type: Option<InputType>,
    pub value: String,
    pub placeholder: String,
    pub readonly: bool,
    /// Cleared and re-applied for single-line controls.
    pub max_length: Option<usize>,
}

impl ControlAttributes {
    pub fn new(kind: FieldKind, value: &str, placeholder: &str, readonly: bool) -> Self {
        let (input_type, max_length) = match kind {
            FieldKind::SingleLine {
                input_type,
                max_length,
            } => (Some(input_type), max_length.filter(|&n| n > 0)),
            FieldKind::MultiLine => (None, None),
        };
        Self {
            input_type,
            value: value.to_string(),
            placeholder: placeholder.to_string(),
            readonly,
            max_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rune_config::StyleConfig;

    fn field_style(f: impl FnOnce(&mut StyleConfig)) -> FieldStyle {
        let mut raw = StyleConfig::default();
        raw.height = Some(30.0);
        f(&mut raw);
        FieldStyle::new(raw)
    }

    const TEXT: FieldKind = FieldKind::SingleLine {
        input_type: InputType::Text,
        max_length: None,
    };

    #[test]
    fn test_border_box_size() {
        let style = ControlStyle::from_field(&field_style(|_| {}), TEXT);
        assert_eq!((style.width, style.height), (202.0, 32.0));
        assert_eq!(style.border_radius, "3px");
        assert_eq!(style.box_shadow, None);
        assert_eq!(style.line_height, None);
        assert!(style.to_css().contains("box-sizing: border-box;"));
    }

    #[test]
    fn test_combined_shadows() {
        let style = ControlStyle::from_field(
            &field_style(|raw| {
                raw.box_shadow = Some("0px 0px 2px rgba(0, 0, 0, 0.5)".into());
                raw.inner_shadow = Some("0px 1px 4px #000".into());
            }),
            TEXT,
        );
        assert_eq!(
            style.box_shadow.as_deref(),
            Some("0px 0px 2px rgba(0, 0, 0, 0.5), 0px 1px 4px #000 inset")
        );
    }

    #[test]
    fn test_multi_line_gets_line_height() {
        let style = ControlStyle::from_field(&field_style(|_| {}), FieldKind::MultiLine);
        assert_eq!(style.line_height, Some(20.0));
        assert!(
            style
                .declarations()
                .contains(&("line-height", "20px".to_string()))
        );
    }

    #[test]
    fn test_attributes() {
        let kind = FieldKind::SingleLine {
            input_type: InputType::Password,
            max_length: Some(0),
        };
        let attrs = ControlAttributes::new(kind, "abc", "pw", true);
        assert_eq!(attrs.input_type, Some(InputType::Password));
        assert_eq!(attrs.max_length, None);
        assert!(attrs.readonly);

        let attrs = ControlAttributes::new(FieldKind::MultiLine, "", "", false);
        assert_eq!(attrs.input_type, None);
    }
}

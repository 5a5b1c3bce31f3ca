//! rune-input configuration
//!
//! Style and option defaults for text fields, loaded from `rune-input.toml`
//! with environment variable overrides.

use std::path::{Path, PathBuf};

use rune_text::{DEFAULT_FONT, TextAlign};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File read by [`RuneInputConfig::load_or_default`].
pub const CONFIG_FILE: &str = "rune-input.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RuneInputConfig {
    /// Style shared by every field unless overridden
    pub style: StyleConfig,
    /// Single-line field defaults
    pub input: InputConfig,
    /// Multi-line field defaults
    pub textarea: TextareaConfig,
}

/// Box and text style of a field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StyleConfig {
    pub width: f32,
    /// Derived from the font size when unset
    pub height: Option<f32>,
    pub padding: f32,
    pub border_color: String,
    pub border_width: f32,
    pub border_radius: BorderRadius,
    pub background_color: String,
    /// `"Xpx Ypx Bpx color"`
    pub box_shadow: Option<String>,
    /// `"Xpx Ypx Bpx color"`, drawn inset
    pub inner_shadow: Option<String>,
    pub text: TextConfig,
    /// Device pixels per logical pixel for the background texture
    pub resolution: f32,
}

/// Either one radius for every corner or four radii
/// (top-left, top-right, bottom-right, bottom-left).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum BorderRadius {
    Uniform(f32),
    Corners([f32; 4]),
}

impl BorderRadius {
    pub fn corners(&self) -> [f32; 4] {
        match *self {
            BorderRadius::Uniform(r) => [r; 4],
            BorderRadius::Corners(c) => c,
        }
    }

    /// CSS `border-radius` value.
    pub fn to_css(&self) -> String {
        match *self {
            BorderRadius::Uniform(r) => format!("{r}px"),
            BorderRadius::Corners([tl, tr, br, bl]) => format!("{tl}px {tr}px {br}px {bl}px"),
        }
    }
}

impl Default for BorderRadius {
    fn default() -> Self {
        BorderRadius::Uniform(3.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TextConfig {
    /// CSS font shorthand
    pub font: String,
    pub fill: String,
    pub align: TextAlign,
    pub line_height: f32,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    #[default]
    Text,
    Password,
}

/// Single-line field options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    #[serde(rename = "type")]
    pub input_type: InputType,
    pub value: String,
    pub placeholder: String,
    pub placeholder_color: String,
    pub readonly: bool,
    pub max_length: Option<usize>,
}

/// Multi-line field options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TextareaConfig {
    pub value: String,
    pub placeholder: String,
    pub placeholder_color: String,
    pub readonly: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            width: 200.0,
            height: None,
            padding: 2.0,
            border_color: "#ccc".to_string(),
            border_width: 1.0,
            border_radius: BorderRadius::default(),
            background_color: "#fff".to_string(),
            box_shadow: None,
            inner_shadow: None,
            text: TextConfig::default(),
            resolution: 1.0,
        }
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font: DEFAULT_FONT.to_string(),
            fill: "#000".to_string(),
            align: TextAlign::Left,
            line_height: 20.0,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            input_type: InputType::Text,
            value: String::new(),
            placeholder: String::new(),
            placeholder_color: "#999".to_string(),
            readonly: false,
            max_length: None,
        }
    }
}

impl Default for TextareaConfig {
    fn default() -> Self {
        Self {
            value: String::new(),
            placeholder: String::new(),
            placeholder_color: "#999".to_string(),
            readonly: false,
        }
    }
}

fn positive(val: &str) -> Option<f32> {
    val.parse::<f32>().ok().filter(|v| v.is_finite() && *v > 0.0)
}

impl RuneInputConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `rune-input.toml` from the current directory, or the defaults if
    /// it is missing or unreadable
    pub fn load_or_default() -> Self {
        match Self::load_from_file(CONFIG_FILE) {
            Ok(config) => config,
            Err(ConfigError::Read { .. }) => Self::default(),
            Err(err) => {
                log::warn!("{err}; using defaults");
                Self::default()
            }
        }
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    pub fn merge_with_env(&mut self) {
        if let Ok(font) = std::env::var("RUNE_INPUT_FONT") {
            self.style.text.font = font;
        }
        if let Ok(val) = std::env::var("RUNE_INPUT_RESOLUTION") {
            match positive(&val) {
                Some(r) => self.style.resolution = r,
                None => log::warn!("ignoring RUNE_INPUT_RESOLUTION={val:?}"),
            }
        }
        if let Ok(val) = std::env::var("RUNE_INPUT_WIDTH") {
            match positive(&val) {
                Some(w) => self.style.width = w,
                None => log::warn!("ignoring RUNE_INPUT_WIDTH={val:?}"),
            }
        }
        if let Ok(color) = std::env::var("RUNE_INPUT_PLACEHOLDER_COLOR") {
            self.input.placeholder_color = color.clone();
            self.textarea.placeholder_color = color;
        }
        if let Ok(val) = std::env::var("RUNE_INPUT_ALIGN") {
            match val.parse::<TextAlign>() {
                Ok(align) => self.style.text.align = align,
                Err(err) => log::warn!("ignoring RUNE_INPUT_ALIGN: {err}"),
            }
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from rune-input.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RuneInputConfig::default();
        assert_eq!(config.style.width, 200.0);
        assert_eq!(config.style.height, None);
        assert_eq!(config.style.padding, 2.0);
        assert_eq!(config.style.border_color, "#ccc");
        assert_eq!(config.style.border_radius.corners(), [3.0; 4]);
        assert_eq!(config.style.text.font, "14px Arial");
        assert_eq!(config.style.text.align, TextAlign::Left);
        assert_eq!(config.input.input_type, InputType::Text);
        assert_eq!(config.input.placeholder_color, "#999");
        assert_eq!(config.input.max_length, None);
        assert!(!config.textarea.readonly);
    }

    #[test]
    fn test_toml_serialization() {
        let mut config = RuneInputConfig::default();
        config.style.box_shadow = Some("0px 1px 2px #000".into());
        config.input.input_type = InputType::Password;
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: RuneInputConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file() {
        let parsed: RuneInputConfig = toml::from_str(
            r#"
            [style]
            width = 320
            border_radius = [4, 4, 0, 0]

            [style.text]
            align = "center"

            [input]
            type = "password"
            max_length = 8
            "#,
        )
        .unwrap();
        assert_eq!(parsed.style.width, 320.0);
        assert_eq!(parsed.style.border_radius, BorderRadius::Corners([4.0, 4.0, 0.0, 0.0]));
        assert_eq!(parsed.style.text.align, TextAlign::Center);
        assert_eq!(parsed.style.text.fill, "#000");
        assert_eq!(parsed.input.input_type, InputType::Password);
        assert_eq!(parsed.input.max_length, Some(8));
        assert_eq!(parsed.style.padding, 2.0);
    }

    #[test]
    fn test_border_radius_css() {
        assert_eq!(BorderRadius::Uniform(3.0).to_css(), "3px");
        assert_eq!(BorderRadius::Corners([1.0, 2.0, 3.0, 4.0]).to_css(), "1px 2px 3px 4px");
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = RuneInputConfig::load_from_file("does/not/exist.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_or_default() {
        // Should not panic even if rune-input.toml doesn't exist
        let config = RuneInputConfig::load_or_default();
        assert!(config.style.resolution > 0.0);
    }

    #[test]
    fn test_merge_with_env() {
        unsafe {
            std::env::set_var("RUNE_INPUT_FONT", "18px Georgia");
            std::env::set_var("RUNE_INPUT_RESOLUTION", "2");
            std::env::set_var("RUNE_INPUT_WIDTH", "-5");
            std::env::set_var("RUNE_INPUT_PLACEHOLDER_COLOR", "#777");
            std::env::set_var("RUNE_INPUT_ALIGN", "Right");
        }

        let mut config = RuneInputConfig::default();
        config.merge_with_env();

        assert_eq!(config.style.text.font, "18px Georgia");
        assert_eq!(config.style.resolution, 2.0);
        assert_eq!(config.style.width, 200.0);
        assert_eq!(config.input.placeholder_color, "#777");
        assert_eq!(config.textarea.placeholder_color, "#777");
        assert_eq!(config.style.text.align, TextAlign::Right);

        unsafe {
            std::env::remove_var("RUNE_INPUT_FONT");
            std::env::remove_var("RUNE_INPUT_RESOLUTION");
            std::env::remove_var("RUNE_INPUT_WIDTH");
            std::env::remove_var("RUNE_INPUT_PLACEHOLDER_COLOR");
            std::env::remove_var("RUNE_INPUT_ALIGN");
        }
    }
}

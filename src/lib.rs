//! Canvas text inputs with a native editing overlay.
//!
//! Re-exports the workspace crates under one name:
//! - [`raster`]: background texture rasterization
//! - [`text`]: text measurement and caret hit-testing
//! - [`config`]: TOML and environment configuration
//! - [`field`]: fields, the overlay state machine and host traits

pub use rune_config as config;
pub use rune_field as field;
pub use rune_raster as raster;
pub use rune_text as text;

pub use rune_config::RuneInputConfig;
pub use rune_field::{
    EventResult, FieldId, Host, InputOptions, NativeControl, Overlay, OverlayMessage, SceneNode,
    TextareaOptions,
};

//! rune-field: canvas-drawn text fields backed by a shared native control.
//!
//! Each field is rasterized into its scene node (background texture plus a
//! text primitive). Focusing a field hides its node and shows the page-level
//! control of its kind, styled and positioned to sit exactly over it.
//!
//! - `host`: traits the embedding scene graph and page implement
//! - `style`: raw style plus the memoized derived box model
//! - `field`: per-field state with dirty tracking
//! - `overlay`: field registry and the focus/blur state machine
//! - `control_style`: CSS and attributes mirrored onto the control

mod control_style;
mod field;
mod host;
mod message;
mod options;
mod overlay;
mod style;

#[cfg(test)]
mod testing;

pub use control_style::{ControlAttributes, ControlStyle};
pub use field::Field;
pub use host::{
    ControlKind, DisplayText, Host, NativeControl, PointerCursor, SceneNode, ScrollAnchor,
    TextPlacement,
};
pub use message::{EventResult, OverlayMessage, PointerButton};
pub use options::{
    Callbacks, FieldCallback, FieldId, FieldKind, InputCallback, InputOptions, TextareaOptions,
};
pub use overlay::Overlay;
pub use style::{DerivedStyle, FieldStyle, StyleOverrides, TextOverrides};

//! Collaborator interfaces supplied by the embedding scene graph and page.
//!
//! A field never draws or dispatches input itself. It owns a [`SceneNode`]
//! for its rasterized look and borrows the one [`NativeControl`] of its kind
//! while focused.

use rune_raster::{FieldTexture, Point, Rect};
use rune_text::{TextAlign, TextMeasure};

use crate::control_style::{ControlAttributes, ControlStyle};

/// Which shared native control a field binds to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControlKind {
    /// `<input>`-like single-line editor.
    SingleLine,
    /// `<textarea>`-like multi-line editor.
    MultiLine,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerCursor {
    #[default]
    Default,
    Text,
}

/// Horizontal scroll position requested after placing the caret.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollAnchor {
    Start,
    Middle,
    End,
}

impl From<TextAlign> for ScrollAnchor {
    fn from(align: TextAlign) -> Self {
        match align {
            TextAlign::Left => ScrollAnchor::Start,
            TextAlign::Center => ScrollAnchor::Middle,
            TextAlign::Right => ScrollAnchor::End,
        }
    }
}

/// Content and style of the field's text primitive.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisplayText {
    pub text: String,
    /// CSS colour; the placeholder colour while the placeholder is shown.
    pub fill: String,
    pub font: String,
    pub line_height: f32,
    pub align: TextAlign,
    /// Set for multi-line fields.
    pub word_wrap_width: Option<f32>,
    pub is_placeholder: bool,
}

/// Where the text primitive sits, in field-local coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextPlacement {
    pub x: f32,
    pub y: f32,
    /// Horizontal anchor of the text block (0 left, 0.5 center, 1 right).
    pub anchor_x: f32,
    /// Clip rectangle applied to the text.
    pub mask: Rect,
}

/// A retained scene-graph node that displays one field.
///
/// Local coordinates put the origin at the top-left of the field's textbox.
pub trait SceneNode {
    fn position(&self) -> Point;
    fn set_position(&mut self, position: Point);
    fn scale(&self) -> Point;
    fn set_scale(&mut self, scale: Point);
    /// Map a local rectangle through the node's absolute transform into
    /// canvas coordinates.
    fn world_bounds(&self, local: Rect) -> Rect;
    fn set_visible(&mut self, visible: bool);
    fn is_visible(&self) -> bool;
    fn set_interactive(&mut self, interactive: bool, cursor: PointerCursor);
    /// Show `texture` as the background sprite with its top-left at `offset`.
    fn set_background(&mut self, texture: &FieldTexture, offset: Point);
    fn set_text(&mut self, text: &DisplayText, placement: &TextPlacement);
    /// Detach the node from the scene and drop its resources.
    fn release(&mut self);
}

/// A page-level text editing control shared by every field of one kind.
pub trait NativeControl {
    fn apply_style(&mut self, style: &ControlStyle);
    fn set_attributes(&mut self, attributes: &ControlAttributes);
    /// Edits arrive back as [`crate::OverlayMessage::InputChanged`].
    fn set_value(&mut self, value: &str);
    /// Place the control's border box at a page position.
    fn set_position(&mut self, position: Point);
    fn set_visible(&mut self, visible: bool);
    fn focus(&mut self);
    /// Drop input focus. Implementations must not report this back as
    /// [`crate::OverlayMessage::ControlBlurred`].
    fn blur(&mut self);
    /// Select the character range `start..end`.
    fn set_selection(&mut self, start: usize, end: usize);
    fn scroll_to(&mut self, anchor: ScrollAnchor);
}

/// Factory and process-wide services of the embedding environment.
pub trait Host {
    type Node: SceneNode;
    type Control: NativeControl;

    fn create_node(&mut self) -> Self::Node;
    fn create_control(&mut self, kind: ControlKind) -> Self::Control;
    /// Route page-level pointer-down/up and resize events into the overlay.
    /// Called once, when the first control is created.
    fn install_global_handlers(&mut self);
    /// Width of a vertical scrollbar in the multi-line control.
    fn scrollbar_width(&self) -> f32;
    fn text_measure(&self) -> &dyn TextMeasure;
}

//! Inbound events consumed by [`crate::Overlay::handle`].

use rune_raster::{Point, Rect};

use crate::options::FieldId;

/// Result of an event handling operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event changed overlay state; hosts should stop propagation and, for
    /// pointer events, suppress the default action.
    Handled,
    /// Event did not apply, continue propagation
    Ignored,
}

impl EventResult {
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Handled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

/// Everything that can drive the overlay state machine.
///
/// Hosts deliver a field's own pointer-down before the page-level one.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayMessage {
    FocusRequested(FieldId),
    BlurRequested(FieldId),
    /// The native control lost focus through user action.
    ControlBlurred,
    /// The native control's value after user editing.
    InputChanged(String),
    /// The page viewport was resized; `canvas` is the canvas's page rectangle
    /// measured after the resize.
    Resized { canvas: Rect },
    /// Page-level pointer press; `on_control` when it targets the native control.
    PointerDown { on_control: bool },
    /// Page-level pointer release.
    PointerUp,
    /// Pointer pressed on a field's scene node, in field-local coordinates.
    FieldPointerDown {
        field: FieldId,
        local: Point,
        button: PointerButton,
    },
    /// Pointer released on, or outside after pressing on, a field's node.
    FieldPointerUp { field: FieldId },
}

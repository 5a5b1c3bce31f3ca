use hashbrown::HashMap;
use rune_config::{RuneInputConfig, StyleConfig};
use rune_raster::{Point, Rect};
use tracing::debug;

use crate::field::Field;
use crate::host::{ControlKind, Host, NativeControl, SceneNode, ScrollAnchor};
use crate::message::{EventResult, OverlayMessage, PointerButton};
use crate::options::{FieldId, InputOptions, ResolvedOptions, TextareaOptions};
use crate::style::StyleOverrides;

/// The two shared native controls, created on first use.
struct Controls<C> {
    single_line: Option<C>,
    multi_line: Option<C>,
}

impl<C> Controls<C> {
    fn slot(&mut self, kind: ControlKind) -> &mut Option<C> {
        match kind {
            ControlKind::SingleLine => &mut self.single_line,
            ControlKind::MultiLine => &mut self.multi_line,
        }
    }

    fn get(&self, kind: ControlKind) -> Option<&C> {
        match kind {
            ControlKind::SingleLine => self.single_line.as_ref(),
            ControlKind::MultiLine => self.multi_line.as_ref(),
        }
    }

    fn get_mut(&mut self, kind: ControlKind) -> Option<&mut C> {
        self.slot(kind).as_mut()
    }
}

/// Mirror a field's style, attributes and position onto a control.
fn sync_control<N: SceneNode, C: NativeControl>(field: &Field<N>, control: &mut C) {
    control.apply_style(&field.control_style());
    control.set_attributes(&field.control_attributes());
    control.set_position(field.control_position());
}

/// Owns every field plus the shared native controls, and keeps at most one
/// field bound to a control at a time.
pub struct Overlay<H: Host> {
    host: H,
    defaults: RuneInputConfig,
    fields: HashMap<FieldId, Field<H::Node>>,
    controls: Controls<H::Control>,
    current: Option<FieldId>,
    handlers_installed: bool,
    scrollbar_width: Option<f32>,
    next_id: u32,
}

impl<H: Host> Overlay<H> {
    pub fn new(host: H, defaults: RuneInputConfig) -> Self {
        Self {
            host,
            defaults,
            fields: HashMap::new(),
            controls: Controls {
                single_line: None,
                multi_line: None,
            },
            current: None,
            handlers_installed: false,
            scrollbar_width: None,
            next_id: 1,
        }
    }

    pub fn with_default_config(host: H) -> Self {
        Self::new(host, RuneInputConfig::default())
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn defaults(&self) -> &RuneInputConfig {
        &self.defaults
    }

    /// The field bound to a native control, if any.
    pub fn current(&self) -> Option<FieldId> {
        self.current
    }

    pub fn is_current(&self, id: FieldId) -> bool {
        self.current == Some(id)
    }

    pub fn field(&self, id: FieldId) -> Option<&Field<H::Node>> {
        self.fields.get(&id)
    }

    /// Field ids in creation order.
    pub fn field_ids(&self) -> Vec<FieldId> {
        let mut ids: Vec<FieldId> = self.fields.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn control(&self, kind: ControlKind) -> Option<&H::Control> {
        self.controls.get(kind)
    }

    pub fn create_input(&mut self, options: InputOptions) -> FieldId {
        let (resolved, overrides) = options.resolve(&self.defaults.input);
        self.create(resolved, overrides)
    }

    pub fn create_textarea(&mut self, options: TextareaOptions) -> FieldId {
        let (resolved, overrides) = options.resolve(&self.defaults.textarea);
        self.create(resolved, overrides)
    }

    fn create(&mut self, options: ResolvedOptions, overrides: StyleOverrides) -> FieldId {
        self.ensure_control(options.kind.control_kind());
        let id = FieldId(self.next_id);
        self.next_id += 1;

        let node = self.host.create_node();
        let raw = overrides.apply(&self.defaults.style);
        let scrollbar_width = self.scrollbar_width.unwrap_or(0.0);
        let field = Field::new(id, node, options, raw, self.host.text_measure(), scrollbar_width);
        debug!(field = %id, kind = ?field.kind(), "field created");
        self.fields.insert(id, field);
        id
    }

    fn ensure_control(&mut self, kind: ControlKind) {
        if self.controls.get(kind).is_some() {
            return;
        }
        if !self.handlers_installed {
            self.host.install_global_handlers();
            self.handlers_installed = true;
        }
        let control = self.host.create_control(kind);
        *self.controls.slot(kind) = Some(control);
        if self.scrollbar_width.is_none() {
            self.scrollbar_width = Some(self.host.scrollbar_width());
        }
        debug!(?kind, "native control created");
    }

    /// Feed one inbound event through the state machine.
    pub fn handle(&mut self, message: OverlayMessage) -> EventResult {
        match message {
            OverlayMessage::FocusRequested(id) => self.focus(id),
            OverlayMessage::BlurRequested(id) => self.blur(id),
            OverlayMessage::ControlBlurred => match self.current {
                Some(id) => self.blur(id),
                None => EventResult::Ignored,
            },
            OverlayMessage::InputChanged(value) => self.input_changed(value),
            OverlayMessage::Resized { canvas } => {
                self.move_canvas(canvas.origin());
                if self.current.is_some() {
                    self.reposition();
                    EventResult::Handled
                } else {
                    EventResult::Ignored
                }
            }
            OverlayMessage::PointerDown { on_control } => self.page_pointer_down(on_control),
            OverlayMessage::PointerUp => self.page_pointer_up(),
            OverlayMessage::FieldPointerDown {
                field,
                local,
                button,
            } => self.field_pointer_down(field, local, button),
            OverlayMessage::FieldPointerUp { field } => match self.fields.get_mut(&field) {
                Some(f) => {
                    f.set_pointer_down(false);
                    EventResult::Handled
                }
                None => self.unknown(field),
            },
        }
    }

    fn unknown(&self, id: FieldId) -> EventResult {
        log::debug!("ignoring event for unknown {id}");
        EventResult::Ignored
    }

    /// Bind `id` to its native control, blurring the previous field first.
    pub fn focus(&mut self, id: FieldId) -> EventResult {
        let Some(kind) = self.fields.get(&id).map(|f| f.kind().control_kind()) else {
            return self.unknown(id);
        };
        if self.current == Some(id) {
            return EventResult::Handled;
        }
        if let Some(previous) = self.current {
            self.blur(previous);
        }
        self.ensure_control(kind);

        let (Some(field), Some(control)) = (self.fields.get_mut(&id), self.controls.get_mut(kind))
        else {
            return EventResult::Ignored;
        };
        field.node_mut().set_visible(false);
        sync_control(field, control);
        control.set_visible(true);
        self.current = Some(id);
        control.focus();
        debug!(field = %id, "focus");
        field.notify_focus();
        EventResult::Handled
    }

    /// Release the control if `id` holds it; otherwise a no-op.
    pub fn blur(&mut self, id: FieldId) -> EventResult {
        if self.current != Some(id) {
            return EventResult::Ignored;
        }
        self.current = None;
        let Some(field) = self.fields.get_mut(&id) else {
            return EventResult::Handled;
        };
        if let Some(control) = self.controls.get_mut(field.kind().control_kind()) {
            control.blur();
            control.set_visible(false);
        }
        field.node_mut().set_visible(true);
        debug!(field = %id, "blur");
        field.notify_blur();
        EventResult::Handled
    }

    fn input_changed(&mut self, value: String) -> EventResult {
        let Some(id) = self.current else {
            return EventResult::Ignored;
        };
        let Some(field) = self.fields.get_mut(&id) else {
            return EventResult::Ignored;
        };
        field.set_value(value);
        field.notify_input();
        EventResult::Handled
    }

    fn page_pointer_down(&mut self, on_control: bool) -> EventResult {
        let Some(id) = self.current else {
            return EventResult::Ignored;
        };
        let Some(field) = self.fields.get(&id) else {
            return EventResult::Ignored;
        };
        // The field's own press arrives first and has already set the flag.
        if field.is_pointer_down() || on_control {
            return EventResult::Ignored;
        }
        self.blur(id)
    }

    fn page_pointer_up(&mut self) -> EventResult {
        let Some(field) = self.current.and_then(|id| self.fields.get_mut(&id)) else {
            return EventResult::Ignored;
        };
        if !field.is_pointer_down() {
            return EventResult::Ignored;
        }
        field.set_pointer_down(false);
        EventResult::Handled
    }

    fn field_pointer_down(&mut self, id: FieldId, local: Point, button: PointerButton) -> EventResult {
        if !self.fields.contains_key(&id) {
            return self.unknown(id);
        }
        if button != PointerButton::Primary {
            // Consumed so the host suppresses context menus and paste.
            return EventResult::Handled;
        }
        self.focus(id);

        let measure = self.host.text_measure();
        let Some(field) = self.fields.get_mut(&id) else {
            return EventResult::Ignored;
        };
        let offset = field.text_offset_at(measure, local.x);
        if let Some(control) = self.controls.get_mut(field.kind().control_kind()) {
            control.set_selection(offset, offset);
            control.scroll_to(ScrollAnchor::from(field.style().align()));
        }
        field.set_pointer_down(true);
        debug!(field = %id, offset, "caret placed");
        EventResult::Handled
    }

    fn reposition(&mut self) {
        let Some(id) = self.current else {
            return;
        };
        let Some(field) = self.fields.get(&id) else {
            return;
        };
        if let Some(control) = self.controls.get_mut(field.kind().control_kind()) {
            control.set_position(field.control_position());
        }
    }

    /// Record the canvas's page origin on every field. Returns whether the
    /// current field's origin moved.
    fn move_canvas(&mut self, origin: Point) -> bool {
        let mut current_moved = false;
        for (id, field) in self.fields.iter_mut() {
            if field.set_canvas_origin(origin) && self.current == Some(*id) {
                current_moved = true;
            }
        }
        current_moved
    }

    /// Render hook: remember where the canvas sits on the page and bring
    /// every field up to date. A bound control follows the canvas.
    pub fn render(&mut self, canvas_rect: Rect) {
        let moved = self.move_canvas(canvas_rect.origin());
        self.update_transform();
        if moved {
            self.reposition();
        }
    }

    /// Transform hook: bring every field up to date.
    pub fn update_transform(&mut self) {
        let scrollbar_width = self.scrollbar_width.unwrap_or(0.0);
        let measure = self.host.text_measure();
        for field in self.fields.values_mut() {
            field.update(measure, scrollbar_width);
        }
    }

    fn update_field(&mut self, id: FieldId) {
        let scrollbar_width = self.scrollbar_width.unwrap_or(0.0);
        let measure = self.host.text_measure();
        if let Some(field) = self.fields.get_mut(&id) {
            field.update(measure, scrollbar_width);
        }
    }

    /// Re-mirror and reposition the control after a style change on the current field.
    fn refresh_control(&mut self, id: FieldId) {
        if self.current != Some(id) {
            return;
        }
        let Some(field) = self.fields.get(&id) else {
            return;
        };
        if let Some(control) = self.controls.get_mut(field.kind().control_kind()) {
            sync_control(field, control);
        }
    }

    pub fn value(&self, id: FieldId) -> Option<&str> {
        self.fields.get(&id).map(|f| f.value())
    }

    pub fn set_value(&mut self, id: FieldId, value: impl Into<String>) {
        let Some(field) = self.fields.get_mut(&id) else {
            self.unknown(id);
            return;
        };
        if !field.set_value(value.into()) {
            return;
        }
        self.update_field(id);
        if self.current == Some(id) {
            if let Some(field) = self.fields.get(&id) {
                if let Some(control) = self.controls.get_mut(field.kind().control_kind()) {
                    control.set_value(field.value());
                }
            }
        }
    }

    pub fn set_width(&mut self, id: FieldId, width: f32) {
        let Some(field) = self.fields.get_mut(&id) else {
            self.unknown(id);
            return;
        };
        if field.set_width(width) {
            self.update_field(id);
            self.refresh_control(id);
        }
    }

    pub fn set_height(&mut self, id: FieldId, height: f32) {
        let Some(field) = self.fields.get_mut(&id) else {
            self.unknown(id);
            return;
        };
        if field.set_height(height) {
            self.update_field(id);
            self.refresh_control(id);
        }
    }

    /// Apply an arbitrary style edit, then rebuild and re-mirror.
    pub fn update_style(&mut self, id: FieldId, f: impl FnOnce(&mut StyleConfig)) {
        let Some(field) = self.fields.get_mut(&id) else {
            self.unknown(id);
            return;
        };
        field.update_style(f);
        self.update_field(id);
        self.refresh_control(id);
    }

    pub fn set_x(&mut self, id: FieldId, x: f32) {
        if let Some(p) = self.fields.get(&id).map(|f| f.node().position()) {
            self.set_position(id, Point::new(x, p.y));
        } else {
            self.unknown(id);
        }
    }

    pub fn set_y(&mut self, id: FieldId, y: f32) {
        if let Some(p) = self.fields.get(&id).map(|f| f.node().position()) {
            self.set_position(id, Point::new(p.x, y));
        } else {
            self.unknown(id);
        }
    }

    pub fn set_position(&mut self, id: FieldId, position: Point) {
        let Some(field) = self.fields.get_mut(&id) else {
            self.unknown(id);
            return;
        };
        if field.node().position() == position {
            return;
        }
        field.node_mut().set_position(position);
        if self.current == Some(id) {
            self.reposition();
        }
    }

    pub fn set_scale(&mut self, id: FieldId, scale: Point) {
        let Some(field) = self.fields.get_mut(&id) else {
            self.unknown(id);
            return;
        };
        if field.node().scale() == scale {
            return;
        }
        field.node_mut().set_scale(scale);
        if self.current == Some(id) {
            self.reposition();
        }
    }

    /// Remove a field. The shared controls stay alive.
    pub fn destroy(&mut self, id: FieldId) {
        if self.current == Some(id) {
            self.blur(id);
        }
        match self.fields.remove(&id) {
            Some(field) => {
                field.release();
                debug!(field = %id, "field destroyed");
            }
            None => {
                self.unknown(id);
            }
        }
    }
}

use rune_config::StyleConfig;
use rune_raster::{FieldTexture, Point, compose};
use rune_text::{TextAlign, TextMeasure, TextRegion, locate};

use crate::control_style::{ControlAttributes, ControlStyle};
use crate::host::{DisplayText, PointerCursor, SceneNode, TextPlacement};
use crate::options::{Callbacks, FieldId, FieldKind, ResolvedOptions};
use crate::style::FieldStyle;

/// One text field: its style, value and the scene node showing it.
///
/// Mutations only mark state dirty; [`Field::update`] brings the texture and
/// the displayed text back in line.
#[derive(Debug)]
pub struct Field<N> {
    id: FieldId,
    kind: FieldKind,
    node: N,
    style: FieldStyle,
    value: String,
    placeholder: String,
    placeholder_color: String,
    readonly: bool,
    callbacks: Callbacks,
    texture: Option<FieldTexture>,
    texture_dirty: bool,
    text_dirty: bool,
    display: DisplayText,
    placement: TextPlacement,
    canvas_origin: Option<Point>,
    pointer_down_on_me: bool,
}

/// Password masking keeps line terminators so the line structure survives.
fn mask(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\n' | '\r' | '\u{2028}' | '\u{2029}' => c,
            _ => '*',
        })
        .collect()
}

impl<N: SceneNode> Field<N> {
    pub(crate) fn new(
        id: FieldId,
        mut node: N,
        options: ResolvedOptions,
        mut raw: StyleConfig,
        measure: &dyn TextMeasure,
        scrollbar_width: f32,
    ) -> Self {
        if raw.height.is_none() {
            raw.height = Some(measure.measure_font(&raw.text.font).font_size.trunc());
        }
        node.set_interactive(true, PointerCursor::Text);

        let mut field = Self {
            id,
            kind: options.kind,
            node,
            style: FieldStyle::new(raw),
            value: options.value,
            placeholder: options.placeholder,
            placeholder_color: options.placeholder_color,
            readonly: options.readonly,
            callbacks: options.callbacks,
            texture: None,
            texture_dirty: true,
            text_dirty: true,
            display: DisplayText::default(),
            placement: TextPlacement::default(),
            canvas_origin: None,
            pointer_down_on_me: false,
        };
        field.update(measure, scrollbar_width);
        field
    }

    /// Recompute whatever is dirty. A texture rebuild always dirties the text.
    pub(crate) fn update(&mut self, measure: &dyn TextMeasure, scrollbar_width: f32) {
        if self.texture_dirty {
            self.rebuild_texture();
            self.texture_dirty = false;
            self.text_dirty = true;
        }
        if self.text_dirty {
            self.refresh_text(measure, scrollbar_width);
            self.text_dirty = false;
        }
    }

    fn rebuild_texture(&mut self) {
        match compose(self.style.box_style(), self.style.resolution()) {
            Ok(texture) => {
                let textbox = texture.layout().textbox;
                self.node
                    .set_background(&texture, Point::new(-textbox.x, -textbox.y));
                self.texture = Some(texture);
            }
            Err(err) => log::error!("{}: keeping previous texture: {err}", self.id),
        }
    }

    fn refresh_text(&mut self, measure: &dyn TextMeasure, scrollbar_width: f32) {
        let raw = self.style.raw();
        let is_placeholder = self.value.is_empty();
        let text = if is_placeholder {
            self.placeholder.clone()
        } else if self.kind.is_password() {
            mask(&self.value)
        } else {
            self.value.clone()
        };
        let layout = self.style.layout();
        let word_wrap_width = self
            .kind
            .is_multi_line()
            .then(|| layout.width - layout.padding * 2.0 - scrollbar_width);

        self.display = DisplayText {
            text,
            fill: if is_placeholder {
                self.placeholder_color.clone()
            } else {
                raw.text.fill.clone()
            },
            font: raw.text.font.clone(),
            line_height: raw.text.line_height,
            align: raw.text.align,
            word_wrap_width,
            is_placeholder,
        };
        self.placement = self.compute_placement(measure);
        self.node.set_text(&self.display, &self.placement);
    }

    fn compute_placement(&self, measure: &dyn TextMeasure) -> TextPlacement {
        let layout = self.style.layout();
        let (width, height, padding) = (layout.width, layout.height, layout.padding);
        let align = self.style.align();
        let x = match align {
            TextAlign::Left => padding,
            TextAlign::Center => width / 2.0,
            TextAlign::Right => width - padding,
        };
        let y = if self.kind.is_multi_line() {
            padding
        } else {
            let text_height = measure
                .measure_text(&self.display.text, &self.style.text_style(None))
                .height;
            (height - text_height) / 2.0
        };
        TextPlacement {
            x,
            y,
            anchor_x: align.anchor(),
            mask: layout.text_region(),
        }
    }

    /// Character offset in the value nearest to a field-local X.
    pub fn text_offset_at(&self, measure: &dyn TextMeasure, local_x: f32) -> usize {
        let layout = self.style.layout();
        let region = TextRegion::new(0.0, layout.width, layout.padding);
        let pos = locate(
            measure,
            &self.display.text,
            &self.style.text_style(None),
            region,
            self.style.align(),
            local_x,
        );
        pos.min(self.value.chars().count())
    }

    /// Page position of the native control's border box.
    pub fn control_position(&self) -> Point {
        let layout = self.style.layout();
        let bounds = self.node.world_bounds(layout.local_bounds());
        let canvas = self.canvas_origin.unwrap_or_else(|| {
            log::debug!("{} positioned before its first render", self.id);
            Point::zero()
        });
        Point::new(
            canvas.x + bounds.x + layout.shadow.left,
            canvas.y + bounds.y + layout.shadow.top,
        )
    }

    pub fn control_style(&self) -> ControlStyle {
        ControlStyle::from_field(&self.style, self.kind)
    }

    pub fn control_attributes(&self) -> ControlAttributes {
        ControlAttributes::new(self.kind, &self.value, &self.placeholder, self.readonly)
    }

    pub(crate) fn set_value(&mut self, value: String) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        self.text_dirty = true;
        true
    }

    pub(crate) fn set_width(&mut self, width: f32) -> bool {
        if self.style.raw().width == width {
            return false;
        }
        self.update_style(|raw| raw.width = width);
        true
    }

    pub(crate) fn set_height(&mut self, height: f32) -> bool {
        if self.style.raw().height == Some(height) {
            return false;
        }
        self.update_style(|raw| raw.height = Some(height));
        true
    }

    pub(crate) fn update_style(&mut self, f: impl FnOnce(&mut StyleConfig)) {
        self.style.update(f);
        self.texture_dirty = true;
        self.text_dirty = true;
    }

    /// Returns whether the origin moved.
    pub(crate) fn set_canvas_origin(&mut self, origin: Point) -> bool {
        self.canvas_origin.replace(origin) != Some(origin)
    }

    pub(crate) fn set_pointer_down(&mut self, down: bool) {
        self.pointer_down_on_me = down;
    }

    pub(crate) fn node_mut(&mut self) -> &mut N {
        &mut self.node
    }

    pub(crate) fn notify_focus(&mut self) {
        self.callbacks.focused(self.id);
    }

    pub(crate) fn notify_blur(&mut self) {
        self.callbacks.blurred(self.id);
    }

    pub(crate) fn notify_input(&mut self) {
        self.callbacks.input(self.id, &self.value);
    }

    /// Detach from the scene and drop the texture.
    pub(crate) fn release(mut self) {
        self.node.set_interactive(false, PointerCursor::Default);
        self.node.release();
        self.texture = None;
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    pub fn width(&self) -> f32 {
        self.style.width()
    }

    pub fn height(&self) -> f32 {
        self.style.height()
    }

    pub fn x(&self) -> f32 {
        self.node.position().x
    }

    pub fn y(&self) -> f32 {
        self.node.position().y
    }

    pub fn style(&self) -> &FieldStyle {
        &self.style
    }

    pub fn node(&self) -> &N {
        &self.node
    }

    pub fn texture(&self) -> Option<&FieldTexture> {
        self.texture.as_ref()
    }

    pub fn display_text(&self) -> &DisplayText {
        &self.display
    }

    pub fn placement(&self) -> &TextPlacement {
        &self.placement
    }

    pub fn is_texture_dirty(&self) -> bool {
        self.texture_dirty
    }

    pub fn is_text_dirty(&self) -> bool {
        self.text_dirty
    }

    pub fn is_pointer_down(&self) -> bool {
        self.pointer_down_on_me
    }
}

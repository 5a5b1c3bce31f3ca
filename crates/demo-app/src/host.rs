//! Headless host: nodes keep their last texture for compositing, controls
//! log what a page would do with them.

use rune_field::{
    ControlAttributes, ControlKind, ControlStyle, DisplayText, Host, NativeControl,
    PointerCursor, SceneNode, ScrollAnchor, TextPlacement,
};
use rune_raster::tiny_skia::{Pixmap, PixmapPaint, Transform};
use rune_raster::{FieldTexture, Point, Rect};
use rune_text::{HeuristicMeasure, TextMeasure};

pub struct DemoNode {
    index: usize,
    position: Point,
    scale: Point,
    visible: bool,
    background: Option<(Pixmap, f32, Point)>,
}

impl DemoNode {
    /// Draw the background onto a page-sized pixmap at the node's transform.
    pub fn paint(&self, page: &mut Pixmap) {
        if !self.visible {
            return;
        }
        let Some((pixmap, resolution, offset)) = &self.background else {
            return;
        };
        let transform = Transform::from_translate(self.position.x, self.position.y)
            .pre_scale(self.scale.x, self.scale.y)
            .pre_translate(offset.x, offset.y)
            .pre_scale(1.0 / resolution, 1.0 / resolution);
        page.draw_pixmap(0, 0, pixmap.as_ref(), &PixmapPaint::default(), transform, None);
    }
}

impl SceneNode for DemoNode {
    fn position(&self) -> Point {
        self.position
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    fn scale(&self) -> Point {
        self.scale
    }

    fn set_scale(&mut self, scale: Point) {
        self.scale = scale;
    }

    fn world_bounds(&self, local: Rect) -> Rect {
        Rect::new(
            self.position.x + local.x * self.scale.x,
            self.position.y + local.y * self.scale.y,
            local.w * self.scale.x,
            local.h * self.scale.y,
        )
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_interactive(&mut self, interactive: bool, cursor: PointerCursor) {
        log::trace!("node{} interactive={interactive} cursor={cursor:?}", self.index);
    }

    fn set_background(&mut self, texture: &FieldTexture, offset: Point) {
        self.background = Some((texture.pixmap().clone(), texture.resolution(), offset));
    }

    fn set_text(&mut self, text: &DisplayText, placement: &TextPlacement) {
        log::debug!(
            "node{} text {:?} at ({}, {}) fill {}",
            self.index,
            text.text,
            placement.x,
            placement.y,
            text.fill
        );
    }

    fn release(&mut self) {
        self.background = None;
        log::debug!("node{} released", self.index);
    }
}

pub struct DemoControl {
    tag: &'static str,
}

impl NativeControl for DemoControl {
    fn apply_style(&mut self, style: &ControlStyle) {
        log::info!("<{}> style=\"{}\"", self.tag, style.to_css());
    }

    fn set_attributes(&mut self, attributes: &ControlAttributes) {
        log::info!("<{}> attributes {attributes:?}", self.tag);
    }

    fn set_value(&mut self, value: &str) {
        log::info!("<{}> value={value:?}", self.tag);
    }

    fn set_position(&mut self, position: Point) {
        log::info!("<{}> left={}px top={}px", self.tag, position.x, position.y);
    }

    fn set_visible(&mut self, visible: bool) {
        log::info!("<{}> display={}", self.tag, if visible { "block" } else { "none" });
    }

    fn focus(&mut self) {
        log::info!("<{}> focus()", self.tag);
    }

    fn blur(&mut self) {
        log::info!("<{}> blur()", self.tag);
    }

    fn set_selection(&mut self, start: usize, end: usize) {
        log::info!("<{}> setSelectionRange({start}, {end})", self.tag);
    }

    fn scroll_to(&mut self, anchor: ScrollAnchor) {
        log::info!("<{}> scroll to {anchor:?}", self.tag);
    }
}

pub struct DemoHost {
    nodes: usize,
    measure: Box<dyn TextMeasure>,
}

impl DemoHost {
    pub fn new(measure: Option<Box<dyn TextMeasure>>) -> Self {
        Self {
            nodes: 0,
            measure: measure.unwrap_or_else(|| Box::new(HeuristicMeasure)),
        }
    }
}

impl Host for DemoHost {
    type Node = DemoNode;
    type Control = DemoControl;

    fn create_node(&mut self) -> DemoNode {
        self.nodes += 1;
        DemoNode {
            index: self.nodes,
            position: Point::zero(),
            scale: Point::new(1.0, 1.0),
            visible: true,
            background: None,
        }
    }

    fn create_control(&mut self, kind: ControlKind) -> DemoControl {
        let tag = match kind {
            ControlKind::SingleLine => "input",
            ControlKind::MultiLine => "textarea",
        };
        log::info!("created <{tag}>");
        DemoControl { tag }
    }

    fn install_global_handlers(&mut self) {
        log::info!("installed document pointerdown/pointerup/resize handlers");
    }

    fn scrollbar_width(&self) -> f32 {
        17.0
    }

    fn text_measure(&self) -> &dyn TextMeasure {
        self.measure.as_ref()
    }
}

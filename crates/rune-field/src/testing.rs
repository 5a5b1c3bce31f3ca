//! Recording host used by the unit tests.

use std::cell::RefCell;
use std::rc::Rc;

use rune_raster::{FieldTexture, Point, Rect};
use rune_text::{HeuristicMeasure, TextMeasure};

use crate::control_style::{ControlAttributes, ControlStyle};
use crate::host::{
    ControlKind, DisplayText, Host, NativeControl, PointerCursor, SceneNode, ScrollAnchor,
    TextPlacement,
};

pub(crate) type Log = Rc<RefCell<Vec<String>>>;

pub(crate) fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

#[derive(Debug)]
pub(crate) struct RecordingNode {
    pub name: String,
    pub log: Log,
    pub position: Point,
    pub scale: Point,
    pub visible: bool,
    pub interactive: bool,
    pub cursor: PointerCursor,
    /// Width, height and offset of the last background texture.
    pub background: Option<(u32, u32, Point)>,
    pub text: Option<(DisplayText, TextPlacement)>,
    pub released: bool,
}

impl RecordingNode {
    pub fn new(index: usize, log: Log) -> Self {
        Self {
            name: format!("node{index}"),
            log,
            position: Point::zero(),
            scale: Point::new(1.0, 1.0),
            visible: true,
            interactive: false,
            cursor: PointerCursor::Default,
            background: None,
            text: None,
            released: false,
        }
    }

    fn record(&self, entry: String) {
        self.log.borrow_mut().push(format!("{}.{entry}", self.name));
    }
}

impl SceneNode for RecordingNode {
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
        self.record(format!("visible={visible}"));
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_interactive(&mut self, interactive: bool, cursor: PointerCursor) {
        self.interactive = interactive;
        self.cursor = cursor;
    }

    fn set_background(&mut self, texture: &FieldTexture, offset: Point) {
        self.background = Some((texture.width(), texture.height(), offset));
        self.record("background".into());
    }

    fn set_text(&mut self, text: &DisplayText, placement: &TextPlacement) {
        self.text = Some((text.clone(), *placement));
    }

    fn release(&mut self) {
        self.released = true;
        self.record("release".into());
    }
}

#[derive(Debug)]
pub(crate) struct RecordingControl {
    pub name: &'static str,
    pub log: Log,
    pub style: Option<ControlStyle>,
    pub attributes: Option<ControlAttributes>,
    pub value: String,
    pub position: Option<Point>,
    pub visible: bool,
    pub focused: bool,
    pub selection: Option<(usize, usize)>,
    pub scroll: Option<ScrollAnchor>,
}

impl RecordingControl {
    fn record(&self, entry: String) {
        self.log.borrow_mut().push(format!("{}.{entry}", self.name));
    }
}

impl NativeControl for RecordingControl {
    fn apply_style(&mut self, style: &ControlStyle) {
        self.style = Some(style.clone());
    }

    fn set_attributes(&mut self, attributes: &ControlAttributes) {
        self.value = attributes.value.clone();
        self.attributes = Some(attributes.clone());
    }

    fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.record(format!("value={value}"));
    }

    fn set_position(&mut self, position: Point) {
        self.position = Some(position);
        self.record(format!("position={},{}", position.x, position.y));
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn focus(&mut self) {
        self.focused = true;
        self.record("focus".into());
    }

    fn blur(&mut self) {
        self.focused = false;
        self.record("blur".into());
    }

    fn set_selection(&mut self, start: usize, end: usize) {
        self.selection = Some((start, end));
    }

    fn scroll_to(&mut self, anchor: ScrollAnchor) {
        self.scroll = Some(anchor);
    }
}

pub(crate) struct RecordingHost {
    pub log: Log,
    pub nodes: usize,
    pub controls: Vec<ControlKind>,
    pub handler_installs: usize,
    pub scrollbar_queries: std::cell::Cell<usize>,
    measure: HeuristicMeasure,
}

impl RecordingHost {
    pub fn new(log: Log) -> Self {
        Self {
            log,
            nodes: 0,
            controls: Vec::new(),
            handler_installs: 0,
            scrollbar_queries: std::cell::Cell::new(0),
            measure: HeuristicMeasure,
        }
    }
}

impl Host for RecordingHost {
    type Node = RecordingNode;
    type Control = RecordingControl;

    fn create_node(&mut self) -> RecordingNode {
        self.nodes += 1;
        RecordingNode::new(self.nodes, self.log.clone())
    }

    fn create_control(&mut self, kind: ControlKind) -> RecordingControl {
        self.controls.push(kind);
        RecordingControl {
            name: match kind {
                ControlKind::SingleLine => "input",
                ControlKind::MultiLine => "textarea",
            },
            log: self.log.clone(),
            style: None,
            attributes: None,
            value: String::new(),
            position: None,
            visible: false,
            focused: false,
            selection: None,
            scroll: None,
        }
    }

    fn install_global_handlers(&mut self) {
        self.handler_installs += 1;
    }

    fn scrollbar_width(&self) -> f32 {
        self.scrollbar_queries.set(self.scrollbar_queries.get() + 1);
        17.0
    }

    fn text_measure(&self) -> &dyn TextMeasure {
        &self.measure
    }
}

use thiserror::Error;
use tiny_skia::{FillRule, Mask, Paint, Path, Pixmap, PixmapPaint, Transform};

use crate::blur::{blur_pixmap, radius_for, sigma_for};
use crate::color::{Color, fill_color, shadow_color, to_skia};
use crate::rrect::{resolve_rounded_rect, rounded_rect_path};
use crate::scene::{Rect, RoundedRadii};
use crate::shadow::{Shadow, ShadowPadding};

const DEFAULT_WIDTH: f32 = 100.0;
const DEFAULT_HEIGHT: f32 = 30.0;
/// Thickness of the off-box rectangles that cast the inset shadow.
const INNER_CASTER: f32 = 100.0;

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("cannot allocate a {width}x{height} pixmap")]
    Allocation { width: u32, height: u32 },
}

/// Declarative description of a field background.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxStyle {
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    pub border_width: f32,
    pub border_radius: RoundedRadii,
    pub border_color: String,
    pub background_color: String,
    pub box_shadow: Shadow,
    pub inner_shadow: Shadow,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            padding: 0.0,
            border_width: 0.0,
            border_radius: RoundedRadii::default(),
            border_color: String::new(),
            background_color: String::new(),
            box_shadow: Shadow::none(),
            inner_shadow: Shadow::none(),
        }
    }
}

fn positive_or(v: f32, fallback: f32) -> f32 {
    if v.is_finite() && v > 0.0 { v } else { fallback }
}

impl BoxStyle {
    /// Logical-pixel geometry of the texture this style produces.
    pub fn layout(&self) -> BoxLayout {
        self.layout_around(self.box_shadow.padding())
    }

    /// Like [`BoxStyle::layout`], with the drop-shadow padding already derived.
    pub fn layout_around(&self, shadow: ShadowPadding) -> BoxLayout {
        let width = positive_or(self.width, DEFAULT_WIDTH);
        let height = positive_or(self.height, DEFAULT_HEIGHT);
        let padding = positive_or(self.padding, 0.0);
        let border_width = positive_or(self.border_width, 0.0);
        BoxLayout {
            shadow,
            width,
            height,
            padding,
            border_width,
            textbox: Rect::new(
                shadow.left + border_width,
                shadow.top + border_width,
                width,
                height,
            ),
            outer_width: width + 2.0 * border_width + shadow.width(),
            outer_height: height + 2.0 * border_width + shadow.height(),
        }
    }
}

/// Sizes derived from a [`BoxStyle`], in logical pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoxLayout {
    pub shadow: ShadowPadding,
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    pub border_width: f32,
    /// Padding box inside the texture.
    pub textbox: Rect,
    pub outer_width: f32,
    pub outer_height: f32,
}

impl BoxLayout {
    /// Border box inside the texture.
    pub fn border_box(&self) -> Rect {
        Rect::new(
            self.shadow.left,
            self.shadow.top,
            self.outer_width - self.shadow.width(),
            self.outer_height - self.shadow.height(),
        )
    }

    /// Clip region for text, relative to the textbox origin.
    pub fn text_region(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height).inset(self.padding)
    }

    /// Whole texture relative to the textbox origin.
    pub fn local_bounds(&self) -> Rect {
        Rect::new(
            -self.textbox.x,
            -self.textbox.y,
            self.outer_width,
            self.outer_height,
        )
    }
}

/// A composited background texture.
#[derive(Clone, Debug)]
pub struct FieldTexture {
    pixmap: Pixmap,
    resolution: f32,
    layout: BoxLayout,
}

impl FieldTexture {
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    pub fn layout(&self) -> &BoxLayout {
        &self.layout
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Straight-alpha RGBA at a device pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Straight-alpha RGBA8 rows, suitable for image encoders.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixmap.data().len());
        for p in self.pixmap.pixels() {
            let c = p.demultiply();
            out.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        out
    }
}

fn device_size(v: f32) -> u32 {
    (v.ceil() as u32).max(1)
}

fn new_pixmap(width: u32, height: u32) -> Result<Pixmap, RasterError> {
    Pixmap::new(width, height).ok_or(RasterError::Allocation { width, height })
}

fn solid(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(to_skia(color));
    paint.anti_alias = true;
    paint
}

/// Rasterize `style` at `resolution` device pixels per logical pixel.
///
/// Paint order: border (casting the drop shadow), background, inset shadow.
/// The background casts the drop shadow itself when there is no border.
pub fn compose(style: &BoxStyle, resolution: f32) -> Result<FieldTexture, RasterError> {
    let s = positive_or(resolution, 1.0);
    let layout = style.layout();
    let mut pixmap = new_pixmap(
        device_size(layout.outer_width * s),
        device_size(layout.outer_height * s),
    )?;

    let radii = style.border_radius.scaled(s);
    let box_shadow = style.box_shadow.scaled(s);
    let textbox = layout.textbox.scaled(s);
    let background = resolve_rounded_rect(textbox, radii);
    let background_path = rounded_rect_path(&background);

    let mut shadow_pending = !box_shadow.is_none();
    if layout.border_width > 0.0 {
        let border = resolve_rounded_rect(layout.border_box().scaled(s), radii);
        if let Some(path) = rounded_rect_path(&border) {
            if shadow_pending {
                draw_drop_shadow(&mut pixmap, &path, &box_shadow)?;
                shadow_pending = false;
            }
            let paint = solid(fill_color(&style.border_color));
            pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }
    }

    if let Some(path) = &background_path {
        if shadow_pending {
            draw_drop_shadow(&mut pixmap, path, &box_shadow)?;
        }
        let paint = solid(fill_color(&style.background_color));
        pixmap.fill_path(path, &paint, FillRule::Winding, Transform::identity(), None);

        let inner = style.inner_shadow.scaled(s);
        if inner.blur > 0.0 {
            let outer = (layout.outer_width * s, layout.outer_height * s);
            draw_inner_shadow(&mut pixmap, path, textbox, outer, &inner, s)?;
        }
    }

    log::debug!(
        "composed field texture {}x{} at {}x",
        pixmap.width(),
        pixmap.height(),
        s
    );
    Ok(FieldTexture {
        pixmap,
        resolution: s,
        layout,
    })
}

fn draw_drop_shadow(target: &mut Pixmap, caster: &Path, shadow: &Shadow) -> Result<(), RasterError> {
    let color = shadow_color(&shadow.color);
    if color.alpha <= 0.0 {
        return Ok(());
    }
    let mut layer = new_pixmap(target.width(), target.height())?;
    layer.fill_path(
        caster,
        &solid(color),
        FillRule::Winding,
        Transform::from_translate(shadow.offset_x, shadow.offset_y),
        None,
    );
    blur_pixmap(&mut layer, shadow.blur);
    target.draw_pixmap(0, 0, layer.as_ref(), &PixmapPaint::default(), Transform::identity(), None);
    Ok(())
}

/// Inset shadow: four rectangles just outside the textbox cast blurred
/// shadows inward; the result is clipped to the background shape.
fn draw_inner_shadow(
    target: &mut Pixmap,
    clip: &Path,
    textbox: Rect,
    outer: (f32, f32),
    shadow: &Shadow,
    s: f32,
) -> Result<(), RasterError> {
    let color = shadow_color(&shadow.color);
    if color.alpha <= 0.0 {
        return Ok(());
    }
    let margin = (radius_for(sigma_for(shadow.blur)) as f32
        + shadow.offset_x.abs().max(shadow.offset_y.abs())
        + 1.0)
        .ceil();
    let mut layer = new_pixmap(
        device_size(textbox.w + 2.0 * margin),
        device_size(textbox.h + 2.0 * margin),
    )?;

    let t = INNER_CASTER * s;
    let (ow, oh) = outer;
    let (x, y) = (shadow.offset_x, shadow.offset_y);
    let casters = [
        // top
        (-ow, -t + y, 3.0 * ow, t),
        // right
        (textbox.w + x, -oh, t, 3.0 * oh),
        // bottom
        (-ow, textbox.h + y, 3.0 * ow, t),
        // left
        (-t + x, -oh, t, 3.0 * oh),
    ];
    let paint = solid(color);
    for (cx, cy, cw, ch) in casters {
        if let Some(rect) = tiny_skia::Rect::from_xywh(cx + margin, cy + margin, cw, ch) {
            layer.fill_rect(rect, &paint, Transform::identity(), None);
        }
    }
    blur_pixmap(&mut layer, shadow.blur);

    let Some(mut mask) = Mask::new(target.width(), target.height()) else {
        return Err(RasterError::Allocation {
            width: target.width(),
            height: target.height(),
        });
    };
    mask.fill_path(clip, FillRule::Winding, true, Transform::identity());
    target.draw_pixmap(
        0,
        0,
        layer.as_ref(),
        &PixmapPaint::default(),
        Transform::from_translate(textbox.x - margin, textbox.y - margin),
        Some(&mask),
    );
    Ok(())
}

//! rune-raster: CPU rasterization of text-field background textures.
//!
//! The pipeline turns a declarative box description into a premultiplied
//! RGBA pixmap:
//! - `shadow`: parsing of `"Xpx Ypx Bpx color"` shadow expressions and the
//!   per-side padding a drop shadow needs
//! - `rrect`: rounded rectangle geometry with the degenerate-radius guard
//! - `blur`: separable Gaussian blur used for drop and inset shadows
//! - `compositor`: border, drop shadow, background and inset shadow layers
//!
//! Output depends only on the style and the resolution, so textures can be
//! rebuilt and compared pixel for pixel.

mod blur;
mod color;
mod compositor;
mod rrect;
mod scene;
mod shadow;

pub use color::{Color, fill_color, parse_color, shadow_color};
pub use compositor::{BoxLayout, BoxStyle, FieldTexture, RasterError, compose};
pub use rrect::{resolve_rounded_rect, rounded_rect_path};
pub use scene::{Point, Rect, RoundedRadii, RoundedRect};
pub use shadow::{ParsedShadow, Shadow, ShadowKind, ShadowPadding, parse_shadow_expr};

/// Re-export tiny-skia so hosts can upload pixmaps without a direct dependency.
pub use tiny_skia;

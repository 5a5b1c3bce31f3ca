//! rune-text: text measurement and caret hit-testing for single-line fields.
//!
//! - `font`: CSS font shorthand parsing and font metrics
//! - `measure`: the [`TextMeasure`] trait with heuristic and `fontdue` backends
//! - `layout`: alignment, lazily measured prefix widths and pointer-to-offset mapping
//!
//! Offsets are character (Unicode scalar) offsets. Shaping and bidi reordering
//! are left to the host renderer.

pub mod font;
pub mod layout;
pub mod measure;

pub use font::{DEFAULT_FONT, FontMetrics, FontSpec, MeasureError};
pub use layout::{PrefixWidths, TextAlign, TextRegion, caret_x, locate};
pub use measure::{FontdueMeasure, HeuristicMeasure, TextMeasure, TextMetrics, TextStyle};

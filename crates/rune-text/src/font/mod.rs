pub mod metrics;
pub mod spec;

pub use metrics::FontMetrics;
pub use spec::{DEFAULT_FONT, FontSpec};

use thiserror::Error;

/// Errors that can occur while loading a measuring font.
#[derive(Debug, Error)]
pub enum MeasureError {
    #[error("font I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid font data: {0}")]
    InvalidFont(&'static str),
}

/// Convenient result alias for font-related operations.
pub type Result<T> = std::result::Result<T, MeasureError>;

/// ASCII conversion engine for textify.
///
/// Converts decoded pixel frames to character-grid strings.
pub mod luminance;
pub mod resize;

pub use luminance::{LuminanceRenderer, ROW_SEPARATOR, render, render_all};

/// Types, configuration, and shared structures for textify.
///
/// This crate holds everything the decoding, rendering and export crates
/// agree on: frames, documents, character ramps, configuration and errors.

pub mod charset;
pub mod config;
pub mod cursor;
pub mod error;
pub mod frame;

pub use charset::{CharRamp, RampScaling};
pub use config::ConvertConfig;
pub use cursor::{FrameCursor, LoopMode};
pub use error::CoreError;
pub use frame::{AnimatedImage, AnimationDocument, ContainerTiming, Frame};

/// Serialisation of rendered animations.
pub mod js;

pub use js::JsWriter;

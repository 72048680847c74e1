/// Frame sources for textify: animated GIF and still images.

pub mod decode;

pub use decode::{decode, decode_gif};

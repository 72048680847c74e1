use std::io::{BufRead, Seek};
use std::path::Path;

use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, ImageFormat, ImageReader};
use tf_core::error::CoreError;
use tf_core::frame::{AnimatedImage, ContainerTiming, Frame};

/// Décode un fichier image en séquence de frames.
///
/// Les GIF sont décodés frame par frame (canevas complet, composité) ; tout
/// autre format reconnu donne une unique frame de délai nul.
///
/// # Errors
/// Returns [`CoreError::Decode`] if the file is unreadable, corrupt, or holds
/// no frame.
///
/// # Example
/// ```no_run
/// use tf_source::decode;
/// use std::path::Path;
/// let anim = decode(Path::new("cat.gif")).unwrap();
/// println!("{} frames, delay {}", anim.len(), anim.timing.display_delay());
/// ```
pub fn decode(path: &Path) -> Result<AnimatedImage, CoreError> {
    let reader = ImageReader::open(path)
        .and_then(ImageReader::with_guessed_format)
        .map_err(|e| decode_error(path, e))?;

    let anim = if reader.format() == Some(ImageFormat::Gif) {
        decode_gif(reader.into_inner(), path)?
    } else {
        let img = reader.decode().map_err(|e| decode_error(path, e))?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        let frame = Frame::from_rgba(width, height, rgba.into_raw(), 0)
            .map_err(|e| decode_error(path, e))?;
        AnimatedImage {
            frames: vec![frame],
            timing: ContainerTiming::default(),
        }
    };

    log::info!(
        "{} : {} frame(s), délai {}",
        path.display(),
        anim.len(),
        anim.timing.display_delay()
    );
    Ok(anim)
}

/// Décode un flux GIF. `path` ne sert qu'aux messages d'erreur.
///
/// The container delay pair takes the last frame's delay, in centiseconds,
/// with 100 ticks per second.
///
/// # Errors
/// Returns [`CoreError::Decode`] on a corrupt stream or zero frames.
pub fn decode_gif<R: BufRead + Seek>(reader: R, path: &Path) -> Result<AnimatedImage, CoreError> {
    let decoder = GifDecoder::new(reader).map_err(|e| decode_error(path, e))?;
    let raw = decoder
        .into_frames()
        .collect_frames()
        .map_err(|e| decode_error(path, e))?;

    let mut frames = Vec::with_capacity(raw.len());
    for (i, f) in raw.into_iter().enumerate() {
        let delay = centiseconds(f.delay().numer_denom_ms());
        let buffer = f.into_buffer();
        let (width, height) = buffer.dimensions();
        log::debug!("frame {i} : {width}×{height}, {delay} cs");
        frames.push(
            Frame::from_rgba(width, height, buffer.into_raw(), delay)
                .map_err(|e| decode_error(path, e))?,
        );
    }

    let Some(last) = frames.last() else {
        return Err(CoreError::Decode {
            path: path.to_path_buf(),
            reason: "aucune frame".into(),
        });
    };
    let timing = ContainerTiming {
        delay_units: last.delay,
        ticks_per_second: ContainerTiming::GIF_TICKS_PER_SECOND,
    };

    Ok(AnimatedImage { frames, timing })
}

/// Milliseconds ratio → GIF centiseconds.
fn centiseconds((numer, denom): (u32, u32)) -> u32 {
    if denom == 0 {
        return 0;
    }
    (u64::from(numer) / (u64::from(denom) * 10)) as u32
}

fn decode_error(path: &Path, e: impl std::fmt::Display) -> CoreError {
    CoreError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

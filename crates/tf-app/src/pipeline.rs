use std::path::Path;

use anyhow::{Context, Result};
use tf_core::charset::CharRamp;
use tf_core::config::ConvertConfig;
use tf_core::error::CoreError;
use tf_core::frame::AnimationDocument;

/// Résout la rampe et vérifie la largeur, avant tout décodage.
///
/// # Errors
/// Returns [`CoreError::InvalidArgument`] for an empty or unknown ramp, or a
/// zero width.
pub fn validate(config: &ConvertConfig) -> Result<CharRamp, CoreError> {
    if config.width == Some(0) {
        return Err(CoreError::InvalidArgument(
            "la largeur doit être un entier positif".into(),
        ));
    }
    config.ramp()
}

/// Decode `image` and render every frame into one document.
///
/// All-or-nothing: any failure discards the whole document.
///
/// # Errors
/// Returns an error on invalid arguments, decode failure, or render failure.
pub fn convert(image: &Path, config: &ConvertConfig) -> Result<AnimationDocument> {
    let ramp = validate(config)?;

    let anim = tf_source::decode(image)
        .with_context(|| format!("Impossible de charger {}", image.display()))?;

    let frames = tf_ascii::render_all(
        &anim.frames,
        &ramp,
        config.width,
        config.scaling,
        config.parallel,
    )
    .with_context(|| format!("Rendu échoué pour {}", image.display()))?;

    Ok(AnimationDocument {
        frames,
        delay: anim.timing.display_delay(),
    })
}

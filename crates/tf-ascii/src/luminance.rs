use rayon::prelude::*;
use tf_core::charset::{CharRamp, RampLut, RampScaling};
use tf_core::error::CoreError;
use tf_core::frame::{Frame, luma709};

use crate::resize::Resizer;

/// Row separator: backslash followed by `n`, two characters, not a newline.
pub const ROW_SEPARATOR: &str = "\\n";

/// Render one frame with the legacy ramp scaling.
///
/// `ramp` lists the characters in index order. With `target_width` the frame
/// is first resized to that many columns.
///
/// # Errors
/// Returns [`CoreError::InvalidArgument`] for an empty ramp or a zero width,
/// before touching any pixel.
///
/// # Example
/// ```
/// use tf_core::frame::Frame;
/// use tf_ascii::luminance::render;
///
/// let frame = Frame::from_rgba(1, 1, vec![255, 255, 255, 255], 0).unwrap();
/// assert_eq!(render(&frame, "AB", None).unwrap(), "A\\n");
/// ```
pub fn render(frame: &Frame, ramp: &str, target_width: Option<u32>) -> Result<String, CoreError> {
    let ramp = CharRamp::new(ramp)?;
    LuminanceRenderer::new(&ramp, target_width, RampScaling::Legacy)?.render(frame)
}

/// Render every frame, keeping source order.
///
/// Arguments are validated once, before the first frame. Any frame failure
/// aborts the whole batch.
///
/// # Errors
/// Returns [`CoreError::InvalidArgument`] for a zero width, or the first
/// per-frame error.
pub fn render_all(
    frames: &[Frame],
    ramp: &CharRamp,
    target_width: Option<u32>,
    scaling: RampScaling,
    parallel: bool,
) -> Result<Vec<String>, CoreError> {
    let mut renderer = LuminanceRenderer::new(ramp, target_width, scaling)?;

    let rendered = if parallel {
        let lut = &renderer.lut;
        frames
            .par_iter()
            .map_init(
                || LuminanceRenderer::from_lut(lut.clone(), target_width),
                |r, frame| r.render(frame),
            )
            .collect::<Result<Vec<_>, _>>()?
    } else {
        frames
            .iter()
            .map(|frame| renderer.render(frame))
            .collect::<Result<Vec<_>, _>>()?
    };

    log::info!(
        "{} frame(s) rendue(s) ({})",
        rendered.len(),
        if parallel { "parallèle" } else { "séquentiel" }
    );
    Ok(rendered)
}

/// Convertisseur frame → chaîne, réutilisable entre frames.
///
/// # Example
/// ```
/// use tf_core::charset::{CharRamp, RampScaling};
/// use tf_core::frame::Frame;
/// use tf_ascii::luminance::LuminanceRenderer;
///
/// let ramp = CharRamp::new(" .:#@").unwrap();
/// let mut renderer = LuminanceRenderer::new(&ramp, Some(4), RampScaling::Full).unwrap();
/// let text = renderer.render(&Frame::new(8, 8)).unwrap();
/// assert_eq!(text.matches("\\n").count(), 4);
/// ```
pub struct LuminanceRenderer {
    lut: RampLut,
    target_width: Option<u32>,
    resizer: Resizer,
}

impl LuminanceRenderer {
    /// Build a renderer.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidArgument`] if `target_width` is `Some(0)`.
    pub fn new(
        ramp: &CharRamp,
        target_width: Option<u32>,
        scaling: RampScaling,
    ) -> Result<Self, CoreError> {
        if target_width == Some(0) {
            return Err(CoreError::InvalidArgument(
                "la largeur cible doit être positive".into(),
            ));
        }
        Ok(Self::from_lut(RampLut::new(ramp, scaling), target_width))
    }

    fn from_lut(lut: RampLut, target_width: Option<u32>) -> Self {
        Self {
            lut,
            target_width,
            resizer: Resizer::new(),
        }
    }

    /// Render `frame`, resizing first when a different target width is set.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if the buffer disagrees with
    /// the frame dimensions, or [`CoreError::Resize`] if resampling fails.
    pub fn render(&mut self, frame: &Frame) -> Result<String, CoreError> {
        frame.check()?;
        match self.target_width {
            Some(width) if width != frame.width => {
                let resized = self.resizer.resize_to_width(frame, width)?;
                log::debug!(
                    "{}×{} → {}×{}",
                    frame.width,
                    frame.height,
                    resized.width,
                    resized.height
                );
                Ok(assemble(&resized, &self.lut))
            }
            _ => Ok(assemble(frame, &self.lut)),
        }
    }
}

/// Row-major walk: one character per pixel, separator after each row.
fn assemble(frame: &Frame, lut: &RampLut) -> String {
    let width = frame.width as usize;
    let mut out = String::with_capacity(frame.pixel_count() + frame.height as usize * 2);
    for (i, px) in frame.data.chunks_exact(4).enumerate() {
        // alpha 0 → sentinel luminance, whatever the color channels say
        let ch = if px[3] == 0 {
            lut.transparent()
        } else {
            lut.map(luma709(px[0], px[1], px[2]))
        };
        out.push(ch);
        if i % width == width - 1 {
            out.push_str(ROW_SEPARATOR);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(width: u32, height: u32, pixels: &[[u8; 4]]) -> Frame {
        Frame::from_rgba(width, height, pixels.concat(), 0).unwrap()
    }

    const WHITE: [u8; 4] = [255, 255, 255, 255];
    const BLACK: [u8; 4] = [0, 0, 0, 255];

    #[test]
    fn opaque_white_maps_to_first_char() {
        let out = render(&frame(1, 1, &[WHITE]), "AB", None).unwrap();
        assert_eq!(out, "A\\n");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn transparent_pixel_ignores_color() {
        for rgb in [[0, 0, 0], [255, 255, 255], [12, 200, 7]] {
            let px = [rgb[0], rgb[1], rgb[2], 0];
            assert_eq!(render(&frame(1, 1, &[px]), "AB", None).unwrap(), "B\\n");
        }
        let ramp = CharRamp::new("0123456789").unwrap();
        let idx = ramp.index_for(tf_core::charset::TRANSPARENT_SENTINEL, RampScaling::Legacy);
        assert_eq!(
            render(&frame(1, 1, &[[9, 9, 9, 0]]), "0123456789", None).unwrap(),
            format!("{}\\n", ramp.get(idx))
        );
    }

    #[test]
    fn row_separator_after_each_row() {
        let ramp = CharRamp::new("ab").unwrap();
        let mut renderer = LuminanceRenderer::new(&ramp, None, RampScaling::Full).unwrap();
        let out = renderer
            .render(&frame(2, 2, &[BLACK, WHITE, WHITE, BLACK]))
            .unwrap();
        assert_eq!(out, "ab\\nba\\n");
    }

    #[test]
    fn separator_positions_follow_width() {
        let width = 3usize;
        let pixels = vec![BLACK; width * 4];
        let out = render(&frame(width as u32, 4, &pixels), "xy", None).unwrap();
        let rows: Vec<&str> = out.split(ROW_SEPARATOR).collect();
        assert_eq!(rows.len(), 5);
        assert!(rows[..4].iter().all(|r| r.chars().count() == width));
        assert_eq!(rows[4], "");
    }

    #[test]
    fn resize_preserves_aspect_ratio() {
        let src = Frame::new(100, 50);
        let out = render(&src, "AB", Some(50)).unwrap();
        let rows: Vec<&str> = out.split(ROW_SEPARATOR).filter(|r| !r.is_empty()).collect();
        assert_eq!(rows.len(), 25);
        assert!(rows.iter().all(|r| r.chars().count() == 50));
    }

    #[test]
    fn same_width_skips_resize() {
        let src = frame(2, 1, &[BLACK, [0, 0, 0, 0]]);
        assert_eq!(render(&src, "AB", Some(2)).unwrap(), "AB\\n");
    }

    #[test]
    fn invalid_arguments_rejected_before_rendering() {
        assert!(matches!(
            render(&Frame::new(1, 1), "", None),
            Err(CoreError::InvalidArgument(_))
        ));
        assert!(matches!(
            render(&Frame::new(1, 1), "AB", Some(0)),
            Err(CoreError::InvalidArgument(_))
        ));
        let ramp = CharRamp::new("AB").unwrap();
        // Frames with broken buffers are never reached.
        let broken = Frame {
            data: Vec::new(),
            width: 5,
            height: 5,
            delay: 0,
        };
        assert!(matches!(
            render_all(&[broken], &ramp, Some(0), RampScaling::Legacy, false),
            Err(CoreError::InvalidArgument(_))
        ));
    }

    #[test]
    fn inconsistent_frame_is_rejected() {
        let short = Frame {
            data: vec![0, 0, 0, 255],
            width: 2,
            height: 2,
            delay: 0,
        };
        assert!(matches!(
            render(&short, "AB", None),
            Err(CoreError::InvalidDimensions { width: 2, height: 2, len: 4 })
        ));

        let zero_width = Frame {
            data: vec![0, 0, 0, 255],
            width: 0,
            height: 1,
            delay: 0,
        };
        assert!(matches!(
            render(&zero_width, "AB", None),
            Err(CoreError::InvalidDimensions { width: 0, .. })
        ));

        let ramp = CharRamp::new("AB").unwrap();
        let frames = vec![frame(1, 1, &[BLACK]), short];
        for parallel in [false, true] {
            assert!(matches!(
                render_all(&frames, &ramp, Some(4), RampScaling::Legacy, parallel),
                Err(CoreError::InvalidDimensions { .. })
            ));
        }
    }

    #[test]
    fn render_all_keeps_order_in_parallel() {
        let frames: Vec<Frame> = (0..32)
            .map(|i| {
                let px = if i % 2 == 0 { BLACK } else { [0, 0, 0, 0] };
                frame(1, 1, &[px])
            })
            .collect();
        let ramp = CharRamp::new("ox").unwrap();
        let seq = render_all(&frames, &ramp, None, RampScaling::Legacy, false).unwrap();
        let par = render_all(&frames, &ramp, None, RampScaling::Legacy, true).unwrap();
        assert_eq!(seq, par);
        assert_eq!(par[0], "o\\n");
        assert_eq!(par[1], "x\\n");
        assert_eq!(par[31], "x\\n");
    }

    #[test]
    fn legacy_scaling_never_reaches_ramp_tail() {
        let pixels: Vec<[u8; 4]> = (0..=255u8).map(|v| [v, v, v, 255]).collect();
        let out = render(&frame(16, 16, &pixels), "0123456789", None).unwrap();
        assert!(out.replace(ROW_SEPARATOR, "").chars().all(|c| c == '0'));
    }
}

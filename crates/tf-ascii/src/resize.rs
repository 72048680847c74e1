use fast_image_resize::images::Image;
use fast_image_resize::{PixelType, ResizeOptions, Resizer as FirResizer};
use tf_core::error::CoreError;
use tf_core::frame::Frame;

/// Resizer réutilisable wrappant fast_image_resize.
///
/// Garde ses buffers entre deux frames ; un resizer par thread de rendu.
///
/// # Example
/// ```
/// use tf_ascii::resize::Resizer;
/// use tf_core::frame::Frame;
/// let mut r = Resizer::new();
/// let out = r.resize_to_width(&Frame::new(100, 50), 50).unwrap();
/// assert_eq!((out.width, out.height), (50, 25));
/// ```
pub struct Resizer {
    inner: FirResizer,
    options: ResizeOptions,
    /// Scratch copy of the source, fast_image_resize wants `&mut` on it.
    src_buf: Vec<u8>,
}

impl Resizer {
    /// Create a new resizer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: FirResizer::new(),
            options: ResizeOptions::new(),
            src_buf: Vec::new(),
        }
    }

    /// Resize `src` into `dst`. Dimensions of `dst` determine output size.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if either buffer is
    /// inconsistent with its dimensions, or [`CoreError::Resize`] if
    /// resampling fails.
    pub fn resize_into(&mut self, src: &Frame, dst: &mut Frame) -> Result<(), CoreError> {
        src.check()?;
        dst.check()?;
        if src.width == dst.width && src.height == dst.height {
            dst.data.copy_from_slice(&src.data);
            return Ok(());
        }

        self.src_buf.clear();
        self.src_buf.extend_from_slice(&src.data);

        let src_image =
            Image::from_slice_u8(src.width, src.height, &mut self.src_buf, PixelType::U8x4)
                .map_err(|e| CoreError::Resize(format!("source : {e}")))?;

        let mut dst_image =
            Image::from_slice_u8(dst.width, dst.height, &mut dst.data, PixelType::U8x4)
                .map_err(|e| CoreError::Resize(format!("destination : {e}")))?;

        self.inner
            .resize(&src_image, &mut dst_image, Some(&self.options))
            .map_err(|e| CoreError::Resize(e.to_string()))?;

        Ok(())
    }

    /// Scale `src` to `width` columns, height following the aspect ratio.
    /// The frame delay is carried over.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidArgument`] for a zero width, or
    /// [`CoreError::Resize`] if resampling fails.
    pub fn resize_to_width(&mut self, src: &Frame, width: u32) -> Result<Frame, CoreError> {
        if width == 0 {
            return Err(CoreError::InvalidArgument("largeur nulle".into()));
        }
        let height = scaled_height(src.width, src.height, width);
        let mut dst = Frame::new(width, height);
        dst.delay = src.delay;
        self.resize_into(src, &mut dst)?;
        Ok(dst)
    }
}

impl Default for Resizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Height matching `target_width` at the source aspect ratio, rounded to
/// nearest, never below 1.
///
/// # Example
/// ```
/// use tf_ascii::resize::scaled_height;
/// assert_eq!(scaled_height(100, 50, 50), 25);
/// assert_eq!(scaled_height(3, 1, 2), 1);
/// assert_eq!(scaled_height(1000, 1, 10), 1);
/// ```
#[must_use]
pub fn scaled_height(width: u32, height: u32, target_width: u32) -> u32 {
    if width == 0 {
        return 1;
    }
    let w = u64::from(width);
    let scaled = (u64::from(height) * u64::from(target_width) * 2 + w) / (2 * w);
    scaled.clamp(1, u64::from(u32::MAX)) as u32
}

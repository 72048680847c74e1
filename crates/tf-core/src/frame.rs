use crate::error::CoreError;

/// Frame décodée. Pixels RGBA row-major, 4 bytes par pixel.
///
/// `delay` est exprimé dans l'unité native du conteneur (centisecondes pour GIF).
///
/// # Example
/// ```
/// use tf_core::frame::Frame;
/// let frame = Frame::new(10, 10);
/// assert_eq!(frame.data.len(), 400);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Pixels RGBA, row-major, 4 bytes par pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Native display delay, container unit.
    pub delay: u32,
}

impl Frame {
    /// Crée une frame transparente aux dimensions données.
    ///
    /// # Example
    /// ```
    /// use tf_core::frame::Frame;
    /// let frame = Frame::new(100, 50);
    /// assert_eq!(frame.width, 100);
    /// assert_eq!(frame.height, 50);
    /// assert_eq!(frame.data.len(), 100 * 50 * 4);
    /// ```
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize * 4],
            width,
            height,
            delay: 0,
        }
    }

    /// Wrap an existing RGBA buffer, checking `data.len() == width * height * 4`.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if a dimension is zero or the
    /// buffer length does not match.
    ///
    /// # Example
    /// ```
    /// use tf_core::frame::Frame;
    /// let frame = Frame::from_rgba(1, 1, vec![255, 255, 255, 255], 4).unwrap();
    /// assert_eq!(frame.delay, 4);
    /// assert!(Frame::from_rgba(2, 1, vec![0; 4], 0).is_err());
    /// ```
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>, delay: u32) -> Result<Self, CoreError> {
        let frame = Self {
            data,
            width,
            height,
            delay,
        };
        frame.check()?;
        Ok(frame)
    }

    /// Vérifie `width, height > 0` et `data.len() == width * height * 4`.
    ///
    /// Fields are public, so frames built by hand go through this before
    /// any per-pixel walk.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] on a mismatch.
    ///
    /// # Example
    /// ```
    /// use tf_core::frame::Frame;
    /// let mut frame = Frame::new(2, 2);
    /// assert!(frame.check().is_ok());
    /// frame.data.truncate(4);
    /// assert!(frame.check().is_err());
    /// ```
    pub fn check(&self) -> Result<(), CoreError> {
        if self.width == 0 || self.height == 0 || self.data.len() != self.pixel_count() * 4 {
            return Err(CoreError::InvalidDimensions {
                width: self.width,
                height: self.height,
                len: self.data.len(),
            });
        }
        Ok(())
    }

    /// Accès au pixel (x, y) → (r, g, b, a).
    ///
    /// # Example
    /// ```
    /// use tf_core::frame::Frame;
    /// let frame = Frame::new(10, 10);
    /// assert_eq!(frame.pixel(0, 0), (0, 0, 0, 0));
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        if idx + 3 >= self.data.len() {
            return (0, 0, 0, 0);
        }
        (
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        )
    }

    /// Number of pixels.
    #[inline]
    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Integer BT.709 luma on the 0–255 scale.
///
/// # Example
/// ```
/// use tf_core::frame::luma709;
/// assert_eq!(luma709(0, 0, 0), 0);
/// assert_eq!(luma709(255, 255, 255), 255);
/// assert_eq!(luma709(0, 255, 0), 182);
/// ```
#[inline(always)]
#[must_use]
pub fn luma709(r: u8, g: u8, b: u8) -> u8 {
    ((u32::from(r) * 2126 + u32::from(g) * 7152 + u32::from(b) * 722) / 10000) as u8
}

/// Delay metadata shared by every frame of a container.
///
/// # Example
/// ```
/// use tf_core::frame::ContainerTiming;
/// let timing = ContainerTiming { delay_units: 10, ticks_per_second: 100 };
/// assert_eq!(timing.display_delay(), 100);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContainerTiming {
    /// Delay in container ticks.
    pub delay_units: u32,
    /// Container ticks per second (100 for GIF).
    pub ticks_per_second: u32,
}

impl ContainerTiming {
    /// GIF ticks per second.
    pub const GIF_TICKS_PER_SECOND: u32 = 100;

    /// Process-wide display delay: `delay_units * ticks_per_second / 10`.
    ///
    /// The fixed divisor is the legacy conversion; for GIF it yields milliseconds.
    #[must_use]
    pub fn display_delay(&self) -> u64 {
        u64::from(self.delay_units) * u64::from(self.ticks_per_second) / 10
    }
}

impl Default for ContainerTiming {
    fn default() -> Self {
        Self {
            delay_units: 0,
            ticks_per_second: Self::GIF_TICKS_PER_SECOND,
        }
    }
}

/// Séquence de frames décodées, immuable une fois construite.
#[derive(Clone, Debug)]
pub struct AnimatedImage {
    /// Frames in display order.
    pub frames: Vec<Frame>,
    /// Container-level delay pair.
    pub timing: ContainerTiming,
}

impl AnimatedImage {
    /// Number of frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// `true` if the image holds no frame.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Rendered animation: one string per frame plus the shared delay.
///
/// Rows inside each frame are separated by the two-character token `\n`
/// (backslash, `n`), never by a newline byte.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnimationDocument {
    /// Rendered frames in source order.
    pub frames: Vec<String>,
    /// Delay between frames, see [`ContainerTiming::display_delay`].
    pub delay: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_uses_legacy_divisor() {
        let timing = ContainerTiming {
            delay_units: 10,
            ticks_per_second: 100,
        };
        assert_eq!(timing.display_delay(), 100);

        let odd = ContainerTiming {
            delay_units: 7,
            ticks_per_second: 3,
        };
        assert_eq!(odd.display_delay(), 2);
    }

    #[test]
    fn from_rgba_rejects_zero_dimension() {
        assert!(matches!(
            Frame::from_rgba(0, 1, Vec::new(), 0),
            Err(CoreError::InvalidDimensions { width: 0, .. })
        ));
    }

    #[test]
    fn check_rejects_short_buffer() {
        let frame = Frame {
            data: vec![0, 0, 0, 255],
            width: 2,
            height: 2,
            delay: 0,
        };
        assert!(matches!(
            frame.check(),
            Err(CoreError::InvalidDimensions { len: 4, .. })
        ));
    }
}

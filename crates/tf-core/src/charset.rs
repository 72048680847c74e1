use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Paul Bourke, "Character representation of grayscale images".
pub const CHARSET_BOURKE: &str = "@%#*+=-:. ";

/// Blocs Unicode, ombrages et espace.
pub const CHARSET_SHADES: &str = "█▓▒░ ";

/// Raj Kaimal, "Grayscale Ascii From Bitmap".
pub const CHARSET_KAIMAL: &str = "M#E8Oo+i=I;:~.` ";

/// From img2txt by hit9.
pub const CHARSET_HIT9: &str = "MNHQ$OC?7>!:-;. ";

/// Paul Bourke, "Character representation of grayscale images", 70 niveaux.
pub const CHARSET_STANDARD: &str =
    r#"$@B%8&WM#*oahkbdpqwmZO0QLCJUYXzcvunxrjft/\|()1{}[]?-_+~<>i!lI;:,"^`'. "#;

/// Named ramps, in listing order.
pub const NAMED_CHARSETS: &[(&str, &str)] = &[
    ("bourke", CHARSET_BOURKE),
    ("shades", CHARSET_SHADES),
    ("kaimal", CHARSET_KAIMAL),
    ("hit9", CHARSET_HIT9),
    ("standard", CHARSET_STANDARD),
];

/// Ramp used when neither a name nor literal characters are given.
pub const DEFAULT_CHARSET: &str = "shades";

/// Luminance forced onto fully transparent pixels before index mapping.
pub const TRANSPARENT_SENTINEL: u32 = 65535;

/// How a luminance value is spread over the ramp.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum RampScaling {
    /// `floor(n * v / 65536)`. Opaque pixels only reach the head of the ramp.
    #[default]
    Legacy,
    /// `floor(n * v / 256)`. Opaque pixels cover the whole ramp.
    Full,
}

/// Ordered, non-empty sequence of characters.
///
/// # Example
/// ```
/// use tf_core::charset::CharRamp;
/// let ramp = CharRamp::new("AB").unwrap();
/// assert_eq!(ramp.len(), 2);
/// assert!(CharRamp::new("").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharRamp {
    chars: Vec<char>,
}

impl CharRamp {
    /// Build a ramp from literal characters.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidArgument`] if `chars` is empty.
    pub fn new(chars: &str) -> Result<Self, CoreError> {
        let chars: Vec<char> = chars.chars().collect();
        if chars.is_empty() {
            return Err(CoreError::InvalidArgument(
                "la rampe de caractères est vide".into(),
            ));
        }
        Ok(Self { chars })
    }

    /// Look up a named ramp.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidArgument`] for an unknown name.
    ///
    /// # Example
    /// ```
    /// use tf_core::charset::CharRamp;
    /// let ramp = CharRamp::named("bourke").unwrap();
    /// assert_eq!(ramp.get(0), '@');
    /// assert!(CharRamp::named("nope").is_err());
    /// ```
    pub fn named(name: &str) -> Result<Self, CoreError> {
        NAMED_CHARSETS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, chars)| Self::new(chars))
            .unwrap_or_else(|| {
                Err(CoreError::InvalidArgument(format!(
                    "charset inconnu '{name}' (disponibles : {})",
                    NAMED_CHARSETS
                        .iter()
                        .map(|(n, _)| *n)
                        .collect::<Vec<_>>()
                        .join(", ")
                )))
            })
    }

    /// Number of characters, always ≥ 1.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Character at `index`, clamped to the last one when out of range.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> char {
        self.chars[index.min(self.chars.len() - 1)]
    }

    /// Ramp index for luminance `v`.
    ///
    /// `v` is 0–255 for opaque pixels or [`TRANSPARENT_SENTINEL`]. Results past
    /// the end are clamped to `len - 1`.
    ///
    /// # Example
    /// ```
    /// use tf_core::charset::{CharRamp, RampScaling, TRANSPARENT_SENTINEL};
    /// let ramp = CharRamp::new("AB").unwrap();
    /// assert_eq!(ramp.index_for(255, RampScaling::Legacy), 0);
    /// assert_eq!(ramp.index_for(255, RampScaling::Full), 1);
    /// assert_eq!(ramp.index_for(TRANSPARENT_SENTINEL, RampScaling::Legacy), 1);
    /// ```
    #[inline]
    #[must_use]
    pub fn index_for(&self, v: u32, scaling: RampScaling) -> usize {
        let n = self.chars.len() as u64;
        let last = self.chars.len() - 1;
        let raw = match scaling {
            RampScaling::Legacy => n * u64::from(v) / 65536,
            RampScaling::Full if v == TRANSPARENT_SENTINEL => return last,
            RampScaling::Full => n * u64::from(v) / 256,
        };
        (raw as usize).min(last)
    }
}

/// Lookup table luminance [0..255] → caractère, plus le caractère transparent.
///
/// Pre-computed once per ramp for O(1) per-pixel cost.
///
/// # Example
/// ```
/// use tf_core::charset::{CharRamp, RampLut, RampScaling};
/// let ramp = CharRamp::new(" .:#@").unwrap();
/// let lut = RampLut::new(&ramp, RampScaling::Full);
/// assert_eq!(lut.map(0), ' ');
/// assert_eq!(lut.map(255), '@');
/// assert_eq!(lut.transparent(), '@');
/// ```
#[derive(Clone, Debug)]
pub struct RampLut {
    lut: [char; 256],
    transparent: char,
}

impl RampLut {
    /// Build the table for `ramp` under `scaling`.
    #[must_use]
    pub fn new(ramp: &CharRamp, scaling: RampScaling) -> Self {
        let mut lut = [' '; 256];
        for (v, slot) in (0u32..).zip(lut.iter_mut()) {
            *slot = ramp.get(ramp.index_for(v, scaling));
        }
        Self {
            lut,
            transparent: ramp.get(ramp.index_for(TRANSPARENT_SENTINEL, scaling)),
        }
    }

    /// Map an opaque luminance value to a character.
    #[inline(always)]
    #[must_use]
    pub fn map(&self, luminance: u8) -> char {
        self.lut[luminance as usize]
    }

    /// Character for fully transparent pixels.
    #[inline(always)]
    #[must_use]
    pub fn transparent(&self) -> char {
        self.transparent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_indices_never_pass_legacy_ceiling() {
        for n in 1..=300usize {
            let ramp = CharRamp::new(&"x".repeat(n)).unwrap();
            let ceiling = n * 255 / 65536;
            for v in 0..=255u32 {
                let idx = ramp.index_for(v, RampScaling::Legacy);
                assert!(idx <= ceiling, "n={n} v={v} idx={idx}");
            }
            if n >= 2 {
                assert!(ceiling < n - 1);
            }
        }
    }

    #[test]
    fn transparent_sentinel_lands_on_last_index() {
        for n in [1usize, 2, 5, 70, 1000] {
            let ramp = CharRamp::new(&"x".repeat(n)).unwrap();
            assert_eq!(ramp.index_for(TRANSPARENT_SENTINEL, RampScaling::Legacy), n - 1);
            assert_eq!(ramp.index_for(TRANSPARENT_SENTINEL, RampScaling::Full), n - 1);
        }
    }

    #[test]
    fn full_scaling_is_monotonic_and_reaches_tail() {
        let ramp = CharRamp::new(" .:#@").unwrap();
        let mut prev = 0;
        for v in 0..=255u32 {
            let idx = ramp.index_for(v, RampScaling::Full);
            assert!(idx >= prev, "non monotone à luminance {v}");
            prev = idx;
        }
        assert_eq!(prev, 4);
    }

    #[test]
    fn named_table_matches_legacy_ramps() {
        assert_eq!(CharRamp::named("shades").unwrap().len(), 5);
        assert_eq!(CharRamp::named("standard").unwrap().len(), 70);
        assert_eq!(CharRamp::named("kaimal").unwrap().get(15), ' ');
        assert!(matches!(
            CharRamp::named("missing"),
            Err(CoreError::InvalidArgument(_))
        ));
    }

    #[test]
    fn legacy_lut_under_fills_ramp() {
        let ramp = CharRamp::named("standard").unwrap();
        let lut = RampLut::new(&ramp, RampScaling::Legacy);
        assert!((0..=255u8).all(|v| lut.map(v) == '$'));
        assert_eq!(lut.transparent(), ' ');
    }
}

use lv_core::config::OverflowPolicy;

/// Intensité d'une cellule `'1'`.
pub const SOLID_INTENSITY: u8 = 255;

/// Intensité d'une cellule `'5'`.
pub const HALF_INTENSITY: u8 = 128;

/// Lookup table mapping code points [0..255] → intensity.
///
/// Pre-computed at construction for O(1) per-cell cost. Code points above
/// 255 go through the [`OverflowPolicy`].
///
/// # Example
/// ```
/// use lv_raster::intensity::IntensityLut;
/// use lv_core::config::OverflowPolicy;
/// let lut = IntensityLut::new(OverflowPolicy::Saturate);
/// assert_eq!(lut.map('1'), Some(255));
/// assert_eq!(lut.map('5'), Some(128));
/// assert_eq!(lut.map('a'), Some(97));
/// assert_eq!(lut.map('€'), Some(255));
/// ```
pub struct IntensityLut {
    lut: [u8; 256],
    policy: OverflowPolicy,
}

impl IntensityLut {
    /// Build the table for the given overflow policy.
    #[must_use]
    pub fn new(policy: OverflowPolicy) -> Self {
        let mut lut = [0u8; 256];
        for (cp, slot) in (0u8..=255).zip(lut.iter_mut()) {
            *slot = match char::from(cp) {
                '1' => SOLID_INTENSITY,
                '5' => HALF_INTENSITY,
                _ => cp,
            };
        }
        Self { lut, policy }
    }

    /// Politique appliquée au-delà de 255.
    #[must_use]
    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    /// Map a character to its intensity.
    ///
    /// Returns `None` only under [`OverflowPolicy::Reject`] for a code point
    /// above 255.
    #[inline]
    #[must_use]
    pub fn map(&self, ch: char) -> Option<u8> {
        let cp = u32::from(ch);
        match u8::try_from(cp) {
            Ok(byte) => Some(self.lut[byte as usize]),
            Err(_) => match self.policy {
                OverflowPolicy::Saturate => Some(u8::MAX),
                OverflowPolicy::Truncate => Some((cp & 0xFF) as u8),
                OverflowPolicy::Reject => None,
            },
        }
    }
}

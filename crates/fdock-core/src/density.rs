#![forbid(unsafe_code)]

//! Density-independent to physical pixel conversion.

/// Display density scalar (physical pixels per density-independent pixel).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Density(f32);

impl Density {
    /// 1 dp == 1 px.
    pub const BASELINE: Density = Density(1.0);

    /// Create a density scalar. Non-finite or non-positive values fall back
    /// to [`Density::BASELINE`].
    #[must_use]
    pub fn new(scale: f32) -> Self {
        if scale.is_finite() && scale > 0.0 {
            Self(scale)
        } else {
            Self::BASELINE
        }
    }

    #[inline]
    #[must_use]
    pub const fn scale(self) -> f32 {
        self.0
    }

    /// Convert dp to px, truncating toward zero.
    #[inline]
    #[must_use]
    pub fn dp_to_px(self, dp: u32) -> i32 {
        (dp as f32 * self.0) as i32
    }
}

impl Default for Density {
    fn default() -> Self {
        Self::BASELINE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_and_truncates() {
        let d = Density::new(2.625);
        assert_eq!(d.dp_to_px(48), 126);
        assert_eq!(d.dp_to_px(8), 21);
        assert_eq!(d.dp_to_px(0), 0);
    }

    #[test]
    fn rejects_invalid_scale() {
        assert_eq!(Density::new(0.0), Density::BASELINE);
        assert_eq!(Density::new(-1.5), Density::BASELINE);
        assert_eq!(Density::new(f32::NAN), Density::BASELINE);
    }
}

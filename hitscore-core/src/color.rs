//! Colors and interpolation.

#[cfg(test)]
use proptest_derive::Arbitrary;

/// An RGBA color with components in the conventional `0.0..=1.0` range.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(test, derive(Arbitrary))]
pub struct Color {
    /// Red component.
    pub r: f32,
    /// Green component.
    pub g: f32,
    /// Blue component.
    pub b: f32,
    /// Alpha component.
    pub a: f32,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Color = Color::new(1., 1., 1., 1.);

    /// Creates a new `Color`.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Linearly interpolates between `self` and `other`.
    ///
    /// `t` is clamped to `0.0..=1.0`, so `t = 0` returns `self` and `t = 1` returns `other`.
    #[inline]
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0., 1.);
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Returns the components as an `[r, g, b, a]` array.
    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[f32; 4]> for Color {
    #[inline]
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Color> for [f32; 4] {
    #[inline]
    fn from(color: Color) -> Self {
        color.to_array()
    }
}

/// Returns how far `value` lies between `from` and `to`, clamped to `0.0..=1.0`.
///
/// Returns `0` when `from` and `to` are equal.
#[inline]
pub fn inverse_lerp(from: f32, to: f32, value: f32) -> f32 {
    if from == to {
        return 0.;
    }

    ((value - from) / (to - from)).clamp(0., 1.)
}

//! Cut scores.

#[cfg(test)]
use proptest_derive::Arbitrary;

/// The highest total a single cut can be awarded before multipliers.
pub const MAX_SCORE: i32 = 115;

/// The three-part score of a single cut, as computed by the game before multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(test, derive(Arbitrary))]
pub struct RawScore {
    /// Points for the swing angle before the cut, up to 70.
    pub before_cut: i32,
    /// Points for the swing angle after the cut, up to 30.
    pub after_cut: i32,
    /// Points for the cut distance from the note center, up to 15.
    pub cut_distance: i32,
}

impl RawScore {
    /// Creates a new `RawScore`.
    #[inline]
    pub const fn new(before_cut: i32, after_cut: i32, cut_distance: i32) -> Self {
        Self {
            before_cut,
            after_cut,
            cut_distance,
        }
    }

    /// Returns the sum of all three parts.
    #[inline]
    pub fn total(self) -> i32 {
        self.before_cut
            .saturating_add(self.after_cut)
            .saturating_add(self.cut_distance)
    }

    /// Returns the total as a percentage of [`MAX_SCORE`].
    #[inline]
    pub fn percentage(self) -> f64 {
        f64::from(self.total()) / f64::from(MAX_SCORE) * 100.
    }
}

//! Judgments, segments and their lookup.
use alloc::{string::String, vec::Vec};

#[cfg(test)]
use proptest::prelude::*;
#[cfg(test)]
use proptest_derive::Arbitrary;

use crate::color::{inverse_lerp, Color};

/// A scoring tier.
///
/// Judgments are kept in tables sorted by strictly descending threshold, so index `0` is the
/// highest tier.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(test, derive(Arbitrary))]
pub struct Judgment {
    /// The lowest total score that qualifies for this tier.
    pub threshold: i32,
    /// Text to display, interpreted according to the display mode.
    pub text: Option<String>,
    /// Color of the score effect.
    pub color: Option<Color>,
    /// Whether to fade the color towards the next higher tier's color.
    pub fade: bool,
    /// Path to an image to show instead of, or together with, the text.
    pub image_path: Option<String>,
    /// Path to a sound to play once.
    pub sound_path: Option<String>,
    /// Volume of the sound, `1.0` if unset.
    pub sound_volume: Option<f32>,
}

/// An entry of one of the per-axis segment tables, substituted inline into the judgment text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(test, derive(Arbitrary))]
pub struct Segment {
    /// The lowest axis score that qualifies for this segment.
    pub threshold: i32,
    /// The substituted text.
    pub text: String,
}

/// The three per-axis segment tables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SegmentTables {
    /// Segments keyed by the before-cut swing angle score.
    pub before_cut_angle: Vec<Segment>,
    /// Segments keyed by the cut distance (accuracy) score.
    pub accuracy: Vec<Segment>,
    /// Segments keyed by the after-cut swing angle score.
    pub after_cut_angle: Vec<Segment>,
}

/// Something with a threshold that can be looked up in a descending table.
pub trait Tier {
    /// Returns the threshold of this entry.
    fn threshold(&self) -> i32;
}

impl Tier for Judgment {
    #[inline]
    fn threshold(&self) -> i32 {
        self.threshold
    }
}

impl Tier for Segment {
    #[inline]
    fn threshold(&self) -> i32 {
        self.threshold
    }
}

/// Returns the index of the best judgment for `score`.
///
/// This is the first judgment whose threshold is at most `score`. If no judgment qualifies, the
/// last index is returned, so a score below every threshold still gets the lowest tier. Returns
/// `None` only for an empty table.
pub fn best_judgment<T: Tier>(judgments: &[T], score: i32) -> Option<usize> {
    if judgments.is_empty() {
        return None;
    }

    let index = judgments
        .iter()
        .position(|judgment| score >= judgment.threshold())
        .unwrap_or(judgments.len() - 1);
    Some(index)
}

/// Returns the best segment for `score`.
///
/// This is the first segment whose threshold is at most `score`, or the first segment if none
/// qualifies. Returns `None` only for an empty table.
pub fn best_segment<T: Tier>(segments: &[T], score: i32) -> Option<&T> {
    segments
        .iter()
        .find(|segment| score >= segment.threshold())
        .or_else(|| segments.first())
}

/// Returns the index of the first entry that breaks the strictly descending threshold order.
pub fn first_out_of_order<T: Tier>(tiers: &[T]) -> Option<usize> {
    tiers
        .windows(2)
        .position(|xs| xs[0].threshold() <= xs[1].threshold())
        .map(|i| i + 1)
}

/// Computes the color of the judgment at `index` for `score`.
///
/// Fading judgments below the top tier interpolate from their own color at their threshold to
/// the next higher tier's color at that tier's threshold. If the higher tier has no color, the
/// judgment's own color is used.
///
/// # Panics
///
/// Panics if `index` is out of bounds.
pub fn judgment_color(judgments: &[Judgment], index: usize, score: i32) -> Option<Color> {
    let judgment = &judgments[index];
    let color = judgment.color?;

    if !judgment.fade || index == 0 {
        return Some(color);
    }

    let higher = &judgments[index - 1];
    let Some(higher_color) = higher.color else {
        return Some(color);
    };

    let t = inverse_lerp(
        judgment.threshold as f32,
        higher.threshold as f32,
        score as f32,
    );
    Some(color.lerp(higher_color, t))
}

#[cfg(test)]
fn descending_thresholds() -> impl Strategy<Value = Vec<i32>> {
    proptest::collection::btree_set(-200..200i32, 1..12)
        .prop_map(|set| set.into_iter().rev().collect())
}

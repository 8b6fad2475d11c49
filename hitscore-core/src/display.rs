//! Display modes.

#[cfg(test)]
use proptest_derive::Arbitrary;

/// How a judgment is rendered onto the score effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(test, derive(Arbitrary))]
pub enum DisplayMode {
    /// The judgment text is a format string, expanded with the cut score.
    #[default]
    Format,
    /// Only the game's own numeric score is shown.
    Numeric,
    /// The game's numeric score, with the judgment text below it.
    ScoreOnTop,
    /// Only the expanded judgment text is shown, images are never displayed.
    TextOnly,
    /// The judgment text, with the game's numeric score below it.
    TextOnTop,
    /// Only the judgment image is shown.
    ImageOnly,
    /// The judgment image together with the expanded judgment text.
    ImageAndText,
}

impl DisplayMode {
    /// Returns `true` if this mode shows judgment images.
    #[inline]
    pub fn shows_images(self) -> bool {
        matches!(self, DisplayMode::ImageOnly | DisplayMode::ImageAndText)
    }

    /// Returns `true` if this mode expands the judgment text as a format string.
    #[inline]
    pub fn expands_format(self) -> bool {
        matches!(
            self,
            DisplayMode::Format | DisplayMode::TextOnly | DisplayMode::ImageAndText
        )
    }
}

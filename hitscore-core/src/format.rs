//! Expansion of judgment format strings.
//!
//! A format string is copied verbatim except for two-character directives starting with `%`:
//!
//! | directive | expands to |
//! |---|---|
//! | `%b` | before-cut score |
//! | `%c` | cut distance score |
//! | `%a` | after-cut score |
//! | `%s` | total score |
//! | `%p` | total score as a percentage of [`MAX_SCORE`](crate::score::MAX_SCORE), two decimals |
//! | `%n` | a newline |
//! | `%B` | best before-cut angle segment text |
//! | `%C` | best accuracy segment text |
//! | `%A` | best after-cut angle segment text |
//!
//! Any other character after `%`, including another `%`, is emitted unchanged together with the
//! `%`.
use alloc::string::String;
use core::fmt::Write;

use crate::{
    judgment::{best_segment, Segment, SegmentTables},
    score::RawScore,
};

/// Expands `template` for the given cut score.
pub fn expand(template: &str, score: RawScore, segments: &SegmentTables) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let Some(directive) = chars.next() else {
            out.push('%');
            break;
        };

        // Writing into a `String` can't fail.
        let _ = match directive {
            'b' => write!(out, "{}", score.before_cut),
            'c' => write!(out, "{}", score.cut_distance),
            'a' => write!(out, "{}", score.after_cut),
            's' => write!(out, "{}", score.total()),
            'p' => write!(out, "{:.2}", score.percentage()),
            'n' => {
                out.push('\n');
                Ok(())
            }
            'B' => {
                push_segment(&mut out, &segments.before_cut_angle, score.before_cut);
                Ok(())
            }
            'C' => {
                push_segment(&mut out, &segments.accuracy, score.cut_distance);
                Ok(())
            }
            'A' => {
                push_segment(&mut out, &segments.after_cut_angle, score.after_cut);
                Ok(())
            }
            other => {
                out.push('%');
                out.push(other);
                Ok(())
            }
        };
    }

    out
}

fn push_segment(out: &mut String, segments: &[Segment], score: i32) {
    if let Some(segment) = best_segment(segments, score) {
        out.push_str(&segment.text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{borrow::ToOwned, vec};
    use proptest::prelude::*;

    fn segments() -> SegmentTables {
        let table = |high: i32, text: &str| {
            vec![
                Segment {
                    threshold: high,
                    text: text.to_owned(),
                },
                Segment {
                    threshold: 0,
                    text: " ".to_owned(),
                },
            ]
        };

        SegmentTables {
            before_cut_angle: table(70, "+"),
            accuracy: table(15, "*"),
            after_cut_angle: table(30, "+"),
        }
    }

    #[test]
    fn numbers() {
        let score = RawScore::new(65, 28, 12);
        assert_eq!(expand("%b %a %c = %s", score, &segments()), "65 28 12 = 105");
    }

    #[test]
    fn percentage() {
        let segments = segments();
        assert_eq!(expand("%p", RawScore::new(0, 0, 0), &segments), "0.00");
        assert_eq!(expand("%p", RawScore::new(70, 30, 15), &segments), "100.00");
        assert_eq!(expand("%p%%", RawScore::new(70, 30, 0), &segments), "86.96%%");
    }

    #[test]
    fn newline() {
        let score = RawScore::new(70, 30, 15);
        assert_eq!(expand("Fantastic%n%s", score, &segments()), "Fantastic\n115");
    }

    #[test]
    fn segment_directives() {
        let segments = segments();
        assert_eq!(
            expand("%BGreat%A%C", RawScore::new(70, 29, 15), &segments),
            "+Great *"
        );
        assert_eq!(
            expand("%BGreat%A%C", RawScore::new(60, 30, 3), &segments),
            " Great+ "
        );
    }

    #[test]
    fn empty_segment_tables() {
        let score = RawScore::new(70, 30, 15);
        assert_eq!(expand("[%B%C%A]", score, &SegmentTables::default()), "[]");
    }

    #[test]
    fn unknown_directives_are_kept() {
        let score = RawScore::new(1, 2, 3);
        assert_eq!(
            expand("<size=80%>Good</size>", score, &segments()),
            "<size=80%>Good</size>"
        );
        assert_eq!(expand("%x%%%", score, &segments()), "%x%%%");
        assert_eq!(expand("50%", score, &segments()), "50%");
    }

    proptest! {
        #[test]
        fn no_directives_is_identity(template in "[^%]*", score: RawScore) {
            prop_assert_eq!(expand(&template, score, &segments()), template.to_owned());
        }

        #[test]
        fn expand_doesnt_panic(template in "\\PC*", score: RawScore) {
            let _ = expand(&template, score, &segments());
        }
    }
}

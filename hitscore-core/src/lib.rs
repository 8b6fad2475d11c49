//! `hitscore-core` is a crate that provides the judgment model for a hit score visualizer: score
//! tiers, per-axis segments, tier lookup, color fading and judgment text formatting.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod color;
pub mod display;
pub mod format;
pub mod judgment;
pub mod score;

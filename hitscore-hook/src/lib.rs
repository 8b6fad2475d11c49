//! The hit score visualizer module.
//!
//! The host runtime calls into the [`Interceptor`] from hooks installed over its scoring and
//! menu methods. The interceptor resolves judgments for cut scores and applies them to the live
//! score effects through the [`Host`](host::Host) object interface.

#![warn(missing_docs)]

#[macro_use]
extern crate tracing;

use tracing_subscriber::prelude::*;

pub mod assets;
pub mod context;
pub mod effect;
mod error;
pub mod hooks;
pub mod host;
mod interceptor;
pub mod judge;
pub mod notify;
pub mod state;

pub use error::JudgeError;
pub use interceptor::{Interceptor, PresentArgs, GAME_SCENE};

/// Sets up logging to stdout.
///
/// Does nothing if logging is already set up.
pub fn init_logging() {
    let result = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::LevelFilter::DEBUG)
        .try_init();

    if result.is_ok() {
        info!(
            "{} version {}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
        );
    }
}

use thiserror::Error;

use crate::host::HostError;

/// Why a judgment, or one step of it, wasn't shown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JudgeError {
    /// The config failed to load. Nothing is shown until it loads again.
    #[error("the config is invalid")]
    ConfigInvalid,
    /// The judgment table is empty.
    #[error("no judgment matches")]
    NoMatch,
    /// A context or an asset that the judgment needs wasn't found.
    #[error("{0} not found")]
    LookupMiss(String),
    /// The display mode needs a judgment field that isn't set.
    #[error("the judgment has no {0}")]
    MissingField(&'static str),
    /// A host call failed.
    #[error(transparent)]
    Host(#[from] HostError),
}

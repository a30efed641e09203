use std::{io, result::Result as StdResult};

use thiserror::Error;

/// Convenient result type for the crate.
pub type Result<T> = StdResult<T, Error>;

/// Errors surfaced by rendering and handlers.
///
/// Pattern problems are never errors: unknown directives degrade to literal
/// text and missing fields to fixed fallbacks.
#[derive(Debug, Error)]
pub enum Error {
    /// A record value has no JSON representation (JSON mode only).
    #[error("failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),

    /// The destination writer failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A handler configuration document could not be parsed.
    #[error("invalid handler config: {0}")]
    Config(String),
}

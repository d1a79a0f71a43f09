//! Error types for rasterkit operations.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in rasterkit operations.
///
/// Recoverable misuse such as a non-positive radius is not represented here:
/// those draws are logged and skipped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Structurally invalid input (wrong control point count, bad split parameter).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid dimensions for a framebuffer.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },
}

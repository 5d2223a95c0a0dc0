//! Error types for swatch-color.

use thiserror::Error;

/// Errors raised by the conversion utilities.
///
/// Malformed input is always reported; nothing here clamps or coerces a bad value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Hex code is not exactly six hex digits (an optional leading `#` is allowed).
    #[error("invalid hex color: {0:?} (expected 6 hex digits)")]
    InvalidHex(String),

    /// Integer RGB channel outside 0-255.
    #[error("{channel} channel out of range: {value} (expected 0-255)")]
    ChannelOutOfRange {
        /// Channel name (`r`, `g` or `b`)
        channel: char,
        /// Offending value
        value: i64,
    },

    /// NaN or infinite Lab component.
    #[error("non-finite Lab component")]
    NonFinite,
}

//! Error types for palette operations

use thiserror::Error;

/// Error returned when a hex color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseColorError {
    /// Hex digits are not 3 or 6 characters long (after stripping '#')
    #[error("invalid hex color length for {0:?} (expected 3 or 6 digits)")]
    InvalidLength(String),
    /// Something other than a hex digit after the optional '#'
    #[error("invalid hex digits in {0:?}")]
    InvalidHex(String),
}

/// Error returned when a palette cannot be used for matching.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaletteError {
    /// No colors provided
    #[error("palette cannot be empty")]
    EmptyPalette,
    /// A palette entry failed to parse
    #[error("invalid palette color at index {index}: {source}")]
    ParseColor {
        /// Position of the offending entry
        index: usize,
        /// Underlying parse failure
        #[source]
        source: ParseColorError,
    },
}

//! Framing error types

use thiserror::Error;

use super::MessageFlags;

/// Errors raised while parsing a frame header
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Buffer too small
    #[error("buffer too small: need {needed} bytes, got {got}")]
    BufferTooSmall {
        /// Needed size
        needed: usize,
        /// Actual size
        got: usize,
    },

    /// Header size does not match the header version
    #[error("invalid header: {num_bytes} bytes for header version {version}")]
    InvalidHeaderSize {
        /// Declared header size
        num_bytes: u32,
        /// Declared header version
        version: u32,
    },

    /// Unknown or contradictory flag value
    #[error("invalid message flags: {flags:#x}")]
    InvalidFlags {
        /// Raw flags word
        flags: u32,
    },

    /// Flags need a request id but the header has no room for one
    #[error("flags {flags} require a request id but the header is version 0")]
    MissingRequestId {
        /// Flags found in the header
        flags: MessageFlags,
    },

    /// Frame too large
    #[error("message too large: {size} bytes (max {max})")]
    MessageTooLarge {
        /// Frame size
        size: usize,
        /// Maximum allowed
        max: usize,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

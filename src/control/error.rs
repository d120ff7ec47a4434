//! Control channel error types

use thiserror::Error;

use crate::protocol::MessageFlags;

/// Failures decoding a control payload
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Payload ends before the struct it declares
    #[error("payload truncated: need {needed} bytes, got {got}")]
    Truncated {
        /// Needed size
        needed: usize,
        /// Actual size
        got: usize,
    },

    /// Bytes left over after the declared struct
    #[error("payload size mismatch: struct declares {declared} bytes, payload has {actual}")]
    SizeMismatch {
        /// Size from the struct header
        declared: usize,
        /// Payload size
        actual: usize,
    },

    /// Struct size not valid for its version
    #[error("unsupported struct layout: {num_bytes} bytes at version {version}")]
    UnsupportedLayout {
        /// Declared struct size
        num_bytes: u32,
        /// Declared struct version
        version: u32,
    },

    /// Union slot with a size other than 0 or 16
    #[error("invalid union size: {0}")]
    InvalidUnionSize(u32),

    /// Union tag not known for this payload
    #[error("unknown union tag: {0}")]
    UnknownTag(u32),

    /// Null union where a value is required
    #[error("unexpected null union")]
    UnexpectedNull,

    /// Union value not valid for its tag
    #[error("invalid value {value:#x} for union tag {tag}")]
    InvalidUnionValue {
        /// Union tag
        tag: u32,
        /// Raw union value
        value: u64,
    },
}

/// Reasons a control message is rejected
///
/// Every variant is fatal to the message. The transport is expected to close
/// the pipe when it sees one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Message routed to the wrong control operation
    #[error("wrong ordinal: expected {expected:#x}, got {found:#x}")]
    WrongOrdinal {
        /// Ordinal of the attempted operation
        expected: u32,
        /// Ordinal carried by the message
        found: u32,
    },

    /// Request/response operation given a message not expecting a reply
    #[error("not a request expecting a response (flags {found})")]
    NotARequestExpectingResponse {
        /// Flags carried by the message
        found: MessageFlags,
    },

    /// Fire-and-forget operation given a message that is not
    #[error("not a request without response (flags {found})")]
    NotARequestWithoutResponse {
        /// Flags carried by the message
        found: MessageFlags,
    },

    /// Reply handling given a message that is not a reply
    #[error("not a response (flags {found})")]
    NotAResponse {
        /// Flags carried by the message
        found: MessageFlags,
    },

    /// Payload failed to decode
    #[error("malformed payload: {0}")]
    MalformedPayload(#[from] DecodeError),

    /// Reply carried no output for a version query
    #[error("run response carried no output")]
    MissingOutput,
}

//! Message framing shared by both ends of a pipe
//!
//! This module provides the frame header, message flags, and the codec that
//! turns raw frames into [`Message`] values and back.

mod codec;
mod error;
mod header;
mod message;
mod types;

pub use codec::{decode, encode_frame};
pub use error::{Error, Result};
pub use header::MessageHeader;
pub use message::Message;
pub use types::MessageFlags;

/// Size of a version 0 header (no request id)
pub const HEADER_SIZE_V0: usize = 16;

/// Size of a version 1 header (carries a request id)
pub const HEADER_SIZE_V1: usize = 24;

/// Maximum frame size (16 MB)
pub const MAX_MESSAGE_SIZE: usize = 16 * 1024 * 1024;

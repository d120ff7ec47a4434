//! Frame codec (encode/decode)
//!
//! Frames are the unit the transport hands over: one header immediately
//! followed by the payload. Decoding never copies; the returned [`Message`]
//! shares the caller's buffer.

use bytes::{Bytes, BytesMut};

use super::{Error, MAX_MESSAGE_SIZE, Message, MessageHeader, Result};

/// Encode a header and payload into a frame
///
/// # Format
///
/// ```text
/// [HEADER (16 or 24 bytes)] [PAYLOAD (variable)]
/// ```
#[must_use]
pub fn encode_frame(header: &MessageHeader, payload: &[u8]) -> Bytes {
    let mut frame = BytesMut::with_capacity(header.header_size() + payload.len());
    header.write_to(&mut frame);
    frame.extend_from_slice(payload);
    frame.freeze()
}

/// Decode a frame into a message
///
/// # Errors
///
/// Returns an error if:
/// - Frame exceeds [`MAX_MESSAGE_SIZE`]
/// - Buffer is shorter than the header it declares
/// - Header size does not match its version
/// - Flags are unknown, or need a request id the header lacks
pub fn decode(bytes: Bytes) -> Result<Message> {
    if bytes.len() > MAX_MESSAGE_SIZE {
        return Err(Error::MessageTooLarge {
            size: bytes.len(),
            max: MAX_MESSAGE_SIZE,
        });
    }

    let header = MessageHeader::from_bytes(&bytes)?;
    Ok(Message::from_parts(header, bytes))
}

//! Framed message

use bytes::Bytes;

use super::{MessageFlags, MessageHeader};

/// A framed message: header followed by payload
///
/// The frame is kept as a single [`Bytes`] buffer, so cloning a message and
/// slicing its payload never copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Parsed header
    header: MessageHeader,
    /// Whole frame, header included
    frame: Bytes,
}

impl Message {
    /// Create a message from its envelope fields and raw payload bytes
    pub fn new(
        ordinal: u32,
        flags: MessageFlags,
        request_id: u64,
        payload: impl AsRef<[u8]>,
    ) -> Self {
        let header = MessageHeader::new(ordinal, flags, request_id);
        let frame = super::encode_frame(&header, payload.as_ref());

        Self { header, frame }
    }

    /// Pair an already-validated header with its frame
    pub(crate) fn from_parts(header: MessageHeader, frame: Bytes) -> Self {
        debug_assert!(frame.len() >= header.header_size());
        Self { header, frame }
    }

    /// Get ordinal
    #[must_use]
    pub const fn ordinal(&self) -> u32 {
        self.header.ordinal()
    }

    /// Get flags
    #[must_use]
    pub const fn flags(&self) -> MessageFlags {
        self.header.flags()
    }

    /// Get request id
    #[must_use]
    pub const fn request_id(&self) -> u64 {
        self.header.request_id()
    }

    /// Byte length of the header; the payload starts here
    #[must_use]
    pub const fn header_size(&self) -> usize {
        self.header.header_size()
    }

    /// Get header
    #[must_use]
    pub const fn header(&self) -> &MessageHeader {
        &self.header
    }

    /// Payload bytes (everything after the header)
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.frame[self.header_size()..]
    }

    /// The whole frame
    #[must_use]
    pub fn as_bytes(&self) -> &Bytes {
        &self.frame
    }

    /// Total frame length
    #[must_use]
    pub fn len(&self) -> usize {
        self.frame.len()
    }

    /// Check if the frame is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frame.is_empty()
    }

    /// Consume the message, returning the frame
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.frame
    }

    /// Decode message from a received frame
    pub fn decode(bytes: impl Into<Bytes>) -> super::Result<Self> {
        super::decode(bytes.into())
    }
}

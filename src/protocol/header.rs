//! Frame header
//!
//! Two header versions exist. Version 0 is 16 bytes and is used for messages
//! that expect no reply; version 1 appends the 8-byte request id.

use bytes::{Buf, BufMut};

use super::{Error, HEADER_SIZE_V0, HEADER_SIZE_V1, MessageFlags, Result};

/// Frame header
///
/// # Wire Format
///
/// ```text
/// 0                   1                   2                   3
/// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                      Header Size (4)                          |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                      Header Version (4)                       |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                         Ordinal (4)                           |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                          Flags (4)                            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// +                 Request ID (8, version >= 1)                  +
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader {
    num_bytes: u32,
    version: u32,
    ordinal: u32,
    flags: MessageFlags,
    request_id: u64,
}

impl MessageHeader {
    /// Create a header, choosing the smallest version able to carry `flags`.
    ///
    /// The request id is dropped when `flags` is [`MessageFlags::None`].
    #[must_use]
    pub const fn new(ordinal: u32, flags: MessageFlags, request_id: u64) -> Self {
        if flags.has_request_id() {
            Self {
                num_bytes: HEADER_SIZE_V1 as u32,
                version: 1,
                ordinal,
                flags,
                request_id,
            }
        } else {
            Self {
                num_bytes: HEADER_SIZE_V0 as u32,
                version: 0,
                ordinal,
                flags,
                request_id: 0,
            }
        }
    }

    /// Size of the header in bytes
    #[must_use]
    pub const fn header_size(&self) -> usize {
        self.num_bytes as usize
    }

    /// Header version
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Get ordinal
    #[must_use]
    pub const fn ordinal(&self) -> u32 {
        self.ordinal
    }

    /// Get flags
    #[must_use]
    pub const fn flags(&self) -> MessageFlags {
        self.flags
    }

    /// Get request id (zero for version 0 headers)
    #[must_use]
    pub const fn request_id(&self) -> u64 {
        self.request_id
    }

    /// Append the header to `buf` (little-endian)
    pub fn write_to<B: BufMut>(&self, buf: &mut B) {
        buf.put_u32_le(self.num_bytes);
        buf.put_u32_le(self.version);
        buf.put_u32_le(self.ordinal);
        buf.put_u32_le(self.flags.as_u32());
        if self.version >= 1 {
            buf.put_u64_le(self.request_id);
        }
    }

    /// Convert to bytes (little-endian)
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.header_size());
        self.write_to(&mut bytes);
        bytes
    }

    /// Parse from the start of a frame (little-endian)
    ///
    /// The header is validated against the frame length, so `bytes` should be
    /// the whole frame rather than just the header.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE_V0 {
            return Err(Error::BufferTooSmall {
                needed: HEADER_SIZE_V0,
                got: bytes.len(),
            });
        }

        let mut cursor = bytes;
        let num_bytes = cursor.get_u32_le();
        let version = cursor.get_u32_le();

        let layout_ok = match version {
            0 => num_bytes as usize == HEADER_SIZE_V0,
            1 => num_bytes as usize == HEADER_SIZE_V1,
            _ => num_bytes as usize >= HEADER_SIZE_V1,
        };
        if !layout_ok {
            return Err(Error::InvalidHeaderSize { num_bytes, version });
        }

        if num_bytes as usize > bytes.len() {
            return Err(Error::BufferTooSmall {
                needed: num_bytes as usize,
                got: bytes.len(),
            });
        }

        let ordinal = cursor.get_u32_le();
        let raw_flags = cursor.get_u32_le();
        let flags =
            MessageFlags::from_u32(raw_flags).ok_or(Error::InvalidFlags { flags: raw_flags })?;

        let request_id = if version >= 1 { cursor.get_u64_le() } else { 0 };
        if version == 0 && flags.has_request_id() {
            return Err(Error::MissingRequestId { flags });
        }

        Ok(Self {
            num_bytes,
            version,
            ordinal,
            flags,
            request_id,
        })
    }
}

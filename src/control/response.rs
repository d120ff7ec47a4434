//! Outgoing control message construction

use bytes::BytesMut;

use crate::protocol::{Message, MessageFlags, MessageHeader};

use super::wire::WireStruct;

/// Build a framed message carrying `value` as its payload
///
/// The header size follows from `flags` and the payload size from
/// [`WireStruct::encoded_len`], so the frame length always equals
/// `header_size + encoded_len`.
#[must_use]
pub fn build_message<T: WireStruct>(
    ordinal: u32,
    flags: MessageFlags,
    request_id: u64,
    value: &T,
) -> Message {
    let header = MessageHeader::new(ordinal, flags, request_id);
    let total_size = header.header_size() + value.encoded_len();

    let mut frame = BytesMut::with_capacity(total_size);
    header.write_to(&mut frame);
    value.encode(&mut frame);
    debug_assert_eq!(frame.len(), total_size, "encoded_len disagrees with encode");

    Message::from_parts(header, frame.freeze())
}

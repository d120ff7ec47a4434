//! Control payload shapes and their wire codec
//!
//! Every control payload is a 24-byte struct: an 8-byte struct header followed
//! by one 16-byte union slot.
//!
//! ```text
//! [NUM_BYTES (4)] [VERSION (4)] [UNION SIZE (4)] [UNION TAG (4)] [UNION VALUE (8)]
//! ```
//!
//! A null union has size, tag and value all zero.

use bytes::{Buf, BufMut};

use super::DecodeError;

/// Ordinal of the request/response control operation
pub const RUN_MESSAGE_ID: u32 = 0xFFFF_FFFF;

/// Ordinal of the fire-and-forget control operation
pub const RUN_OR_CLOSE_PIPE_MESSAGE_ID: u32 = 0xFFFF_FFFE;

/// Struct header size in bytes
pub const STRUCT_HEADER_SIZE: usize = 8;

/// Union slot size in bytes
pub const UNION_SIZE: usize = 16;

/// Encoded size of every control payload
pub const PARAMS_SIZE: usize = STRUCT_HEADER_SIZE + UNION_SIZE;

/// Check whether an ordinal is reserved for the control channel
#[must_use]
pub const fn is_control_ordinal(ordinal: u32) -> bool {
    ordinal == RUN_MESSAGE_ID || ordinal == RUN_OR_CLOSE_PIPE_MESSAGE_ID
}

/// A payload struct with a fixed wire layout
pub trait WireStruct: Sized {
    /// Number of bytes [`WireStruct::encode`] appends
    fn encoded_len(&self) -> usize;

    /// Append the encoded struct to `buf`
    fn encode<B: BufMut>(&self, buf: &mut B);

    /// Decode a struct occupying exactly `bytes`
    fn decode(bytes: &[u8]) -> Result<Self, DecodeError>;
}

/// "I require at least this interface version"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RequireVersion {
    /// Minimum acceptable version
    pub version: u32,
}

/// Answer to a version query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryVersionResult {
    /// Version implemented by the answering end
    pub version: u32,
}

/// Input of a `Run` request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunInput {
    /// Ask the remote end for its interface version
    QueryVersion,
    /// Reserved; carried on the wire but not interpreted by the handler
    RequireVersion(RequireVersion),
}

/// Payload of a [`RUN_MESSAGE_ID`] request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunMessageParams {
    /// What the caller asks for
    pub input: RunInput,
}

impl RunMessageParams {
    /// A version query
    #[must_use]
    pub const fn query_version() -> Self {
        Self {
            input: RunInput::QueryVersion,
        }
    }

    /// Check whether this request queries the version
    #[must_use]
    pub const fn queries_version(&self) -> bool {
        matches!(self.input, RunInput::QueryVersion)
    }
}

/// Input of a `RunOrClosePipe` request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunOrClosePipeInput {
    /// Close the pipe unless this version is supported
    RequireVersion(RequireVersion),
}

/// Payload of a [`RUN_OR_CLOSE_PIPE_MESSAGE_ID`] request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunOrClosePipeMessageParams {
    /// The assertion to check
    pub input: RunOrClosePipeInput,
}

impl RunOrClosePipeMessageParams {
    /// Require at least `version`
    #[must_use]
    pub const fn require_version(version: u32) -> Self {
        Self {
            input: RunOrClosePipeInput::RequireVersion(RequireVersion { version }),
        }
    }

    /// The minimum version the sender requires
    #[must_use]
    pub const fn required_version(&self) -> u32 {
        match self.input {
            RunOrClosePipeInput::RequireVersion(RequireVersion { version }) => version,
        }
    }
}

/// Output of a `Run` request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunOutput {
    /// Answer to [`RunInput::QueryVersion`]
    QueryVersionResult(QueryVersionResult),
}

/// Payload of the reply to a [`RUN_MESSAGE_ID`] request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunResponseMessageParams {
    /// `None` when the request asked for nothing the handler answers
    pub output: Option<RunOutput>,
}

impl RunResponseMessageParams {
    /// The version carried by a query answer, if any
    #[must_use]
    pub const fn queried_version(&self) -> Option<u32> {
        match self.output {
            Some(RunOutput::QueryVersionResult(QueryVersionResult { version })) => Some(version),
            None => None,
        }
    }
}

/// One populated union slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct UnionSlot {
    tag: u32,
    value: u64,
}

const RUN_INPUT_QUERY_VERSION: u32 = 0;
const RUN_INPUT_REQUIRE_VERSION: u32 = 1;
const RUN_OR_CLOSE_PIPE_INPUT_REQUIRE_VERSION: u32 = 0;
const RUN_OUTPUT_QUERY_VERSION_RESULT: u32 = 0;

fn put_params<B: BufMut>(buf: &mut B, slot: Option<UnionSlot>) {
    buf.put_u32_le(PARAMS_SIZE as u32);
    buf.put_u32_le(0);
    match slot {
        Some(UnionSlot { tag, value }) => {
            buf.put_u32_le(UNION_SIZE as u32);
            buf.put_u32_le(tag);
            buf.put_u64_le(value);
        }
        None => {
            buf.put_u32_le(0);
            buf.put_u32_le(0);
            buf.put_u64_le(0);
        }
    }
}

fn read_params(bytes: &[u8]) -> Result<Option<UnionSlot>, DecodeError> {
    if bytes.len() < STRUCT_HEADER_SIZE {
        return Err(DecodeError::Truncated {
            needed: STRUCT_HEADER_SIZE,
            got: bytes.len(),
        });
    }

    let mut cursor = bytes;
    let num_bytes = cursor.get_u32_le();
    let version = cursor.get_u32_le();

    let layout_ok = match version {
        0 => num_bytes as usize == PARAMS_SIZE,
        _ => num_bytes as usize >= PARAMS_SIZE,
    };
    if !layout_ok {
        return Err(DecodeError::UnsupportedLayout { num_bytes, version });
    }

    let declared = num_bytes as usize;
    if declared > bytes.len() {
        return Err(DecodeError::Truncated {
            needed: declared,
            got: bytes.len(),
        });
    }
    if declared < bytes.len() {
        return Err(DecodeError::SizeMismatch {
            declared,
            actual: bytes.len(),
        });
    }

    let size = cursor.get_u32_le();
    let tag = cursor.get_u32_le();
    let value = cursor.get_u64_le();

    match size as usize {
        0 if tag == 0 && value == 0 => Ok(None),
        0 => Err(DecodeError::InvalidUnionValue { tag, value }),
        UNION_SIZE => Ok(Some(UnionSlot { tag, value })),
        _ => Err(DecodeError::InvalidUnionSize(size)),
    }
}

fn version_value(tag: u32, value: u64) -> Result<u32, DecodeError> {
    u32::try_from(value).map_err(|_| DecodeError::InvalidUnionValue { tag, value })
}

impl WireStruct for RunMessageParams {
    fn encoded_len(&self) -> usize {
        PARAMS_SIZE
    }

    fn encode<B: BufMut>(&self, buf: &mut B) {
        let slot = match self.input {
            RunInput::QueryVersion => UnionSlot {
                tag: RUN_INPUT_QUERY_VERSION,
                value: 0,
            },
            RunInput::RequireVersion(RequireVersion { version }) => UnionSlot {
                tag: RUN_INPUT_REQUIRE_VERSION,
                value: u64::from(version),
            },
        };
        put_params(buf, Some(slot));
    }

    fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let UnionSlot { tag, value } = read_params(bytes)?.ok_or(DecodeError::UnexpectedNull)?;
        let input = match tag {
            RUN_INPUT_QUERY_VERSION if value == 0 => RunInput::QueryVersion,
            RUN_INPUT_QUERY_VERSION => return Err(DecodeError::InvalidUnionValue { tag, value }),
            RUN_INPUT_REQUIRE_VERSION => RunInput::RequireVersion(RequireVersion {
                version: version_value(tag, value)?,
            }),
            _ => return Err(DecodeError::UnknownTag(tag)),
        };
        Ok(Self { input })
    }
}

impl WireStruct for RunOrClosePipeMessageParams {
    fn encoded_len(&self) -> usize {
        PARAMS_SIZE
    }

    fn encode<B: BufMut>(&self, buf: &mut B) {
        let slot = match self.input {
            RunOrClosePipeInput::RequireVersion(RequireVersion { version }) => UnionSlot {
                tag: RUN_OR_CLOSE_PIPE_INPUT_REQUIRE_VERSION,
                value: u64::from(version),
            },
        };
        put_params(buf, Some(slot));
    }

    fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let UnionSlot { tag, value } = read_params(bytes)?.ok_or(DecodeError::UnexpectedNull)?;
        match tag {
            RUN_OR_CLOSE_PIPE_INPUT_REQUIRE_VERSION => {
                Ok(Self::require_version(version_value(tag, value)?))
            }
            _ => Err(DecodeError::UnknownTag(tag)),
        }
    }
}

impl WireStruct for RunResponseMessageParams {
    fn encoded_len(&self) -> usize {
        PARAMS_SIZE
    }

    fn encode<B: BufMut>(&self, buf: &mut B) {
        let slot = self.output.map(|output| match output {
            RunOutput::QueryVersionResult(QueryVersionResult { version }) => UnionSlot {
                tag: RUN_OUTPUT_QUERY_VERSION_RESULT,
                value: u64::from(version),
            },
        });
        put_params(buf, slot);
    }

    fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let Some(UnionSlot { tag, value }) = read_params(bytes)? else {
            return Ok(Self { output: None });
        };
        match tag {
            RUN_OUTPUT_QUERY_VERSION_RESULT => Ok(Self {
                output: Some(RunOutput::QueryVersionResult(QueryVersionResult {
                    version: version_value(tag, value)?,
                })),
            }),
            _ => Err(DecodeError::UnknownTag(tag)),
        }
    }
}

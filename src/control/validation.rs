//! Control message validation
//!
//! Checks run in a fixed order: flags, then ordinal, then payload. The payload
//! is never decoded when an envelope check has already failed.

use crate::protocol::{Message, MessageFlags};

use super::ValidationError;
use super::wire::{
    RUN_MESSAGE_ID, RUN_OR_CLOSE_PIPE_MESSAGE_ID, RunMessageParams, RunOrClosePipeMessageParams,
    RunResponseMessageParams, WireStruct,
};

fn expect_ordinal(message: &Message, expected: u32) -> Result<(), ValidationError> {
    if message.ordinal() == expected {
        Ok(())
    } else {
        Err(ValidationError::WrongOrdinal {
            expected,
            found: message.ordinal(),
        })
    }
}

/// Validate a `Run` request and decode its parameters
pub fn validate_request_with_response(
    message: &Message,
) -> Result<RunMessageParams, ValidationError> {
    if message.flags() != MessageFlags::ExpectsResponse {
        return Err(ValidationError::NotARequestExpectingResponse {
            found: message.flags(),
        });
    }
    expect_ordinal(message, RUN_MESSAGE_ID)?;

    Ok(RunMessageParams::decode(message.payload())?)
}

/// Validate a `RunOrClosePipe` request and decode its parameters
pub fn validate_request_without_response(
    message: &Message,
) -> Result<RunOrClosePipeMessageParams, ValidationError> {
    if message.flags() != MessageFlags::None {
        return Err(ValidationError::NotARequestWithoutResponse {
            found: message.flags(),
        });
    }
    expect_ordinal(message, RUN_OR_CLOSE_PIPE_MESSAGE_ID)?;

    Ok(RunOrClosePipeMessageParams::decode(message.payload())?)
}

/// Validate the reply to a `Run` request and decode its parameters
///
/// Matching the reply to its request by request id is left to the transport.
pub fn validate_response(message: &Message) -> Result<RunResponseMessageParams, ValidationError> {
    if message.flags() != MessageFlags::IsResponse {
        return Err(ValidationError::NotAResponse {
            found: message.flags(),
        });
    }
    expect_ordinal(message, RUN_MESSAGE_ID)?;

    Ok(RunResponseMessageParams::decode(message.payload())?)
}

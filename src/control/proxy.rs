//! Caller side of the control channel.

use tracing::{debug, trace};

use crate::protocol::{Message, MessageFlags};

use super::ValidationError;
use super::response::build_message;
use super::validation::validate_response;
use super::wire::{
    RUN_MESSAGE_ID, RUN_OR_CLOSE_PIPE_MESSAGE_ID, RunMessageParams, RunOrClosePipeMessageParams,
};

/// Tracks the version a caller believes the remote end implements and builds
/// the control requests that query or require it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlMessageProxy {
    version: u32,
}

impl ControlMessageProxy {
    /// Start from the version the caller was built against.
    #[must_use]
    pub const fn new(version: u32) -> Self {
        Self { version }
    }

    /// Version currently assumed for the remote end.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Build a version query.
    #[must_use]
    pub fn query_version_request(request_id: u64) -> Message {
        build_message(
            RUN_MESSAGE_ID,
            MessageFlags::ExpectsResponse,
            request_id,
            &RunMessageParams::query_version(),
        )
    }

    /// Consume the reply to a version query and record the reported version.
    pub fn on_query_version_response(
        &mut self,
        response: &Message,
    ) -> Result<u32, ValidationError> {
        let params = validate_response(response)?;
        let version = params.queried_version().ok_or(ValidationError::MissingOutput)?;

        debug!(
            request_id = response.request_id(),
            previous = self.version,
            version,
            "remote version updated"
        );
        self.version = version;
        Ok(version)
    }

    /// Require the remote end to support at least `version`.
    ///
    /// Returns the `RunOrClosePipe` message to send, or `None` when the
    /// requirement is already known to hold.
    pub fn require_version(&mut self, version: u32) -> Option<Message> {
        if version <= self.version {
            trace!(version, known = self.version, "requirement already satisfied");
            return None;
        }

        self.version = version;
        Some(build_message(
            RUN_OR_CLOSE_PIPE_MESSAGE_ID,
            MessageFlags::None,
            0,
            &RunOrClosePipeMessageParams::require_version(version),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::ControlMessageHandler;

    #[test]
    fn test_require_version_only_when_raised() {
        let mut proxy = ControlMessageProxy::new(2);

        assert!(proxy.require_version(1).is_none());
        assert!(proxy.require_version(2).is_none());

        let message = proxy.require_version(5).unwrap();
        assert_eq!(message.ordinal(), RUN_OR_CLOSE_PIPE_MESSAGE_ID);
        assert_eq!(message.flags(), MessageFlags::None);
        assert_eq!(proxy.version(), 5);

        assert!(proxy.require_version(5).is_none());
    }

    #[test]
    fn test_query_against_handler() {
        let handler = ControlMessageHandler::new(8);
        let mut proxy = ControlMessageProxy::new(0);
        let request = ControlMessageProxy::query_version_request(12);

        let mut reply = None;
        handler
            .accept_with_responder(&request, |message: Message| reply = Some(message))
            .unwrap();
        let reply = reply.unwrap();

        assert_eq!(proxy.on_query_version_response(&reply), Ok(8));
        assert_eq!(proxy.version(), 8);
    }

    #[test]
    fn test_empty_response_is_missing_output() {
        let mut proxy = ControlMessageProxy::new(4);
        let reply = build_message(
            RUN_MESSAGE_ID,
            MessageFlags::IsResponse,
            1,
            &crate::control::RunResponseMessageParams { output: None },
        );

        assert_eq!(
            proxy.on_query_version_response(&reply),
            Err(ValidationError::MissingOutput)
        );
        assert_eq!(proxy.version(), 4);
    }
}

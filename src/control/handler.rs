//! Callee side of the control channel.

use tracing::{debug, instrument, warn};

use crate::protocol::{Message, MessageFlags};

use super::ValidationError;
use super::metrics::ControlMetrics;
use super::response::build_message;
use super::validation::{validate_request_with_response, validate_request_without_response};
use super::wire::{
    QueryVersionResult, RUN_MESSAGE_ID, RunInput, RunOutput, RunResponseMessageParams,
    is_control_ordinal,
};

/// One-shot sink for the reply to a single request.
///
/// Taking `self` by value means a responder can be used at most once.
pub trait Responder {
    /// Hand the reply to the transport.
    fn accept(self, response: Message);
}

impl<F> Responder for F
where
    F: FnOnce(Message),
{
    fn accept(self, response: Message) {
        self(response);
    }
}

/// Answers control traffic for one bound interface.
///
/// The only configuration is the local interface version, fixed at
/// construction. Each call is independent; request/response correlation and
/// pipe lifecycle stay with the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlMessageHandler {
    interface_version: u32,
}

impl ControlMessageHandler {
    /// Create a handler for an interface implemented at `interface_version`.
    #[must_use]
    pub const fn new(interface_version: u32) -> Self {
        Self { interface_version }
    }

    /// The local interface version.
    #[must_use]
    pub const fn interface_version(&self) -> u32 {
        self.interface_version
    }

    /// Check whether `message` belongs to the control channel.
    #[must_use]
    pub const fn is_control_message(message: &Message) -> bool {
        is_control_ordinal(message.ordinal())
    }

    /// Handle a `RunOrClosePipe` message.
    ///
    /// Returns `Ok(true)` when the pipe may stay open and `Ok(false)` when the
    /// sender requires a newer version than this end implements. Closing the
    /// pipe is the caller's job.
    #[instrument(level = "debug", skip_all, fields(ordinal = message.ordinal()))]
    pub fn accept(&self, message: &Message) -> Result<bool, ValidationError> {
        let params = validate_request_without_response(message).inspect_err(|err| {
            warn!(error = %err, "rejecting run-or-close-pipe message");
            ControlMetrics::record_validation_failure();
        })?;

        let required = params.required_version();
        let keep_open = self.interface_version >= required;
        ControlMetrics::record_requirement(keep_open);

        if keep_open {
            debug!(required, local = self.interface_version, "version requirement met");
        } else {
            warn!(
                required,
                local = self.interface_version,
                "required version not supported; pipe must close"
            );
        }
        Ok(keep_open)
    }

    /// Handle a `Run` request, passing the reply to `responder`.
    ///
    /// `responder` is invoked exactly once on success and never on error.
    #[instrument(
        level = "debug",
        skip_all,
        fields(ordinal = message.ordinal(), request_id = message.request_id())
    )]
    pub fn accept_with_responder<R: Responder>(
        &self,
        message: &Message,
        responder: R,
    ) -> Result<(), ValidationError> {
        let params = validate_request_with_response(message).inspect_err(|err| {
            warn!(error = %err, "rejecting run message");
            ControlMetrics::record_validation_failure();
        })?;

        let output = match params.input {
            RunInput::QueryVersion => {
                ControlMetrics::record_version_query();
                Some(RunOutput::QueryVersionResult(QueryVersionResult {
                    version: self.interface_version,
                }))
            }
            RunInput::RequireVersion(requirement) => {
                ControlMetrics::record_empty_response();
                debug!(
                    required = requirement.version,
                    "run request carries no query; answering empty"
                );
                None
            }
        };

        let response = build_message(
            RUN_MESSAGE_ID,
            MessageFlags::IsResponse,
            message.request_id(),
            &RunResponseMessageParams { output },
        );
        responder.accept(response);
        Ok(())
    }
}

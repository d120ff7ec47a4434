//! Interface control channel
//!
//! Two reserved ordinals carry bookkeeping traffic next to an interface's own
//! methods:
//!
//! - [`RUN_MESSAGE_ID`] is a request/response pair used to query the remote
//!   interface version.
//! - [`RUN_OR_CLOSE_PIPE_MESSAGE_ID`] is fire-and-forget: "I require at least
//!   this version; if you do not implement it, close the pipe".
//!
//! [`ControlMessageHandler`] answers both on the callee side and
//! [`ControlMessageProxy`] produces them on the caller side. Neither touches
//! the pipe itself.

mod error;
mod handler;
mod metrics;
mod proxy;
mod response;
mod validation;
mod wire;

pub use error::{DecodeError, ValidationError};
pub use handler::{ControlMessageHandler, Responder};
pub use metrics::{ControlMetrics, ControlMetricsSnapshot};
pub use proxy::ControlMessageProxy;
pub use response::build_message;
pub use validation::{
    validate_request_with_response, validate_request_without_response, validate_response,
};
pub use wire::{
    PARAMS_SIZE, QueryVersionResult, RUN_MESSAGE_ID, RUN_OR_CLOSE_PIPE_MESSAGE_ID,
    RequireVersion, RunInput, RunMessageParams, RunOrClosePipeInput, RunOrClosePipeMessageParams,
    RunOutput, RunResponseMessageParams, WireStruct, is_control_ordinal,
};

//! Interface control channel for versioned IPC pipes
//!
//! Endpoints bound to a versioned interface use a small reserved sub-protocol
//! to ask each other which version they implement, and to assert a minimum
//! version that, when unmet, makes the receiving transport close the pipe.
//!
//! # Quick Start
//!
//! ```rust
//! use interface_control::{ControlMessageHandler, ControlMessageProxy, Message};
//!
//! // Callee bound at interface version 3
//! let handler = ControlMessageHandler::new(3);
//!
//! // Caller asks for the version
//! let request = ControlMessageProxy::query_version_request(1);
//! assert!(ControlMessageHandler::is_control_message(&request));
//!
//! let mut reply = None;
//! handler.accept_with_responder(&request, |message: Message| reply = Some(message))?;
//!
//! let mut proxy = ControlMessageProxy::new(0);
//! assert_eq!(proxy.on_query_version_response(&reply.unwrap())?, 3);
//!
//! // Requiring version 5 tells the callee's transport to close the pipe
//! let requirement = proxy.require_version(5).unwrap();
//! assert!(!handler.accept(&requirement)?);
//! # Ok::<(), interface_control::ValidationError>(())
//! ```
//!
//! # Layout
//!
//! - [`protocol`] frames messages: header, flags, request id, payload.
//! - [`control`] validates, answers and builds control traffic.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod control;
pub mod protocol;

pub use control::{
    ControlMessageHandler, ControlMessageProxy, RUN_MESSAGE_ID, RUN_OR_CLOSE_PIPE_MESSAGE_ID,
    Responder, ValidationError,
};
pub use protocol::{Error, Message, MessageFlags, MessageHeader, Result};

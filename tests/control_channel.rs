use interface_control::control::{
    ControlMetrics, DecodeError, RequireVersion, RunInput, RunMessageParams,
    RunOrClosePipeMessageParams, RunResponseMessageParams, WireStruct, build_message,
};
use interface_control::{
    ControlMessageHandler, ControlMessageProxy, Message, MessageFlags, RUN_MESSAGE_ID,
    RUN_OR_CLOSE_PIPE_MESSAGE_ID, ValidationError,
};

/// Records every reply a handler hands back, the way a transport would queue
/// them for sending.
#[derive(Default)]
struct Outbox {
    sent: Vec<Message>,
}

impl Outbox {
    fn responder(&mut self) -> impl FnOnce(Message) + '_ {
        move |message: Message| self.sent.push(message)
    }
}

fn run_request(request_id: u64, params: &RunMessageParams) -> Message {
    build_message(RUN_MESSAGE_ID, MessageFlags::ExpectsResponse, request_id, params)
}

fn require_version(version: u32) -> Message {
    build_message(
        RUN_OR_CLOSE_PIPE_MESSAGE_ID,
        MessageFlags::None,
        0,
        &RunOrClosePipeMessageParams::require_version(version),
    )
}

/// Re-frame a message as if it had crossed the wire.
fn over_the_wire(message: &Message) -> Message {
    Message::decode(message.as_bytes().clone()).expect("frame decodes")
}

#[test]
fn version_three_scenario() {
    let handler = ControlMessageHandler::new(3);
    let mut outbox = Outbox::default();

    let query = over_the_wire(&run_request(100, &RunMessageParams::query_version()));
    handler
        .accept_with_responder(&query, outbox.responder())
        .unwrap();

    assert_eq!(outbox.sent.len(), 1);
    let reply = over_the_wire(&outbox.sent[0]);
    assert_eq!(reply.ordinal(), RUN_MESSAGE_ID);
    assert_eq!(reply.flags(), MessageFlags::IsResponse);
    assert_eq!(reply.request_id(), 100);
    let params = RunResponseMessageParams::decode(reply.payload()).unwrap();
    assert_eq!(params.queried_version(), Some(3));

    assert_eq!(handler.accept(&over_the_wire(&require_version(2))), Ok(true));
    assert_eq!(handler.accept(&over_the_wire(&require_version(5))), Ok(false));
}

#[test]
fn empty_payload_is_malformed_on_both_ordinals() {
    let handler = ControlMessageHandler::new(3);
    let mut outbox = Outbox::default();

    let run = Message::new(RUN_MESSAGE_ID, MessageFlags::ExpectsResponse, 1, b"");
    let result = handler.accept_with_responder(&run, outbox.responder());
    assert!(matches!(
        result,
        Err(ValidationError::MalformedPayload(DecodeError::Truncated { .. }))
    ));
    assert!(outbox.sent.is_empty());

    let run_or_close = Message::new(RUN_OR_CLOSE_PIPE_MESSAGE_ID, MessageFlags::None, 0, b"");
    assert!(matches!(
        handler.accept(&run_or_close),
        Err(ValidationError::MalformedPayload(_))
    ));
}

#[test]
fn ordinal_mismatch_rejected_both_ways() {
    let handler = ControlMessageHandler::new(3);

    let wrong_for_accept = build_message(
        RUN_MESSAGE_ID,
        MessageFlags::None,
        0,
        &RunOrClosePipeMessageParams::require_version(1),
    );
    assert_eq!(
        handler.accept(&wrong_for_accept),
        Err(ValidationError::WrongOrdinal {
            expected: RUN_OR_CLOSE_PIPE_MESSAGE_ID,
            found: RUN_MESSAGE_ID,
        })
    );

    let mut outbox = Outbox::default();
    let wrong_for_run = build_message(
        RUN_OR_CLOSE_PIPE_MESSAGE_ID,
        MessageFlags::ExpectsResponse,
        4,
        &RunMessageParams::query_version(),
    );
    assert_eq!(
        handler.accept_with_responder(&wrong_for_run, outbox.responder()),
        Err(ValidationError::WrongOrdinal {
            expected: RUN_MESSAGE_ID,
            found: RUN_OR_CLOSE_PIPE_MESSAGE_ID,
        })
    );
    assert!(outbox.sent.is_empty());
}

#[test]
fn flags_checked_before_payload_decoding() {
    let handler = ControlMessageHandler::new(3);

    // Garbage payload: it would fail to decode if decoding were attempted.
    let message = Message::new(
        RUN_OR_CLOSE_PIPE_MESSAGE_ID,
        MessageFlags::ExpectsResponse,
        9,
        [0xFFu8; 5],
    );

    assert_eq!(
        handler.accept(&message),
        Err(ValidationError::NotARequestWithoutResponse {
            found: MessageFlags::ExpectsResponse,
        })
    );
}

#[test]
fn no_responder_call_on_any_rejection() {
    let handler = ControlMessageHandler::new(3);
    let rejected = [
        Message::new(RUN_MESSAGE_ID, MessageFlags::None, 0, b""),
        Message::new(RUN_MESSAGE_ID, MessageFlags::IsResponse, 1, b""),
        Message::new(RUN_MESSAGE_ID, MessageFlags::ExpectsResponse, 1, [1u8, 2, 3]),
        require_version(1),
        build_message(
            RUN_MESSAGE_ID,
            MessageFlags::ExpectsResponse,
            2,
            &RunResponseMessageParams { output: None },
        ),
    ];

    for message in &rejected {
        let mut calls = 0;
        let result = handler.accept_with_responder(message, |_: Message| calls += 1);
        assert!(result.is_err(), "accepted {message:?}");
        assert_eq!(calls, 0);
    }
}

#[test]
fn identical_configuration_gives_identical_replies() {
    let first = ControlMessageHandler::new(11);
    let second = ControlMessageHandler::new(11);
    let request = run_request(77, &RunMessageParams::query_version());

    let mut first_out = Outbox::default();
    let mut second_out = Outbox::default();
    first
        .accept_with_responder(&request, first_out.responder())
        .unwrap();
    second
        .accept_with_responder(&request, second_out.responder())
        .unwrap();

    assert_eq!(first_out.sent[0].as_bytes(), second_out.sent[0].as_bytes());
}

#[test]
fn reserved_require_version_in_run_is_answered_empty() {
    let handler = ControlMessageHandler::new(1);
    let mut outbox = Outbox::default();
    let request = run_request(
        5,
        &RunMessageParams {
            input: RunInput::RequireVersion(RequireVersion { version: 40 }),
        },
    );

    handler
        .accept_with_responder(&request, outbox.responder())
        .unwrap();

    assert_eq!(outbox.sent.len(), 1);
    assert_eq!(outbox.sent[0].request_id(), 5);
    let params = RunResponseMessageParams::decode(outbox.sent[0].payload()).unwrap();
    assert_eq!(params.output, None);
}

#[test]
fn application_traffic_is_not_control() {
    for ordinal in [0, 1, 2, 1000] {
        let message = Message::new(ordinal, MessageFlags::ExpectsResponse, 3, b"app");
        assert!(!ControlMessageHandler::is_control_message(&message));
    }
    assert!(ControlMessageHandler::is_control_message(&require_version(0)));
}

#[test]
fn proxy_and_handler_negotiate() {
    let callee = ControlMessageHandler::new(4);
    let mut proxy = ControlMessageProxy::new(1);
    let mut outbox = Outbox::default();

    let request = over_the_wire(&ControlMessageProxy::query_version_request(31));
    callee
        .accept_with_responder(&request, outbox.responder())
        .unwrap();
    let reply = over_the_wire(&outbox.sent[0]);
    assert_eq!(proxy.on_query_version_response(&reply), Ok(4));

    // Already known to hold: nothing is sent.
    assert!(proxy.require_version(3).is_none());

    let requirement = proxy.require_version(6).expect("raises the known version");
    assert_eq!(callee.accept(&over_the_wire(&requirement)), Ok(false));
}

#[test]
fn counters_track_outcomes() {
    let before = ControlMetrics::snapshot();
    let handler = ControlMessageHandler::new(2);
    let mut outbox = Outbox::default();

    handler
        .accept_with_responder(
            &run_request(1, &RunMessageParams::query_version()),
            outbox.responder(),
        )
        .unwrap();
    let after = ControlMetrics::snapshot();

    assert!(after.version_queries_answered > before.version_queries_answered);
    assert!(after.total_handled() > before.total_handled());
}

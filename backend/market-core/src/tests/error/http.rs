use crate::error::http::HttpError;

use std::error::Error;
use std::io::{Error as IoError, ErrorKind};

/// **VALUE**: Verifies the bodyless message contains the status code and
/// nothing optional.
///
/// **WHY THIS MATTERS**: Many marketplace failures arrive with an empty
/// body. The formatted message must stay a single line - no dangling
/// "Response body is" marker, no stray newline - so log pipelines that
/// split on newlines don't shear the message apart.
///
/// **BUG THIS CATCHES**: Would catch the marker or newline being emitted
/// unconditionally.
#[test]
fn given_no_body_when_formatted_then_status_only_single_line() {
    // GIVEN: A failure with no body
    let error = HttpError::new(666, None);

    // WHEN: Reading the formatted message
    let message = error.error_msg();

    // THEN: Status present, optional sections absent
    assert!(message.contains("666"));
    assert!(!message.contains("Response body is"));
    assert!(!message.contains('\n'));
}

/// **VALUE**: Verifies the with-body message carries the marker, a newline,
/// and the body verbatim.
///
/// **WHY THIS MATTERS**: The raw body is the marketplace's own explanation
/// of the failure. Truncating or re-encoding it would destroy the only
/// clue operators get.
///
/// **BUG THIS CATCHES**: Would catch the body being trimmed, escaped, or
/// separated from the marker by anything other than a newline.
#[test]
fn given_body_when_formatted_then_marker_newline_and_verbatim_body() {
    // GIVEN: A failure with a body
    let body = "matching service unavailable: {\"reason\": \"maintenance\"}";
    let error = HttpError::new(666, Some(body.to_string()));

    // WHEN: Reading the formatted message
    let message = error.error_msg();

    // THEN: Status, marker, newline, verbatim body
    assert!(message.contains("666"));
    assert!(message.contains("Response body is"));
    assert!(message.contains('\n'));
    assert!(message.ends_with(body));
}

/// **VALUE**: Verifies Display and error_msg agree.
///
/// **WHY THIS MATTERS**: The descriptor surfaces through `{}` formatting in
/// logs and through `error_msg()` in structured reporting; divergent text
/// would make the two tell different stories about one failure.
///
/// **BUG THIS CATCHES**: Would catch the Display implementation drifting
/// from the stored message.
#[test]
fn given_error_when_displayed_then_matches_error_msg() {
    let error = HttpError::new(503, Some("try later".to_string()));

    assert_eq!(format!("{}", error), error.error_msg());
}

/// **VALUE**: Verifies a supplied cause chains through source().
///
/// **WHY THIS MATTERS**: When the body read itself fails, the transport
/// wraps that failure as the cause. Stack inspection must reach the
/// original error, not a flattened string copy of it.
///
/// **BUG THIS CATCHES**: Would catch the source being dropped or replaced
/// by the formatted message.
#[test]
fn given_cause_when_constructed_then_source_reaches_original_error() {
    // GIVEN: An underlying read failure
    let cause = IoError::new(ErrorKind::UnexpectedEof, "connection reset mid-body");
    let error = HttpError::with_source(502, None, cause);

    // WHEN: Walking the source chain
    let source = error.source().expect("cause must be chained");

    // THEN: The original failure is reachable, and the message still
    // carries the status code
    assert!(source.to_string().contains("connection reset mid-body"));
    assert!(error.error_msg().contains("502"));
}

/// **VALUE**: Verifies the accessors expose status and body unchanged.
///
/// **BUG THIS CATCHES**: Would catch the stored body diverging from what
/// the message was formatted from.
#[test]
fn given_error_when_accessed_then_status_and_body_returned() {
    let error = HttpError::new(404, Some("no such offering".to_string()));

    assert_eq!(error.status().as_u16(), 404);
    assert_eq!(error.response_body(), Some("no such offering"));
    assert!(!error.is_retryable());

    let transient = HttpError::new(503, None);
    assert!(transient.is_retryable());
}

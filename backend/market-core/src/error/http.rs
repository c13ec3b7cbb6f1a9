//! Error descriptor for failed marketplace submissions.

use common::HttpStatusCode;

use thiserror::Error as ThisError;

/// Marker phrase preceding a captured response body in the formatted message.
const RESPONSE_BODY_MARKER: &str = "Response body is";

/// Describes a non-success response from the marketplace.
///
/// Built by the transport layer from the status code and whatever else the
/// response yielded: the raw body when it could be read, the underlying
/// read/transport failure when it could not. Formatting degrades by
/// omitting the optional sections - it never fails.
///
/// The message always contains the numeric status code. When a body was
/// captured, the message additionally carries the "Response body is" marker,
/// a newline, and the body verbatim; without a body there is no marker and
/// no newline.
#[derive(Debug, ThisError)]
#[error("{error_msg}")]
pub struct HttpError {
    status: HttpStatusCode,
    response_body: Option<String>,
    error_msg: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl HttpError {
    /// Describe a failed response from its status code and optional raw body.
    pub fn new(status: impl Into<HttpStatusCode>, response_body: Option<String>) -> Self {
        Self::build(status.into(), response_body, None)
    }

    /// Describe a failed response and chain the failure that caused it,
    /// so stack inspection reaches the original error.
    pub fn with_source(
        status: impl Into<HttpStatusCode>,
        response_body: Option<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::build(status.into(), response_body, Some(source.into()))
    }

    fn build(
        status: HttpStatusCode,
        response_body: Option<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        let error_msg = format_error_msg(status, response_body.as_deref());
        Self {
            status,
            response_body,
            error_msg,
            source,
        }
    }

    pub fn status(&self) -> HttpStatusCode {
        self.status
    }

    pub fn response_body(&self) -> Option<&str> {
        self.response_body.as_deref()
    }

    pub fn error_msg(&self) -> &str {
        &self.error_msg
    }

    /// Whether the discover loop may retry the request that produced this.
    pub fn is_retryable(&self) -> bool {
        self.status.is_retryable()
    }
}

fn format_error_msg(status: HttpStatusCode, response_body: Option<&str>) -> String {
    match response_body {
        Some(body) => format!(
            "Marketplace request failed with status code {status}. {RESPONSE_BODY_MARKER}\n{body}"
        ),
        None => format!("Marketplace request failed with status code {status}"),
    }
}

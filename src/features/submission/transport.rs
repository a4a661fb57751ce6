//! Network seam used by form submission, delete and logout

use std::fmt;
use std::future::Future;

use super::FormData;

/// HTTP method of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One outgoing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub method: Method,
    /// Path relative to the server base URL, or an absolute URL
    pub url: String,
    pub body: FormData,
}

impl SubmissionRequest {
    /// Request without a body
    pub fn empty(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: FormData::new(),
        }
    }
}

/// Status and text body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    /// `None` when the body could not be read
    pub body: Option<String>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body text for display, or `fallback` when it is missing or blank
    pub fn error_message(&self, fallback: &str) -> String {
        self.body
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}

/// A request that never produced a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Could not reach the server
    Connect(String),
    Timeout,
    Other(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Connect(e) => write!(f, "Connection failed: {}", e),
            TransportError::Timeout => write!(f, "Request timed out"),
            TransportError::Other(e) => write!(f, "Request failed: {}", e),
        }
    }
}

impl std::error::Error for TransportError {}

/// Sends requests to the admin server
pub trait Transport: Clone + Send + Sync + 'static {
    fn send(
        &self,
        request: SubmissionRequest,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_success_range() {
        let response = |status| RawResponse { status, body: None };
        assert!(response(200).is_success());
        assert!(response(299).is_success());
        assert!(!response(199).is_success());
        assert!(!response(302).is_success());
        assert!(!response(404).is_success());
    }

    #[test]
    fn test_error_message_fallback() {
        let response = RawResponse {
            status: 400,
            body: Some("  Invalid credentials \n".to_string()),
        };
        assert_eq!(response.error_message("x"), "Invalid credentials");

        let blank = RawResponse {
            status: 400,
            body: Some(String::new()),
        };
        assert_eq!(blank.error_message("Failed"), "Failed");

        let unreadable = RawResponse {
            status: 500,
            body: None,
        };
        assert_eq!(unreadable.error_message("Failed"), "Failed");
    }
}

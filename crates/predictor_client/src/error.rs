//! Failure taxonomy for a single prediction request.

use thiserror::Error;

/// Every variant's `Display` output is shown to the user unchanged, so each
/// carries exactly the text the UI renders: the server's own error message,
/// a status-derived fallback, or the transport failure description.
#[derive(Debug, Error)]
pub enum PredictError {
    /// The response body carried an `error` field. Wins over the HTTP
    /// status, whatever it was.
    #[error("{0}")]
    Api(String),
    /// Non-2xx response without a server-provided message.
    #[error("HTTP {0}")]
    Status(u16),
    /// The request never produced an HTTP response (connection refused,
    /// DNS failure, broken stream).
    #[error("{0}")]
    Transport(String),
    /// The body could not be decoded as a prediction payload.
    #[error("malformed prediction response: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_displays_server_text_verbatim() {
        assert_eq!(
            PredictError::Api("invalid flight number".to_string()).to_string(),
            "invalid flight number"
        );
    }

    #[test]
    fn status_error_displays_http_code() {
        assert_eq!(PredictError::Status(400).to_string(), "HTTP 400");
    }
}

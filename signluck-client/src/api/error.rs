//! SignLuck API error types.

/// Errors from the SignLuck HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not the expected JSON
    #[error("JSON parse error: {message}{}", body_suffix(.body))]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Configured base URL cannot be used
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

fn body_suffix(body: &Option<String>) -> String {
    match body {
        Some(body) => format!(" (body: {body})"),
        None => String::new(),
    }
}

impl ApiError {
    /// Whether this error came from a response with the given status.
    pub fn is_status(&self, code: u16) -> bool {
        matches!(self, ApiError::Api { status, .. } if *status == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ApiError::Api {
            status: 422,
            message: "Unprocessable Entity".into(),
        };
        assert_eq!(err.to_string(), "API error 422: Unprocessable Entity");
        assert!(err.is_status(422));
        assert!(!err.is_status(500));

        let err = ApiError::Json {
            message: "expected value".into(),
            body: Some("<html>".into()),
        };
        assert_eq!(err.to_string(), "JSON parse error: expected value (body: <html>)");

        let err = ApiError::Json {
            message: "EOF".into(),
            body: None,
        };
        assert_eq!(err.to_string(), "JSON parse error: EOF");

        let err = ApiError::InvalidBaseUrl("ftp://x".into());
        assert_eq!(err.to_string(), "invalid base URL: ftp://x");
    }
}

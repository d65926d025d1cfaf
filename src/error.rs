use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Timeout error after {0}ms")]
    Timeout(u64),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Decode error: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ClientError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        ClientError::Validation(message.into())
    }

    /// True when the server answered with an error status.
    pub fn is_api_error(&self) -> bool {
        matches!(self, ClientError::Api { .. })
    }

    /// True when no response was obtained from the server.
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_) | ClientError::Timeout(_))
    }

    /// The client never retries on its own; this tells callers which
    /// failures are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        self.is_transport()
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn json_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err()
    }

    #[test]
    fn test_api_error_classification() {
        let error = ClientError::Api {
            status: 500,
            message: "Service Unavailable".to_string(),
        };
        assert!(error.is_api_error());
        assert!(!error.is_transport());
        assert!(!error.is_retryable());
        assert_eq!(error.status_code(), Some(500));
        assert_eq!(format!("{}", error), "API error 500: Service Unavailable");
    }

    #[test]
    fn test_timeout_error_is_transport() {
        let error = ClientError::Timeout(30000);
        assert!(error.is_transport());
        assert!(error.is_retryable());
        assert!(!error.is_api_error());
        assert_eq!(error.status_code(), None);
        assert_eq!(format!("{}", error), "Timeout error after 30000ms");
    }

    #[test]
    fn test_validation_error() {
        let error = ClientError::validation("count cannot be 0");
        assert!(!error.is_api_error());
        assert!(!error.is_retryable());
        assert_eq!(format!("{}", error), "Validation error: count cannot be 0");
    }

    #[test]
    fn test_serialization_and_decode_errors_not_api_errors() {
        let error = ClientError::Serialization(json_error());
        assert!(!error.is_api_error());
        assert!(!error.is_retryable());
        assert!(format!("{}", error).starts_with("Serialization error:"));

        let error = ClientError::Decode(json_error());
        assert!(!error.is_api_error());
        assert!(!error.is_retryable());
        assert!(format!("{}", error).starts_with("Decode error:"));
    }

    #[test]
    fn test_api_error_status_codes() {
        let test_cases = vec![
            (400, "Bad Request"),
            (404, "Not Found"),
            (422, "Unprocessable Entity"),
            (500, "Internal Server Error"),
            (503, "Service Unavailable"),
        ];

        for (status, message) in test_cases {
            let error = ClientError::Api {
                status,
                message: message.to_string(),
            };

            assert!(error.is_api_error());
            assert_eq!(error.status_code(), Some(status));

            let error_msg = format!("{}", error);
            assert!(error_msg.contains(&status.to_string()));
            assert!(error_msg.contains(message));
        }
    }

    #[test]
    fn test_empty_error_messages() {
        let error = ClientError::Api {
            status: 502,
            message: "".to_string(),
        };
        assert_eq!(format!("{}", error), "API error 502: ");

        let error = ClientError::validation("");
        assert_eq!(format!("{}", error), "Validation error: ");
    }
}

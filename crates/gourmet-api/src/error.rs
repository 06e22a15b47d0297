use thiserror::Error;

/// Errors returned by the gourmet API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No API key was configured; every request fails until one is provided.
    #[error("API key is missing")]
    MissingApiKey,

    /// The configured base URL could not be parsed.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The API answered 200 but embedded `results.error` in the body.
    #[error("gourmet API error: {0}")]
    Upstream(String),

    /// The response body could not be decoded as JSON.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Coarse classification used when surfacing a failure to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Configuration,
    Transport,
    Upstream,
}

impl ApiError {
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            ApiError::MissingApiKey | ApiError::InvalidBaseUrl { .. } => FailureKind::Configuration,
            ApiError::Http(_) | ApiError::UnexpectedStatus { .. } | ApiError::Deserialize { .. } => {
                FailureKind::Transport
            }
            ApiError::Upstream(_) => FailureKind::Upstream,
        }
    }

    /// `true` when the request never reached the server.
    #[must_use]
    pub fn is_offline(&self) -> bool {
        matches!(self, ApiError::Http(e) if e.is_connect())
    }

    /// Message shown to the user in place of the raw error.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ApiError::MissingApiKey => "API key is not configured.".to_string(),
            ApiError::InvalidBaseUrl { .. } => "API base URL is invalid.".to_string(),
            ApiError::Upstream(message) => message.clone(),
            _ if self.is_offline() => "Check your network connection.".to_string(),
            other => format!("An error occurred: {other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_configuration() {
        let err = ApiError::MissingApiKey;
        assert_eq!(err.kind(), FailureKind::Configuration);
        assert_eq!(err.user_message(), "API key is not configured.");
    }

    #[test]
    fn invalid_base_url_has_its_own_message() {
        let err = ApiError::InvalidBaseUrl {
            url: "not a url".to_string(),
            reason: "relative URL without a base".to_string(),
        };
        assert_eq!(err.kind(), FailureKind::Configuration);
        assert_eq!(err.user_message(), "API base URL is invalid.");
    }

    #[test]
    fn upstream_message_is_surfaced_verbatim() {
        let err = ApiError::Upstream("boom".to_string());
        assert_eq!(err.kind(), FailureKind::Upstream);
        assert_eq!(err.user_message(), "boom");
    }

    #[test]
    fn unexpected_status_is_transport() {
        let err = ApiError::UnexpectedStatus {
            status: 503,
            url: "https://api.example/gourmet/v1/".to_string(),
        };
        assert_eq!(err.kind(), FailureKind::Transport);
        assert!(!err.is_offline());
        assert!(err.user_message().starts_with("An error occurred: "));
        assert!(err.user_message().contains("503"));
    }

    #[test]
    fn deserialize_is_transport() {
        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = ApiError::Deserialize {
            context: "gourmet/v1".to_string(),
            source,
        };
        assert_eq!(err.kind(), FailureKind::Transport);
    }
}

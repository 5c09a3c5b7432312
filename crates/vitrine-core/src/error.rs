// ── Core error types ──
//
// User-facing errors from vitrine-core. Consumers never see raw HTTP
// or JSON failures; the `From<vitrine_api::Error>` impl translates
// transport-layer errors into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach catalog API at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Catalog API request timed out")]
    Timeout,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn not_found(entity_type: &str, identifier: impl ToString) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            identifier: identifier.to_string(),
        }
    }

    /// Convert an API error for a call that addressed `entity_type`
    /// `identifier`. A 404 names that entity; anything else converts as usual.
    pub(crate) fn scoped(
        err: vitrine_api::Error,
        entity_type: &str,
        identifier: impl ToString,
    ) -> Self {
        if err.is_not_found() {
            Self::not_found(entity_type, identifier)
        } else {
            Self::from(err)
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<vitrine_api::Error> for CoreError {
    fn from(err: vitrine_api::Error) -> Self {
        match err {
            vitrine_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: err.status(),
                    }
                }
            }
            vitrine_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            vitrine_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            vitrine_api::Error::InvalidPathSegment(segment) => CoreError::ValidationFailed {
                message: format!("'{segment}' is not a valid id"),
            },
            vitrine_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            vitrine_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

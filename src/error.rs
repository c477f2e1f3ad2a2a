//! Error types for the merchant admin client.

use std::collections::BTreeMap;

use crate::models::{MerchantField, MerchantId};

/// All errors that can occur when talking to the merchant endpoint or
/// driving the dashboard state machine.
#[derive(Debug, thiserror::Error)]
pub enum MerchantError {
    /// Transport failure: endpoint unreachable, connection reset, etc.
    #[cfg(any(feature = "async", feature = "blocking"))]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, or a placeholder if it could not be read.
        message: String,
    },

    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A required form field is empty; nothing was sent.
    #[error("required field is empty: {0}")]
    MissingField(MerchantField),

    /// The identifier is not present in the cached merchant list.
    #[error("merchant {0} is not in the current list")]
    NotFound(MerchantId),

    /// Repository backend failed.
    #[error("repository error: {0}")]
    Repository(Box<dyn core::error::Error + Send + Sync>),
}

impl MerchantError {
    /// Returns the HTTP status if the server rejected the request.
    #[inline]
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match *self {
            Self::Api { status, .. } => Some(status),
            #[cfg(any(feature = "async", feature = "blocking"))]
            Self::Http(_) => None,
            Self::Serialization(_)
            | Self::MissingField(_)
            | Self::NotFound(_)
            | Self::Repository(_) => None,
        }
    }

    /// Parses per-field validation messages out of an API error body.
    ///
    /// The server reports rejected payloads as
    /// `{"field": ["message", ...], ...}`. Returns `None` for any other
    /// error or body shape.
    #[must_use]
    pub fn field_errors(&self) -> Option<BTreeMap<String, Vec<String>>> {
        let Self::Api { ref message, .. } = *self else {
            return None;
        };
        serde_json::from_str(message).ok()
    }
}

/// Convenience alias for results using [`MerchantError`].
pub type Result<T> = core::result::Result<T, MerchantError>;

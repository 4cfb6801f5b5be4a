use thiserror::Error;

use crate::source::SourceError;

/// Failure of a reporting call.
///
/// The set is closed: callers only ever see a client-side fault or an upstream
/// fault, never a raw collaborator error. Neither kind is retried here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    /// Empty vendor id, non-positive window, or an unusable policy.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The order or product collaborator failed or timed out.
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),
}

impl AnalyticsError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Client-side fault (as opposed to a server-side one).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

impl From<SourceError> for AnalyticsError {
    fn from(value: SourceError) -> Self {
        Self::UpstreamUnavailable(value.to_string())
    }
}

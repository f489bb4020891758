//! Error types for remote application operations.

use thiserror::Error;

use crate::model::RemoteOperation;

/// HTTP status signalling an invalid or expired session.
pub const STATUS_UNAUTHORIZED: u16 = 401;

/// Failure of a remote create/delete call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteError {
    /// The caller's session is invalid or expired.
    #[error("remote service rejected the session")]
    Unauthorized {
        /// Operation that was rejected.
        operation: RemoteOperation,
    },
    /// Any other failure: network, server-side rejection, malformed response.
    #[error("remote operation failed")]
    Transport {
        /// Operation that failed.
        operation: RemoteOperation,
        /// HTTP status when a response was received.
        status: Option<u16>,
        /// Diagnostic detail.
        detail: String,
    },
}

/// Convenience alias for remote operation results.
pub type RemoteResult<T> = Result<T, RemoteError>;

impl RemoteError {
    /// Transport failure without an HTTP status (network, encoding, decoding).
    #[must_use]
    pub fn transport(operation: RemoteOperation, detail: impl Into<String>) -> Self {
        Self::Transport {
            operation,
            status: None,
            detail: detail.into(),
        }
    }

    /// Classify a non-success HTTP status.
    #[must_use]
    pub fn from_status(operation: RemoteOperation, status: u16, detail: impl Into<String>) -> Self {
        if status == STATUS_UNAUTHORIZED {
            Self::Unauthorized { operation }
        } else {
            Self::Transport {
                operation,
                status: Some(status),
                detail: detail.into(),
            }
        }
    }

    /// Whether this failure requires re-authentication.
    #[must_use]
    pub const fn is_authorization(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Operation the failure belongs to.
    #[must_use]
    pub const fn operation(&self) -> RemoteOperation {
        match self {
            Self::Unauthorized { operation } | Self::Transport { operation, .. } => *operation,
        }
    }

    /// Detail suitable for logs and CLI output.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::Unauthorized { operation } => {
                format!("{} rejected: session expired", operation.as_str())
            }
            Self::Transport {
                operation,
                status: Some(status),
                detail,
            } => format!("{} failed (status {status}): {detail}", operation.as_str()),
            Self::Transport {
                operation,
                status: None,
                detail,
            } => format!("{} failed: {detail}", operation.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_status_maps_to_authorization_error() {
        let err = RemoteError::from_status(RemoteOperation::Create, 401, "ignored");
        assert!(err.is_authorization());
        assert_eq!(err.operation(), RemoteOperation::Create);
        assert_eq!(err.to_string(), "remote service rejected the session");
    }

    #[test]
    fn other_statuses_map_to_transport_errors() {
        for status in [400_u16, 403, 404, 409, 500, 503] {
            let err = RemoteError::from_status(RemoteOperation::Delete, status, "nope");
            assert!(!err.is_authorization(), "status {status}");
            assert_eq!(
                err,
                RemoteError::Transport {
                    operation: RemoteOperation::Delete,
                    status: Some(status),
                    detail: "nope".to_string(),
                }
            );
        }
    }

    #[test]
    fn detail_mentions_status_when_present() {
        let with_status = RemoteError::from_status(RemoteOperation::Create, 500, "boom");
        assert_eq!(with_status.detail(), "create failed (status 500): boom");
        let without = RemoteError::transport(RemoteOperation::Delete, "connection reset");
        assert_eq!(without.detail(), "delete failed: connection reset");
    }
}

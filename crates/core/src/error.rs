//! Core error types for AnvilGUI

/// Errors surfaced by the version-dispatch core
///
/// `Clone` so that a failed resolution can be memoized and handed out
/// unchanged to every later caller.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AnvilError {
    #[error("Unrecognized server version string: {0:?}")]
    UnrecognizedVersion(String),

    #[error("Server version {version} is not supported (supported: {supported})")]
    UnsupportedVersion { version: String, supported: String },

    #[error("Version range {new} overlaps already registered range {existing}")]
    OverlappingRegistration { new: String, existing: String },

    #[error("Host operation `{operation}` failed: {reason}")]
    HostOperationFailed { operation: &'static str, reason: String },

    #[error("Session for container {0} is already closed")]
    SessionClosed(u32),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl AnvilError {
    /// Shorthand used by adapters when a host primitive fails
    pub fn host(operation: &'static str, reason: impl std::fmt::Display) -> Self {
        AnvilError::HostOperationFailed {
            operation,
            reason: reason.to_string(),
        }
    }

    /// Whether this outcome is a terminal resolution failure
    pub fn is_resolution_failure(&self) -> bool {
        matches!(
            self,
            AnvilError::UnrecognizedVersion(_) | AnvilError::UnsupportedVersion { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, AnvilError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_failures() {
        assert!(AnvilError::UnrecognizedVersion("x".into()).is_resolution_failure());
        assert!(AnvilError::UnsupportedVersion {
            version: "1.5.2".into(),
            supported: String::new(),
        }
        .is_resolution_failure());
        assert!(!AnvilError::host("send", "offline").is_resolution_failure());
    }

    #[test]
    fn test_host_error_message() {
        let err = AnvilError::host("create_container", "player 7 is offline");
        assert_eq!(
            err.to_string(),
            "Host operation `create_container` failed: player 7 is offline"
        );
    }
}

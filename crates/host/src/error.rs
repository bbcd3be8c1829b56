//! Host-related errors

use anvilgui_core::{AnvilError, ContainerId, PlayerId};
use thiserror::Error;

/// Failure of a host primitive
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("{0} is not connected")]
    Disconnected(PlayerId),

    #[error("Container {} does not exist", .0.get())]
    NoSuchContainer(ContainerId),

    #[error("Slot {slot} is out of range for container {}", .container.get())]
    SlotOutOfRange { container: ContainerId, slot: u16 },

    #[error("Host rejected the operation: {0}")]
    Rejected(String),
}

pub type Result<T> = std::result::Result<T, HostError>;

/// Lifts host results into core results, tagging the failing operation
pub trait HostResultExt<T> {
    fn op(self, operation: &'static str) -> anvilgui_core::Result<T>;
}

impl<T> HostResultExt<T> for Result<T> {
    fn op(self, operation: &'static str) -> anvilgui_core::Result<T> {
        self.map_err(|err| AnvilError::host(operation, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_op_tags_operation() {
        let result: Result<()> = Err(HostError::Disconnected(PlayerId::new(3)));
        assert_eq!(
            result.op("send"),
            Err(AnvilError::HostOperationFailed {
                operation: "send",
                reason: "player#3 is not connected".into(),
            })
        );
    }
}

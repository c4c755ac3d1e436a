//! Business-document status machine.
//!
//! Business entities progress draft -> confirmed -> approved; cancellation is
//! a pure status change reserved for documents that never posted. Posted
//! effects are undone only through the orchestrator's reverse operations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status of a business document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// Document is being drafted and can be modified freely.
    Draft,
    /// Document has been submitted/confirmed.
    Confirmed,
    /// Document has been approved/completed.
    Approved,
    /// Document has been cancelled; terminal.
    Cancelled,
}

/// Invalid status transition.
#[derive(Debug, Error)]
#[error("Invalid status transition from {from:?} to {to:?}")]
pub struct InvalidTransition {
    /// Current status.
    pub from: DocumentStatus,
    /// Requested status.
    pub to: DocumentStatus,
}

impl DocumentStatus {
    /// Returns true if the document is in a terminal state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Returns true if a cancel (pure status change) is permitted.
    ///
    /// Only drafts can be cancelled; anything that posted must be reversed
    /// through update/delete instead.
    #[must_use]
    pub const fn can_cancel(self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if a restore (undo of a cancel) is permitted.
    ///
    /// Restore is the exact inverse of cancel and lands back in draft; it
    /// is the only way out of the cancelled state.
    #[must_use]
    pub const fn can_restore(self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Validates a transition to a new status.
    pub fn transition(self, to: Self) -> Result<Self, InvalidTransition> {
        let valid = matches!(
            (self, to),
            (Self::Draft, Self::Confirmed | Self::Cancelled)
                | (Self::Confirmed, Self::Approved)
        );
        if valid {
            Ok(to)
        } else {
            Err(InvalidTransition { from: self, to })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions() {
        assert!(DocumentStatus::Draft
            .transition(DocumentStatus::Confirmed)
            .is_ok());
        assert!(DocumentStatus::Draft
            .transition(DocumentStatus::Cancelled)
            .is_ok());
        assert!(DocumentStatus::Confirmed
            .transition(DocumentStatus::Approved)
            .is_ok());
    }

    #[test]
    fn test_invalid_transitions() {
        assert!(DocumentStatus::Approved
            .transition(DocumentStatus::Draft)
            .is_err());
        assert!(DocumentStatus::Cancelled
            .transition(DocumentStatus::Confirmed)
            .is_err());
        assert!(DocumentStatus::Confirmed
            .transition(DocumentStatus::Cancelled)
            .is_err());
    }

    #[test]
    fn test_only_drafts_cancel() {
        assert!(DocumentStatus::Draft.can_cancel());
        assert!(!DocumentStatus::Confirmed.can_cancel());
        assert!(!DocumentStatus::Approved.can_cancel());
        assert!(!DocumentStatus::Cancelled.can_cancel());
    }

    #[test]
    fn test_only_cancelled_restores() {
        assert!(DocumentStatus::Cancelled.can_restore());
        assert!(!DocumentStatus::Draft.can_restore());
        assert!(!DocumentStatus::Confirmed.can_restore());
        assert!(!DocumentStatus::Approved.can_restore());
    }
}

//! Transition rules of [`ApprovalStatus`].
//!
//! Every status may change into every other status with one
//! exception: once approved or quarantined, an entity never
//! returns to pending.

use thiserror::Error;

use crate::entities::ApprovalStatus;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("The approval status cannot change from {from} back to pending")]
pub struct ReturnToPending {
    pub from: ApprovalStatus,
}

pub const fn is_valid_transition(from: ApprovalStatus, to: ApprovalStatus) -> bool {
    !(to.is_pending() && !from.is_pending())
}

pub fn validate_transition(
    from: ApprovalStatus,
    to: ApprovalStatus,
) -> Result<(), ReturnToPending> {
    if is_valid_transition(from, to) {
        Ok(())
    } else {
        Err(ReturnToPending { from })
    }
}

/// The first approval after submission, which happens at most once
/// in the lifetime of an entity.
pub const fn is_initial_approval(from: ApprovalStatus, to: ApprovalStatus) -> bool {
    from.is_pending() && to.is_approved()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ApprovalStatus::*;

    #[test]
    fn allowed_transitions() {
        for (from, to) in [
            (Pending, Pending),
            (Pending, Approved),
            (Pending, Quarantined),
            (Approved, Approved),
            (Approved, Quarantined),
            (Quarantined, Approved),
            (Quarantined, Quarantined),
        ] {
            assert!(validate_transition(from, to).is_ok(), "{from} -> {to}");
        }
    }

    #[test]
    fn no_return_to_pending() {
        assert_eq!(
            Err(ReturnToPending { from: Approved }),
            validate_transition(Approved, Pending)
        );
        assert_eq!(
            Err(ReturnToPending { from: Quarantined }),
            validate_transition(Quarantined, Pending)
        );
    }

    #[test]
    fn initial_approval() {
        assert!(is_initial_approval(Pending, Approved));
        assert!(!is_initial_approval(Quarantined, Approved));
        assert!(!is_initial_approval(Approved, Approved));
        assert!(!is_initial_approval(Pending, Quarantined));
    }
}

//! State machine trait for phase enums.

use super::{DomainError, ValidationError};

/// Trait for enums whose values form a transition graph.
///
/// Implementors declare the edges; `transition_to` and `transition_for`
/// validate a move against them.
///
/// ```ignore
/// let next = SessionPhase::Idle.transition_for("begin", SessionPhase::SlotFilling)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Like `transition_to`, but reports the rejected operation as a
    /// `DomainError` with the invalid transition code.
    fn transition_for(&self, operation: &str, target: Self) -> Result<Self, DomainError> {
        self.transition_to(target).map_err(|err| {
            DomainError::invalid_transition(operation, err.to_string())
        })
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Door {
        Open,
        Closed,
        Locked,
        Removed,
    }

    impl StateMachine for Door {
        fn can_transition_to(&self, target: &Self) -> bool {
            self.valid_transitions().contains(target)
        }

        fn valid_transitions(&self) -> Vec<Self> {
            use Door::*;
            match self {
                Open => vec![Closed, Removed],
                Closed => vec![Open, Locked],
                Locked => vec![Closed],
                Removed => vec![],
            }
        }
    }

    #[test]
    fn transition_to_succeeds_for_valid_edge() {
        assert_eq!(Door::Closed.transition_to(Door::Locked), Ok(Door::Locked));
    }

    #[test]
    fn transition_to_fails_for_missing_edge() {
        assert!(Door::Open.transition_to(Door::Locked).is_err());
    }

    #[test]
    fn transition_for_reports_operation() {
        let err = Door::Locked.transition_for("open", Door::Open).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        assert_eq!(err.details.get("operation"), Some(&"open".to_string()));
    }

    #[test]
    fn terminal_state_has_no_exits() {
        assert!(Door::Removed.is_terminal());
        assert!(!Door::Locked.is_terminal());
    }
}

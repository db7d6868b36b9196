//! Release workflow states.

use std::fmt;

use crate::{CoreError, CoreResult};

/// Where a release invocation stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkflowState {
    /// Nothing has happened yet.
    #[default]
    Idle,
    /// `prepare` is bumping the version and regenerating the changelog.
    Preparing,
    /// A prepared config is on disk (or was just loaded from it).
    Prepared,
    /// A finishing command is running.
    Finalizing,
    /// The command completed.
    Done,
    /// The command failed or was declined.
    Aborted,
}

impl WorkflowState {
    /// Returns true for `Done` and `Aborted`.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Aborted)
    }

    /// Returns true if moving from `self` to `to` is allowed.
    #[must_use]
    pub fn can_transition_to(self, to: Self) -> bool {
        match (self, to) {
            (from, Self::Aborted) => !from.is_terminal(),
            (Self::Idle, Self::Preparing | Self::Prepared | Self::Finalizing)
            | (Self::Preparing, Self::Prepared)
            | (Self::Prepared, Self::Finalizing)
            | (Self::Finalizing, Self::Done) => true,
            _ => false,
        }
    }

    /// Returns `to` if the move is allowed.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] otherwise.
    pub fn transition(self, to: Self) -> CoreResult<Self> {
        if self.can_transition_to(to) {
            Ok(to)
        } else {
            Err(CoreError::InvalidTransition { from: self, to })
        }
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Preparing => "preparing",
            Self::Prepared => "prepared",
            Self::Finalizing => "finalizing",
            Self::Done => "done",
            Self::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::WorkflowState::{Aborted, Done, Finalizing, Idle, Prepared, Preparing};
    use super::*;

    const ALL: [WorkflowState; 6] = [Idle, Preparing, Prepared, Finalizing, Done, Aborted];

    #[test]
    fn test_prepare_path() {
        let state = Idle.transition(Preparing).unwrap();
        let state = state.transition(Prepared).unwrap();
        let state = state.transition(Finalizing).unwrap();
        assert_eq!(state.transition(Done).unwrap(), Done);
    }

    #[test]
    fn test_finalize_without_prepare() {
        assert!(Idle.can_transition_to(Finalizing));
        assert!(Idle.can_transition_to(Prepared));
    }

    #[test]
    fn test_aborted_reachable_from_every_non_terminal_state() {
        for state in ALL {
            assert_eq!(state.can_transition_to(Aborted), !state.is_terminal());
        }
    }

    #[test]
    fn test_terminal_states_are_final() {
        for to in ALL {
            assert!(!Done.can_transition_to(to));
            assert!(!Aborted.can_transition_to(to));
        }
    }

    #[test]
    fn test_rejects_skipping_ahead() {
        assert!(!Idle.can_transition_to(Done));
        assert!(!Preparing.can_transition_to(Finalizing));
        assert!(matches!(
            Preparing.transition(Done),
            Err(CoreError::InvalidTransition {
                from: Preparing,
                to: Done
            })
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(Finalizing.to_string(), "finalizing");
        assert_eq!(Idle.to_string(), "idle");
    }
}

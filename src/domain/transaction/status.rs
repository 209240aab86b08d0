//! Transaction lifecycle status state machine.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Status of one tracked write operation.
///
/// `Idle -> Submitted -> Pending -> {Confirmed | Failed}`, with
/// `Submitted -> Failed` for failures before the network saw anything.
/// `Confirmed` and `Failed` are absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Prepared, nothing sent to the signer yet.
    Idle,
    /// Handed to the signer, awaiting a transaction reference.
    Submitted,
    /// Accepted into the network pool, awaiting inclusion.
    Pending,
    Confirmed,
    Failed,
}

impl TransactionStatus {
    /// Position in the lifecycle; strictly increases along every valid transition.
    pub fn rank(&self) -> u8 {
        match self {
            TransactionStatus::Idle => 0,
            TransactionStatus::Submitted => 1,
            TransactionStatus::Pending => 2,
            TransactionStatus::Confirmed | TransactionStatus::Failed => 3,
        }
    }
}

impl StateMachine for TransactionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use TransactionStatus::*;
        matches!(
            (self, target),
            (Idle, Submitted)
                | (Submitted, Pending)
                | (Submitted, Failed)
                | (Pending, Confirmed)
                | (Pending, Failed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use TransactionStatus::*;
        match self {
            Idle => vec![Submitted],
            Submitted => vec![Pending, Failed],
            Pending => vec![Confirmed, Failed],
            Confirmed => vec![],
            Failed => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use TransactionStatus::*;

    const ALL: [TransactionStatus; 5] = [Idle, Submitted, Pending, Confirmed, Failed];

    #[test]
    fn idle_must_go_through_submitted() {
        assert!(Idle.can_transition_to(&Submitted));
        assert!(!Idle.can_transition_to(&Pending));
        assert!(!Idle.can_transition_to(&Failed));
    }

    #[test]
    fn submitted_may_fail_without_pending() {
        assert_eq!(Submitted.transition_to(Failed), Ok(Failed));
    }

    #[test]
    fn terminal_states_are_absorbing() {
        assert!(Confirmed.is_terminal());
        assert!(Failed.is_terminal());
        for target in ALL {
            assert!(!Confirmed.can_transition_to(&target));
            assert!(!Failed.can_transition_to(&target));
        }
    }

    #[test]
    fn can_transition_to_is_consistent_with_valid_transitions() {
        for status in ALL {
            for target in ALL {
                assert_eq!(
                    status.can_transition_to(&target),
                    status.valid_transitions().contains(&target),
                    "{:?} -> {:?}",
                    status,
                    target
                );
            }
        }
    }

    proptest! {
        #[test]
        fn any_accepted_walk_is_monotonic(steps in proptest::collection::vec(0usize..5, 0..12)) {
            let mut current = Idle;
            for index in steps {
                if let Ok(next) = current.transition_to(ALL[index]) {
                    prop_assert!(next.rank() > current.rank());
                    prop_assert!(
                        !(current == Idle && next == Pending),
                        "Pending reached without Submitted"
                    );
                    current = next;
                }
            }
        }
    }
}

//! Selection invariants for the turn state machine.
//!
//! Each invariant is a property of an in-progress turn that no sequence of
//! clicks may break. They are checked after every transition in debug
//! builds and can be tested independently.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod budget;
pub mod disjoint_selection;
pub mod unique_rehits;

pub use budget::BudgetInvariant;
pub use disjoint_selection::DisjointSelectionInvariant;
pub use unique_rehits::UniqueRehitInvariant;

/// All turn-selection invariants as a composable set.
pub type TurnInvariants = (
    BudgetInvariant,
    DisjointSelectionInvariant,
    UniqueRehitInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pong::test_support::{selecting, theirs};
    use crate::pong::{ClickResult, Multiplier};

    #[test]
    fn test_invariant_set_holds_for_fresh_turn() {
        let turn = selecting(theirs(None, &[]), Multiplier::Triple);
        assert!(TurnInvariants::check_all(&turn).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_clicks() {
        let turn = selecting(theirs(None, &["1 Cen"]), Multiplier::Triple);
        let turn = match turn.register_cup_click("1 Cen") {
            Ok(ClickResult::Selecting(t)) => t,
            other => panic!("unexpected: {other:?}"),
        };
        let turn = match turn.register_cup_click("3 Sx") {
            Ok(ClickResult::Selecting(t)) => t,
            other => panic!("unexpected: {other:?}"),
        };
        assert!(TurnInvariants::check_all(&turn).is_ok());
    }

    #[test]
    fn test_invariant_set_detects_corruption() {
        let mut turn = selecting(theirs(None, &["1 Cen"]), Multiplier::Single);
        turn.selection.toggle_newly_hit("1 Cen");
        turn.selection.toggle_newly_hit("3 Sx");
        turn.selection.toggle_newly_hit("3 Dx");

        let violations = TurnInvariants::check_all(&turn).unwrap_err();
        assert_eq!(violations.len(), 2);
    }
}

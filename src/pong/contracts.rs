//! Contract-based validation for cup clicks.
//!
//! A click is checked against its preconditions before it touches the
//! selection; the postcondition re-verifies the selection invariants.

use super::error::TurnError;
use super::invariants::{InvariantSet, TurnInvariants};
use super::typestate::TurnSelecting;
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A: ?Sized> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), TurnError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), TurnError>;
}

// ─────────────────────────────────────────────────────────────
//  Click Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the cup exists on the opponent grid.
pub struct CupExists;

impl CupExists {
    /// Checks that the cup is on the opponent grid.
    #[instrument(skip(turn))]
    pub fn check(cup: &str, turn: &TurnSelecting) -> Result<(), TurnError> {
        match turn.opponent().slot(cup) {
            Some(_) => Ok(()),
            None => Err(TurnError::UnknownCup(cup.to_string())),
        }
    }
}

/// Precondition: the cup is still on the table.
pub struct CupAlive;

impl CupAlive {
    /// Checks that the cup has not been eliminated.
    #[instrument(skip(turn))]
    pub fn check(cup: &str, turn: &TurnSelecting) -> Result<(), TurnError> {
        match turn.opponent().slot(cup) {
            Some(slot) if !slot.is_alive() => Err(TurnError::CupEliminated(cup.to_string())),
            _ => Ok(()),
        }
    }
}

/// Precondition: marking a new normal cup stays within the budget.
///
/// Deselecting and re-hit toggles are always allowed.
pub struct WithinCapacity;

impl WithinCapacity {
    /// Checks that a new normal hit fits the remaining budget.
    #[instrument(skip(turn))]
    pub fn check(cup: &str, turn: &TurnSelecting) -> Result<(), TurnError> {
        let is_pending = turn.opponent().slot(cup).is_some_and(|s| s.is_pending());
        let selection = turn.selection();

        if is_pending || selection.is_newly_hit(cup) {
            return Ok(());
        }

        let limit = selection.capacity();
        if selection.newly_hit().len() >= limit {
            warn!(cup, limit, "Selection limit reached");
            Err(TurnError::CapacityReached { limit })
        } else {
            Ok(())
        }
    }
}

/// Composite precondition for a cup click.
pub struct LegalClick;

impl LegalClick {
    /// Validates all preconditions for a click.
    #[instrument(skip(turn))]
    pub fn check(cup: &str, turn: &TurnSelecting) -> Result<(), TurnError> {
        CupExists::check(cup, turn)?;
        CupAlive::check(cup, turn)?;
        WithinCapacity::check(cup, turn)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Click Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for cup clicks.
///
/// Preconditions:
/// - Cup exists and is alive
/// - New normal hits stay within capacity
///
/// Postconditions:
/// - Budget, disjointness and re-hit uniqueness invariants hold
pub struct ClickContract;

impl Contract<TurnSelecting, str> for ClickContract {
    fn pre(turn: &TurnSelecting, cup: &str) -> Result<(), TurnError> {
        LegalClick::check(cup, turn)
    }

    fn post(_before: &TurnSelecting, after: &TurnSelecting) -> Result<(), TurnError> {
        TurnInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            TurnError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pong::test_support::{selecting, theirs};
    use crate::pong::Multiplier;

    #[test]
    fn test_precondition_normal_cup() {
        let turn = selecting(theirs(None, &[]), Multiplier::Single);
        assert!(ClickContract::pre(&turn, "3 Sx").is_ok());
    }

    #[test]
    fn test_precondition_unknown_cup() {
        let turn = selecting(theirs(None, &[]), Multiplier::Single);
        assert!(matches!(
            ClickContract::pre(&turn, "R1 Cen"),
            Err(TurnError::UnknownCup(_))
        ));
    }

    #[test]
    fn test_precondition_eliminated_cup() {
        let active: Vec<String> = vec!["3 Sx".into()];
        let turn = selecting(theirs(Some(active.as_slice()), &[]), Multiplier::Single);
        assert!(matches!(
            ClickContract::pre(&turn, "1 Cen"),
            Err(TurnError::CupEliminated(_))
        ));
    }

    #[test]
    fn test_precondition_capacity() {
        let mut turn = selecting(theirs(None, &[]), Multiplier::Single);
        turn.selection.toggle_newly_hit("3 Sx");

        assert_eq!(
            ClickContract::pre(&turn, "3 Dx"),
            Err(TurnError::CapacityReached { limit: 1 })
        );
        // Deselecting is always allowed.
        assert!(ClickContract::pre(&turn, "3 Sx").is_ok());
    }

    #[test]
    fn test_precondition_pending_ignores_capacity() {
        let mut turn = selecting(theirs(None, &["1 Cen"]), Multiplier::Single);
        turn.selection.toggle_newly_hit("3 Sx");
        assert!(ClickContract::pre(&turn, "1 Cen").is_ok());
    }

    #[test]
    fn test_postcondition_detects_corruption() {
        let before = selecting(theirs(None, &[]), Multiplier::Single);
        let mut after = before.clone();
        after.selection.toggle_newly_hit("3 Sx");
        after.selection.toggle_newly_hit("3 Dx");

        assert!(ClickContract::post(&before, &after).is_err());
    }
}

//! Normal hits are alive, non-pending opponent cups.

use super::super::TurnSelecting;
use super::Invariant;

/// Invariant: every newly hit cup is an alive, non-pending opponent cup.
///
/// Implies newly hit cups and the pending set are disjoint.
pub struct DisjointSelectionInvariant;

impl Invariant<TurnSelecting> for DisjointSelectionInvariant {
    fn holds(turn: &TurnSelecting) -> bool {
        turn.selection()
            .newly_hit()
            .iter()
            .all(|cup| turn.opponent().slot(cup).is_some_and(|slot| slot.is_normal_target()))
    }

    fn description() -> &'static str {
        "Newly hit cups are alive and not pending"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pong::test_support::{selecting, theirs};
    use crate::pong::Multiplier;

    #[test]
    fn test_normal_hit_holds() {
        let mut turn = selecting(theirs(None, &["1 Cen"]), Multiplier::Double);
        turn.selection.toggle_newly_hit("2 Sx");
        assert!(DisjointSelectionInvariant::holds(&turn));
    }

    #[test]
    fn test_pending_cup_as_normal_hit_violates() {
        let mut turn = selecting(theirs(None, &["1 Cen"]), Multiplier::Double);
        turn.selection.toggle_newly_hit("1 Cen");
        assert!(!DisjointSelectionInvariant::holds(&turn));
    }

    #[test]
    fn test_eliminated_cup_violates() {
        let active: Vec<String> = vec!["3 Sx".into(), "3 Cen".into()];
        let mut turn = selecting(theirs(Some(active.as_slice()), &[]), Multiplier::Double);
        turn.selection.toggle_newly_hit("1 Cen");
        assert!(!DisjointSelectionInvariant::holds(&turn));
    }
}

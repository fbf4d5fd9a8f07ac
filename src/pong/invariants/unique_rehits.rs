//! Re-hits are distinct pending cups.

use super::super::TurnSelecting;
use super::Invariant;
use std::collections::HashSet;

/// Invariant: re-hit names are unique and each names a pending cup.
pub struct UniqueRehitInvariant;

impl Invariant<TurnSelecting> for UniqueRehitInvariant {
    fn holds(turn: &TurnSelecting) -> bool {
        let re_hits = turn.selection().re_hits();
        let distinct: HashSet<&String> = re_hits.iter().collect();

        distinct.len() == re_hits.len()
            && re_hits
                .iter()
                .all(|cup| turn.opponent().slot(cup).is_some_and(|slot| slot.is_pending()))
    }

    fn description() -> &'static str {
        "Re-hits are distinct pending cups"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pong::test_support::{selecting, theirs};
    use crate::pong::Multiplier;

    #[test]
    fn test_pending_rehit_holds() {
        let mut turn = selecting(theirs(None, &["1 Cen", "2 Sx"]), Multiplier::Single);
        turn.selection.toggle_re_hit("2 Sx");
        turn.selection.toggle_re_hit("1 Cen");
        assert!(UniqueRehitInvariant::holds(&turn));
    }

    #[test]
    fn test_rehit_on_normal_cup_violates() {
        let mut turn = selecting(theirs(None, &["1 Cen"]), Multiplier::Single);
        turn.selection.toggle_re_hit("3 Sx");
        assert!(!UniqueRehitInvariant::holds(&turn));
    }
}

//! Budget invariant: normal hits never exceed shot power plus re-hits.

use super::super::TurnSelecting;
use super::Invariant;

/// Invariant: `newly_hit <= multiplier + re_hits`.
pub struct BudgetInvariant;

impl Invariant<TurnSelecting> for BudgetInvariant {
    fn holds(turn: &TurnSelecting) -> bool {
        let selection = turn.selection();
        selection.newly_hit().len() <= selection.capacity()
    }

    fn description() -> &'static str {
        "Normal hits never exceed the multiplier plus re-hits"
    }
}

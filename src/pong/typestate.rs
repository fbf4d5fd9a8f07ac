//! Phase-specific typestate structs for a turn.
//!
//! Each phase is its own type. Only [`TurnSelecting`] accepts cup clicks,
//! and a [`TurnComplete`] always carries the payload it produced.

use super::contracts::{ClickContract, Contract};
use super::error::TurnError;
use super::format::Format;
use super::grid::CupGrid;
use super::instruction::Instruction;
use super::phases::ShotOutcome;
use super::selection::{Multiplier, TurnSelection};
use crate::submit::{TurnPayload, build_payload};
use tracing::{debug, info, instrument};

// ─────────────────────────────────────────────────────────────
//  Idle Phase
// ─────────────────────────────────────────────────────────────

/// Targeting mode is off. No selection exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnIdle {
    opponent: CupGrid,
    format: Format,
}

impl TurnIdle {
    /// Starts a turn against the given opponent grid.
    #[instrument(skip(opponent))]
    pub fn new(opponent: CupGrid, format: Format) -> Self {
        Self { opponent, format }
    }

    /// The opponent grid.
    pub fn opponent(&self) -> &CupGrid {
        &self.opponent
    }

    /// Opponent format the turn is played against.
    pub fn format(&self) -> Format {
        self.format
    }

    /// "Centro" checked: start selecting with a single shot.
    #[instrument(skip(self))]
    pub fn enable_targeting(self) -> TurnSelecting {
        debug!("Targeting enabled");
        TurnSelecting {
            opponent: self.opponent,
            format: self.format,
            selection: TurnSelection::new(Multiplier::Single),
        }
    }

    /// Records a rim or miss. Neither needs cups, so the turn completes at once.
    ///
    /// Borrows the idle turn so a refused center shot leaves it usable.
    #[instrument(skip(self))]
    pub fn finish(&self, outcome: ShotOutcome) -> Result<TurnComplete, TurnError> {
        if outcome.needs_targets() {
            return Err(TurnError::CenterRequiresCups);
        }
        let selection = TurnSelection::new(Multiplier::Single);
        let payload = build_payload(&selection, outcome, self.format);
        info!(%outcome, "Turn complete without hits");
        Ok(TurnComplete {
            format: self.format,
            selection,
            payload,
        })
    }

    /// Instruction while idle.
    pub fn instruction(&self) -> Instruction {
        Instruction::SelectCenter
    }
}

// ─────────────────────────────────────────────────────────────
//  Selecting Phase
// ─────────────────────────────────────────────────────────────

/// Accumulating cup selections for the current multiplier.
///
/// Invariants (checked after each click in debug builds):
/// - normal hits never exceed multiplier plus re-hits
/// - normal hits are alive, non-pending cups
/// - re-hits are distinct pending cups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnSelecting {
    pub(crate) opponent: CupGrid,
    pub(crate) format: Format,
    pub(crate) selection: TurnSelection,
}

impl TurnSelecting {
    /// The opponent grid.
    pub fn opponent(&self) -> &CupGrid {
        &self.opponent
    }

    /// Opponent format the turn is played against.
    pub fn format(&self) -> Format {
        self.format
    }

    /// Cups marked so far.
    pub fn selection(&self) -> &TurnSelection {
        &self.selection
    }

    /// Every remaining opponent cup is pending, so re-hits count as hits.
    pub fn is_all_pending(&self) -> bool {
        self.opponent.all_pending()
    }

    /// Toggles a cup, consuming the turn and returning the next phase.
    ///
    /// Pending cups toggle in the re-hit list; other cups toggle as new
    /// hits, refused once the budget is full. A refused click hands the
    /// unchanged turn back inside [`ClickRejected`].
    #[instrument(skip(self), fields(multiplier = ?self.selection.multiplier()))]
    pub fn register_cup_click(self, cup: &str) -> Result<ClickResult, ClickRejected> {
        if let Err(error) = ClickContract::pre(&self, cup) {
            return Err(ClickRejected { turn: self, error });
        }

        #[cfg(debug_assertions)]
        let before = self.clone();

        let mut turn = self;
        let is_pending = turn.opponent.slot(cup).is_some_and(|slot| slot.is_pending());
        let selected = if is_pending {
            turn.selection.toggle_re_hit(cup)
        } else {
            turn.selection.toggle_newly_hit(cup)
        };
        debug!(
            selected,
            re_hit = is_pending,
            newly_hit = turn.selection.newly_hit().len(),
            re_hits = turn.selection.re_hits().len(),
            "Cup toggled"
        );

        #[cfg(debug_assertions)]
        if let Err(error) = ClickContract::post(&before, &turn) {
            return Err(ClickRejected { turn: before, error });
        }

        if turn.evaluate_completion() {
            Ok(ClickResult::Complete(turn.complete()))
        } else {
            Ok(ClickResult::Selecting(turn))
        }
    }

    /// Whether the marked cups satisfy the shot.
    ///
    /// With every cup pending, re-hits count toward the multiplier. Otherwise
    /// only normal hits count, and the turn also completes once every
    /// selectable normal cup is marked. An empty selection never completes.
    pub fn evaluate_completion(&self) -> bool {
        let total = self.selection.total();
        if total == 0 {
            return false;
        }

        let required = self.selection.multiplier().count();
        let newly_hit = self.selection.newly_hit().len();

        if self.is_all_pending() {
            total >= required
        } else {
            newly_hit >= required || newly_hit >= self.opponent.selectable_normal_count()
        }
    }

    /// Presses a multiplier button. Any change discards the selection.
    #[instrument(skip(self))]
    pub fn change_multiplier(self, pressed: Multiplier) -> TurnSelecting {
        let multiplier = self.selection.multiplier().toggled(pressed);
        debug!(?multiplier, "Multiplier changed, selection reset");
        TurnSelecting {
            opponent: self.opponent,
            format: self.format,
            selection: TurnSelection::new(multiplier),
        }
    }

    /// "Centro" unchecked: drops every selection.
    #[instrument(skip(self))]
    pub fn disable_targeting(self) -> TurnIdle {
        debug!(discarded = self.selection.total(), "Targeting disabled");
        TurnIdle {
            opponent: self.opponent,
            format: self.format,
        }
    }

    /// Instruction for the current selection.
    pub fn instruction(&self) -> Instruction {
        Instruction::for_selection(&self.selection, self.is_all_pending())
    }

    fn complete(self) -> TurnComplete {
        let payload = build_payload(&self.selection, ShotOutcome::Center, self.format);
        info!(
            hits = payload.hit_cups().len(),
            rehits = %payload.rehit_list(),
            "Turn complete"
        );
        TurnComplete {
            format: self.format,
            selection: self.selection,
            payload,
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Complete Phase
// ─────────────────────────────────────────────────────────────

/// Selection satisfied. The payload is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnComplete {
    format: Format,
    selection: TurnSelection,
    payload: TurnPayload,
}

impl TurnComplete {
    /// The payload handed to the submitter.
    pub fn payload(&self) -> &TurnPayload {
        &self.payload
    }

    /// Final selection of the turn.
    pub fn selection(&self) -> &TurnSelection {
        &self.selection
    }

    /// Opponent format the turn was played against.
    pub fn format(&self) -> Format {
        self.format
    }

    /// Instruction once complete.
    pub fn instruction(&self) -> Instruction {
        Instruction::Done
    }
}

// ─────────────────────────────────────────────────────────────
//  Click results
// ─────────────────────────────────────────────────────────────

/// Phase after an accepted click.
#[derive(Debug)]
pub enum ClickResult {
    /// Budget not yet met.
    Selecting(TurnSelecting),
    /// Budget met; the turn is ready to submit.
    Complete(TurnComplete),
}

/// A refused click, with the turn unchanged.
#[derive(Debug)]
pub struct ClickRejected {
    /// The turn as it was before the click.
    pub turn: TurnSelecting,
    /// Why the click was refused.
    pub error: TurnError,
}

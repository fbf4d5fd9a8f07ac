//! Display intents for the renderer: instruction text and per-cup tags.

use super::grid::{CupGrid, Side};
use super::selection::TurnSelection;
use serde::{Deserialize, Serialize};

/// Instruction shown above the opponent grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    /// Targeting mode is off.
    SelectCenter,
    /// Cups still to be marked.
    Mark {
        /// Cups left before the turn completes.
        remaining: usize,
        /// At least one re-hit is already selected.
        after_rehit: bool,
    },
    /// Nothing left to mark.
    Done,
    /// Transient: a new cup was refused because the budget is full.
    LimitReached,
    /// Transient: a cup was pressed before enabling targeting.
    SelectCenterFirst,
}

impl Instruction {
    /// Instruction for an in-progress selection.
    ///
    /// When every remaining cup is pending, re-hits count toward the shot;
    /// otherwise only normal hits do.
    pub fn for_selection(selection: &TurnSelection, all_pending: bool) -> Self {
        let counted = if all_pending {
            selection.total()
        } else {
            selection.newly_hit().len()
        };
        let remaining = selection.multiplier().count().saturating_sub(counted);

        if remaining == 0 {
            Instruction::Done
        } else {
            Instruction::Mark {
                remaining,
                after_rehit: !selection.re_hits().is_empty(),
            }
        }
    }

    /// The instruction is a short-lived notice.
    pub fn is_transient(self) -> bool {
        matches!(self, Instruction::LimitReached | Instruction::SelectCenterFirst)
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Instruction::SelectCenter => write!(f, "Select 'Centro' to interact"),
            Instruction::Mark { remaining: 1, after_rehit: false } => write!(f, "Mark 1 cup"),
            Instruction::Mark { remaining: 1, after_rehit: true } => write!(f, "Mark 1 more cup"),
            Instruction::Mark { remaining, after_rehit: false } => write!(f, "Mark {} cups", remaining),
            Instruction::Mark { remaining, after_rehit: true } => write!(f, "Mark {} more cups", remaining),
            Instruction::Done => Ok(()),
            Instruction::LimitReached => write!(f, "LIMIT REACHED!"),
            Instruction::SelectCenterFirst => write!(f, "Select 'Centro' first!"),
        }
    }
}

/// Visual state tag of a cup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CupTag {
    /// Removed from the table.
    Eliminated,
    /// Hit earlier, awaiting re-hit.
    Pending,
    /// Marked in the current turn.
    Selected,
    /// One of my cups hit by the opponent, awaiting their re-hit.
    #[serde(rename = "pending-loss")]
    #[strum(serialize = "pending-loss")]
    PendingLoss,
}

/// What the renderer needs to draw one cup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CupView {
    /// Cup label.
    pub name: String,
    /// Visual tags, in tag order.
    pub tags: Vec<CupTag>,
}

impl CupView {
    /// True if the view carries `tag`.
    pub fn has(&self, tag: CupTag) -> bool {
        self.tags.contains(&tag)
    }
}

/// Projects a grid and optional selection into rows of cup views.
pub fn project(grid: &CupGrid, selection: Option<&TurnSelection>) -> Vec<Vec<CupView>> {
    grid.rows()
        .iter()
        .map(|row| {
            row.iter()
                .map(|slot| {
                    let mut tags = Vec::new();
                    if !slot.is_alive() {
                        tags.push(CupTag::Eliminated);
                    }
                    match grid.side() {
                        Side::Theirs => {
                            if slot.is_pending() {
                                tags.push(CupTag::Pending);
                            }
                            if selection.is_some_and(|s| s.is_selected(slot.name())) {
                                tags.push(CupTag::Selected);
                            }
                        }
                        Side::Mine => {
                            if slot.is_pending() {
                                tags.push(CupTag::PendingLoss);
                            }
                        }
                    }
                    CupView {
                        name: slot.name().to_string(),
                        tags,
                    }
                })
                .collect()
        })
        .collect()
}

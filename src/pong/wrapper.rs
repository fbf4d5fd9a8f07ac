//! Runtime wrapper over the typestate phases.
//!
//! UI events arrive one at a time and may target any phase, so the
//! controller holds an [`AnyTurn`] and dispatches each event to the phase
//! that can accept it.

use super::error::TurnError;
use super::format::Format;
use super::grid::{CupGrid, Side};
use super::instruction::Instruction;
use super::phases::{ShotOutcome, TurnPhase};
use super::selection::{Multiplier, TurnSelection};
use super::typestate::{ClickRejected, ClickResult, TurnComplete, TurnIdle, TurnSelecting};
use crate::submit::TurnPayload;
use tracing::{instrument, warn};

/// A turn in any phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyTurn {
    /// Targeting off.
    Idle(TurnIdle),
    /// Selecting cups.
    Selecting(TurnSelecting),
    /// Done; payload produced.
    Complete(TurnComplete),
}

/// What an accepted event changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnEvent {
    /// Targeting mode switched on.
    TargetingEnabled,
    /// Targeting mode switched off; selection discarded.
    TargetingDisabled,
    /// Multiplier changed; selection discarded.
    MultiplierChanged(Multiplier),
    /// A cup was toggled without completing the turn.
    CupToggled {
        /// Cup label.
        cup: String,
        /// The cup is now marked.
        selected: bool,
        /// The cup was pending, so it toggled as a re-hit.
        re_hit: bool,
    },
    /// The turn completed. Emitted exactly once per turn.
    Completed(TurnPayload),
}

impl From<TurnIdle> for AnyTurn {
    fn from(turn: TurnIdle) -> Self {
        AnyTurn::Idle(turn)
    }
}

impl From<TurnSelecting> for AnyTurn {
    fn from(turn: TurnSelecting) -> Self {
        AnyTurn::Selecting(turn)
    }
}

impl From<TurnComplete> for AnyTurn {
    fn from(turn: TurnComplete) -> Self {
        AnyTurn::Complete(turn)
    }
}

impl AnyTurn {
    /// A fresh idle turn.
    pub fn new(opponent: CupGrid, format: Format) -> Self {
        TurnIdle::new(opponent, format).into()
    }

    /// Current phase.
    pub fn phase(&self) -> TurnPhase {
        match self {
            AnyTurn::Idle(_) => TurnPhase::Idle,
            AnyTurn::Selecting(_) => TurnPhase::Selecting,
            AnyTurn::Complete(_) => TurnPhase::Complete,
        }
    }

    /// Targeting mode is on.
    pub fn is_targeting(&self) -> bool {
        matches!(self, AnyTurn::Selecting(_))
    }

    /// The in-progress or final selection, if any.
    pub fn selection(&self) -> Option<&TurnSelection> {
        match self {
            AnyTurn::Idle(_) => None,
            AnyTurn::Selecting(turn) => Some(turn.selection()),
            AnyTurn::Complete(turn) => Some(turn.selection()),
        }
    }

    /// Instruction for the current phase.
    pub fn instruction(&self) -> Instruction {
        match self {
            AnyTurn::Idle(turn) => turn.instruction(),
            AnyTurn::Selecting(turn) => turn.instruction(),
            AnyTurn::Complete(turn) => turn.instruction(),
        }
    }

    /// Switches targeting on. Already on is a no-op.
    #[instrument(skip(self), fields(phase = %self.phase()))]
    pub fn enable_targeting(&mut self) -> Result<TurnEvent, TurnError> {
        match self.take() {
            AnyTurn::Idle(turn) => {
                *self = turn.enable_targeting().into();
                Ok(TurnEvent::TargetingEnabled)
            }
            other @ AnyTurn::Selecting(_) => {
                *self = other;
                Ok(TurnEvent::TargetingEnabled)
            }
            other @ AnyTurn::Complete(_) => self.restore(other, TurnError::TurnComplete),
        }
    }

    /// Switches targeting off, discarding the selection. Already off is a no-op.
    #[instrument(skip(self), fields(phase = %self.phase()))]
    pub fn disable_targeting(&mut self) -> Result<TurnEvent, TurnError> {
        match self.take() {
            AnyTurn::Selecting(turn) => {
                *self = turn.disable_targeting().into();
                Ok(TurnEvent::TargetingDisabled)
            }
            other @ AnyTurn::Idle(_) => {
                *self = other;
                Ok(TurnEvent::TargetingDisabled)
            }
            other @ AnyTurn::Complete(_) => self.restore(other, TurnError::TurnComplete),
        }
    }

    /// Presses a multiplier button.
    #[instrument(skip(self), fields(phase = %self.phase()))]
    pub fn press_multiplier(&mut self, pressed: Multiplier) -> Result<TurnEvent, TurnError> {
        match self.take() {
            AnyTurn::Selecting(turn) => {
                let turn = turn.change_multiplier(pressed);
                let multiplier = turn.selection().multiplier();
                *self = turn.into();
                Ok(TurnEvent::MultiplierChanged(multiplier))
            }
            other @ AnyTurn::Idle(_) => self.restore(other, TurnError::TargetingDisabled),
            other @ AnyTurn::Complete(_) => self.restore(other, TurnError::TurnComplete),
        }
    }

    /// Handles a click on an opponent cup.
    #[instrument(skip(self), fields(phase = %self.phase()))]
    pub fn register_cup_click(&mut self, cup: &str) -> Result<TurnEvent, TurnError> {
        match self.take() {
            AnyTurn::Selecting(turn) => {
                let re_hit = turn.opponent().slot(cup).is_some_and(|slot| slot.is_pending());
                match turn.register_cup_click(cup) {
                    Ok(ClickResult::Selecting(turn)) => {
                        let selected = turn.selection().is_selected(cup);
                        *self = turn.into();
                        Ok(TurnEvent::CupToggled {
                            cup: cup.to_string(),
                            selected,
                            re_hit,
                        })
                    }
                    Ok(ClickResult::Complete(turn)) => {
                        let payload = turn.payload().clone();
                        *self = turn.into();
                        Ok(TurnEvent::Completed(payload))
                    }
                    Err(ClickRejected { turn, error }) => self.restore(turn.into(), error),
                }
            }
            other @ AnyTurn::Idle(_) => self.restore(other, TurnError::TargetingDisabled),
            other @ AnyTurn::Complete(_) => self.restore(other, TurnError::TurnComplete),
        }
    }

    /// Records the shot outcome.
    ///
    /// Center enables targeting. Rim and miss drop any selection and
    /// complete the turn immediately with empty hit lists.
    #[instrument(skip(self), fields(phase = %self.phase()))]
    pub fn record_outcome(&mut self, outcome: ShotOutcome) -> Result<TurnEvent, TurnError> {
        if outcome.needs_targets() {
            return self.enable_targeting();
        }

        let idle = match self.take() {
            AnyTurn::Idle(turn) => turn,
            AnyTurn::Selecting(turn) => turn.disable_targeting(),
            other @ AnyTurn::Complete(_) => return self.restore(other, TurnError::TurnComplete),
        };

        match idle.finish(outcome) {
            Ok(complete) => {
                let payload = complete.payload().clone();
                *self = complete.into();
                Ok(TurnEvent::Completed(payload))
            }
            Err(error) => self.restore(idle.into(), error),
        }
    }

    /// Moves the turn out, leaving a placeholder that every caller overwrites.
    fn take(&mut self) -> AnyTurn {
        std::mem::replace(self, AnyTurn::new(CupGrid::empty(Side::Theirs), Format::Pyramid))
    }

    fn restore(&mut self, turn: AnyTurn, error: TurnError) -> Result<TurnEvent, TurnError> {
        warn!(%error, "Turn event rejected");
        *self = turn;
        Err(error)
    }
}

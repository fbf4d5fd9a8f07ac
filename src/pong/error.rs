//! Errors raised by turn transitions.

use super::instruction::Instruction;

/// A rejected turn action. None of these change turn state.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum TurnError {
    /// A cup or multiplier was pressed while targeting mode is off.
    #[display("Select 'Centro' first")]
    TargetingDisabled,

    /// The selection already holds as many normal cups as allowed.
    #[display("Selection limit reached ({limit} cups)")]
    CapacityReached {
        /// Normal cups allowed with the current multiplier and re-hits.
        limit: usize,
    },

    /// The cup name is not part of the opponent grid.
    #[display("No cup named {:?} on the opponent side", _0)]
    UnknownCup(String),

    /// The cup has already been eliminated.
    #[display("Cup {:?} is already eliminated", _0)]
    CupEliminated(String),

    /// The turn already completed and was handed to the submitter.
    #[display("Turn already complete")]
    TurnComplete,

    /// A center shot was recorded without entering targeting mode.
    #[display("A center shot needs cups to be marked")]
    CenterRequiresCups,

    /// The opponent format menu is locked.
    #[display("Opponent format is locked")]
    FormatLocked,

    /// The format is not legal for the opponent's cup count.
    #[display("Format {} is not available", _0)]
    FormatUnavailable(super::format::Format),

    /// The finished turn could not be handed to the submitter.
    #[display("Submission could not be scheduled: {}", _0)]
    SubmitUnavailable(String),

    /// A selection invariant failed after a transition.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for TurnError {}

impl TurnError {
    /// Transient notice the renderer shows for this rejection, if any.
    pub fn notice(&self) -> Option<Instruction> {
        match self {
            TurnError::TargetingDisabled => Some(Instruction::SelectCenterFirst),
            TurnError::CapacityReached { .. } => Some(Instruction::LimitReached),
            _ => None,
        }
    }
}

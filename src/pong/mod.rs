//! Turn model: formats, grids, selections and the typestate turn machine.

mod contracts;
mod error;
mod format;
mod grid;
mod instruction;
pub mod invariants;
mod match_state;
mod phases;
mod selection;
mod selector;
mod typestate;
mod wrapper;

pub use contracts::{ClickContract, Contract, CupAlive, CupExists, LegalClick, WithinCapacity};
pub use error::TurnError;
pub use format::{Format, FormatCatalog, FormatLimits, Layout, UnknownFormat};
pub use grid::{CupGrid, CupGridModel, CupSlot, Side};
pub use instruction::{CupTag, CupView, Instruction, project};
pub use match_state::MatchState;
pub use phases::{ShotOutcome, TurnPhase};
pub use selection::{Multiplier, TurnSelection};
pub use selector::{
    FormatChoice, MatchFormatLock, compute_available_formats, is_lock_required, resolve_selection,
};
pub use typestate::{ClickRejected, ClickResult, TurnComplete, TurnIdle, TurnSelecting};
pub use wrapper::{AnyTurn, TurnEvent};

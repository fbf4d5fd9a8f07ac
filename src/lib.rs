//! Pong Turns library - beer-pong turn resolution
//!
//! This library resolves one shooter's turn against the opponent's cups and
//! hands the result to a scoring server.
//!
//! # Architecture
//!
//! - **Formats**: static catalog of cup layouts with their cup-count limits
//! - **Selector**: which opponent formats may be chosen and when the menu locks
//! - **Grid**: both sides' cups with alive and pending flags
//! - **Turn**: typestate machine for Centro targeting, multipliers and re-hits
//! - **Submit**: payload building and async-then-form delivery
//! - **Controller**: the event handler UI code drives
//!
//! # Example
//!
//! ```no_run
//! use pong_turns::{LogTransport, MatchState, ShotOutcome, SubmitDelays, TurnController, TurnSubmitter};
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let state = MatchState::from_json(r#"{"match_active": true}"#)?;
//! let submitter = TurnSubmitter::new(Arc::new(LogTransport), SubmitDelays::none());
//! let mut controller = TurnController::new(state, submitter);
//!
//! controller.select_outcome(ShotOutcome::Center)?;
//! controller.click_cup("1 Cen")?;
//! for handle in controller.drain_submissions() {
//!     handle.await??;
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod client_config;
mod controller;
mod pong;
mod submit;

// Crate-level exports - Configuration
pub use client_config::{ClientConfig, ConfigError, PLAYER_ENV, SERVER_URL_ENV};

// Crate-level exports - Controller
pub use controller::TurnController;

// Crate-level exports - Turn model
pub use pong::{
    AnyTurn, ClickContract, ClickRejected, ClickResult, Contract, CupAlive, CupExists, CupGrid,
    CupGridModel, CupSlot, CupTag, CupView, Format, FormatCatalog, FormatChoice, FormatLimits,
    Instruction, Layout, LegalClick, MatchFormatLock, MatchState, Multiplier, ShotOutcome, Side,
    TurnComplete, TurnError, TurnEvent, TurnIdle, TurnPhase, TurnSelecting, TurnSelection,
    UnknownFormat, WithinCapacity, compute_available_formats, is_lock_required, project,
    resolve_selection,
};

// Crate-level exports - Invariants
pub use pong::invariants;

// Crate-level exports - Submission
pub use submit::{
    Delivery, HttpTransport, LogTransport, SubmitDelays, SubmitError, SubmitHandle, Submission,
    TurnPayload, TurnSubmitter, TurnTransport, build_payload,
};

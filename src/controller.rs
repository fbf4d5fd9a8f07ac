//! Event handler that ties match state, the turn machine and the submitter together.
//!
//! UI code drives a [`TurnController`] one event at a time. Every method
//! runs synchronously; only submissions are spawned onto the runtime.

use crate::pong::{
    AnyTurn, CupGridModel, CupView, Format, FormatChoice, Instruction, MatchState, Multiplier,
    ShotOutcome, TurnError, TurnEvent, TurnPhase, compute_available_formats, project,
    resolve_selection,
};
use crate::submit::{SubmitHandle, Submission, TurnSubmitter};
use tracing::{debug, error, info, instrument, warn};

/// Owns the live turn and everything derived from match state.
#[derive(Debug)]
pub struct TurnController {
    state: MatchState,
    choice: FormatChoice,
    grids: CupGridModel,
    turn: AnyTurn,
    submitter: TurnSubmitter,
    in_flight: Vec<SubmitHandle>,
    format_menu_disabled: bool,
    notice: Option<Instruction>,
}

impl TurnController {
    /// Builds a controller for the given snapshot.
    #[instrument(skip(state, submitter), fields(cups = state.cup_count()))]
    pub fn new(state: MatchState, submitter: TurnSubmitter) -> Self {
        let choice = Self::resolve_choice(&state, None);
        let grids = state.grids(choice.selected);
        let turn = AnyTurn::new(grids.theirs().clone(), choice.selected);
        info!(format = %choice.selected, locked = choice.locked, "Controller ready");
        Self {
            state,
            choice,
            grids,
            turn,
            submitter,
            in_flight: Vec::new(),
            format_menu_disabled: false,
            notice: None,
        }
    }

    fn resolve_choice(state: &MatchState, current: Option<Format>) -> FormatChoice {
        let available = compute_available_formats(state.cup_count());
        resolve_selection(&available, state.format_lock(), current)
    }

    /// Replaces the match state. Grids are rebuilt and a fresh turn begins.
    #[instrument(skip(self, state), fields(cups = state.cup_count()))]
    pub fn apply_match_state(&mut self, state: MatchState) {
        let choice = Self::resolve_choice(&state, Some(self.choice.selected));
        self.grids = state.grids(choice.selected);
        self.turn = AnyTurn::new(self.grids.theirs().clone(), choice.selected);
        debug!(format = %choice.selected, locked = choice.locked, "Match state applied");
        self.choice = choice;
        self.state = state;
        self.format_menu_disabled = false;
        self.notice = None;
    }

    /// Current match state.
    pub fn match_state(&self) -> &MatchState {
        &self.state
    }

    /// Current format menu.
    pub fn format_choice(&self) -> &FormatChoice {
        &self.choice
    }

    /// Both rendered grids.
    pub fn grids(&self) -> &CupGridModel {
        &self.grids
    }

    /// The live turn.
    pub fn turn(&self) -> &AnyTurn {
        &self.turn
    }

    /// Phase of the live turn.
    pub fn phase(&self) -> TurnPhase {
        self.turn.phase()
    }

    /// Targeting mode is on.
    pub fn is_targeting(&self) -> bool {
        self.turn.is_targeting()
    }

    /// The format menu accepts no input.
    pub fn is_format_menu_disabled(&self) -> bool {
        self.choice.locked || self.format_menu_disabled
    }

    /// Instruction to display. A transient notice wins until the next accepted event.
    pub fn instruction(&self) -> Instruction {
        self.notice.unwrap_or_else(|| self.turn.instruction())
    }

    /// Projected views of my grid and the opponent grid.
    pub fn cup_views(&self) -> (Vec<Vec<CupView>>, Vec<Vec<CupView>>) {
        (
            project(self.grids.mine(), None),
            project(self.grids.theirs(), self.turn.selection()),
        )
    }

    /// Presses an outcome button.
    #[instrument(skip(self))]
    pub fn select_outcome(&mut self, outcome: ShotOutcome) -> Result<TurnEvent, TurnError> {
        self.dispatch(|turn| turn.record_outcome(outcome))
    }

    /// Unchecks "Centro".
    #[instrument(skip(self))]
    pub fn disable_targeting(&mut self) -> Result<TurnEvent, TurnError> {
        self.dispatch(AnyTurn::disable_targeting)
    }

    /// Presses a multiplier button.
    #[instrument(skip(self))]
    pub fn press_multiplier(&mut self, pressed: Multiplier) -> Result<TurnEvent, TurnError> {
        self.dispatch(|turn| turn.press_multiplier(pressed))
    }

    /// Clicks an opponent cup.
    #[instrument(skip(self))]
    pub fn click_cup(&mut self, cup: &str) -> Result<TurnEvent, TurnError> {
        self.dispatch(|turn| turn.register_cup_click(cup))
    }

    /// Chooses a new opponent format and submits it.
    ///
    /// Choosing the selected format again is a no-op and returns `false`.
    /// A completed turn keeps its phase until new match state arrives, so the
    /// change is refused then. The menu stays disabled until new match state
    /// arrives.
    #[instrument(skip(self))]
    pub fn change_format(&mut self, format: Format) -> Result<bool, TurnError> {
        if self.turn.phase() == TurnPhase::Complete {
            warn!("Format change refused, turn already submitted");
            return Err(TurnError::TurnComplete);
        }
        if self.is_format_menu_disabled() {
            warn!("Format change refused, menu locked");
            return Err(TurnError::FormatLocked);
        }
        if !self.choice.options.contains(&format) {
            warn!("Format change refused, not available");
            return Err(TurnError::FormatUnavailable(format));
        }
        if format == self.choice.selected {
            return Ok(false);
        }

        info!("Submitting format change");
        let handle = self
            .submitter
            .submit(Submission::FormatChange { format })
            .map_err(|e| TurnError::SubmitUnavailable(e.message))?;
        self.track(handle);

        self.choice.selected = format;
        self.grids = self.state.grids(format);
        self.turn = AnyTurn::new(self.grids.theirs().clone(), format);
        self.format_menu_disabled = true;
        self.notice = None;
        Ok(true)
    }

    /// Takes the handles of submissions spawned since the last drain.
    ///
    /// Handles that already finished are pruned whenever a new submission is
    /// tracked, so a caller that never drains does not accumulate them.
    pub fn drain_submissions(&mut self) -> Vec<SubmitHandle> {
        std::mem::take(&mut self.in_flight)
    }

    /// Submissions handed to the runtime and not yet drained or finished.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    fn track(&mut self, handle: SubmitHandle) {
        self.in_flight.retain(|h| !h.is_finished());
        self.in_flight.push(handle);
    }

    /// Applies one event to the turn and schedules a submission on completion.
    ///
    /// If the submission cannot be scheduled the turn is rolled back, so a
    /// completed turn always has a submission in flight.
    fn dispatch(
        &mut self,
        event: impl FnOnce(&mut AnyTurn) -> Result<TurnEvent, TurnError>,
    ) -> Result<TurnEvent, TurnError> {
        let before = self.turn.clone();
        match event(&mut self.turn) {
            Ok(TurnEvent::Completed(payload)) => {
                info!(outcome = %payload.outcome(), hits = payload.hit_cups().len(), "Submitting turn");
                match self.submitter.submit(Submission::Turn(payload.clone())) {
                    Ok(handle) => {
                        self.track(handle);
                        self.notice = None;
                        Ok(TurnEvent::Completed(payload))
                    }
                    Err(e) => {
                        error!(error = %e, "Turn rolled back, submission not scheduled");
                        self.turn = before;
                        Err(TurnError::SubmitUnavailable(e.message))
                    }
                }
            }
            Ok(event) => {
                self.notice = None;
                Ok(event)
            }
            Err(error) => {
                self.notice = error.notice();
                Err(error)
            }
        }
    }
}

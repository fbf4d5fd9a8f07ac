//! Authoritative match state as delivered by the scoring server.

use super::format::Format;
use super::grid::{CupGrid, CupGridModel, Side};
use super::selector::MatchFormatLock;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Cup count assumed when the server gives nothing usable.
const DEFAULT_CUP_COUNT: u32 = 6;

/// Snapshot of one player's view of a match.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchState {
    /// The local side's format.
    #[serde(default)]
    pub my_format: Format,
    /// Opponent format recorded by the server.
    #[serde(default)]
    pub their_format: Option<Format>,
    /// Local cups still on the table.
    #[serde(default)]
    pub my_active_cups: Option<Vec<String>>,
    /// Local cups the opponent hit, awaiting their re-hit.
    #[serde(default)]
    pub my_pending_cups: Vec<String>,
    /// Opponent cups still on the table.
    #[serde(default)]
    pub their_active_cups: Option<Vec<String>>,
    /// Opponent cups hit earlier and awaiting re-hit.
    #[serde(default)]
    pub their_pending_cups: Vec<String>,
    /// The match has started.
    #[serde(default)]
    pub match_active: bool,
    /// Target cup count while the match is not running.
    #[serde(default)]
    pub target_cups: Option<u32>,
}

impl MatchState {
    /// Parses a JSON snapshot.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Cup count that drives format availability.
    ///
    /// While the match runs this is the opponent's remaining cups; otherwise
    /// the configured target. Both fall back to six.
    pub fn cup_count(&self) -> u32 {
        if self.match_active {
            match &self.their_active_cups {
                Some(cups) => cups.len() as u32,
                None => self.target_cups.unwrap_or(DEFAULT_CUP_COUNT),
            }
        } else {
            self.target_cups.unwrap_or(DEFAULT_CUP_COUNT)
        }
    }

    /// An opponent cup is mid-resolution.
    pub fn has_pending_hit(&self) -> bool {
        !self.their_pending_cups.is_empty()
    }

    /// Lock state of the opponent format menu.
    pub fn format_lock(&self) -> MatchFormatLock {
        MatchFormatLock::from_server(self.their_format, self.cup_count(), self.has_pending_hit())
    }

    /// Opponent active list to render for `selected`.
    ///
    /// Only the server's recorded format has a meaningful active list; any
    /// other choice is a speculative preview with every cup alive.
    pub fn their_active_for(&self, selected: Format) -> Option<&[String]> {
        if Some(selected) == self.their_format {
            self.their_active_cups.as_deref()
        } else {
            None
        }
    }

    /// Renders both grids with `selected` as the opponent format.
    #[instrument(skip(self))]
    pub fn grids(&self, selected: Format) -> CupGridModel {
        let mine = CupGrid::render(
            self.my_format,
            self.my_active_cups.as_deref(),
            Side::Mine,
            &self.my_pending_cups,
        );
        let theirs = CupGrid::render(
            selected,
            self.their_active_for(selected),
            Side::Theirs,
            &self.their_pending_cups,
        );
        CupGridModel::new(mine, theirs)
    }
}

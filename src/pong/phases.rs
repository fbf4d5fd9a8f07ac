//! Turn phases and shot outcomes.

use serde::{Deserialize, Serialize};

/// Phase of the current turn, as seen by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum TurnPhase {
    /// Targeting mode is off ("Centro" unchecked).
    Idle,
    /// Accumulating cup selections.
    Selecting,
    /// Selection satisfied and the turn handed to the submitter.
    Complete,
}

/// How a shot landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum ShotOutcome {
    /// The ball went in; cups must be marked.
    #[serde(rename = "Centro")]
    Center,
    /// The ball hit the rim.
    #[serde(rename = "Bordo")]
    Rim,
    /// The ball missed the cups.
    #[serde(rename = "Miss")]
    Miss,
}

impl ShotOutcome {
    /// Value of the `risultato_tiro` form field.
    pub fn form_value(self) -> &'static str {
        match self {
            ShotOutcome::Center => "Centro",
            ShotOutcome::Rim => "Bordo",
            ShotOutcome::Miss => "Miss",
        }
    }

    /// Short tag used in logs and payload summaries.
    pub fn tag(self) -> &'static str {
        match self {
            ShotOutcome::Center => "Center",
            ShotOutcome::Rim => "Rim",
            ShotOutcome::Miss => "Miss",
        }
    }

    /// Parses a tag or form value (case-insensitive).
    pub fn parse_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_lowercase();
        <ShotOutcome as strum::IntoEnumIterator>::iter()
            .find(|o| o.tag().to_lowercase() == lower || o.form_value().to_lowercase() == lower)
    }

    /// Only a center shot requires cup selection.
    pub fn needs_targets(self) -> bool {
        matches!(self, ShotOutcome::Center)
    }
}

impl std::fmt::Display for ShotOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

//! Turn payloads and their wire encodings.

use crate::pong::{Format, Multiplier, ShotOutcome, TurnSelection};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Resolved result of one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnPayload {
    hit_cups: Vec<String>,
    rehit_list: String,
    outcome: ShotOutcome,
    format: Format,
    multiplier: Multiplier,
}

impl TurnPayload {
    /// Newly hit cup names, in click order.
    pub fn hit_cups(&self) -> &[String] {
        &self.hit_cups
    }

    /// Re-hit cup names joined with commas, in click order.
    pub fn rehit_list(&self) -> &str {
        &self.rehit_list
    }

    /// Re-hit cup names as a list.
    pub fn rehits(&self) -> Vec<&str> {
        self.rehit_list.split(',').filter(|c| !c.is_empty()).collect()
    }

    /// How the shot landed.
    pub fn outcome(&self) -> ShotOutcome {
        self.outcome
    }

    /// Opponent format the turn was played against.
    pub fn format(&self) -> Format {
        self.format
    }

    /// Shot power.
    pub fn multiplier(&self) -> Multiplier {
        self.multiplier
    }
}

/// Builds the payload for a resolved turn.
///
/// Non-center outcomes never carry cups, whatever the selection holds.
#[instrument(skip(selection))]
pub fn build_payload(selection: &TurnSelection, outcome: ShotOutcome, format: Format) -> TurnPayload {
    let (hit_cups, rehit_list, multiplier) = if outcome.needs_targets() {
        (
            selection.newly_hit().to_vec(),
            selection.re_hits().join(","),
            selection.multiplier(),
        )
    } else {
        (Vec::new(), String::new(), Multiplier::Single)
    };

    TurnPayload {
        hit_cups,
        rehit_list,
        outcome,
        format,
        multiplier,
    }
}

/// Something handed to the scoring server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Submission {
    /// A finished turn.
    Turn(TurnPayload),
    /// A new opponent format, without a shot.
    FormatChange {
        /// The chosen format.
        format: Format,
    },
}

impl Submission {
    /// Format carried by the submission.
    pub fn format(&self) -> Format {
        match self {
            Submission::Turn(payload) => payload.format,
            Submission::FormatChange { format } => *format,
        }
    }

    /// Form fields as posted by the page form.
    ///
    /// Hit cups repeat the `bicchiere_colpito` key. A format change sends
    /// only `formato`; the server reads a missing `risultato_tiro` as a
    /// format-only submission.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            Submission::Turn(payload) => {
                let mut fields = vec![
                    ("formato", payload.format.wire_name().to_string()),
                    ("risultato_tiro", payload.outcome.form_value().to_string()),
                    ("bicchieri_multipli", payload.multiplier.form_value().to_string()),
                    ("rehit_list", payload.rehit_list.clone()),
                ];
                fields.extend(
                    payload
                        .hit_cups
                        .iter()
                        .map(|cup| ("bicchiere_colpito", cup.clone())),
                );
                fields
            }
            Submission::FormatChange { format } => {
                vec![("formato", format.wire_name().to_string())]
            }
        }
    }
}

impl From<TurnPayload> for Submission {
    fn from(payload: TurnPayload) -> Self {
        Submission::Turn(payload)
    }
}

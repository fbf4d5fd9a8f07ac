//! Shot multipliers and the per-turn cup selection.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Shot power: how many cups a successful shot claims.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize, strum::EnumIter,
)]
pub enum Multiplier {
    /// One cup.
    #[default]
    Single,
    /// Two cups.
    Double,
    /// Three cups.
    Triple,
    /// Four cups.
    Quadruple,
    /// Five cups.
    Quintuple,
    /// Six cups.
    Sextuple,
}

impl Multiplier {
    /// Number of cups the shot claims (1-6).
    pub fn count(self) -> usize {
        match self {
            Multiplier::Single => 1,
            Multiplier::Double => 2,
            Multiplier::Triple => 3,
            Multiplier::Quadruple => 4,
            Multiplier::Quintuple => 5,
            Multiplier::Sextuple => 6,
        }
    }

    /// Value of the `bicchieri_multipli` form field. Empty for a single shot.
    pub fn form_value(self) -> &'static str {
        match self {
            Multiplier::Single => "",
            Multiplier::Double => "Doppio",
            Multiplier::Triple => "Triplo",
            Multiplier::Quadruple => "Quadruplo",
            Multiplier::Quintuple => "Quintuplo",
            Multiplier::Sextuple => "Sestuplo",
        }
    }

    /// Multiplier from a cup count, if in range.
    pub fn from_count(count: usize) -> Option<Self> {
        <Multiplier as strum::IntoEnumIterator>::iter().find(|m| m.count() == count)
    }

    /// Parses a form value or an English name (case-insensitive).
    pub fn parse_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_lowercase();
        <Multiplier as strum::IntoEnumIterator>::iter().find(|m| {
            m.form_value().to_lowercase() == lower || format!("{:?}", m).to_lowercase() == lower
        })
    }

    /// Result of pressing the button for `pressed` while `self` is active.
    ///
    /// Pressing the active button switches it off.
    pub fn toggled(self, pressed: Multiplier) -> Multiplier {
        if pressed == self {
            Multiplier::Single
        } else {
            pressed
        }
    }
}

/// Cups chosen during one turn.
///
/// `newly_hit` holds normal cups, `re_hits` pending cups, each in click
/// order and without duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TurnSelection {
    multiplier: Multiplier,
    newly_hit: Vec<String>,
    re_hits: Vec<String>,
}

impl TurnSelection {
    /// Empty selection for a shot of the given power.
    #[instrument]
    pub fn new(multiplier: Multiplier) -> Self {
        Self {
            multiplier,
            newly_hit: Vec::new(),
            re_hits: Vec::new(),
        }
    }

    /// Shot power.
    pub fn multiplier(&self) -> Multiplier {
        self.multiplier
    }

    /// Normal cups marked this turn.
    pub fn newly_hit(&self) -> &[String] {
        &self.newly_hit
    }

    /// Pending cups confirmed this turn, in click order.
    pub fn re_hits(&self) -> &[String] {
        &self.re_hits
    }

    /// Total cups marked.
    pub fn total(&self) -> usize {
        self.newly_hit.len() + self.re_hits.len()
    }

    /// Most normal cups that may be marked: shot power plus one per re-hit.
    pub fn capacity(&self) -> usize {
        self.multiplier.count() + self.re_hits.len()
    }

    /// True if `cup` is marked in either list.
    pub fn is_selected(&self, cup: &str) -> bool {
        self.newly_hit.iter().chain(&self.re_hits).any(|c| c == cup)
    }

    /// True if `cup` is marked as a normal hit.
    pub fn is_newly_hit(&self, cup: &str) -> bool {
        self.newly_hit.iter().any(|c| c == cup)
    }

    /// Adds or removes a normal hit. Returns whether it is now selected.
    pub(crate) fn toggle_newly_hit(&mut self, cup: &str) -> bool {
        toggle(&mut self.newly_hit, cup)
    }

    /// Adds or removes a re-hit. Returns whether it is now selected.
    pub(crate) fn toggle_re_hit(&mut self, cup: &str) -> bool {
        toggle(&mut self.re_hits, cup)
    }
}

fn toggle(list: &mut Vec<String>, cup: &str) -> bool {
    if let Some(index) = list.iter().position(|c| c == cup) {
        list.remove(index);
        false
    } else {
        list.push(cup.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pressing_active_multiplier_turns_it_off() {
        assert_eq!(Multiplier::Triple.toggled(Multiplier::Triple), Multiplier::Single);
        assert_eq!(Multiplier::Triple.toggled(Multiplier::Double), Multiplier::Double);
        assert_eq!(Multiplier::Single.toggled(Multiplier::Single), Multiplier::Single);
    }

    #[test]
    fn test_parse_name_accepts_form_and_english() {
        assert_eq!(Multiplier::parse_name("Sestuplo"), Some(Multiplier::Sextuple));
        assert_eq!(Multiplier::parse_name("double"), Some(Multiplier::Double));
        assert_eq!(Multiplier::parse_name(""), Some(Multiplier::Single));
        assert_eq!(Multiplier::parse_name("Ottuplo"), None);
        assert_eq!(Multiplier::from_count(4), Some(Multiplier::Quadruple));
        assert_eq!(Multiplier::from_count(7), None);
    }

    #[test]
    fn test_toggle_keeps_click_order() {
        let mut selection = TurnSelection::new(Multiplier::Quintuple);
        selection.toggle_newly_hit("3 Dx");
        selection.toggle_newly_hit("3 Sx");
        selection.toggle_newly_hit("2 Sx");
        assert!(!selection.toggle_newly_hit("3 Sx"));
        assert_eq!(selection.newly_hit(), ["3 Dx".to_string(), "2 Sx".to_string()]);
        assert_eq!(selection.capacity(), 5);
    }
}

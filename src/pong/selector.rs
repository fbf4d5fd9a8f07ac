//! Which formats the opponent can be switched to, and when the choice is locked.

use super::format::{Format, FormatCatalog};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Lock state of the opponent format menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchFormatLock {
    /// The menu must not offer alternate formats.
    pub locked: bool,
    /// Format the server last recorded for the opponent, if any.
    pub locked_value: Option<Format>,
}

impl MatchFormatLock {
    /// An unlocked menu with no server preference.
    pub fn unlocked() -> Self {
        Self::default()
    }

    /// Builds the lock from what the server reports for the opponent.
    #[instrument]
    pub fn from_server(server_format: Option<Format>, cup_count: u32, has_pending_hit: bool) -> Self {
        let server_already_locked = server_format.is_some_and(|f| f != Format::Pyramid);
        Self {
            locked: is_lock_required(cup_count, has_pending_hit, server_already_locked),
            locked_value: server_format,
        }
    }
}

/// Result of resolving the format menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatChoice {
    /// Options in menu order. May contain one out-of-catalog entry when locked.
    pub options: Vec<Format>,
    /// The option shown as selected.
    pub selected: Format,
    /// The menu is disabled.
    pub locked: bool,
}

/// Formats legal for `cup_count`, pyramid first, the rest by display name.
///
/// Never empty: zero cups still yields the pyramid.
#[instrument]
pub fn compute_available_formats(cup_count: u32) -> Vec<Format> {
    if cup_count == 0 {
        return vec![Format::Pyramid];
    }

    let mut available: Vec<Format> = Format::all()
        .filter(|&format| match format {
            Format::Pyramid => cup_count >= 1,
            other => FormatCatalog::limits_for(other).contains(cup_count),
        })
        .collect();

    available.sort_by(|a, b| match (a, b) {
        (Format::Pyramid, Format::Pyramid) => std::cmp::Ordering::Equal,
        (Format::Pyramid, _) => std::cmp::Ordering::Less,
        (_, Format::Pyramid) => std::cmp::Ordering::Greater,
        _ => a.display_name().cmp(b.display_name()),
    });

    debug!(?available, "Computed available formats");
    available
}

/// Picks the selected format for the menu.
///
/// A locked menu keeps the server's value even when the current cup count
/// no longer allows it; that value is appended as an extra option.
#[instrument]
pub fn resolve_selection(
    available: &[Format],
    lock: MatchFormatLock,
    current: Option<Format>,
) -> FormatChoice {
    let mut options = available.to_vec();

    let selected = if lock.locked {
        let target = lock.locked_value.or(current).unwrap_or(Format::Pyramid);
        if !options.contains(&target) {
            debug!(?target, "Locked format outside catalog limits, adding option");
            options.push(target);
        }
        target
    } else {
        lock.locked_value
            .filter(|f| options.contains(f))
            .or_else(|| current.filter(|f| options.contains(f)))
            .or_else(|| options.first().copied())
            .unwrap_or(Format::Pyramid)
    };

    FormatChoice {
        options,
        selected,
        locked: lock.locked,
    }
}

/// Whether the opponent format must be locked.
///
/// Locked when the server already recorded a non-default format, when a
/// hit is pending, or at five and six cups.
#[instrument]
pub fn is_lock_required(cup_count: u32, has_pending_hit: bool, server_already_locked: bool) -> bool {
    let count_locked = matches!(cup_count, 5 | 6);
    server_already_locked || has_pending_hit || count_locked
}

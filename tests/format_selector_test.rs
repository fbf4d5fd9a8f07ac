//! Tests for the format catalog and the opponent format menu.

use pong_turns::{
    Format, FormatCatalog, MatchFormatLock, MatchState, compute_available_formats,
    is_lock_required, resolve_selection,
};
use std::collections::HashSet;

#[test]
fn test_layout_names_unique_within_format() {
    for format in Format::all() {
        let names: Vec<&str> = FormatCatalog::cup_names(format).collect();
        let unique: HashSet<&str> = names.iter().copied().collect();
        assert_eq!(names.len(), unique.len(), "duplicate cup name in {}", format);
    }
}

#[test]
fn test_unknown_layout_name_uses_pyramid() {
    assert_eq!(
        FormatCatalog::layout_for_name("Esagono"),
        FormatCatalog::layout_for(Format::Pyramid)
    );
    assert_eq!(Format::from_wire("Esagono"), Format::Pyramid);
    assert!("Esagono".parse::<Format>().is_err());
}

#[test]
fn test_zero_cups_yields_only_pyramid() {
    assert_eq!(compute_available_formats(0), vec![Format::Pyramid]);
}

#[test]
fn test_available_formats_never_empty() {
    for cups in 0..=10 {
        let available = compute_available_formats(cups);
        assert!(!available.is_empty(), "no formats for {} cups", cups);
        assert_eq!(available[0], Format::Pyramid);
    }
}

#[test]
fn test_available_formats_by_cup_count() {
    assert_eq!(
        compute_available_formats(1),
        vec![Format::Pyramid, Format::SingleCenter]
    );
    assert_eq!(
        compute_available_formats(2),
        vec![Format::Pyramid, Format::HorizontalLine, Format::VerticalLine]
    );
    assert_eq!(
        compute_available_formats(3),
        vec![Format::Pyramid, Format::Triangle]
    );
    assert_eq!(
        compute_available_formats(4),
        vec![Format::Pyramid, Format::Diamond]
    );
    assert_eq!(compute_available_formats(6), vec![Format::Pyramid]);
}

#[test]
fn test_lock_required_at_six_cups() {
    for pending in [false, true] {
        for server in [false, true] {
            assert!(is_lock_required(6, pending, server));
            assert!(is_lock_required(5, pending, server));
        }
    }
}

#[test]
fn test_lock_not_required_at_three_cups() {
    assert!(!is_lock_required(3, false, false));
    assert!(is_lock_required(3, true, false));
    assert!(is_lock_required(3, false, true));
}

#[test]
fn test_pyramid_from_server_does_not_lock() {
    let lock = MatchFormatLock::from_server(Some(Format::Pyramid), 3, false);
    assert!(!lock.locked);
    let lock = MatchFormatLock::from_server(Some(Format::Triangle), 3, false);
    assert!(lock.locked);
}

#[test]
fn test_locked_value_outside_catalog_is_appended() {
    let available = compute_available_formats(4);
    let lock = MatchFormatLock {
        locked: true,
        locked_value: Some(Format::Triangle),
    };

    let choice = resolve_selection(&available, lock, None);

    assert!(choice.locked);
    assert_eq!(choice.selected, Format::Triangle);
    assert_eq!(
        choice.options,
        vec![Format::Pyramid, Format::Diamond, Format::Triangle]
    );
}

#[test]
fn test_locked_without_value_keeps_current() {
    let available = compute_available_formats(6);
    let lock = MatchFormatLock {
        locked: true,
        locked_value: None,
    };

    let choice = resolve_selection(&available, lock, Some(Format::Diamond));
    assert_eq!(choice.selected, Format::Diamond);
    assert_eq!(choice.options, vec![Format::Pyramid, Format::Diamond]);

    let choice = resolve_selection(&available, lock, None);
    assert_eq!(choice.selected, Format::Pyramid);
    assert_eq!(choice.options, vec![Format::Pyramid]);
}

#[test]
fn test_unlocked_prefers_server_then_current() {
    let available = compute_available_formats(2);
    let server = MatchFormatLock {
        locked: false,
        locked_value: Some(Format::VerticalLine),
    };
    let choice = resolve_selection(&available, server, Some(Format::HorizontalLine));
    assert_eq!(choice.selected, Format::VerticalLine);

    let choice = resolve_selection(&available, MatchFormatLock::unlocked(), Some(Format::HorizontalLine));
    assert_eq!(choice.selected, Format::HorizontalLine);

    // Unavailable current falls back to the first option.
    let choice = resolve_selection(&available, MatchFormatLock::unlocked(), Some(Format::Diamond));
    assert_eq!(choice.selected, Format::Pyramid);
    assert!(!choice.locked);
}

#[test]
fn test_match_state_cup_count() {
    let state = MatchState::from_json(
        r#"{"match_active": true, "their_active_cups": ["2 Sx", "2 Dx", "1 Cen"], "target_cups": 6}"#,
    )
    .expect("valid state");
    assert_eq!(state.cup_count(), 3);

    let state = MatchState::from_json(r#"{"match_active": false, "target_cups": 4}"#).expect("valid state");
    assert_eq!(state.cup_count(), 4);

    let state = MatchState::from_json("{}").expect("valid state");
    assert_eq!(state.cup_count(), 6);
}

#[test]
fn test_speculative_grid_for_other_format() {
    let state = MatchState::from_json(
        r#"{
            "their_format": "Piramide",
            "their_active_cups": ["3 Sx", "1 Cen"],
            "match_active": true
        }"#,
    )
    .expect("valid state");

    let recorded = state.grids(Format::Pyramid);
    assert_eq!(recorded.alive_opponent_count(), 2);

    let preview = state.grids(Format::Triangle);
    assert_eq!(preview.alive_opponent_count(), 3);
    assert!(preview.theirs().slots().all(|slot| slot.is_alive()));
}

//! Tests for grid focus navigation.

use super::*;

fn focused_at(index: usize, columns: usize, len: usize) -> FocusNavigator {
    let mut nav = FocusNavigator::new(columns);
    nav.handle(GridKey::Tab, len, true);
    for _ in 0..index {
        nav.handle(GridKey::Right, len, true);
    }
    assert_eq!(nav.selected_index(), Some(index));
    nav
}

// ===== Entering and leaving =====

#[test]
fn tab_from_unfocused_focuses_first_item() {
    let mut nav = FocusNavigator::new(3);
    assert_eq!(nav.handle(GridKey::Tab, 5, true), NavOutcome::Moved(0));
    assert_eq!(nav.focus(), GridFocus::Focused(0));
}

#[test]
fn tab_ignored_on_empty_grid() {
    let mut nav = FocusNavigator::new(3);
    assert_eq!(nav.handle(GridKey::Tab, 0, true), NavOutcome::Ignored);
    assert_eq!(nav.selected_index_signed(), -1);
}

#[test]
fn tab_ignored_while_not_interactive() {
    let mut nav = FocusNavigator::new(3);
    assert_eq!(nav.handle(GridKey::Tab, 5, false), NavOutcome::Ignored);
    assert!(!nav.is_focused());
}

#[test]
fn tab_while_focused_is_noop() {
    let mut nav = focused_at(2, 3, 5);
    assert_eq!(nav.handle(GridKey::Tab, 5, true), NavOutcome::Ignored);
    assert_eq!(nav.selected_index(), Some(2));
}

#[test]
fn arrows_ignored_while_unfocused() {
    let mut nav = FocusNavigator::new(2);
    for key in [GridKey::Left, GridKey::Right, GridKey::Up, GridKey::Down] {
        assert_eq!(nav.handle(key, 4, true), NavOutcome::Ignored);
    }
    assert_eq!(nav.handle(GridKey::Activate, 4, true), NavOutcome::Ignored);
    assert_eq!(nav.selected_index(), None);
}

#[test]
fn escape_unfocuses() {
    let mut nav = focused_at(1, 2, 4);
    assert_eq!(nav.handle(GridKey::Escape, 4, true), NavOutcome::Unfocused);
    assert_eq!(nav.selected_index_signed(), -1);
}

// ===== Horizontal movement =====

#[test]
fn right_moves_until_last_item() {
    let mut nav = focused_at(3, 4, 5);
    assert_eq!(nav.handle(GridKey::Right, 5, true), NavOutcome::Moved(4));
    assert_eq!(nav.handle(GridKey::Right, 5, true), NavOutcome::Ignored);
    assert_eq!(nav.selected_index(), Some(4));
}

#[test]
fn left_stops_at_first_item() {
    let mut nav = focused_at(1, 4, 5);
    assert_eq!(nav.handle(GridKey::Left, 5, true), NavOutcome::Moved(0));
    assert_eq!(nav.handle(GridKey::Left, 5, true), NavOutcome::Ignored);
    assert_eq!(nav.selected_index(), Some(0));
}

#[test]
fn right_crosses_row_boundary_linearly() {
    let mut nav = focused_at(2, 3, 6);
    assert_eq!(nav.handle(GridKey::Right, 6, true), NavOutcome::Moved(3));
}

// ===== Vertical movement =====

#[test]
fn down_moves_one_row() {
    let mut nav = focused_at(1, 3, 8);
    assert_eq!(nav.handle(GridKey::Down, 8, true), NavOutcome::Moved(4));
}

#[test]
fn down_out_of_range_is_noop() {
    // 3 columns, 5 items: index 2 has nothing below it.
    let mut nav = focused_at(2, 3, 5);
    assert_eq!(nav.handle(GridKey::Down, 5, true), NavOutcome::Ignored);
    assert_eq!(nav.selected_index(), Some(2));
}

#[test]
fn up_from_first_row_is_noop() {
    let mut nav = focused_at(2, 3, 8);
    assert_eq!(nav.handle(GridKey::Up, 8, true), NavOutcome::Ignored);
}

#[test]
fn up_moves_one_row() {
    let mut nav = focused_at(5, 3, 8);
    assert_eq!(nav.handle(GridKey::Up, 8, true), NavOutcome::Moved(2));
}

#[test]
fn vertical_moves_use_current_column_count() {
    let mut nav = focused_at(1, 2, 10);
    nav.set_columns(4);
    assert_eq!(nav.handle(GridKey::Down, 10, true), NavOutcome::Moved(5));
    nav.set_columns(2);
    assert_eq!(nav.handle(GridKey::Up, 10, true), NavOutcome::Moved(3));
}

#[test]
fn zero_columns_clamps_to_one() {
    let mut nav = FocusNavigator::new(0);
    assert_eq!(nav.columns(), 1);
    nav.set_columns(0);
    assert_eq!(nav.columns(), 1);
}

// ===== Activation =====

#[test]
fn activate_reports_index_without_moving() {
    let mut nav = focused_at(3, 2, 6);
    assert_eq!(nav.handle(GridKey::Activate, 6, true), NavOutcome::Activate(3));
    assert_eq!(nav.selected_index(), Some(3));
}

// ===== Hover =====

#[test]
fn hover_never_changes_focus() {
    let mut nav = focused_at(1, 3, 6);
    nav.set_hovered(Some(4));
    assert_eq!(nav.selected_index(), Some(1));
    assert_eq!(nav.hovered(), Some(4));
}

#[test]
fn reset_clears_focus_and_hover() {
    let mut nav = focused_at(3, 3, 6);
    nav.set_hovered(Some(0));
    nav.reset();
    assert_eq!(nav.focus(), GridFocus::Unfocused);
    assert_eq!(nav.hovered(), None);
    assert_eq!(nav.columns(), 3, "reset keeps the column count");
}

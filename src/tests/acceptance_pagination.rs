//! Acceptance tests: the load-more footer and paging invariants.

use crate::provider::FetchKind;
use crate::state::ResultsPhase;
use crate::test_harness::ExploreHarness;
use crossterm::event::KeyCode;
use std::time::Duration;

fn footer_click(harness: &ExploreHarness) -> (u16, u16) {
    let area = harness
        .app()
        .geometry()
        .and_then(|g| g.load_more)
        .expect("load-more footer is visible");
    (area.x + 1, area.y)
}

#[test]
fn tecnologia_pages_six_then_two() {
    // GIVEN: the tecnologia filter with eight matches
    let mut harness = ExploreHarness::with_preset("", Some("tecnologia"));
    harness.resolve_all();
    let state = harness.app().controller().state();
    assert_eq!(state.items().len(), 6);
    assert_eq!(state.total(), 8);
    assert!(state.has_more());

    // WHEN: the user clicks "Carregar mais"
    let (x, y) = footer_click(&harness);
    harness.click(x, y);
    assert!(harness.screen_text().contains("Carregando..."));
    harness.resolve_all();

    // THEN: the last two posts are appended and the footer goes away
    let state = harness.app().controller().state();
    assert_eq!(state.items().len(), 8);
    assert!(!state.has_more());
    assert_eq!(state.page(), 2);
    let ids: Vec<&str> = state.items()[6..].iter().map(|i| i.id().as_str()).collect();
    assert_eq!(ids, vec!["post-09", "post-10"]);
    assert!(harness.app().geometry().is_some_and(|g| g.load_more.is_none()));
    assert!(!harness.screen_text().contains("Carregar mais"));
}

#[test]
fn load_more_keeps_existing_items_in_place() {
    let mut harness = ExploreHarness::new();
    harness.resolve_all();
    let first_page: Vec<String> = harness
        .app()
        .controller()
        .state()
        .items()
        .iter()
        .map(|i| i.id().as_str().to_string())
        .collect();

    harness.press(KeyCode::Tab);
    harness.press(KeyCode::Char('m'));
    harness.resolve_all();

    let items = harness.app().controller().state().items();
    assert_eq!(items.len(), 10);
    let prefix: Vec<String> = items[..6].iter().map(|i| i.id().as_str().to_string()).collect();
    assert_eq!(prefix, first_page);
}

#[test]
fn second_load_more_while_loading_is_ignored() {
    let mut harness = ExploreHarness::new();
    harness.resolve_all();

    harness.press(KeyCode::Tab);
    harness.press(KeyCode::Char('m'));
    harness.press(KeyCode::Char('m'));

    let more: Vec<_> = harness
        .dispatcher()
        .history()
        .iter()
        .filter(|t| t.kind == FetchKind::More)
        .collect();
    assert_eq!(more.len(), 1);
    assert_eq!(more[0].query.page, 2);
}

#[test]
fn load_more_from_an_old_query_is_dropped() {
    // GIVEN: a load-more in flight
    let mut harness = ExploreHarness::new();
    harness.resolve_all();
    harness.press(KeyCode::Tab);
    harness.press(KeyCode::Char('m'));
    assert_eq!(harness.dispatcher().pending_len(), 1);

    // WHEN: the user starts a new search before it lands
    harness.press(KeyCode::Esc);
    harness.type_text("python");
    harness.press(KeyCode::Enter);
    harness.resolve_all();

    // THEN: only the new search's results are shown
    let state = harness.app().controller().state();
    assert_eq!(state.items().len(), 1);
    assert_eq!(state.items()[0].id().as_str(), "post-09");
    assert!(!state.loading_more());
    assert_eq!(state.phase(), ResultsPhase::Ready);
}

#[test]
fn load_more_failure_keeps_loaded_items() {
    let mut harness = ExploreHarness::new();
    harness.resolve_all();

    harness.press(KeyCode::Tab);
    harness.press(KeyCode::Char('m'));
    harness.fail_oldest("timeout");

    let state = harness.app().controller().state();
    assert_eq!(state.items().len(), 6);
    assert_eq!(state.page(), 1);
    assert!(!state.loading_more());
    assert!(state.last_error().is_some());
    let status = harness.screen().last().cloned().unwrap_or_default();
    assert!(status.contains("Falha ao carregar mais"), "{status}");
}

#[test]
fn navigation_still_works_while_loading_more() {
    let mut harness = ExploreHarness::new();
    harness.resolve_all();

    harness.press(KeyCode::Tab);
    harness.press(KeyCode::Char('m'));
    harness.press(KeyCode::Right);

    assert_eq!(
        harness.app().controller().focus().selected_index(),
        Some(1)
    );
    harness.advance(Duration::ZERO);
    assert!(harness.app().controller().state().loading_more());
}

#[test]
fn load_more_while_typing_keeps_the_shown_results_consistent() {
    // GIVEN: all posts loaded and a search typed but not yet sent
    let mut harness = ExploreHarness::new();
    harness.resolve_all();
    harness.type_text("violão");

    // WHEN: the user asks for more before the quiet period ends
    harness.press_with(KeyCode::Char('n'), crossterm::event::KeyModifiers::CONTROL);
    harness.resolve_all();

    // THEN: the second page belongs to the query already on screen
    let state = harness.app().controller().state();
    assert_eq!(state.items().len(), 10);
    assert_eq!(state.total(), 10);
    assert!(harness.screen_text().contains("Mostrando 10 de 10"));

    // AND: the typed search replaces everything once it fires
    harness.advance(Duration::from_millis(300));
    harness.resolve_all();
    let state = harness.app().controller().state();
    assert_eq!(state.total(), 1);
    assert_eq!(state.items()[0].id().as_str(), "post-01");
}

//! Property-based tests for search, paging and focus invariants.
//!
//! Tests validate:
//! 1. Grid focus always points at an existing item
//! 2. Catalogue pages partition the full match list
//! 3. Load-more only ever appends, and has_more tracks page * size < total
//! 4. Rapid typing within the quiet period collapses to one query

use chrono::NaiveDate;
use proptest::prelude::*;
use scambo::model::{ItemId, ResultItem};
use scambo::provider::{
    DeferredDispatcher, FetchQuery, InlineDispatcher, MockCatalog, ResultProvider,
};
use scambo::state::{
    FocusNavigator, GridFocus, GridKey, ManualClock, SearchController, SearchSettings,
};
use std::time::Duration;

const TAGS: [&str; 4] = ["aulas", "casa", "livros", "tecnologia"];

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

fn catalog_from(tag_picks: &[usize]) -> MockCatalog {
    let items = tag_picks
        .iter()
        .enumerate()
        .map(|(i, pick)| {
            ResultItem::new(
                ItemId::new(format!("p{i}")).unwrap(),
                format!("Post {i}"),
                "troco por algo",
                [TAGS[pick % TAGS.len()]],
                "Ana",
                today(),
            )
        })
        .collect();
    MockCatalog::from_items(items)
}

fn grid_key() -> impl Strategy<Value = GridKey> {
    prop_oneof![
        Just(GridKey::Tab),
        Just(GridKey::Left),
        Just(GridKey::Right),
        Just(GridKey::Up),
        Just(GridKey::Down),
        Just(GridKey::Activate),
        Just(GridKey::Escape),
    ]
}

// ===== Property 1: Focus bounds =====

proptest! {
    #[test]
    fn focus_stays_in_bounds(
        len in 0usize..40,
        columns in 1usize..6,
        keys in prop::collection::vec(grid_key(), 0..60),
    ) {
        let mut nav = FocusNavigator::new(columns);
        for key in keys {
            nav.handle(key, len, true);
            match nav.focus() {
                GridFocus::Unfocused => {}
                GridFocus::Focused(i) => prop_assert!(i < len, "focus {} of {}", i, len),
            }
        }
    }

    #[test]
    fn non_interactive_grid_ignores_every_key(
        len in 0usize..40,
        keys in prop::collection::vec(grid_key(), 0..30),
    ) {
        let mut nav = FocusNavigator::new(3);
        for key in keys {
            nav.handle(key, len, false);
        }
        prop_assert_eq!(nav.focus(), GridFocus::Unfocused);
    }
}

// ===== Property 2: Paging =====

proptest! {
    #[test]
    fn pages_partition_matches(
        picks in prop::collection::vec(0usize..4, 0..30),
        page_size in 1usize..8,
        tag in 0usize..4,
    ) {
        let catalog = catalog_from(&picks);
        let category = TAGS[tag];
        let expected = picks.iter().filter(|p| **p % TAGS.len() == tag).count();

        let mut seen = Vec::new();
        let mut page = 1;
        loop {
            let result = catalog
                .fetch(&FetchQuery::new(None, Some(category), page, page_size))
                .unwrap();
            prop_assert_eq!(result.total, expected);
            prop_assert!(result.items.len() <= page_size);
            seen.extend(result.items.iter().map(|i| i.id().as_str().to_string()));
            prop_assert_eq!(result.has_more, (page as usize) * page_size < expected);
            if !result.has_more {
                break;
            }
            page += 1;
        }

        prop_assert_eq!(seen.len(), expected);
        let mut unique = seen.clone();
        unique.dedup();
        prop_assert_eq!(unique.len(), seen.len());
    }
}

// ===== Property 3: Load-more =====

proptest! {
    #[test]
    fn load_more_appends_until_exhausted(
        count in 0usize..30,
        page_size in 1usize..7,
    ) {
        let catalog = catalog_from(&vec![0; count]);
        let settings = SearchSettings { page_size, debounce: Duration::from_millis(300) };
        let mut controller =
            SearchController::new(InlineDispatcher::new(catalog), ManualClock::new(), settings);
        controller.on_mount();
        controller.pump();

        loop {
            let state = controller.state();
            prop_assert_eq!(state.total(), count);
            prop_assert_eq!(
                state.has_more(),
                (state.page() as usize) * page_size < state.total()
            );
            prop_assert!(state.items().len() <= state.total());

            let before: Vec<String> =
                state.items().iter().map(|i| i.id().as_str().to_string()).collect();
            if !controller.on_load_more() {
                break;
            }
            controller.pump();

            let after: Vec<String> = controller
                .state()
                .items()
                .iter()
                .map(|i| i.id().as_str().to_string())
                .collect();
            prop_assert!(after.len() > before.len());
            prop_assert_eq!(&after[..before.len()], &before[..]);
        }

        prop_assert_eq!(controller.state().items().len(), count);
    }
}

// ===== Property 4: Debounce =====

proptest! {
    #[test]
    fn typing_within_quiet_period_sends_one_query(
        gaps in prop::collection::vec(0u64..300, 1..12),
    ) {
        let clock = ManualClock::new();
        let mut controller = SearchController::new(
            DeferredDispatcher::new(),
            clock.clone(),
            SearchSettings::default(),
        );
        controller.on_mount();
        let mounted = controller.dispatcher().history().len();

        let mut text = String::new();
        for gap in &gaps {
            text.push('a');
            controller.on_text_changed(&text);
            clock.advance(Duration::from_millis(*gap));
            controller.tick();
        }
        // No gap reached the quiet period, so nothing has fired yet.
        prop_assert_eq!(controller.dispatcher().history().len(), mounted);
        clock.advance(Duration::from_millis(300));
        controller.tick();

        let history = controller.dispatcher().history();
        prop_assert_eq!(history.len(), mounted + 1);
        prop_assert_eq!(history[mounted].query.text.as_deref(), Some(text.as_str()));
    }
}

//! Layout dimension constants and on-screen text.
//!
//! Centralized location for layout numbers and the Portuguese UI copy so
//! rendering code and tests agree on them.

use std::time::Duration;

/// Height of the page title line.
pub const TITLE_HEIGHT: u16 = 1;

/// Height of the search bar (border + input line).
pub const SEARCH_BAR_HEIGHT: u16 = 3;

/// Height of the category chip row.
pub const CHIPS_HEIGHT: u16 = 1;

/// Height of the load-more footer when shown.
pub const FOOTER_HEIGHT: u16 = 1;

/// Height of the status bar in lines.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Height of one result card (border + four content lines).
pub const CARD_HEIGHT: u16 = 6;

/// Grids narrower than this get two columns.
pub const NARROW_WIDTH: u16 = 60;

/// Grids narrower than this (and at least [`NARROW_WIDTH`]) get three columns.
pub const MEDIUM_WIDTH: u16 = 90;

/// Width percentage of the detail overlay.
pub const DETAIL_POPUP_WIDTH_PERCENT: u16 = 70;

/// Height percentage of the detail overlay.
pub const DETAIL_POPUP_HEIGHT_PERCENT: u16 = 70;

/// Upper bound on how long the event loop waits for input before pumping
/// fetch completions.
pub const TICK_INTERVAL: Duration = Duration::from_millis(50);

// ===== Copy =====

/// Page title.
pub const TITLE: &str = "Explorar";
/// Search field placeholder.
pub const SEARCH_HINT: &str = "Buscar publicações, tags, usuários...";
/// Label of the "all categories" chip.
pub const ALL_CATEGORIES: &str = "Todos";
/// Shown while the first page loads.
pub const LOADING: &str = "Buscando publicações...";
/// Shown when a query has no matches.
pub const EMPTY: &str = "Nenhuma publicação encontrada";
/// Secondary line under [`EMPTY`].
pub const EMPTY_HINT: &str = "Tente outra busca ou explore sem filtros";
/// Shown when the first page failed.
pub const ERROR: &str = "Não foi possível carregar as publicações";
/// Footer while more pages exist.
pub const LOAD_MORE: &str = "Carregar mais";
/// Footer while the next page loads.
pub const LOADING_MORE: &str = "Carregando...";
/// Close affordance of the detail overlay.
pub const CLOSE: &str = "Fechar";

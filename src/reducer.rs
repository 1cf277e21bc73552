//! Reducer - pure function: (state, action) -> DispatchResult

use ratatui::layout::Rect;
use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::catalog::Catalog;
use crate::components::DetailOverlayView;
use crate::detail::{DetailOverlay, DetailPanel};
use crate::effect::Effect;
use crate::filter::{FilterCriteria, filter_indices};
use crate::monster::Monster;
use crate::state::AppState;
use crate::view::{self, CatalogView, ListRow};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Catalog actions =====
        Action::CatalogLoad => {
            state.catalog = DataResource::Loading;
            state.criteria = FilterCriteria::default();
            state.filtered.clear();
            state.view = CatalogView::default();
            state.cursor = 0;
            state.search_active = false;
            state.detail = None;
            DispatchResult::changed_with(Effect::LoadCatalog {
                primary: state.sources.primary.clone(),
                fallback: state.sources.fallback.clone(),
            })
        }

        Action::CatalogDidLoad(monsters) => {
            let catalog = Catalog::new(monsters);
            tracing::info!(
                monsters = catalog.len(),
                regions = catalog.regions().len(),
                types = catalog.types().len(),
                "catalog initialized"
            );
            state.catalog = DataResource::Loaded(catalog);
            state.view = CatalogView::default();
            state.cursor = 0;
            state.detail = None;
            apply_filter(state);
            DispatchResult::changed()
        }

        Action::CatalogDidError(message) => {
            state.catalog = DataResource::Failed(message);
            state.filtered.clear();
            state.view = CatalogView::default();
            state.cursor = 0;
            DispatchResult::changed()
        }

        // ===== Search actions =====
        Action::SearchStart => {
            if state.search_active || !state.catalog.is_loaded() {
                return DispatchResult::unchanged();
            }
            state.search_active = true;
            DispatchResult::changed()
        }

        Action::SearchInput(ch) => {
            if !state.search_active {
                return DispatchResult::unchanged();
            }
            state.criteria.search.push(ch);
            apply_filter(state);
            DispatchResult::changed()
        }

        Action::SearchBackspace => {
            if !state.search_active || state.criteria.search.pop().is_none() {
                return DispatchResult::unchanged();
            }
            apply_filter(state);
            DispatchResult::changed()
        }

        Action::SearchSubmit => {
            if !state.search_active {
                return DispatchResult::unchanged();
            }
            state.search_active = false;
            DispatchResult::changed()
        }

        Action::SearchCancel => {
            if !state.search_active && state.criteria.search.is_empty() {
                return DispatchResult::unchanged();
            }
            state.search_active = false;
            state.criteria.search.clear();
            apply_filter(state);
            DispatchResult::changed()
        }

        // ===== Filter actions =====
        Action::FilterRegionNext => cycle_region(state, 1),
        Action::FilterRegionPrev => cycle_region(state, -1),
        Action::FilterTypeNext => cycle_type(state, 1),
        Action::FilterTypePrev => cycle_type(state, -1),

        Action::FilterClear => {
            if !state.criteria.is_active() {
                return DispatchResult::unchanged();
            }
            state.criteria = FilterCriteria::default();
            state.search_active = false;
            apply_filter(state);
            DispatchResult::changed()
        }

        // ===== List actions =====
        Action::ListMove(delta) => {
            let len = state.view.rows().len();
            let next = clamp_index(state.cursor, len, delta);
            if next == state.cursor {
                return DispatchResult::unchanged();
            }
            state.cursor = next;
            DispatchResult::changed()
        }

        Action::ListSelect(index) => {
            if index >= state.view.rows().len() || index == state.cursor {
                return DispatchResult::unchanged();
            }
            state.cursor = index;
            DispatchResult::changed()
        }

        Action::ListActivate => match state.selected_row() {
            Some(ListRow::Header { section }) => {
                let region = state.view.sections[section].region.clone();
                toggle_section(state, &region)
            }
            Some(ListRow::Card { section, card }) => {
                let Some(name) = state.view.card(section, card).map(|card| card.name.clone())
                else {
                    return DispatchResult::unchanged();
                };
                show_detail(state, &name)
            }
            None => DispatchResult::unchanged(),
        },

        // ===== Section actions =====
        Action::SectionToggle(region) => toggle_section(state, &region),

        Action::SectionExpandAll => {
            let anchor = state.selected_row();
            if state.view.expand_all() == 0 {
                return DispatchResult::unchanged();
            }
            retarget_cursor(state, anchor);
            DispatchResult::changed()
        }

        Action::SectionCollapseAll => {
            let anchor = state.selected_row();
            if state.view.collapse_all() == 0 {
                return DispatchResult::unchanged();
            }
            retarget_cursor(state, anchor);
            DispatchResult::changed()
        }

        // ===== Detail actions =====
        Action::DetailShow(name) => show_detail(state, &name),

        Action::DetailClose => {
            if state.detail.take().is_none() {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }

        Action::DetailScroll(delta) => {
            let (width, height) = state.terminal_size;
            let max = state
                .detail_monster()
                .map(|monster| {
                    DetailOverlayView::max_scroll(
                        &DetailPanel::build(monster),
                        Rect::new(0, 0, width, height),
                    )
                })
                .unwrap_or(0);
            let Some(detail) = state.detail.as_mut() else {
                return DispatchResult::unchanged();
            };
            if detail.scroll_by(delta, max) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== UI actions =====
        Action::UiTerminalResize(width, height) => {
            if state.terminal_size == (width, height) {
                return DispatchResult::unchanged();
            }
            state.terminal_size = (width, height);
            DispatchResult::changed()
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Re-runs the filter and rebuilds the view, keeping each region's open flag.
/// With any criterion active, matching regions are opened.
fn apply_filter(state: &mut AppState) {
    let anchor_region = state.selected_row().and_then(|row| match row {
        ListRow::Header { section } | ListRow::Card { section, .. } => state
            .view
            .sections
            .get(section)
            .map(|section| section.region.clone()),
    });
    let Some(catalog) = state.catalog.data() else {
        return;
    };
    let filtered = filter_indices(&state.criteria, catalog.monsters());
    let matched: Vec<&Monster> = filtered
        .iter()
        .filter_map(|index| catalog.monsters().get(*index))
        .collect();
    let mut next = view::render(&matched, &state.view.expansion());
    if state.criteria.is_active() {
        next.auto_expand(matched.iter().copied());
    }
    tracing::debug!(
        search = %state.criteria.search,
        region = ?state.criteria.region,
        kind = ?state.criteria.kind,
        matched = matched.len(),
        "filter applied"
    );

    state.filtered = filtered;
    state.view = next;
    let rows = state.view.rows();
    state.cursor = anchor_region
        .and_then(|region| {
            rows.iter().position(|row| match row {
                ListRow::Header { section } => state.view.sections[*section].region == region,
                ListRow::Card { .. } => false,
            })
        })
        .unwrap_or(0);
}

fn toggle_section(state: &mut AppState, region: &str) -> DispatchResult<Effect> {
    let anchor = state.selected_row();
    if !state.view.toggle(region) {
        return DispatchResult::unchanged();
    }
    retarget_cursor(state, anchor);
    DispatchResult::changed()
}

fn show_detail(state: &mut AppState, name: &str) -> DispatchResult<Effect> {
    let Some(catalog) = state.catalog.data() else {
        return DispatchResult::unchanged();
    };
    let Some(overlay) = DetailOverlay::open(catalog, name) else {
        return DispatchResult::unchanged();
    };
    state.search_active = false;
    state.detail = Some(overlay);
    DispatchResult::changed()
}

/// Keeps the cursor on the same row after sections open or close; a card
/// that disappeared hands the cursor to its section header.
fn retarget_cursor(state: &mut AppState, anchor: Option<ListRow>) {
    let rows = state.view.rows();
    let position = anchor.and_then(|anchor| {
        rows.iter().position(|row| *row == anchor).or_else(|| match anchor {
            ListRow::Card { section, .. } => rows
                .iter()
                .position(|row| *row == ListRow::Header { section }),
            ListRow::Header { .. } => None,
        })
    });
    state.cursor = position.unwrap_or_else(|| state.cursor.min(rows.len().saturating_sub(1)));
}

fn cycle_region(state: &mut AppState, step: i16) -> DispatchResult<Effect> {
    let Some(catalog) = state.catalog.data() else {
        return DispatchResult::unchanged();
    };
    let next = cycle_choice(catalog.regions(), state.criteria.region.as_deref(), step);
    if next == state.criteria.region {
        return DispatchResult::unchanged();
    }
    state.criteria.region = next;
    apply_filter(state);
    DispatchResult::changed()
}

fn cycle_type(state: &mut AppState, step: i16) -> DispatchResult<Effect> {
    let Some(catalog) = state.catalog.data() else {
        return DispatchResult::unchanged();
    };
    let next = cycle_choice(catalog.types(), state.criteria.kind.as_deref(), step);
    if next == state.criteria.kind {
        return DispatchResult::unchanged();
    }
    state.criteria.kind = next;
    apply_filter(state);
    DispatchResult::changed()
}

/// Steps through `[any, options...]`, wrapping at both ends.
fn cycle_choice(options: &[String], current: Option<&str>, step: i16) -> Option<String> {
    if options.is_empty() {
        return None;
    }
    let slots = options.len() as i32 + 1;
    let current_slot = current
        .and_then(|name| options.iter().position(|option| option == name))
        .map(|index| index as i32 + 1)
        .unwrap_or(0);
    let next = (current_slot + i32::from(step)).rem_euclid(slots);
    if next == 0 {
        None
    } else {
        Some(options[(next - 1) as usize].clone())
    }
}

fn clamp_index(current: usize, len: usize, delta: i16) -> usize {
    if len == 0 {
        return 0;
    }
    let next = current as i64 + i64::from(delta);
    next.clamp(0, len as i64 - 1) as usize
}

//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;
use tui_dispatch_debug::debug::{DebugSection, DebugState, ron_string};

use crate::catalog::Catalog;
use crate::detail::DetailOverlay;
use crate::filter::FilterCriteria;
use crate::loader::{DEFAULT_FALLBACK, DEFAULT_SOURCE};
use crate::monster::Monster;
use crate::view::{CatalogView, ListRow};

/// Where the dataset is read from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Sources {
    pub primary: String,
    pub fallback: String,
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            primary: DEFAULT_SOURCE.to_string(),
            fallback: DEFAULT_FALLBACK.to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    pub sources: Sources,
    /// Empty → Loading → Loaded/Failed. Replaced wholesale on reload.
    pub catalog: DataResource<Catalog>,
    pub criteria: FilterCriteria,
    /// Catalog positions that pass the current criteria.
    pub filtered: Vec<usize>,
    pub view: CatalogView,
    /// Selected row of the flattened list.
    pub cursor: usize,
    pub search_active: bool,
    pub detail: Option<DetailOverlay>,
    pub terminal_size: (u16, u16),
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Sources::default())
    }
}

impl AppState {
    pub fn new(sources: Sources) -> Self {
        Self {
            sources,
            catalog: DataResource::Empty,
            criteria: FilterCriteria::default(),
            filtered: Vec::new(),
            view: CatalogView::default(),
            cursor: 0,
            search_active: false,
            detail: None,
            terminal_size: (80, 24),
        }
    }

    pub fn loaded_catalog(&self) -> Option<&Catalog> {
        self.catalog.data()
    }

    pub fn filtered_monsters(&self) -> Vec<&Monster> {
        let Some(catalog) = self.loaded_catalog() else {
            return Vec::new();
        };
        self.filtered
            .iter()
            .filter_map(|index| catalog.monsters().get(*index))
            .collect()
    }

    pub fn selected_row(&self) -> Option<ListRow> {
        self.view.rows().get(self.cursor).copied()
    }

    pub fn detail_monster(&self) -> Option<&Monster> {
        let overlay = self.detail.as_ref()?;
        self.loaded_catalog()?.find(&overlay.name)
    }

    pub fn is_loading(&self) -> bool {
        self.catalog.is_loading() || self.catalog.is_empty()
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        let total = self.loaded_catalog().map(Catalog::len).unwrap_or(0);
        let expanded: Vec<String> = self
            .view
            .expansion()
            .expanded_regions()
            .map(str::to_string)
            .collect();
        vec![
            DebugSection::new("Catalog")
                .entry("source", ron_string(&self.sources.primary))
                .entry("fallback", ron_string(&self.sources.fallback))
                .entry("loading", ron_string(&self.catalog.is_loading()))
                .entry("error", ron_string(&self.catalog.error()))
                .entry("total", ron_string(&total))
                .entry("filtered", ron_string(&self.filtered.len())),
            DebugSection::new("Filters")
                .entry("search", ron_string(&self.criteria.search))
                .entry("search_active", ron_string(&self.search_active))
                .entry("region", ron_string(&self.criteria.region))
                .entry("type", ron_string(&self.criteria.kind)),
            DebugSection::new("View")
                .entry("sections", ron_string(&self.view.sections.len()))
                .entry("expanded", ron_string(&expanded))
                .entry("cursor", ron_string(&self.cursor))
                .entry(
                    "detail",
                    ron_string(&self.detail.as_ref().map(|detail| detail.name.clone())),
                ),
        ]
    }
}

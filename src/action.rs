//! Actions: user intents and async results

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::monster::Monster;

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Catalog category =====
    /// Intent: (re)load the dataset (triggers async task)
    CatalogLoad,

    /// Result: dataset parsed
    CatalogDidLoad(Vec<Monster>),

    /// Result: both sources failed; message for the user
    CatalogDidError(String),

    // ===== Search category =====
    SearchStart,
    SearchInput(char),
    SearchBackspace,
    /// Leave search mode keeping the query
    SearchSubmit,
    /// Leave search mode and clear the query
    SearchCancel,

    // ===== Filter category =====
    FilterRegionNext,
    FilterRegionPrev,
    FilterTypeNext,
    FilterTypePrev,
    FilterClear,

    // ===== List category =====
    ListMove(i16),
    ListSelect(usize),
    /// Toggle the selected section or open the selected card
    ListActivate,

    // ===== Section category =====
    SectionToggle(String),
    SectionExpandAll,
    SectionCollapseAll,

    // ===== Detail category =====
    DetailShow(String),
    DetailClose,
    DetailScroll(i16),

    // ===== UI category =====
    UiTerminalResize(u16, u16),

    // ===== Uncategorized (global) =====
    Quit,
}

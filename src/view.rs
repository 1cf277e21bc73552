//! Region-grouped view model and the expand/collapse rules that act on it
//!
//! Rendering is a pure function of the filtered monsters and the previous
//! [`Expansion`]; components only draw what this module produces.

use std::collections::{BTreeMap, HashMap, HashSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::monster::{Monster, or_unknown};

pub const EXPANDED_GLYPH: &str = "▲";
pub const COLLAPSED_GLYPH: &str = "▼";

pub const NO_RESULTS_TITLE: &str = "No matching monsters found";
pub const NO_RESULTS_HINT: &str = "Try other search terms";

/// Which regions are open, carried from one render to the next.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Expansion(BTreeMap<String, bool>);

impl Expansion {
    pub fn is_expanded(&self, region: &str) -> bool {
        self.0.get(region).copied().unwrap_or(false)
    }

    pub fn set(&mut self, region: impl Into<String>, expanded: bool) {
        self.0.insert(region.into(), expanded);
    }

    /// Regions currently open, in name order.
    pub fn expanded_regions(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, expanded)| **expanded)
            .map(|(region, _)| region.as_str())
    }
}

/// Compact summary of one monster inside a region section.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MonsterCard {
    pub name: String,
    pub kind: String,
    pub hp: String,
    pub spawn_round: String,
}

impl MonsterCard {
    fn from_monster(monster: &Monster) -> Self {
        Self {
            name: monster.name.clone(),
            kind: or_unknown(&monster.kind).to_string(),
            hp: or_unknown(&monster.hp).to_string(),
            spawn_round: or_unknown(&monster.spawn_round).to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RegionSection {
    pub region: String,
    pub cards: Vec<MonsterCard>,
    pub expanded: bool,
}

impl RegionSection {
    /// `"{region} ({count})"`
    pub fn header(&self) -> String {
        format!("{} ({})", self.region, self.cards.len())
    }

    pub fn glyph(&self) -> &'static str {
        if self.expanded {
            EXPANDED_GLYPH
        } else {
            COLLAPSED_GLYPH
        }
    }

    /// Flip open/closed. An empty region cannot be opened; returns whether
    /// anything changed.
    pub fn toggle(&mut self) -> bool {
        if self.cards.is_empty() && !self.expanded {
            return false;
        }
        self.expanded = !self.expanded;
        true
    }
}

/// One line of the flattened list: a section header, or a card of an open
/// section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListRow {
    Header { section: usize },
    Card { section: usize, card: usize },
}

/// Everything the catalog list shows. No sections means the "no results"
/// placeholder.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CatalogView {
    pub sections: Vec<RegionSection>,
}

impl CatalogView {
    pub fn is_no_results(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn section(&self, region: &str) -> Option<&RegionSection> {
        self.sections.iter().find(|section| section.region == region)
    }

    /// Flags to feed into the next [`render`].
    pub fn expansion(&self) -> Expansion {
        let mut expansion = Expansion::default();
        for section in &self.sections {
            expansion.set(section.region.clone(), section.expanded);
        }
        expansion
    }

    pub fn toggle(&mut self, region: &str) -> bool {
        self.sections
            .iter_mut()
            .find(|section| section.region == region)
            .is_some_and(RegionSection::toggle)
    }

    /// Opens every closed section. Returns how many changed.
    pub fn expand_all(&mut self) -> usize {
        self.sections
            .iter_mut()
            .filter(|section| !section.expanded)
            .map(RegionSection::toggle)
            .filter(|changed| *changed)
            .count()
    }

    /// Closes every open section. Returns how many changed.
    pub fn collapse_all(&mut self) -> usize {
        self.sections
            .iter_mut()
            .filter(|section| section.expanded)
            .map(RegionSection::toggle)
            .filter(|changed| *changed)
            .count()
    }

    /// Opens sections whose region had a match and closes the rest.
    pub fn auto_expand<'a>(&mut self, matched: impl IntoIterator<Item = &'a Monster>) {
        let matched: HashSet<&str> = matched.into_iter().map(Monster::region).collect();
        for section in &mut self.sections {
            if matched.contains(section.region.as_str()) != section.expanded {
                section.toggle();
            }
        }
    }

    pub fn rows(&self) -> Vec<ListRow> {
        let mut rows = Vec::new();
        for (section_index, section) in self.sections.iter().enumerate() {
            rows.push(ListRow::Header {
                section: section_index,
            });
            if section.expanded {
                rows.extend((0..section.cards.len()).map(|card| ListRow::Card {
                    section: section_index,
                    card,
                }));
            }
        }
        rows
    }

    pub fn card(&self, section: usize, card: usize) -> Option<&MonsterCard> {
        self.sections.get(section)?.cards.get(card)
    }
}

/// Groups by region in first-seen order, keeping input order within a group.
pub fn group_by_region<'a>(monsters: &[&'a Monster]) -> Vec<(String, Vec<&'a Monster>)> {
    let mut groups: Vec<(String, Vec<&'a Monster>)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for &monster in monsters {
        let region = monster.region();
        match positions.get(region) {
            Some(&position) => groups[position].1.push(monster),
            None => {
                positions.insert(region, groups.len());
                groups.push((region.to_string(), vec![monster]));
            }
        }
    }
    groups
}

/// Builds the region sections for `monsters`. Regions keep the flag they had
/// in `previous`; new ones start collapsed.
pub fn render(monsters: &[&Monster], previous: &Expansion) -> CatalogView {
    let sections = group_by_region(monsters)
        .into_iter()
        .map(|(region, members)| {
            let cards: Vec<MonsterCard> = members
                .into_iter()
                .map(MonsterCard::from_monster)
                .collect();
            let expanded = !cards.is_empty() && previous.is_expanded(&region);
            RegionSection {
                region,
                cards,
                expanded,
            }
        })
        .collect();
    CatalogView { sections }
}

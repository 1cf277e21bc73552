//! Filter pass over the catalog

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::monster::Monster;

/// What the user is currently filtering by. `None` means "any".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FilterCriteria {
    pub search: String,
    pub region: Option<String>,
    pub kind: Option<String>,
}

impl FilterCriteria {
    /// True when any criterion narrows the result.
    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || self.region.is_some() || self.kind.is_some()
    }

    /// `needle` is the search text, already lower-cased.
    fn matches(&self, monster: &Monster, needle: &str) -> bool {
        let name_match = monster.name.to_lowercase().contains(needle);
        let region_match = self
            .region
            .as_deref()
            .map_or(true, |region| monster.region() == region);
        let type_match = self
            .kind
            .as_deref()
            .map_or(true, |kind| monster.kind() == kind);
        name_match && region_match && type_match
    }
}

/// Matching monsters in catalog order.
pub fn filter<'a>(criteria: &FilterCriteria, monsters: &'a [Monster]) -> Vec<&'a Monster> {
    let needle = criteria.search.to_lowercase();
    monsters
        .iter()
        .filter(|monster| criteria.matches(monster, &needle))
        .collect()
}

/// Positions of the matching monsters, in catalog order.
pub fn filter_indices(criteria: &FilterCriteria, monsters: &[Monster]) -> Vec<usize> {
    let needle = criteria.search.to_lowercase();
    monsters
        .iter()
        .enumerate()
        .filter(|(_, monster)| criteria.matches(monster, &needle))
        .map(|(index, _)| index)
        .collect()
}

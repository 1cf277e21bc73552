//! The loaded dataset and the filter vocabularies derived from it

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::monster::Monster;

/// Full, unfiltered dataset. Built once per load and never mutated; a reload
/// builds a new one.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Catalog {
    monsters: Vec<Monster>,
    regions: Vec<String>,
    types: Vec<String>,
}

impl Catalog {
    pub fn new(monsters: Vec<Monster>) -> Self {
        let regions = distinct(monsters.iter().map(Monster::region));
        let types = distinct(monsters.iter().map(Monster::kind));
        Self {
            monsters,
            regions,
            types,
        }
    }

    pub fn monsters(&self) -> &[Monster] {
        &self.monsters
    }

    /// Distinct regions in first-seen order.
    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    /// Distinct types in first-seen order.
    pub fn types(&self) -> &[String] {
        &self.types
    }

    pub fn len(&self) -> usize {
        self.monsters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monsters.is_empty()
    }

    /// First monster with exactly this name.
    pub fn find(&self, name: &str) -> Option<&Monster> {
        self.monsters.iter().find(|monster| monster.name == name)
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in values {
        if !seen.iter().any(|known| known == value) {
            seen.push(value.to_string());
        }
    }
    seen
}

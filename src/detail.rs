//! Per-monster detail panel and the overlay that shows it

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::monster::{Monster, Skill, SkillSlot, UNKNOWN, or_unknown, present};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailField {
    pub label: &'static str,
    pub value: String,
}

impl DetailField {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkillBody {
    Fields(Vec<DetailField>),
    /// Legacy free-text skill.
    Text(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkillBlock {
    /// 1-based slot number.
    pub slot: usize,
    pub body: SkillBody,
}

impl SkillBlock {
    pub fn title(&self) -> String {
        format!("Skill {}", self.slot)
    }
}

/// Fixed-layout detail content for one monster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailPanel {
    pub title: String,
    pub basic: Vec<DetailField>,
    pub combat: Vec<DetailField>,
    pub skills: Vec<SkillBlock>,
    pub notes: Vec<DetailField>,
}

impl DetailPanel {
    pub fn build(monster: &Monster) -> Self {
        let basic = vec![
            DetailField::new("Type", or_unknown(&monster.kind)),
            DetailField::new("Region", or_unknown(&monster.region)),
            DetailField::new("Spawn round", or_unknown(&monster.spawn_round)),
            DetailField::new("Size", or_unknown(&monster.size)),
        ];
        let combat = vec![
            DetailField::new("HP", or_unknown(&monster.hp)),
            DetailField::new("Base stats", or_unknown(&monster.base_stats)),
            DetailField::new("Resistance", or_unknown(&monster.resistance)),
        ];
        let skills = monster
            .skill_slots()
            .into_iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_present())
            .filter_map(|(index, slot)| {
                let body = match slot {
                    SkillSlot::Entry(skill) => SkillBody::Fields(skill_fields(&skill)),
                    SkillSlot::Text(text) => SkillBody::Text(text),
                    SkillSlot::Empty => return None,
                };
                Some(SkillBlock {
                    slot: index + 1,
                    body,
                })
            })
            .collect();
        let notes = [
            ("Background", &monster.background),
            ("Behavior", &monster.behavior),
            ("Counter", &monster.counter),
        ]
        .into_iter()
        .filter_map(|(label, value)| present(value).map(|text| DetailField::new(label, text)))
        .collect();

        Self {
            title: monster.name.clone(),
            basic,
            combat,
            skills,
            notes,
        }
    }

    /// Flattened layout: the basic grid two fields per line, then combat,
    /// skill and note blocks separated by blank lines.
    pub fn lines(&self) -> Vec<DetailLine> {
        let mut lines: Vec<DetailLine> = self
            .basic
            .chunks(2)
            .map(|pair| DetailLine::Grid(pair.to_vec()))
            .collect();
        lines.push(DetailLine::Blank);
        lines.extend(self.combat.iter().cloned().map(DetailLine::Field));
        for block in &self.skills {
            lines.push(DetailLine::Blank);
            lines.push(DetailLine::Heading(block.title()));
            match &block.body {
                SkillBody::Fields(fields) => {
                    lines.extend(fields.iter().cloned().map(DetailLine::Field));
                }
                SkillBody::Text(text) => lines.push(DetailLine::Text(text.clone())),
            }
        }
        for note in &self.notes {
            lines.push(DetailLine::Blank);
            lines.push(DetailLine::Heading(note.label.to_string()));
            lines.push(DetailLine::Text(note.value.clone()));
        }
        lines
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DetailLine {
    Grid(Vec<DetailField>),
    Field(DetailField),
    Heading(String),
    Text(String),
    Blank,
}

fn skill_fields(skill: &Skill) -> Vec<DetailField> {
    let value = |field: &Option<String>| field.as_deref().unwrap_or(UNKNOWN).to_string();
    vec![
        DetailField::new("Name", value(&skill.name)),
        DetailField::new("Kind", value(&skill.kind)),
        DetailField::new("Accuracy", value(&skill.accuracy)),
        DetailField::new("Crit rate", value(&skill.crit_rate)),
        DetailField::new("Damage", value(&skill.damage)),
        DetailField::new("Effect", value(&skill.effect)),
    ]
}

/// Open detail overlay: which monster, and how far it is scrolled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DetailOverlay {
    pub name: String,
    pub scroll: u16,
}

impl DetailOverlay {
    /// Looks `name` up in the full catalog. Unknown names open nothing.
    pub fn open(catalog: &Catalog, name: &str) -> Option<Self> {
        catalog.find(name).map(|monster| Self {
            name: monster.name.clone(),
            scroll: 0,
        })
    }

    /// Moves the scroll offset, clamped to `0..=max`. Returns whether it moved.
    pub fn scroll_by(&mut self, delta: i16, max: u16) -> bool {
        let next = (i32::from(self.scroll) + i32::from(delta)).clamp(0, i32::from(max)) as u16;
        if next == self.scroll {
            return false;
        }
        self.scroll = next;
        true
    }
}

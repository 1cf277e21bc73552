//! Monster records as they appear in the dataset

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Region label for records without a `region` field.
pub const UNKNOWN_REGION: &str = "unknown region";
/// Type label for records without a `type` field.
pub const UNKNOWN_TYPE: &str = "unknown type";
/// Placeholder for any other missing display value.
pub const UNKNOWN: &str = "unknown";

/// Most skill slots a monster carries.
pub const MAX_SKILLS: usize = 4;

/// One catalog entry.
///
/// Display fields are kept as text: the dataset mixes numbers and strings for
/// things like `hp`, and nothing here does arithmetic on them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Monster {
    pub name: String,
    #[serde(default, deserialize_with = "text_field")]
    #[schemars(with = "Option<String>")]
    pub region: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "text_field")]
    #[schemars(with = "Option<String>")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    #[schemars(with = "Option<String>")]
    pub hp: Option<String>,
    #[serde(rename = "spawnRound", default, deserialize_with = "text_field")]
    #[schemars(with = "Option<String>")]
    pub spawn_round: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    #[schemars(with = "Option<String>")]
    pub size: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    #[schemars(with = "Option<String>")]
    pub resistance: Option<String>,
    #[serde(rename = "baseStats", default, deserialize_with = "text_field")]
    #[schemars(with = "Option<String>")]
    pub base_stats: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    #[schemars(with = "Option<String>")]
    pub background: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    #[schemars(with = "Option<String>")]
    pub behavior: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    #[schemars(with = "Option<String>")]
    pub counter: Option<String>,
    #[serde(default, deserialize_with = "skill_list")]
    #[schemars(with = "Vec<SkillSlot>")]
    pub skills: Vec<SkillSlot>,
    /// Older datasets stored skills as four flat text fields.
    #[serde(default, deserialize_with = "text_field", skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub skills1: Option<String>,
    #[serde(default, deserialize_with = "text_field", skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub skills2: Option<String>,
    #[serde(default, deserialize_with = "text_field", skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub skills3: Option<String>,
    #[serde(default, deserialize_with = "text_field", skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub skills4: Option<String>,
}

/// A structured skill. Keys are accepted in the dataset's Chinese spelling
/// as well as in English.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Skill {
    #[serde(default, alias = "名称", deserialize_with = "text_field")]
    #[schemars(with = "Option<String>")]
    pub name: Option<String>,
    #[serde(default, alias = "类型", alias = "type", deserialize_with = "text_field")]
    #[schemars(with = "Option<String>")]
    pub kind: Option<String>,
    #[serde(default, alias = "精准", deserialize_with = "text_field")]
    #[schemars(with = "Option<String>")]
    pub accuracy: Option<String>,
    #[serde(
        rename = "critRate",
        default,
        alias = "暴击率",
        alias = "crit_rate",
        deserialize_with = "text_field"
    )]
    #[schemars(with = "Option<String>")]
    pub crit_rate: Option<String>,
    #[serde(default, alias = "伤害", deserialize_with = "text_field")]
    #[schemars(with = "Option<String>")]
    pub damage: Option<String>,
    #[serde(default, alias = "特效", deserialize_with = "text_field")]
    #[schemars(with = "Option<String>")]
    pub effect: Option<String>,
}

/// One entry of the `skills` array.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum SkillSlot {
    Entry(Skill),
    /// Free text, usually the "none" marker.
    Text(String),
    Empty,
}

impl SkillSlot {
    /// Whether the slot holds something worth showing.
    pub fn is_present(&self) -> bool {
        match self {
            SkillSlot::Entry(_) => true,
            SkillSlot::Text(text) => !text.trim().is_empty() && !is_none_marker(text),
            SkillSlot::Empty => false,
        }
    }
}

impl Monster {
    /// Region used for grouping and filtering.
    pub fn region(&self) -> &str {
        self.region.as_deref().unwrap_or(UNKNOWN_REGION)
    }

    /// Type used for filtering and the type vocabulary.
    pub fn kind(&self) -> &str {
        self.kind.as_deref().unwrap_or(UNKNOWN_TYPE)
    }

    /// Skill slots in display order, at most [`MAX_SKILLS`].
    ///
    /// The structured `skills` array wins; the flat `skillsN` fields are only
    /// consulted when it is empty.
    pub fn skill_slots(&self) -> Vec<SkillSlot> {
        if !self.skills.is_empty() {
            return self.skills.iter().take(MAX_SKILLS).cloned().collect();
        }
        [&self.skills1, &self.skills2, &self.skills3, &self.skills4]
            .into_iter()
            .map(|legacy| match legacy {
                Some(text) => SkillSlot::Text(text.clone()),
                None => SkillSlot::Empty,
            })
            .collect()
    }
}

/// `无` and `none` both mean "nothing here".
pub fn is_none_marker(text: &str) -> bool {
    let text = text.trim();
    text == "无" || text.eq_ignore_ascii_case("none")
}

/// `Some(text)` unless the value is missing or a "none" marker.
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !is_none_marker(text))
}

/// Value or the generic "unknown" placeholder.
pub fn or_unknown(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(UNKNOWN)
}

fn text_field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(display_text))
}

fn skill_list<'de, D>(deserializer: D) -> Result<Vec<SkillSlot>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<SkillSlot>>::deserialize(deserializer)?.unwrap_or_default())
}

fn display_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) if text.trim().is_empty() => None,
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> Monster {
        serde_json::from_value(value).expect("valid monster")
    }

    #[test]
    fn test_missing_region_and_type_use_sentinels() {
        let monster = parse(json!({ "name": "Wisp" }));
        assert_eq!(monster.region(), UNKNOWN_REGION);
        assert_eq!(monster.kind(), UNKNOWN_TYPE);
        assert_eq!(or_unknown(&monster.hp), UNKNOWN);
    }

    #[test]
    fn test_numbers_and_blank_strings() {
        let monster = parse(json!({
            "name": "Slime",
            "hp": 10,
            "spawnRound": "",
            "size": null
        }));
        assert_eq!(monster.hp.as_deref(), Some("10"));
        assert_eq!(monster.spawn_round, None);
        assert_eq!(monster.size, None);
    }

    #[test]
    fn test_skill_keys_in_both_spellings() {
        let monster = parse(json!({
            "name": "Golem",
            "skills": [
                { "名称": "Slam", "类型": "physical", "精准": 90, "暴击率": "5%", "伤害": 30, "特效": "stun" },
                "无",
                { "name": "Quake", "kind": "earth", "critRate": "10%" },
                null
            ]
        }));
        let slots = monster.skill_slots();
        assert_eq!(slots.len(), 4);
        let SkillSlot::Entry(slam) = &slots[0] else {
            panic!("expected structured skill");
        };
        assert_eq!(slam.name.as_deref(), Some("Slam"));
        assert_eq!(slam.accuracy.as_deref(), Some("90"));
        assert_eq!(slam.effect.as_deref(), Some("stun"));
        assert!(!slots[1].is_present());
        let SkillSlot::Entry(quake) = &slots[2] else {
            panic!("expected structured skill");
        };
        assert_eq!(quake.crit_rate.as_deref(), Some("10%"));
        assert_eq!(slots[3], SkillSlot::Empty);
    }

    #[test]
    fn test_legacy_flat_skills_only_when_array_empty() {
        let legacy = parse(json!({ "name": "Old", "skills1": "Bite", "skills2": "none" }));
        let slots = legacy.skill_slots();
        assert_eq!(slots[0], SkillSlot::Text("Bite".into()));
        assert!(!slots[1].is_present());
        assert!(!slots[2].is_present());

        let both = parse(json!({
            "name": "New",
            "skills1": "Bite",
            "skills": [{ "name": "Claw" }]
        }));
        let slots = both.skill_slots();
        assert_eq!(slots.len(), 1);
        assert!(matches!(&slots[0], SkillSlot::Entry(skill) if skill.name.as_deref() == Some("Claw")));
    }

    #[test]
    fn test_skills_capped_at_four() {
        let monster = parse(json!({
            "name": "Hydra",
            "skills": [{ "name": "a" }, { "name": "b" }, { "name": "c" }, { "name": "d" }, { "name": "e" }]
        }));
        assert_eq!(monster.skill_slots().len(), MAX_SKILLS);
    }

    #[test]
    fn test_none_markers() {
        assert!(is_none_marker("无"));
        assert!(is_none_marker(" None "));
        assert!(!is_none_marker("nonexistent"));
        assert_eq!(present(&Some("无".into())), None);
        assert_eq!(present(&Some("Lives in caves".into())), Some("Lives in caves"));
    }

    #[test]
    fn test_missing_name_is_rejected() {
        let result = serde_json::from_value::<Monster>(json!({ "region": "Cave" }));
        assert!(result.is_err());
    }
}

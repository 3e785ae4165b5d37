//! Embedded semi-structured documents stored inline on a catalog record.
//!
//! Three documents are carried per record: the base ability list, the gauge ability
//! list (both JSON arrays) and the connect skill (a JSON object). They are parsed
//! leniently: anything malformed degrades to an empty list / empty connect skill.
//!
//! Key precedence inside an ability entry: `abilityId` first, then `id`.
//! Key precedence inside the connect skill: `conditionText` first, then `condition`.
//! A key counts as present when it exists with a non-null value. A present condition
//! that is not a scalar reads as an empty string.

use crate::domain::response::{Ability, ConnectSkill};
use crate::domain::row::MonsterRow;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::collections::{BTreeSet, HashMap};

/// Display name used when an embedded ability id cannot be resolved.
pub const UNKNOWN_ABILITY: &str = "UNKNOWN";

/// One entry of an ability list, before name resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbilityRef {
    pub ability_id: Option<i64>,
    /// Carried through as-is; not a foreign key.
    pub stage: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct AbilityRefFields {
    #[serde(rename = "abilityId", default)]
    ability_id: Option<JsonValue>,
    #[serde(default)]
    id: Option<JsonValue>,
    #[serde(default)]
    stage: Option<JsonValue>,
}

#[derive(Debug, Default, Deserialize)]
struct ConnectSkillFields {
    #[serde(rename = "conditionText", default)]
    condition_text: Option<JsonValue>,
    #[serde(default)]
    condition: Option<JsonValue>,
    #[serde(default)]
    abilities: Option<JsonValue>,
}

impl AbilityRef {
    fn from_entry(entry: &JsonValue) -> Self {
        // Non-object entries still occupy a slot in the list, they just resolve to UNKNOWN.
        if !entry.is_object() {
            return Self::default();
        }
        let fields = AbilityRefFields::deserialize(entry).unwrap_or_default();
        Self {
            ability_id: fields.ability_id.or(fields.id).as_ref().and_then(id_from_json),
            stage: fields.stage.as_ref().and_then(scalar_text),
        }
    }

    /// Resolves the display name against a batch-resolved mapping.
    pub fn resolve(&self, names: &HashMap<i64, String>) -> Ability {
        let name = self
            .ability_id
            .and_then(|id| names.get(&id))
            .map_or_else(|| UNKNOWN_ABILITY.to_string(), Clone::clone);
        Ability {
            name,
            stage: self.stage.clone(),
        }
    }
}

/// The connect skill document, before name resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectSkillDoc {
    pub condition: Option<String>,
    pub abilities: Vec<AbilityRef>,
}

impl ConnectSkillDoc {
    pub fn resolve(&self, names: &HashMap<i64, String>) -> ConnectSkill {
        ConnectSkill {
            condition: self.condition.clone(),
            abilities: resolve_all(&self.abilities, names),
        }
    }
}

/// All embedded documents of one row, parsed once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonsterDocuments {
    pub base: Vec<AbilityRef>,
    pub gauge: Vec<AbilityRef>,
    pub connect: ConnectSkillDoc,
}

impl MonsterDocuments {
    pub fn from_row(row: &MonsterRow) -> Self {
        Self {
            base: parse_ability_list(row.base_ability.as_deref()),
            gauge: parse_ability_list(row.gauge_ability.as_deref()),
            connect: parse_connect_skill(row.connect_skill.as_deref()),
        }
    }

    /// Adds every embedded ability id to `out`.
    pub fn collect_ids(&self, out: &mut BTreeSet<i64>) {
        out.extend(
            self.base
                .iter()
                .chain(&self.gauge)
                .chain(&self.connect.abilities)
                .filter_map(|a| a.ability_id),
        );
    }
}

pub fn resolve_all(refs: &[AbilityRef], names: &HashMap<i64, String>) -> Vec<Ability> {
    refs.iter().map(|r| r.resolve(names)).collect()
}

/// Parses an ability list document. Absent, blank, malformed or non-array input
/// yields an empty list.
pub fn parse_ability_list(raw: Option<&str>) -> Vec<AbilityRef> {
    match parse_json(raw) {
        Some(JsonValue::Array(entries)) => entries.iter().map(AbilityRef::from_entry).collect(),
        _ => Vec::new(),
    }
}

/// Parses a connect skill document. Anything but a JSON object yields
/// `{ condition: None, abilities: [] }`; a non-array `abilities` yields no abilities.
pub fn parse_connect_skill(raw: Option<&str>) -> ConnectSkillDoc {
    let Some(doc @ JsonValue::Object(_)) = parse_json(raw) else {
        return ConnectSkillDoc::default();
    };
    let fields = ConnectSkillFields::deserialize(&doc).unwrap_or_default();

    // The first present key decides, even when its value is not a scalar.
    let condition = fields
        .condition_text
        .or(fields.condition)
        .map(|v| scalar_text(&v).unwrap_or_default());

    let abilities = match fields.abilities {
        Some(JsonValue::Array(entries)) => entries.iter().map(AbilityRef::from_entry).collect(),
        _ => Vec::new(),
    };

    ConnectSkillDoc {
        condition,
        abilities,
    }
}

fn parse_json(raw: Option<&str>) -> Option<JsonValue> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    serde_json::from_str(raw).ok()
}

/// Numbers (integral, or finite floats truncated) and numeric strings are ids.
fn id_from_json(v: &JsonValue) -> Option<i64> {
    match v {
        JsonValue::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        JsonValue::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn scalar_text(v: &JsonValue) -> Option<String> {
    match v {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

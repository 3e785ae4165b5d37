//! The nested, client-ready read model.
//!
//! Field names serialize in camelCase. Optional fields are always present in the
//! JSON output (as `null` when absent) so clients parse one uniform shape.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored asset: path, sniffed or inferred content type, optional base64 payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageData {
    pub path: String,
    pub mime_type: Option<String>,
    /// Only populated when the caller asked for images (always on the detail view).
    pub base64: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NamedImage {
    pub name: String,
    pub image: Option<ImageData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Rarity {
    pub value: i32,
    pub max_level: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EvolutionStage {
    pub name: String,
    pub level_cap_release: bool,
    pub super_battle_release: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Stat {
    pub max: i32,
    pub plus_max: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Speed {
    #[schema(value_type = f64)]
    pub max: Decimal,
    #[schema(value_type = f64)]
    pub plus_max: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Status {
    pub hp: Stat,
    pub attack: Stat,
    pub speed: Speed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Ability {
    /// Resolved display name, or `"UNKNOWN"`.
    pub name: String,
    pub stage: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Abilities {
    pub base: Vec<Ability>,
    pub gauge: Vec<Ability>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConnectSkill {
    pub condition: Option<String>,
    pub abilities: Vec<Ability>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Skills {
    pub shot: Option<String>,
    pub assist: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StrikeShot {
    pub name: String,
    pub effect: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Friendship {
    pub name: String,
    pub attribute: NamedImage,
    pub category: String,
    pub description: Option<String>,
    /// `None` when no power row matches (combo, rarity, battle type, attribute match).
    pub power: Option<i32>,
    pub image: Option<ImageData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FriendshipCombo {
    pub main: Friendship,
    pub sub: Option<Friendship>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Images {
    pub icon: Option<ImageData>,
    pub monster: Option<ImageData>,
}

/// The fully assembled view of one catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonsterDetail {
    pub id: i64,
    pub number: i32,
    pub name: String,
    pub rarity: Rarity,
    pub evolution_stage: EvolutionStage,
    pub attribute: NamedImage,
    pub hit_type: String,
    pub tribe: String,
    pub battle_type: String,
    pub status: Status,
    pub luck_skill: Option<NamedImage>,
    pub abilities: Abilities,
    pub connect_skill: ConnectSkill,
    pub skills: Skills,
    pub strike_shot: StrikeShot,
    pub friendship_combo: FriendshipCombo,
    pub series: Option<String>,
    pub images: Images,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MonsterListResponse {
    pub items: Vec<MonsterDetail>,
    pub page: i64,
    pub size: i64,
    pub total: i64,
}

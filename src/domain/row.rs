//! The flat, fully-joined row produced by the row fetcher.

use rust_decimal::Decimal;

/// One catalog record joined with its classification tables.
///
/// Inner-joined names are plain `String`s; everything reached through an outer join
/// (luck/shot/assist skills, series, secondary combo, both combo powers) is optional.
/// The three embedded documents stay as raw text so malformed content only degrades
/// during assembly.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct MonsterRow {
    pub id: i64,
    pub number: i32,
    pub name: String,

    pub rarity_value: i32,
    pub rarity_max_level: i32,

    pub attribute_id: i64,
    pub tribe_id: i64,
    pub battle_type_id: i64,

    pub evo_name: String,
    pub evo_level_cap_release: i32,
    pub evo_super_battle_release: i32,

    pub attribute_name: String,
    pub attribute_image_path: Option<String>,

    pub hit_type_name: String,
    pub tribe_name: String,
    pub battle_type_name: String,

    pub hp_max: i32,
    pub hp_plus_max: i32,
    pub attack_max: i32,
    pub attack_plus_max: i32,
    pub speed_max: Decimal,
    pub speed_plus_max: Decimal,

    pub luck_skill_name: Option<String>,
    pub luck_skill_image_path: Option<String>,

    pub base_ability: Option<String>,
    pub gauge_ability: Option<String>,
    pub connect_skill: Option<String>,

    pub shot_skill_name: Option<String>,
    pub assist_skill_name: Option<String>,

    pub ss_name: String,
    pub ss_effect: String,

    pub series_name: Option<String>,

    pub icon_image: Option<String>,
    pub monster_image: Option<String>,

    pub main_fc_name: String,
    pub main_fc_image_path: Option<String>,
    pub main_fc_attribute: String,
    pub main_fc_attribute_image_path: Option<String>,
    pub main_fc_category: String,
    pub main_fc_description: Option<String>,
    pub main_fc_power: Option<i32>,

    pub sub_fc_name: Option<String>,
    pub sub_fc_image_path: Option<String>,
    pub sub_fc_attribute: Option<String>,
    pub sub_fc_attribute_image_path: Option<String>,
    pub sub_fc_category: Option<String>,
    pub sub_fc_description: Option<String>,
    pub sub_fc_power: Option<i32>,
}

//! Row fetcher: filtered, paginated reads of the fully-joined monster row.
//!
//! Every classification key is an inner join except the luck/shot/assist skills, the
//! series and the secondary friendship combo. Friendship power is looked up per combo
//! through a lateral subquery keyed by (combo, rarity, battle type, attribute match),
//! where the attribute-match flag is computed from the combo's and the monster's
//! attribute ids. Duplicate power rows resolve to the lowest power-row id.

use crate::domain::{MonsterFilter, MonsterRow};
use crate::error::Result;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

/// Source of flat monster rows.
///
/// `find_page` applies `LIMIT size OFFSET page * size` verbatim; clamping is the
/// caller's job. Rows are ordered by the external sequence number ascending.
#[async_trait]
pub trait MonsterRowSource: Send + Sync {
    async fn count(&self, filter: &MonsterFilter) -> Result<i64>;

    async fn find_page(&self, filter: &MonsterFilter, page: i64, size: i64) -> Result<Vec<MonsterRow>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<MonsterRow>>;

    /// Cheap connectivity probe for health checks.
    async fn ping(&self) -> Result<()>;
}

/// Tables the read query touches (used by preflight).
pub const READ_MODEL_TABLES: &[&str] = &[
    "monster_main",
    "rarity_master",
    "evolution_stage_master",
    "attribute_master",
    "hit_type_master",
    "tribe_master",
    "battle_type_master",
    "luck_skill_master",
    "shot_skill_master",
    "assist_skill_master",
    "strike_shot_name_master",
    "strike_shot_effect_master",
    "series_info_master",
    "sub_friendship_combo_name_master",
    "sub_friendship_combo_category_master",
    "sub_friendship_combo_power_master",
    "ability_master",
];

const SELECT_COLUMNS: &str = "SELECT
    m.id,
    m.number,
    m.name,
    m.rarity AS rarity_value,
    rm.max_level AS rarity_max_level,
    m.attribute_id,
    m.tribe_id,
    m.battle_type_id,
    esm.name AS evo_name,
    esm.level_cap_release AS evo_level_cap_release,
    esm.super_battle_release AS evo_super_battle_release,
    am.name AS attribute_name,
    am.image_path AS attribute_image_path,
    htm.name AS hit_type_name,
    tm.name AS tribe_name,
    btm.name AS battle_type_name,
    m.hp_max, m.hp_plus_max,
    m.attack_max, m.attack_plus_max,
    m.speed_max, m.speed_plus_max,
    lsm.name AS luck_skill_name,
    lsm.image_path AS luck_skill_image_path,
    m.base_ability::text AS base_ability,
    m.gauge_ability::text AS gauge_ability,
    m.connect_skill::text AS connect_skill,
    ssm.name AS shot_skill_name,
    asm.name AS assist_skill_name,
    ssnm.name AS ss_name,
    ssem.effect AS ss_effect,
    sinf.name AS series_name,
    m.icon_image,
    m.monster_image,
    main_fc.name AS main_fc_name,
    main_fc.image_path AS main_fc_image_path,
    main_attr.name AS main_fc_attribute,
    main_attr.image_path AS main_fc_attribute_image_path,
    main_cat.name AS main_fc_category,
    main_fc.description AS main_fc_description,
    main_p.power AS main_fc_power,
    sub_fc.name AS sub_fc_name,
    sub_fc.image_path AS sub_fc_image_path,
    sub_attr.name AS sub_fc_attribute,
    sub_attr.image_path AS sub_fc_attribute_image_path,
    sub_cat.name AS sub_fc_category,
    sub_fc.description AS sub_fc_description,
    sub_p.power AS sub_fc_power";

// Shared by the count and the row queries so both see exactly the same row set.
const FROM_JOINS: &str = "
FROM monster_main m
JOIN rarity_master rm ON rm.rarity = m.rarity
JOIN evolution_stage_master esm ON esm.id = m.evolution_stage_id
JOIN attribute_master am ON am.id = m.attribute_id
JOIN hit_type_master htm ON htm.id = m.hit_type_id
JOIN tribe_master tm ON tm.id = m.tribe_id
JOIN battle_type_master btm ON btm.id = m.battle_type_id
LEFT JOIN luck_skill_master lsm ON lsm.id = m.luck_skill_id
LEFT JOIN shot_skill_master ssm ON ssm.id = m.shot_skill_id
LEFT JOIN assist_skill_master asm ON asm.id = m.assist_skill_id
JOIN strike_shot_name_master ssnm ON ssnm.id = m.strike_shot_name_id
JOIN strike_shot_effect_master ssem ON ssem.id = m.strike_shot_effect_id
LEFT JOIN series_info_master sinf ON sinf.id = m.series_info_id
JOIN sub_friendship_combo_name_master main_fc ON main_fc.id = m.friendship_combo_id
JOIN attribute_master main_attr ON main_attr.id = main_fc.attribute_id
JOIN sub_friendship_combo_category_master main_cat ON main_cat.id = main_fc.category_id
LEFT JOIN sub_friendship_combo_name_master sub_fc ON sub_fc.id = m.sub_friendship_combo_id
LEFT JOIN attribute_master sub_attr ON sub_attr.id = sub_fc.attribute_id
LEFT JOIN sub_friendship_combo_category_master sub_cat ON sub_cat.id = sub_fc.category_id";

/// SQL expression for the attribute-match flag of the combo aliased `combo`:
/// 1 when the combo's attribute equals the monster's, else 0.
pub fn attribute_match_expr(combo: &str) -> String {
    format!("CASE WHEN {combo}.attribute_id = m.attribute_id THEN 1 ELSE 0 END")
}

/// Lateral power lookup for the combo aliased `combo`, exposed as `alias.power`.
fn power_join(alias: &str, combo: &str) -> String {
    format!(
        "
LEFT JOIN LATERAL (
    SELECT p.power
    FROM sub_friendship_combo_power_master p
    WHERE p.friendship_combo_name_id = {combo}.id
      AND p.rarity = m.rarity
      AND p.battle_type_id = m.battle_type_id
      AND p.is_attribute_match = {}
    ORDER BY p.id ASC
    LIMIT 1
) {alias} ON TRUE",
        attribute_match_expr(combo)
    )
}

/// Escapes LIKE metacharacters so the needle matches literally (escape char `\`).
pub fn escape_like(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len() + 2);
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn push_row_select(qb: &mut QueryBuilder<'static, Postgres>) {
    qb.push(SELECT_COLUMNS)
        .push(FROM_JOINS)
        .push(power_join("main_p", "main_fc"))
        .push(power_join("sub_p", "sub_fc"))
        .push("\nWHERE 1=1");
}

fn push_filters(qb: &mut QueryBuilder<'static, Postgres>, filter: &MonsterFilter) {
    if let Some(q) = filter.name_needle() {
        qb.push(" AND m.name LIKE ")
            .push_bind(format!("%{}%", escape_like(q)))
            .push(" ESCAPE '\\'");
    }
    if let Some(rarity) = filter.rarity {
        qb.push(" AND m.rarity = ").push_bind(rarity);
    }
    if let Some(attribute_id) = filter.attribute_id {
        qb.push(" AND m.attribute_id = ").push_bind(attribute_id);
    }
    if let Some(tribe_id) = filter.tribe_id {
        qb.push(" AND m.tribe_id = ").push_bind(tribe_id);
    }
    if let Some(battle_type_id) = filter.battle_type_id {
        qb.push(" AND m.battle_type_id = ").push_bind(battle_type_id);
    }
}

pub fn count_query(filter: &MonsterFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*)");
    qb.push(FROM_JOINS).push("\nWHERE 1=1");
    push_filters(&mut qb, filter);
    qb
}

pub fn page_query(filter: &MonsterFilter, page: i64, size: i64) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("");
    push_row_select(&mut qb);
    push_filters(&mut qb, filter);
    qb.push(" ORDER BY m.number ASC LIMIT ")
        .push_bind(size)
        .push(" OFFSET ")
        .push_bind(page.saturating_mul(size));
    qb
}

pub fn by_id_query(id: i64) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("");
    push_row_select(&mut qb);
    qb.push(" AND m.id = ").push_bind(id);
    qb
}

/// Postgres-backed row source.
#[derive(Clone)]
pub struct PgMonsterRows {
    pool: PgPool,
}

impl PgMonsterRows {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MonsterRowSource for PgMonsterRows {
    async fn count(&self, filter: &MonsterFilter) -> Result<i64> {
        let row = count_query(filter).build().fetch_one(&self.pool).await?;
        Ok(row.try_get::<i64, _>(0)?)
    }

    async fn find_page(&self, filter: &MonsterFilter, page: i64, size: i64) -> Result<Vec<MonsterRow>> {
        let rows = page_query(filter, page, size)
            .build_query_as::<MonsterRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<MonsterRow>> {
        let row = by_id_query(id)
            .build_query_as::<MonsterRow>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

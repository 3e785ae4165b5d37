//! In-memory row/name sources shared by the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use monster_catalog::{
    AbilityNameSource, AssetLoader, CatalogError, CatalogService, MonsterFilter, MonsterRow,
    MonsterRowSource, Result,
};
use rust_decimal::Decimal;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDRfake";

/// A row with every inner-joined column filled and every outer join empty.
pub fn monster_row(id: i64, number: i32, name: &str) -> MonsterRow {
    MonsterRow {
        id,
        number,
        name: name.to_string(),
        rarity_value: 5,
        rarity_max_level: 90,
        attribute_id: 1,
        tribe_id: 1,
        battle_type_id: 1,
        evo_name: "Evolution".to_string(),
        evo_level_cap_release: 0,
        evo_super_battle_release: 1,
        attribute_name: "Fire".to_string(),
        attribute_image_path: Some("attr/fire.png".to_string()),
        hit_type_name: "Pierce".to_string(),
        tribe_name: "Dragon".to_string(),
        battle_type_name: "Balance".to_string(),
        hp_max: 20000,
        hp_plus_max: 4000,
        attack_max: 19000,
        attack_plus_max: 3000,
        speed_max: Decimal::new(30050, 2),
        speed_plus_max: Decimal::new(5010, 2),
        luck_skill_name: None,
        luck_skill_image_path: None,
        base_ability: None,
        gauge_ability: None,
        connect_skill: None,
        shot_skill_name: None,
        assist_skill_name: None,
        ss_name: "Blaze".to_string(),
        ss_effect: "Speed up".to_string(),
        series_name: None,
        icon_image: Some(format!("icons/{id}.png")),
        monster_image: Some(format!("full/{id}.png")),
        main_fc_name: "Fire Laser".to_string(),
        main_fc_image_path: Some("fc/laser.png".to_string()),
        main_fc_attribute: "Fire".to_string(),
        main_fc_attribute_image_path: Some("attr/fire.png".to_string()),
        main_fc_category: "Laser".to_string(),
        main_fc_description: Some("Fires a laser".to_string()),
        main_fc_power: Some(1000),
        sub_fc_name: None,
        sub_fc_image_path: None,
        sub_fc_attribute: None,
        sub_fc_attribute_image_path: None,
        sub_fc_category: None,
        sub_fc_description: None,
        sub_fc_power: None,
    }
}

/// In-process equivalent of the SQL filter predicate: substring on the name,
/// exact match on the rest, all combined with AND.
pub fn matches_filter(filter: &MonsterFilter, r: &MonsterRow) -> bool {
    filter.name_needle().map_or(true, |q| r.name.contains(q))
        && filter.rarity.map_or(true, |v| v == r.rarity_value)
        && filter.attribute_id.map_or(true, |v| v == r.attribute_id)
        && filter.tribe_id.map_or(true, |v| v == r.tribe_id)
        && filter.battle_type_id.map_or(true, |v| v == r.battle_type_id)
}

/// Row source over a fixed set of rows, with the same filter/order/limit semantics
/// as the SQL implementation.
pub struct InMemoryRows {
    rows: Mutex<Vec<MonsterRow>>,
    fail: bool,
}

impl InMemoryRows {
    pub fn new(rows: Vec<MonsterRow>) -> Self {
        Self {
            rows: Mutex::new(rows),
            fail: false,
        }
    }

    /// Every call fails like an unreachable store.
    pub fn failing() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn insert(&self, row: MonsterRow) {
        self.rows.lock().unwrap().push(row);
    }

    fn check(&self) -> Result<()> {
        if self.fail {
            return Err(CatalogError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    fn matching(&self, filter: &MonsterFilter) -> Vec<MonsterRow> {
        let mut rows: Vec<MonsterRow> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| matches_filter(filter, r))
            .cloned()
            .collect();
        rows.sort_by_key(|r| r.number);
        rows
    }
}

#[async_trait]
impl MonsterRowSource for InMemoryRows {
    async fn count(&self, filter: &MonsterFilter) -> Result<i64> {
        self.check()?;
        Ok(self.matching(filter).len() as i64)
    }

    async fn find_page(&self, filter: &MonsterFilter, page: i64, size: i64) -> Result<Vec<MonsterRow>> {
        self.check()?;
        let offset = usize::try_from(page.saturating_mul(size)).unwrap_or(usize::MAX);
        let limit = usize::try_from(size).unwrap_or(0);
        Ok(self.matching(filter).into_iter().skip(offset).take(limit).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<MonsterRow>> {
        self.check()?;
        Ok(self.rows.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn ping(&self) -> Result<()> {
        self.check()
    }
}

/// Name source that records every batch it is asked to resolve.
#[derive(Default)]
pub struct CountingNames {
    names: HashMap<i64, String>,
    calls: AtomicUsize,
    batches: Mutex<Vec<BTreeSet<i64>>>,
}

impl CountingNames {
    pub fn new(names: &[(i64, &str)]) -> Self {
        Self {
            names: names.iter().map(|(id, n)| (*id, n.to_string())).collect(),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn batches(&self) -> Vec<BTreeSet<i64>> {
        self.batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl AbilityNameSource for CountingNames {
    async fn resolve_names(&self, ids: &BTreeSet<i64>) -> Result<HashMap<i64, String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.batches.lock().unwrap().push(ids.clone());
        Ok(ids
            .iter()
            .filter_map(|id| self.names.get(id).map(|n| (*id, n.clone())))
            .collect())
    }
}

/// Writes `files` (relative path -> bytes) under `root`.
pub fn write_assets(root: &Path, files: &[&str]) {
    for rel in files {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, PNG_BYTES).unwrap();
    }
}

pub fn service(rows: Arc<InMemoryRows>, names: Arc<CountingNames>, asset_root: &Path) -> CatalogService {
    CatalogService::new(rows, names, AssetLoader::new(asset_root))
}

//! The catalog read service.
//!
//! Turns flat joined rows into the nested `MonsterDetail` view:
//! 1.  Fetches the rows (one page, or one record).
//! 2.  Parses every row's embedded documents and collects all ability ids of the page.
//! 3.  Resolves those ids with a single batched lookup.
//! 4.  Maps each row, loading its assets with or without payload.
//!
//! The detail view always includes asset payloads; the list view only on request.

use crate::assets::AssetLoader;
use crate::domain::documents::{resolve_all, MonsterDocuments};
use crate::domain::response::{
    Abilities, EvolutionStage, Friendship, FriendshipCombo, Images, MonsterDetail,
    MonsterListResponse, NamedImage, Rarity, Skills, Speed, Stat, Status, StrikeShot,
};
use crate::domain::{MonsterFilter, MonsterRow, PageRequest};
use crate::error::{CatalogError, Result};
use crate::storage::{AbilityNameSource, MonsterRowSource};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tracing::debug;

pub struct CatalogService {
    rows: Arc<dyn MonsterRowSource>,
    names: Arc<dyn AbilityNameSource>,
    assets: AssetLoader,
}

/// Friendship-combo columns of one row, main or secondary.
struct ComboColumns<'a> {
    name: &'a str,
    image_path: Option<&'a str>,
    attribute: &'a str,
    attribute_image_path: Option<&'a str>,
    category: &'a str,
    description: Option<&'a str>,
    power: Option<i32>,
}

impl CatalogService {
    pub fn new(
        rows: Arc<dyn MonsterRowSource>,
        names: Arc<dyn AbilityNameSource>,
        assets: AssetLoader,
    ) -> Self {
        Self {
            rows,
            names,
            assets,
        }
    }

    pub fn rows(&self) -> &Arc<dyn MonsterRowSource> {
        &self.rows
    }

    /// List view. `page` is clamped to `>= 0` and `size` to `[1, 100]`; `total` counts
    /// every record matching `filter`.
    pub async fn select_all(
        &self,
        filter: &MonsterFilter,
        page: i64,
        size: i64,
        include_images: bool,
    ) -> Result<MonsterListResponse> {
        let paging = PageRequest::clamped(page, size);

        let total = self.rows.count(filter).await?;
        let rows = self
            .rows
            .find_page(filter, paging.page, paging.size)
            .await?;
        debug!(
            page = paging.page,
            size = paging.size,
            total,
            fetched = rows.len(),
            "monster page fetched"
        );

        let items = self.assemble(&rows, include_images).await?;

        Ok(MonsterListResponse {
            items,
            page: paging.page,
            size: paging.size,
            total,
        })
    }

    /// Detail view, always with asset payloads.
    pub async fn select_by_id(&self, id: i64) -> Result<MonsterDetail> {
        let row = self
            .rows
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound(id))?;

        let mut items = self.assemble(std::slice::from_ref(&row), true).await?;
        items.pop().ok_or(CatalogError::NotFound(id))
    }

    async fn assemble(&self, rows: &[MonsterRow], include_images: bool) -> Result<Vec<MonsterDetail>> {
        let docs: Vec<MonsterDocuments> = rows.iter().map(MonsterDocuments::from_row).collect();

        let mut ids = BTreeSet::new();
        for d in &docs {
            d.collect_ids(&mut ids);
        }
        debug!(rows = rows.len(), ability_ids = ids.len(), "resolving ability names");
        let names = self.names.resolve_names(&ids).await?;

        let mut items = Vec::with_capacity(rows.len());
        for (row, doc) in rows.iter().zip(&docs) {
            items.push(self.to_detail(row, doc, &names, include_images).await);
        }
        Ok(items)
    }

    async fn to_detail(
        &self,
        r: &MonsterRow,
        doc: &MonsterDocuments,
        names: &HashMap<i64, String>,
        include_images: bool,
    ) -> MonsterDetail {
        let a = &self.assets;
        let (attribute_image, luck_skill_image, icon, monster) = tokio::join!(
            a.load(r.attribute_image_path.as_deref(), include_images),
            a.load(r.luck_skill_image_path.as_deref(), include_images),
            a.load(r.icon_image.as_deref(), include_images),
            a.load(r.monster_image.as_deref(), include_images),
        );

        let main = ComboColumns {
            name: &r.main_fc_name,
            image_path: r.main_fc_image_path.as_deref(),
            attribute: &r.main_fc_attribute,
            attribute_image_path: r.main_fc_attribute_image_path.as_deref(),
            category: &r.main_fc_category,
            description: r.main_fc_description.as_deref(),
            power: r.main_fc_power,
        };
        let sub = r.sub_fc_name.as_deref().map(|name| ComboColumns {
            name,
            image_path: r.sub_fc_image_path.as_deref(),
            attribute: r.sub_fc_attribute.as_deref().unwrap_or_default(),
            attribute_image_path: r.sub_fc_attribute_image_path.as_deref(),
            category: r.sub_fc_category.as_deref().unwrap_or_default(),
            description: r.sub_fc_description.as_deref(),
            power: r.sub_fc_power,
        });
        let (main, sub) = tokio::join!(self.friendship(main, include_images), async {
            match sub {
                Some(sub) => Some(self.friendship(sub, include_images).await),
                None => None,
            }
        });

        MonsterDetail {
            id: r.id,
            number: r.number,
            name: r.name.clone(),
            rarity: Rarity {
                value: r.rarity_value,
                max_level: r.rarity_max_level,
            },
            evolution_stage: EvolutionStage {
                name: r.evo_name.clone(),
                level_cap_release: r.evo_level_cap_release != 0,
                super_battle_release: r.evo_super_battle_release != 0,
            },
            attribute: NamedImage {
                name: r.attribute_name.clone(),
                image: attribute_image,
            },
            hit_type: r.hit_type_name.clone(),
            tribe: r.tribe_name.clone(),
            battle_type: r.battle_type_name.clone(),
            status: Status {
                hp: Stat {
                    max: r.hp_max,
                    plus_max: r.hp_plus_max,
                },
                attack: Stat {
                    max: r.attack_max,
                    plus_max: r.attack_plus_max,
                },
                speed: Speed {
                    max: r.speed_max,
                    plus_max: r.speed_plus_max,
                },
            },
            luck_skill: r.luck_skill_name.as_ref().map(|name| NamedImage {
                name: name.clone(),
                image: luck_skill_image,
            }),
            abilities: Abilities {
                base: resolve_all(&doc.base, names),
                gauge: resolve_all(&doc.gauge, names),
            },
            connect_skill: doc.connect.resolve(names),
            skills: Skills {
                shot: r.shot_skill_name.clone(),
                assist: r.assist_skill_name.clone(),
            },
            strike_shot: StrikeShot {
                name: r.ss_name.clone(),
                effect: r.ss_effect.clone(),
            },
            friendship_combo: FriendshipCombo { main, sub },
            series: r.series_name.clone(),
            images: Images { icon, monster },
        }
    }

    async fn friendship(&self, c: ComboColumns<'_>, include_images: bool) -> Friendship {
        let (attribute_image, image) = tokio::join!(
            self.assets.load(c.attribute_image_path, include_images),
            self.assets.load(c.image_path, include_images),
        );
        Friendship {
            name: c.name.to_string(),
            attribute: NamedImage {
                name: c.attribute.to_string(),
                image: attribute_image,
            },
            category: c.category.to_string(),
            description: c.description.map(str::to_string),
            power: c.power,
            image,
        }
    }
}

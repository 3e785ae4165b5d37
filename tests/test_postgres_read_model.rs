//! Postgres read-model test:
//! 1) Create a throwaway schema, apply sql/schema.sql and the seed fixture.
//! 2) Run the real row fetcher and name resolver through the catalog service.
//! 3) Check joins, power lookup, filters, ordering and count/page agreement.
//!
//! Skipped when DATABASE_URL is not set.

use monster_catalog::{
    AssetLoader, CatalogError, CatalogService, MonsterFilter, MonsterRowSource, PgAbilityNames,
    PgMonsterRows,
};
use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};
use std::env;
use std::sync::Arc;

struct Fixture {
    admin: PgPool,
    pool: PgPool,
    schema: String,
}

impl Fixture {
    async fn drop_schema(self) -> Result<(), sqlx::Error> {
        self.pool.close().await;
        self.admin
            .execute(format!("DROP SCHEMA IF EXISTS {} CASCADE", self.schema).as_str())
            .await?;
        Ok(())
    }
}

async fn fixture() -> Result<Option<Fixture>, Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let Ok(url) = env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping Postgres read-model test");
        return Ok(None);
    };

    let schema = format!("catalog_test_{}", rand::random::<u32>());
    let admin = PgPoolOptions::new().max_connections(1).connect(&url).await?;
    admin
        .execute(format!("CREATE SCHEMA {}", schema).as_str())
        .await?;

    let search_path = format!("SET search_path TO {}", schema);
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .after_connect(move |conn, _meta| {
            let sql = search_path.clone();
            Box::pin(async move {
                conn.execute(sql.as_str()).await?;
                Ok(())
            })
        })
        .connect(&url)
        .await?;

    pool.execute(include_str!("../sql/schema.sql")).await?;
    pool.execute(include_str!("fixtures/seed.sql")).await?;

    Ok(Some(Fixture {
        admin,
        pool,
        schema,
    }))
}

fn catalog(pool: &PgPool) -> CatalogService {
    CatalogService::new(
        Arc::new(PgMonsterRows::new(pool.clone())),
        Arc::new(PgAbilityNames::new(pool.clone())),
        AssetLoader::new("/nonexistent-asset-root"),
    )
}

fn by_name(q: &str) -> MonsterFilter {
    MonsterFilter {
        q: Some(q.to_string()),
        ..Default::default()
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_postgres_read_model() -> Result<(), Box<dyn std::error::Error>> {
    let Some(fx) = fixture().await? else {
        return Ok(());
    };
    let rows = PgMonsterRows::new(fx.pool.clone());
    let svc = catalog(&fx.pool);

    rows.ping().await?;

    // Ordering by sequence number, not id.
    let all = svc.select_all(&MonsterFilter::default(), 0, 20, false).await?;
    assert_eq!(all.total, 4);
    let ids: Vec<i64> = all.items.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![2, 3, 1, 4]);

    // Friendship power: attribute match, duplicates, missing rows.
    let red = svc.select_by_id(1).await?;
    assert_eq!(red.friendship_combo.main.power, Some(1000));
    let sub = red.friendship_combo.sub.as_ref().expect("secondary combo");
    assert_eq!(sub.name, "Water Bomb");
    assert_eq!(sub.power, Some(500));
    assert_eq!(sub.category, "Bomb");
    assert_eq!(red.status.speed.max, Decimal::new(30050, 2));
    assert_eq!(red.luck_skill.as_ref().map(|l| l.name.as_str()), Some("Clear"));
    assert_eq!(red.series.as_deref(), Some("Dragons"));
    assert_eq!(red.rarity.max_level, 99);
    assert!(red.evolution_stage.super_battle_release);

    // Name resolution through the reference table, UNKNOWN for a dangling id.
    assert_eq!(red.abilities.base[0].name, "Anti-Gravity Barrier");
    assert_eq!(red.abilities.base[0].stage.as_deref(), Some("base"));
    assert_eq!(red.abilities.gauge[0].name, "Anti-Warp");
    assert_eq!(red.connect_skill.condition.as_deref(), Some("HP 50%"));
    let connect: Vec<&str> = red.connect_skill.abilities.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(connect, vec!["Anti-Warp", "UNKNOWN"]);

    // Asset root does not exist: path-only entries.
    let icon = red.images.icon.as_ref().expect("icon path");
    assert_eq!(icon.path, "icons/1.png");
    assert_eq!(icon.base64, None);

    let blue = svc.select_by_id(2).await?;
    assert_eq!(blue.friendship_combo.main.power, Some(700));
    assert_eq!(blue.friendship_combo.sub, None);
    assert_eq!(blue.luck_skill, None);
    assert_eq!(blue.skills.shot, None);
    assert_eq!(blue.series, None);
    assert!(blue.abilities.base.is_empty());
    assert_eq!(blue.connect_skill.condition, None);

    let imp = svc.select_by_id(3).await?;
    assert_eq!(imp.friendship_combo.main.power, Some(111));
    assert!(imp.abilities.base.is_empty());
    assert!(imp.connect_skill.abilities.is_empty());

    let imp_x = svc.select_by_id(4).await?;
    assert_eq!(imp_x.friendship_combo.main.power, None);
    assert_eq!(imp_x.attribute.image, None);

    assert!(matches!(
        svc.select_by_id(999).await,
        Err(CatalogError::NotFound(999))
    ));
    assert!(rows.find_by_id(999).await?.is_none());

    // Filters; LIKE metacharacters match literally.
    let cases = [
        (by_name("%"), 1),
        (by_name("_"), 1),
        (by_name("Dragon"), 2),
        (by_name("  "), 4),
        (
            MonsterFilter {
                rarity: Some(6),
                ..Default::default()
            },
            3,
        ),
        (
            MonsterFilter {
                attribute_id: Some(1),
                tribe_id: Some(1),
                ..Default::default()
            },
            1,
        ),
        (
            MonsterFilter {
                battle_type_id: Some(2),
                ..Default::default()
            },
            1,
        ),
    ];
    for (filter, expected) in cases {
        let total = rows.count(&filter).await?;
        let page = rows.find_page(&filter, 0, 100).await?;
        assert_eq!(total, expected, "count for {filter:?}");
        assert_eq!(page.len() as i64, total, "page for {filter:?}");
    }

    // Pagination walks the same order.
    let first = rows.find_page(&MonsterFilter::default(), 0, 3).await?;
    let second = rows.find_page(&MonsterFilter::default(), 1, 3).await?;
    let numbers: Vec<i32> = first.iter().chain(&second).map(|r| r.number).collect();
    assert_eq!(numbers, vec![100, 200, 300, 400]);

    fx.drop_schema().await?;
    Ok(())
}

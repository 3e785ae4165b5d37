//! Batched ability-name resolution.

use crate::error::Result;
use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::collections::{BTreeSet, HashMap};

/// Resolves ability ids to display names in one lookup.
///
/// Ids missing from the reference table are simply absent from the result;
/// callers substitute their own default.
#[async_trait]
pub trait AbilityNameSource: Send + Sync {
    async fn resolve_names(&self, ids: &BTreeSet<i64>) -> Result<HashMap<i64, String>>;
}

#[derive(Clone)]
pub struct PgAbilityNames {
    pool: PgPool,
}

impl PgAbilityNames {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AbilityNameSource for PgAbilityNames {
    async fn resolve_names(&self, ids: &BTreeSet<i64>) -> Result<HashMap<i64, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let ids: Vec<i64> = ids.iter().copied().collect();
        let rows = sqlx::query("SELECT id, name FROM ability_master WHERE id = ANY($1)")
            .bind(&ids)
            .fetch_all(&self.pool)
            .await?;

        let mut names = HashMap::with_capacity(rows.len());
        for row in rows {
            let id: i64 = row.try_get("id")?;
            let name: String = row.try_get("name")?;
            names.insert(id, name);
        }
        Ok(names)
    }
}

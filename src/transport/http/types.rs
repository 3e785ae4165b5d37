use crate::app::CatalogService;
use crate::domain::{MonsterFilter, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
}

/// Envelope for health and error responses.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Query parameters of the list view.
#[derive(Deserialize, Debug, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MonsterListQuery {
    /// Substring of the monster name.
    pub q: Option<String>,
    pub rarity: Option<i32>,
    pub attribute_id: Option<i64>,
    pub tribe_id: Option<i64>,
    pub battle_type_id: Option<i64>,
    /// Zero-based page index (negative values are treated as 0).
    #[serde(default)]
    pub page: i64,
    /// Page size, clamped to 1..=100.
    #[serde(default = "default_page_size")]
    pub size: i64,
    /// Include base64 image payloads.
    #[serde(default)]
    pub include_images: bool,
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl MonsterListQuery {
    pub fn filter(&self) -> MonsterFilter {
        MonsterFilter {
            q: self.q.clone(),
            rarity: self.rarity,
            attribute_id: self.attribute_id,
            tribe_id: self.tribe_id,
            battle_type_id: self.battle_type_id,
        }
    }
}

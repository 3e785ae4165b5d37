use crate::error::CatalogError;
use crate::transport::http::types::{AppState, MonsterListQuery};
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

#[utoipa::path(
    get,
    path = "/monster/select/all",
    params(MonsterListQuery),
    responses(
        (status = 200, description = "One page of assembled monsters", body = crate::domain::MonsterListResponse),
        (status = 400, description = "Malformed query parameter", body = crate::transport::http::types::ApiResponse),
        (status = 500, description = "Internal server error", body = crate::transport::http::types::ApiResponse)
    )
)]
pub async fn select_all_handler(
    State(state): State<AppState>,
    query: Result<Query<MonsterListQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(e) => {
            return CatalogError::InvalidParameter {
                field: "query".to_string(),
                message: e.body_text(),
            }
            .into_response()
        }
    };

    match state
        .catalog
        .select_all(&query.filter(), query.page, query.size, query.include_images)
        .await
    {
        Ok(list) => (StatusCode::OK, Json(list)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/monster/select/{id}",
    params(
        ("id" = i64, Path, description = "Monster id")
    ),
    responses(
        (status = 200, description = "Assembled monster, images included", body = crate::domain::MonsterDetail),
        (status = 400, description = "Malformed id", body = crate::transport::http::types::ApiResponse),
        (status = 404, description = "Not found", body = crate::transport::http::types::ApiResponse),
        (status = 500, description = "Internal server error", body = crate::transport::http::types::ApiResponse)
    )
)]
pub async fn select_by_id_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(v) => v,
        Err(e) => {
            return CatalogError::InvalidParameter {
                field: "id".to_string(),
                message: e.body_text(),
            }
            .into_response()
        }
    };

    match state.catalog.select_by_id(id).await {
        Ok(detail) => (StatusCode::OK, Json(detail)).into_response(),
        Err(e) => e.into_response(),
    }
}

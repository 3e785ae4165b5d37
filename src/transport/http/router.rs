use crate::domain::response::{
    Abilities, Ability, ConnectSkill, EvolutionStage, Friendship, FriendshipCombo, ImageData,
    Images, MonsterDetail, MonsterListResponse, NamedImage, Rarity, Skills, Speed, Stat, Status,
    StrikeShot,
};
use crate::transport::http::handlers::{health, monsters};
use crate::transport::http::types::ApiResponse;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        monsters::select_all_handler,
        monsters::select_by_id_handler
    ),
    components(schemas(
        ApiResponse,
        MonsterListResponse,
        MonsterDetail,
        Rarity,
        EvolutionStage,
        NamedImage,
        ImageData,
        Status,
        Stat,
        Speed,
        Abilities,
        Ability,
        ConnectSkill,
        Skills,
        StrikeShot,
        FriendshipCombo,
        Friendship,
        Images
    ))
)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route("/monster/select/all", get(monsters::select_all_handler))
        .route("/monster/select/:id", get(monsters::select_by_id_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

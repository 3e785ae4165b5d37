pub mod app;
pub mod assets;
pub mod domain;
pub mod error;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::CatalogService;
pub use assets::AssetLoader;
pub use domain::{MonsterDetail, MonsterFilter, MonsterListResponse, MonsterRow};
pub use error::{CatalogError, Result};
pub use storage::{AbilityNameSource, MonsterRowSource, PgAbilityNames, PgMonsterRows};

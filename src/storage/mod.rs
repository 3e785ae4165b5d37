pub mod ability_names;
pub mod monster_rows;

pub use ability_names::{AbilityNameSource, PgAbilityNames};
pub use monster_rows::{MonsterRowSource, PgMonsterRows, READ_MODEL_TABLES};

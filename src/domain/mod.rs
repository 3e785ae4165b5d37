//! Read-model types: filters, flat rows, embedded documents and the nested response.

pub mod documents;
pub mod filters;
pub mod response;
pub mod row;

pub use documents::{AbilityRef, ConnectSkillDoc, MonsterDocuments, UNKNOWN_ABILITY};
pub use filters::{MonsterFilter, PageRequest, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use response::{ImageData, MonsterDetail, MonsterListResponse};
pub use row::MonsterRow;

// src/infrastructure/repositories/mod.rs
mod error;
mod live_version;
mod record_tree;
mod sqlite_record;

pub use error::map_sqlx;
pub use live_version::StoreLiveVersionResolver;
pub use record_tree::PageTree;
pub use sqlite_record::SqliteRecordStore;

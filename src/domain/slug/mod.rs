pub mod config;
pub mod record;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use config::{FieldSpec, GeneratorOptions, SlugConfiguration, SlugOptions, TableSchema};
pub use record::{FieldValue, Record};
pub use repository::{
    Filter, LiveVersionResolver, ParentRecordLookup, RecordQuery, RecordStore, RecordWriter,
    SiteResolver,
};
pub use value_objects::{
    ContainerId, LanguageId, RecordId, RecordRef, Slug, TreeId, UniquenessScope, WorkspaceId,
};

// src/domain/errors.rs
use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("invalid container id {container} for record {record}")]
    InvalidContainerId { container: i64, record: String },
    #[error("cannot resolve live version of record {table}:{record}")]
    UnresolvableLiveVersion { table: String, record: String },
    #[error("record reference {0:?} does not designate an existing row")]
    NonNumericRecordReference(String),
    #[error("cyclic containment detected at page {0}")]
    CyclicContainment(i64),
}

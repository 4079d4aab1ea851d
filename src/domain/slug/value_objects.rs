use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(i64);

impl RecordId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("record id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<RecordId> for i64 {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of the record a slug is built for.
///
/// Unsaved records carry a placeholder (for instance `NEW64f1c2`) until the
/// save pipeline assigns a row id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordRef {
    Existing(RecordId),
    Placeholder(String),
}

impl RecordRef {
    pub fn existing(&self) -> Option<RecordId> {
        match self {
            Self::Existing(id) => Some(*id),
            Self::Placeholder(_) => None,
        }
    }

    /// Returns the row id or fails when the reference is only a placeholder.
    pub fn require_existing(&self) -> DomainResult<RecordId> {
        self.existing()
            .ok_or_else(|| DomainError::NonNumericRecordReference(self.to_string()))
    }
}

impl FromStr for RecordRef {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.is_empty() {
            return Err(DomainError::Validation("record reference cannot be empty".into()));
        }
        match value.parse::<i64>() {
            Ok(id) if id > 0 => Ok(Self::Existing(RecordId(id))),
            _ => Ok(Self::Placeholder(value.to_string())),
        }
    }
}

impl From<RecordId> for RecordRef {
    fn from(value: RecordId) -> Self {
        Self::Existing(value)
    }
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Existing(id) => write!(f, "{id}"),
            Self::Placeholder(value) => f.write_str(value),
        }
    }
}

/// Parent container (pid). Negative values mean "take it from the live version".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContainerId(pub i64);

impl ContainerId {
    pub const ROOT: ContainerId = ContainerId(0);

    pub fn is_root(self) -> bool {
        self.0 == 0
    }

    pub fn is_unresolved(self) -> bool {
        self.0 < 0
    }
}

impl From<ContainerId> for i64 {
    fn from(value: ContainerId) -> Self {
        value.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct LanguageId(pub i64);

impl LanguageId {
    pub const DEFAULT: LanguageId = LanguageId(0);

    pub fn is_default(self) -> bool {
        self.0 <= 0
    }
}

impl From<LanguageId> for i64 {
    fn from(value: LanguageId) -> Self {
        value.0
    }
}

/// Workspace the helper operates in; 0 is the published (live) workspace.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct WorkspaceId(pub i64);

impl WorkspaceId {
    pub const LIVE: WorkspaceId = WorkspaceId(0);

    pub fn is_live(self) -> bool {
        self.0 <= 0
    }
}

impl From<WorkspaceId> for i64 {
    fn from(value: WorkspaceId) -> Self {
        value.0
    }
}

/// Identity of a site: the uid of its root page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreeId(pub i64);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slug(String);

impl Slug {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if !value.starts_with('/') {
            return Err(DomainError::Validation("slug must start with '/'".into()));
        }
        Ok(Self(value))
    }

    pub fn root() -> Self {
        Self("/".into())
    }

    pub(crate) fn from_payload(payload: &str) -> Self {
        Self(format!("/{payload}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Boundary inside which a slug must not repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniquenessScope {
    /// Same parent container (`uniqueInPid`).
    Sibling,
    /// Same site tree (`uniqueInSite`).
    Site,
    /// Whole table (`unique`).
    Table,
}

impl UniquenessScope {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sibling => "uniqueInPid",
            Self::Site => "uniqueInSite",
            Self::Table => "unique",
        }
    }
}

impl FromStr for UniquenessScope {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "uniqueInPid" => Ok(Self::Sibling),
            "uniqueInSite" => Ok(Self::Site),
            "unique" => Ok(Self::Table),
            other => Err(DomainError::Validation(format!(
                "unknown uniqueness scope: {other}"
            ))),
        }
    }
}

impl fmt::Display for UniquenessScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

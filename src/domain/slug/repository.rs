use crate::domain::errors::DomainResult;
use crate::domain::slug::config::TableSchema;
use crate::domain::slug::record::{FieldValue, Record};
use crate::domain::slug::value_objects::{ContainerId, LanguageId, RecordId, RecordRef, TreeId};
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Eq(String, FieldValue),
    Neq(String, FieldValue),
    In(String, Vec<FieldValue>),
}

impl Filter {
    pub fn column(&self) -> &str {
        match self {
            Self::Eq(column, _) | Self::Neq(column, _) | Self::In(column, _) => column,
        }
    }

    /// Evaluates the filter against an in-memory row. A missing column reads as `Null`.
    pub fn matches(&self, record: &Record) -> bool {
        let value = record.get(self.column()).unwrap_or(&FieldValue::Null);
        match self {
            Self::Eq(_, expected) => values_equal(value, expected),
            Self::Neq(_, expected) => !values_equal(value, expected),
            Self::In(_, candidates) => candidates.iter().any(|c| values_equal(value, c)),
        }
    }
}

fn values_equal(left: &FieldValue, right: &FieldValue) -> bool {
    match (left, right) {
        (FieldValue::Text(a), FieldValue::Text(b)) => a == b,
        (FieldValue::Null, FieldValue::Null) => true,
        (FieldValue::Null, _) | (_, FieldValue::Null) => false,
        _ => left.as_int().is_some() && left.as_int() == right.as_int(),
    }
}

/// Selection against one table. Soft-deleted rows are excluded unless
/// [`RecordQuery::include_deleted`] is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordQuery {
    table: String,
    deleted_field: Option<String>,
    filters: Vec<Filter>,
}

impl RecordQuery {
    pub fn new(schema: &TableSchema) -> Self {
        Self {
            table: schema.name.clone(),
            deleted_field: schema.deleted_field.clone(),
            filters: Vec::new(),
        }
    }

    pub fn include_deleted(mut self) -> Self {
        self.deleted_field = None;
        self
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.filters.push(Filter::Eq(column.into(), value.into()));
        self
    }

    pub fn neq(mut self, column: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.filters.push(Filter::Neq(column.into(), value.into()));
        self
    }

    pub fn any_of<V: Into<FieldValue>>(
        mut self,
        column: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.filters.push(Filter::In(
            column.into(),
            values.into_iter().map(Into::into).collect(),
        ));
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn deleted_field(&self) -> Option<&str> {
        self.deleted_field.as_deref()
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// True when `record` passes the deleted restriction and every filter.
    pub fn matches(&self, record: &Record) -> bool {
        let visible = self
            .deleted_field
            .as_deref()
            .is_none_or(|field| !record.get(field).is_some_and(FieldValue::is_truthy));
        visible && self.filters.iter().all(|filter| filter.matches(record))
    }
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn query(&self, query: &RecordQuery) -> DomainResult<Vec<Record>>;
}

#[async_trait]
pub trait RecordWriter: Send + Sync {
    async fn update_field(
        &self,
        table: &str,
        uid: RecordId,
        field: &str,
        value: FieldValue,
    ) -> DomainResult<()>;
}

#[async_trait]
pub trait SiteResolver: Send + Sync {
    /// Root page of the site `container` belongs to, or `None` outside any site.
    async fn root_tree_for(&self, container: ContainerId) -> DomainResult<Option<TreeId>>;

    /// Languages to try, in order, when `language` has no localized row.
    async fn fallback_languages(
        &self,
        _container: ContainerId,
        _language: LanguageId,
    ) -> DomainResult<Vec<LanguageId>> {
        Ok(Vec::new())
    }
}

#[async_trait]
pub trait LiveVersionResolver: Send + Sync {
    /// Container of the published counterpart of `record`.
    async fn live_pid_of(&self, table: &TableSchema, record: &RecordRef)
    -> DomainResult<ContainerId>;

    /// Id of the published counterpart of `record` (the record itself when it
    /// is live), or `None` when it has none.
    async fn live_id_of(
        &self,
        table: &TableSchema,
        record: &RecordRef,
    ) -> DomainResult<Option<RecordId>>;
}

#[async_trait]
pub trait ParentRecordLookup: Send + Sync {
    /// Ancestors of `container`, starting with the container itself.
    async fn root_line_of(&self, container: ContainerId) -> DomainResult<Vec<Record>>;

    async fn localized_variant(
        &self,
        table: &TableSchema,
        record: RecordId,
        language: LanguageId,
    ) -> DomainResult<Option<Record>>;
}

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::config::TableSchema;
use crate::domain::slug::record::Record;
use crate::domain::slug::repository::{LiveVersionResolver, RecordQuery, RecordStore};
use crate::domain::slug::value_objects::{ContainerId, RecordId, RecordRef};
use async_trait::async_trait;
use std::sync::Arc;

/// Follows a workspace row's live pointer to its published counterpart.
/// Live rows are their own counterpart; rows created inside a workspace
/// have none.
#[derive(Clone)]
pub struct StoreLiveVersionResolver {
    store: Arc<dyn RecordStore>,
}

impl StoreLiveVersionResolver {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    async fn find(&self, table: &TableSchema, uid: i64) -> DomainResult<Option<Record>> {
        let query = RecordQuery::new(table).eq("uid", uid);
        Ok(self.store.query(&query).await?.into_iter().next())
    }

    async fn live_row(&self, table: &TableSchema, record: &RecordRef) -> DomainResult<Record> {
        let uid = record.require_existing()?;
        let unresolvable = || DomainError::UnresolvableLiveVersion {
            table: table.name.clone(),
            record: record.to_string(),
        };

        let row = self
            .find(table, uid.into())
            .await?
            .ok_or_else(unresolvable)?;
        if !table.workspace_aware {
            return Ok(row);
        }

        match live_pointer(table, &row) {
            Some(live_uid) => self.find(table, live_uid).await?.ok_or_else(unresolvable),
            None if is_workspace_row(table, &row) => Err(unresolvable()),
            None => Ok(row),
        }
    }
}

fn live_pointer(table: &TableSchema, row: &Record) -> Option<i64> {
    row.int(&table.live_pointer_field).filter(|uid| *uid > 0)
}

fn is_workspace_row(table: &TableSchema, row: &Record) -> bool {
    row.int(&table.workspace_field).unwrap_or_default() > 0
}

#[async_trait]
impl LiveVersionResolver for StoreLiveVersionResolver {
    async fn live_pid_of(
        &self,
        table: &TableSchema,
        record: &RecordRef,
    ) -> DomainResult<ContainerId> {
        Ok(self.live_row(table, record).await?.pid())
    }

    async fn live_id_of(
        &self,
        table: &TableSchema,
        record: &RecordRef,
    ) -> DomainResult<Option<RecordId>> {
        let Some(uid) = record.existing() else {
            return Ok(None);
        };
        if !table.workspace_aware {
            return Ok(Some(uid));
        }

        // the pointer is read from the version row itself, so a soft-deleted
        // live row still resolves
        let query = RecordQuery::new(table).include_deleted().eq("uid", uid);
        let Some(row) = self.store.query(&query).await?.into_iter().next() else {
            return Ok(None);
        };
        match live_pointer(table, &row) {
            Some(live_uid) => Ok(RecordId::new(live_uid).ok()),
            None if is_workspace_row(table, &row) => Ok(None),
            None => Ok(Some(uid)),
        }
    }
}

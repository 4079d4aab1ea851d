// tests/support/mocks/record_store.rs
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use cms_slug::domain::errors::{DomainError, DomainResult};
use cms_slug::domain::slug::{
    FieldValue, Filter, Record, RecordId, RecordQuery, RecordStore, RecordWriter,
};

/// Rows kept per table in insertion order; queries are evaluated with
/// `RecordQuery::matches`.
#[derive(Default)]
pub struct InMemoryRecordStore {
    rows: Mutex<Vec<(String, Record)>>,
    slug_lookups: AtomicUsize,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(table: &str, rows: impl IntoIterator<Item = Record>) -> Self {
        let store = Self::new();
        for row in rows {
            store.insert(table, row);
        }
        store
    }

    pub fn insert(&self, table: &str, row: Record) {
        self.rows.lock().unwrap().push((table.to_string(), row));
    }

    pub fn row(&self, table: &str, uid: i64) -> Option<Record> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|(t, r)| t == table && r.int("uid") == Some(uid))
            .map(|(_, r)| r.clone())
    }

    /// Number of queries that filtered on the `slug` column.
    pub fn slug_lookups(&self) -> usize {
        self.slug_lookups.load(Ordering::SeqCst)
    }
}

fn filters_on_slug(query: &RecordQuery) -> bool {
    query
        .filters()
        .iter()
        .any(|filter| matches!(filter, Filter::Eq(column, _) if column == "slug"))
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn query(&self, query: &RecordQuery) -> DomainResult<Vec<Record>> {
        if filters_on_slug(query) {
            self.slug_lookups.fetch_add(1, Ordering::SeqCst);
        }
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|(table, record)| table == query.table() && query.matches(record))
            .map(|(_, record)| record.clone())
            .collect())
    }
}

#[async_trait]
impl RecordWriter for InMemoryRecordStore {
    async fn update_field(
        &self,
        table: &str,
        uid: RecordId,
        field: &str,
        value: FieldValue,
    ) -> DomainResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let (_, record) = rows
            .iter_mut()
            .find(|(t, r)| t == table && r.uid() == Some(uid))
            .ok_or_else(|| DomainError::NotFound(format!("{table}:{uid}")))?;
        record.set(field, value);
        Ok(())
    }
}

/// Every slug is already taken by some other row under the same parent.
#[derive(Default)]
pub struct SaturatedRecordStore {
    slug_lookups: AtomicUsize,
}

impl SaturatedRecordStore {
    pub fn slug_lookups(&self) -> usize {
        self.slug_lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordStore for SaturatedRecordStore {
    async fn query(&self, query: &RecordQuery) -> DomainResult<Vec<Record>> {
        let Some(slug) = query.filters().iter().find_map(|filter| match filter {
            Filter::Eq(column, value) if column == "slug" => Some(value.clone()),
            _ => None,
        }) else {
            return Ok(vec![]);
        };
        self.slug_lookups.fetch_add(1, Ordering::SeqCst);
        Ok(vec![Record::new().with("uid", 9999).with("pid", 1).with("slug", slug)])
    }
}

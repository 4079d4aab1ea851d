use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::record::{FieldValue, Record};
use crate::domain::slug::repository::{Filter, RecordQuery, RecordStore, RecordWriter};
use crate::domain::slug::value_objects::RecordId;
use crate::infrastructure::repositories::error::map_sqlx;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, QueryBuilder, Row, Sqlite, SqlitePool, TypeInfo, ValueRef};
use std::sync::Arc;

/// Table and column names come from configuration, never from user input,
/// but they are still spliced into SQL and must be plain identifiers.
fn identifier(name: &str) -> DomainResult<String> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(format!("\"{name}\""))
    } else {
        Err(DomainError::Validation(format!("invalid identifier: {name:?}")))
    }
}

fn push_value(builder: &mut QueryBuilder<'_, Sqlite>, value: &FieldValue) {
    match value {
        FieldValue::Null => builder.push_bind(None::<i64>),
        FieldValue::Bool(value) => builder.push_bind(i64::from(*value)),
        FieldValue::Int(value) => builder.push_bind(*value),
        FieldValue::Text(value) => builder.push_bind(value.clone()),
    };
}

fn push_filter(builder: &mut QueryBuilder<'_, Sqlite>, filter: &Filter) -> DomainResult<()> {
    let column = identifier(filter.column())?;
    match filter {
        Filter::Eq(_, value) => {
            builder.push(format!("{column} IS "));
            push_value(builder, value);
        }
        Filter::Neq(_, value) => {
            builder.push(format!("{column} IS NOT "));
            push_value(builder, value);
        }
        Filter::In(_, values) if values.is_empty() => {
            builder.push("0 = 1");
        }
        Filter::In(_, values) => {
            // NULL never matches inside IN (...)
            let (nulls, values): (Vec<&FieldValue>, Vec<&FieldValue>) = values
                .iter()
                .partition(|value| matches!(value, FieldValue::Null));
            builder.push("(");
            if !values.is_empty() {
                builder.push(format!("{column} IN ("));
                for (idx, value) in values.iter().enumerate() {
                    if idx > 0 {
                        builder.push(", ");
                    }
                    push_value(builder, value);
                }
                builder.push(")");
            }
            if !nulls.is_empty() {
                if !values.is_empty() {
                    builder.push(" OR ");
                }
                builder.push(format!("{column} IS NULL"));
            }
            builder.push(")");
        }
    }
    Ok(())
}

fn decode_row(row: &SqliteRow) -> DomainResult<Record> {
    row.columns()
        .iter()
        .map(|column| {
            let idx = column.ordinal();
            let raw = row.try_get_raw(idx).map_err(map_sqlx)?;
            let value = if raw.is_null() {
                FieldValue::Null
            } else {
                let type_name = raw.type_info().name().to_string();
                match type_name.as_str() {
                    "INTEGER" | "BOOLEAN" => FieldValue::Int(row.try_get(idx).map_err(map_sqlx)?),
                    "REAL" => FieldValue::Text(row.try_get::<f64, _>(idx).map_err(map_sqlx)?.to_string()),
                    "BLOB" => {
                        let bytes: Vec<u8> = row.try_get(idx).map_err(map_sqlx)?;
                        FieldValue::Text(String::from_utf8_lossy(&bytes).into_owned())
                    }
                    _ => FieldValue::Text(row.try_get(idx).map_err(map_sqlx)?),
                }
            };
            Ok((column.name().to_string(), value))
        })
        .collect()
}

#[derive(Clone)]
pub struct SqliteRecordStore {
    pool: Arc<SqlitePool>,
}

impl SqliteRecordStore {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn query(&self, query: &RecordQuery) -> DomainResult<Vec<Record>> {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT * FROM {}", identifier(query.table())?));

        let mut has_where = false;
        let mut next_condition = |builder: &mut QueryBuilder<Sqlite>| {
            builder.push(if has_where { " AND " } else { " WHERE " });
            has_where = true;
        };

        if let Some(deleted) = query.deleted_field() {
            next_condition(&mut builder);
            builder.push(format!("{} = 0", identifier(deleted)?));
        }
        for filter in query.filters() {
            next_condition(&mut builder);
            push_filter(&mut builder, filter)?;
        }

        let rows = builder
            .build()
            .fetch_all(&*self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.iter().map(decode_row).collect()
    }
}

#[async_trait]
impl RecordWriter for SqliteRecordStore {
    async fn update_field(
        &self,
        table: &str,
        uid: RecordId,
        field: &str,
        value: FieldValue,
    ) -> DomainResult<()> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "UPDATE {} SET {} = ",
            identifier(table)?,
            identifier(field)?
        ));
        push_value(&mut builder, &value);
        builder.push(" WHERE uid = ");
        builder.push_bind(i64::from(uid));

        let result = builder
            .build()
            .execute(&*self.pool)
            .await
            .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("{table}:{uid}")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_restricted() {
        assert_eq!(identifier("pages").unwrap(), "\"pages\"");
        assert_eq!(identifier("_l10n_parent").unwrap(), "\"_l10n_parent\"");
        assert!(identifier("1pages").is_err());
        assert!(identifier("pages; DROP TABLE pages").is_err());
        assert!(identifier("").is_err());
    }
}

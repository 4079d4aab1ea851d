use crate::domain::slug::value_objects::{ContainerId, LanguageId, RecordId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Column value as stored by the record store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Text(String),
}

impl FieldValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Bool(value) => Some(i64::from(*value)),
            Self::Text(value) => value.trim().parse().ok(),
            Self::Null => None,
        }
    }

    /// String form used when a value feeds slug generation. `Null` and
    /// empty strings count as empty.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Text(value) if !value.is_empty() => Some(value.clone()),
            Self::Int(value) => Some(value.to_string()),
            Self::Bool(true) => Some("1".into()),
            _ => None,
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(value) => *value,
            Self::Int(value) => *value != 0,
            Self::Text(value) => !value.is_empty() && value != "0",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<RecordId> for FieldValue {
    fn from(value: RecordId) -> Self {
        Self::Int(value.into())
    }
}

impl From<ContainerId> for FieldValue {
    fn from(value: ContainerId) -> Self {
        Self::Int(value.0)
    }
}

impl From<LanguageId> for FieldValue {
    fn from(value: LanguageId) -> Self {
        Self::Int(value.0)
    }
}

/// A row of any table, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn int(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(FieldValue::as_int)
    }

    pub fn text(&self, field: &str) -> Option<String> {
        self.get(field).and_then(FieldValue::as_text)
    }

    pub fn uid(&self) -> Option<RecordId> {
        self.int("uid").and_then(|id| RecordId::new(id).ok())
    }

    pub fn pid(&self) -> ContainerId {
        ContainerId(self.int("pid").unwrap_or_default())
    }

    pub fn language(&self, language_field: Option<&str>) -> LanguageId {
        language_field
            .and_then(|field| self.int(field))
            .map(LanguageId)
            .unwrap_or_default()
    }

    pub fn is_site_root(&self) -> bool {
        self.get("is_siteroot").is_some_and(FieldValue::is_truthy)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }
}

impl FromIterator<(String, FieldValue)> for Record {
    fn from_iter<T: IntoIterator<Item = (String, FieldValue)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_read_identity_columns() {
        let record = Record::new()
            .with("uid", 7)
            .with("pid", 3)
            .with("language_id", 2)
            .with("is_siteroot", true);

        assert_eq!(record.uid(), Some(RecordId::new(7).unwrap()));
        assert_eq!(record.pid(), ContainerId(3));
        assert_eq!(record.language(Some("language_id")), LanguageId(2));
        assert_eq!(record.language(None), LanguageId::DEFAULT);
        assert!(record.is_site_root());
    }

    #[test]
    fn empty_values_are_not_text() {
        let record = Record::new().with("title", "").with("nav_title", FieldValue::Null);
        assert_eq!(record.text("title"), None);
        assert_eq!(record.text("nav_title"), None);
        assert_eq!(record.text("missing"), None);
    }

    #[test]
    fn deserializes_from_json_object() {
        let record: Record =
            serde_json::from_str(r#"{"uid": 4, "title": "About", "hidden": false, "x": null}"#)
                .unwrap();
        assert_eq!(record.int("uid"), Some(4));
        assert_eq!(record.text("title").as_deref(), Some("About"));
        assert_eq!(record.get("x"), Some(&FieldValue::Null));
        assert!(!record.get("hidden").unwrap().is_truthy());
    }
}

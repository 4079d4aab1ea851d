// src/domain/slug/config.rs
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::value_objects::{UniquenessScope, WorkspaceId};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

pub const PAGES_TABLE: &str = "pages";

/// Version state marking a workspace row that deletes its live counterpart.
pub const DELETE_PLACEHOLDER: i64 = 2;

fn default_workspace_field() -> String {
    "workspace_id".into()
}

fn default_live_pointer_field() -> String {
    "live_uid".into()
}

fn default_version_state_field() -> String {
    "version_state".into()
}

fn default_slug_field() -> String {
    "slug".into()
}

fn default_fallback_character() -> String {
    "-".into()
}

fn default_field_separator() -> String {
    "/".into()
}

/// Per-table metadata the slug services need to build their queries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSchema {
    pub name: String,
    #[serde(default)]
    pub language_field: Option<String>,
    #[serde(default)]
    pub translation_parent_field: Option<String>,
    #[serde(default)]
    pub deleted_field: Option<String>,
    #[serde(default)]
    pub workspace_aware: bool,
    #[serde(default = "default_workspace_field")]
    pub workspace_field: String,
    #[serde(default = "default_live_pointer_field")]
    pub live_pointer_field: String,
    #[serde(default = "default_version_state_field")]
    pub version_state_field: String,
}

impl TableSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            language_field: None,
            translation_parent_field: None,
            deleted_field: None,
            workspace_aware: false,
            workspace_field: default_workspace_field(),
            live_pointer_field: default_live_pointer_field(),
            version_state_field: default_version_state_field(),
        }
    }

    /// Schema of the page tree as laid out by the bundled migrations.
    pub fn pages() -> Self {
        Self::new(PAGES_TABLE)
            .with_language("language_id", "l10n_parent")
            .with_deleted_field("deleted")
            .workspace_aware()
    }

    pub fn with_language(
        mut self,
        language_field: impl Into<String>,
        translation_parent_field: impl Into<String>,
    ) -> Self {
        self.language_field = Some(language_field.into());
        self.translation_parent_field = Some(translation_parent_field.into());
        self
    }

    pub fn with_deleted_field(mut self, field: impl Into<String>) -> Self {
        self.deleted_field = Some(field.into());
        self
    }

    pub fn workspace_aware(mut self) -> Self {
        self.workspace_aware = true;
        self
    }

    pub fn is_page_table(&self) -> bool {
        self.name == PAGES_TABLE
    }
}

/// One configured source field. A plain string may list comma-separated
/// alternatives; the first non-empty one wins.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FieldSpec {
    Single(String),
    Alternatives(Vec<String>),
}

impl FieldSpec {
    pub fn alternatives(&self) -> Vec<&str> {
        match self {
            Self::Single(value) => value
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .collect(),
            Self::Alternatives(values) => values
                .iter()
                .map(|name| name.trim())
                .filter(|name| !name.is_empty())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorOptions {
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    #[serde(default = "default_field_separator")]
    pub field_separator: String,
    #[serde(default)]
    pub prefix_parent_page_slug: bool,
    #[serde(default, deserialize_with = "ordered_replacements")]
    pub replacements: Vec<(String, String)>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            fields: Vec::new(),
            field_separator: default_field_separator(),
            prefix_parent_page_slug: false,
            replacements: Vec::new(),
        }
    }
}

fn ordered_replacements<'de, D>(deserializer: D) -> Result<Vec<(String, String)>, D::Error>
where
    D: Deserializer<'de>,
{
    let map = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
    map.into_iter()
        .map(|(from, to)| match to {
            serde_json::Value::String(to) => Ok((from, to)),
            other => Err(D::Error::custom(format!(
                "replacement for {from:?} must be a string, got {other}"
            ))),
        })
        .collect()
}

fn eval_scopes<'de, D>(deserializer: D) -> Result<Vec<UniquenessScope>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_eval(&raw).map_err(D::Error::custom)
}

fn parse_eval(raw: &str) -> DomainResult<Vec<UniquenessScope>> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::parse::<UniquenessScope>)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlugOptions {
    #[serde(default = "default_fallback_character")]
    pub fallback_character: String,
    #[serde(default)]
    pub generator_options: GeneratorOptions,
    #[serde(default, deserialize_with = "eval_scopes")]
    pub eval: Vec<UniquenessScope>,
}

impl Default for SlugOptions {
    fn default() -> Self {
        Self {
            fallback_character: default_fallback_character(),
            generator_options: GeneratorOptions::default(),
            eval: Vec::new(),
        }
    }
}

/// Everything a slug helper instance needs to know about the column it serves.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlugConfiguration {
    pub table: TableSchema,
    #[serde(default = "default_slug_field")]
    pub field: String,
    #[serde(default)]
    pub workspace_id: WorkspaceId,
    #[serde(default)]
    pub options: SlugOptions,
}

impl SlugConfiguration {
    pub fn new(table: TableSchema, field: impl Into<String>) -> Self {
        Self {
            table,
            field: field.into(),
            workspace_id: WorkspaceId::LIVE,
            options: SlugOptions::default(),
        }
    }

    pub fn from_json(raw: &str) -> DomainResult<Self> {
        serde_json::from_str(raw)
            .map_err(|err| DomainError::Validation(format!("invalid slug configuration: {err}")))
    }

    pub fn with_workspace(mut self, workspace_id: WorkspaceId) -> Self {
        self.workspace_id = workspace_id;
        self
    }

    pub fn with_options(mut self, options: SlugOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_eval(mut self, raw: &str) -> DomainResult<Self> {
        self.options.eval = parse_eval(raw)?;
        Ok(self)
    }

    pub fn fallback_character(&self) -> &str {
        &self.options.fallback_character
    }

    pub fn generator(&self) -> &GeneratorOptions {
        &self.options.generator_options
    }

    pub fn scopes(&self) -> &[UniquenessScope] {
        &self.options.eval
    }

    /// Workspace filtering applies only to workspace-aware tables.
    pub fn workspace_enabled(&self) -> bool {
        self.table.workspace_aware
    }
}

// src/domain/slug/services/generator.rs
use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::config::{SlugConfiguration, TableSchema};
use crate::domain::slug::record::Record;
use crate::domain::slug::repository::{ParentRecordLookup, SiteResolver};
use crate::domain::slug::services::normalizer::SlugNormalizer;
use crate::domain::slug::services::short_hash;
use crate::domain::slug::value_objects::{ContainerId, LanguageId, Slug};

pub const DOKTYPE_SYSFOLDER: i64 = 254;
pub const DOKTYPE_RECYCLER: i64 = 255;

const PAGE_SLUG_FIELD: &str = "slug";

type SlugFuture<'a> = Pin<Box<dyn Future<Output = DomainResult<Slug>> + Send + 'a>>;

/// What a post-modifier gets to see besides the slug itself.
pub struct PostModifierContext<'a> {
    pub table: &'a str,
    pub record: &'a Record,
    pub pid: ContainerId,
    pub prefix: &'a str,
}

/// Hook applied to the raw generated slug before the final sanitize pass.
pub trait SlugPostModifier: Send + Sync {
    fn modify(&self, slug: String, context: &PostModifierContext<'_>) -> String;
}

/// Derives a slug from a record's configured fields and, optionally, the
/// slug of its parent page.
pub struct SlugGeneratorService {
    config: Arc<SlugConfiguration>,
    normalizer: Arc<SlugNormalizer>,
    parents: Arc<dyn ParentRecordLookup>,
    sites: Arc<dyn SiteResolver>,
    page_schema: TableSchema,
    post_modifiers: Vec<Arc<dyn SlugPostModifier>>,
}

impl SlugGeneratorService {
    pub fn new(
        config: Arc<SlugConfiguration>,
        normalizer: Arc<SlugNormalizer>,
        parents: Arc<dyn ParentRecordLookup>,
        sites: Arc<dyn SiteResolver>,
    ) -> Self {
        let page_schema = if config.table.is_page_table() {
            config.table.clone()
        } else {
            TableSchema::pages()
        };
        Self {
            config,
            normalizer,
            parents,
            sites,
            page_schema,
            post_modifiers: Vec::new(),
        }
    }

    pub fn with_post_modifier(mut self, modifier: Arc<dyn SlugPostModifier>) -> Self {
        self.post_modifiers.push(modifier);
        self
    }

    pub async fn generate(&self, record: &Record, pid: ContainerId) -> DomainResult<Slug> {
        let mut visited = HashSet::new();
        self.generate_within(record, pid, &mut visited).await
    }

    fn generate_within<'a>(
        &'a self,
        record: &'a Record,
        pid: ContainerId,
        visited: &'a mut HashSet<i64>,
    ) -> SlugFuture<'a> {
        Box::pin(async move {
            if pid.is_root() || (self.config.table.is_page_table() && record.is_site_root()) {
                return Ok(Slug::root());
            }

            let prefix = if self.config.generator().prefix_parent_page_slug {
                self.parent_prefix(record, pid, visited).await?
            } else {
                String::new()
            };

            let mut slug = self.normalizer.sanitize(&self.joined_fields(record));
            if slug.is_root() {
                let fingerprint = serde_json::to_string(record).map_err(|err| {
                    DomainError::Validation(format!("cannot fingerprint record: {err}"))
                })?;
                slug = self
                    .normalizer
                    .sanitize(&format!("default-{}", short_hash(&fingerprint)));
            }

            let mut raw = if prefix.is_empty() {
                String::from(slug)
            } else {
                format!("{prefix}{slug}")
            };

            let context = PostModifierContext {
                table: &self.config.table.name,
                record,
                pid,
                prefix: &prefix,
            };
            for modifier in &self.post_modifiers {
                raw = modifier.modify(raw, &context);
            }

            Ok(self.normalizer.sanitize(&raw))
        })
    }

    fn joined_fields(&self, record: &Record) -> String {
        let options = self.config.generator();
        let parts: Vec<String> = options
            .fields
            .iter()
            .filter_map(|spec| {
                spec.alternatives()
                    .into_iter()
                    .find_map(|name| record.text(name))
            })
            .map(|value| {
                options
                    .replacements
                    .iter()
                    .fold(value, |acc, (from, to)| acc.replace(from.as_str(), to))
            })
            .collect();
        parts.join(&options.field_separator)
    }

    async fn parent_prefix(
        &self,
        record: &Record,
        pid: ContainerId,
        visited: &mut HashSet<i64>,
    ) -> DomainResult<String> {
        if !visited.insert(pid.0) {
            return Err(DomainError::CyclicContainment(pid.0));
        }

        let language = record.language(self.config.table.language_field.as_deref());
        let Some(parent) = self.resolve_parent_page(pid, language).await? else {
            return Ok(String::new());
        };

        let parent_slug = match parent.text(PAGE_SLUG_FIELD) {
            Some(slug) => slug,
            None => String::from(
                self.generate_within(&parent, parent.pid(), visited)
                    .await?,
            ),
        };

        Ok(parent_slug.trim_matches('/').to_string())
    }

    async fn resolve_parent_page(
        &self,
        pid: ContainerId,
        language: LanguageId,
    ) -> DomainResult<Option<Record>> {
        let mut root_line = self.parents.root_line_of(pid).await?.into_iter();
        let Some(mut parent) = root_line.next() else {
            return Ok(None);
        };
        // folders never contribute a path segment unless nothing else is left
        for next in root_line {
            if !is_folder(&parent) {
                break;
            }
            parent = next;
        }

        if language.is_default() {
            return Ok(Some(parent));
        }
        let Some(parent_uid) = parent.uid() else {
            return Ok(Some(parent));
        };

        let mut languages = vec![language];
        languages.extend(
            self.sites
                .fallback_languages(pid, language)
                .await?
                .into_iter()
                .filter(|fallback| !fallback.is_default()),
        );

        for candidate in languages {
            if let Some(localized) = self
                .parents
                .localized_variant(&self.page_schema, parent_uid, candidate)
                .await?
            {
                tracing::debug!(
                    parent = %parent_uid,
                    language = candidate.0,
                    "using localized parent page"
                );
                return Ok(Some(localized));
            }
        }

        Ok(Some(parent))
    }
}

fn is_folder(page: &Record) -> bool {
    matches!(page.int("doktype"), Some(DOKTYPE_SYSFOLDER | DOKTYPE_RECYCLER))
}

// src/domain/slug/services/uniqueness.rs
use std::sync::Arc;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::config::{DELETE_PLACEHOLDER, SlugConfiguration};
use crate::domain::slug::record::Record;
use crate::domain::slug::repository::{
    LiveVersionResolver, RecordQuery, RecordStore, SiteResolver,
};
use crate::domain::slug::services::normalizer::SlugNormalizer;
use crate::domain::slug::services::short_hash;
use crate::domain::slug::value_objects::{
    ContainerId, LanguageId, RecordRef, Slug, UniquenessScope,
};

/// Counter suffixes tried before switching to a hash suffix.
pub const MAX_COUNTER_ATTEMPTS: u32 = 100;

/// The record a slug is being resolved for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugContext {
    pub record: RecordRef,
    pub container: ContainerId,
    pub language: LanguageId,
}

impl SlugContext {
    pub fn new(record: RecordRef, container: ContainerId, language: LanguageId) -> Self {
        Self {
            record,
            container,
            language,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum ResolutionPhase {
    Counting { attempt: u32 },
    HashFallback,
}

/// Domain service answering "is this slug free?" per scope and producing
/// a free variant when it is not.
pub struct SlugUniquenessService {
    config: Arc<SlugConfiguration>,
    normalizer: Arc<SlugNormalizer>,
    store: Arc<dyn RecordStore>,
    sites: Arc<dyn SiteResolver>,
    versions: Arc<dyn LiveVersionResolver>,
}

impl SlugUniquenessService {
    pub fn new(
        config: Arc<SlugConfiguration>,
        normalizer: Arc<SlugNormalizer>,
        store: Arc<dyn RecordStore>,
        sites: Arc<dyn SiteResolver>,
        versions: Arc<dyn LiveVersionResolver>,
    ) -> Self {
        Self {
            config,
            normalizer,
            store,
            sites,
            versions,
        }
    }

    pub async fn is_unique(
        &self,
        slug: &Slug,
        context: &SlugContext,
        scope: UniquenessScope,
    ) -> DomainResult<bool> {
        match scope {
            UniquenessScope::Sibling => self.is_unique_in_sibling_scope(slug, context).await,
            UniquenessScope::Site => self.is_unique_in_tree_scope(slug, context).await,
            UniquenessScope::Table => self.is_unique_in_table(slug, context).await,
        }
    }

    pub async fn is_unique_in_sibling_scope(
        &self,
        slug: &Slug,
        context: &SlugContext,
    ) -> DomainResult<bool> {
        let container = self.resolve_container(context).await?;
        let query = self.prepared_query(slug, context).await?.eq("pid", container);
        Ok(self.conflicting_records(slug, &query).await?.is_empty())
    }

    pub async fn is_unique_in_tree_scope(
        &self,
        slug: &Slug,
        context: &SlugContext,
    ) -> DomainResult<bool> {
        let container = self.resolve_container(context).await?;
        let query = self.prepared_query(slug, context).await?;
        let conflicts = self.conflicting_records(slug, &query).await?;
        if conflicts.is_empty() {
            return Ok(true);
        }

        let Some(current_site) = self.sites.root_tree_for(container).await? else {
            tracing::warn!(
                table = %self.config.table.name,
                container = container.0,
                "container belongs to no site, treating slug as unique"
            );
            return Ok(true);
        };

        for record in &conflicts {
            let node = self.site_node_of(record);
            if self.sites.root_tree_for(node).await? == Some(current_site) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub async fn is_unique_in_table(
        &self,
        slug: &Slug,
        context: &SlugContext,
    ) -> DomainResult<bool> {
        let query = self.prepared_query(slug, context).await?;
        Ok(self.conflicting_records(slug, &query).await?.is_empty())
    }

    /// Sanitizes `proposed` and appends `-1`, `-2`, ... until the slug is free
    /// in `scope`. After [`MAX_COUNTER_ATTEMPTS`] counters a hash of the
    /// payload is appended instead and returned without a further check.
    pub async fn build_unique_slug(
        &self,
        proposed: &str,
        context: &SlugContext,
        scope: UniquenessScope,
    ) -> DomainResult<Slug> {
        let mut candidate = self.normalizer.sanitize(proposed);
        let payload = self.normalizer.extract(candidate.as_str());
        let mut phase = ResolutionPhase::Counting { attempt: 0 };

        loop {
            match phase {
                ResolutionPhase::Counting { attempt } => {
                    if self.is_unique(&candidate, context, scope).await? {
                        return Ok(candidate);
                    }
                    tracing::debug!(
                        table = %self.config.table.name,
                        slug = %candidate,
                        %scope,
                        attempt,
                        "slug taken"
                    );
                    if attempt >= MAX_COUNTER_ATTEMPTS {
                        phase = ResolutionPhase::HashFallback;
                        continue;
                    }
                    let next = attempt + 1;
                    candidate = self.normalizer.sanitize(&format!("{payload}-{next}"));
                    phase = ResolutionPhase::Counting { attempt: next };
                }
                ResolutionPhase::HashFallback => {
                    let slug = self
                        .normalizer
                        .sanitize(&format!("{payload}-{}", short_hash(&payload)));
                    tracing::warn!(
                        table = %self.config.table.name,
                        slug = %slug,
                        %scope,
                        "counter suffixes exhausted, using hash suffix"
                    );
                    return Ok(slug);
                }
            }
        }
    }

    async fn resolve_container(&self, context: &SlugContext) -> DomainResult<ContainerId> {
        if !context.container.is_unresolved() {
            return Ok(context.container);
        }
        let live = self
            .versions
            .live_pid_of(&self.config.table, &context.record)
            .await?;
        if live.is_unresolved() {
            return Err(DomainError::InvalidContainerId {
                container: live.0,
                record: context.record.to_string(),
            });
        }
        Ok(live)
    }

    async fn prepared_query(&self, slug: &Slug, context: &SlugContext) -> DomainResult<RecordQuery> {
        let table = &self.config.table;
        let workspace = self.config.workspace_id;
        let mut query = RecordQuery::new(table).eq(self.config.field.as_str(), slug.as_str());

        if let Some(id) = context.record.existing() {
            query = query.neq("uid", id);
            if self.config.workspace_enabled() && !workspace.is_live() {
                let live = self
                    .versions
                    .live_id_of(table, &context.record)
                    .await?
                    .unwrap_or(id);
                if live != id {
                    query = query.neq("uid", live);
                }
            }
        }

        if let Some(language_field) = &table.language_field {
            query = query.eq(language_field.as_str(), context.language);
        }

        if self.config.workspace_enabled() {
            query = if workspace.is_live() {
                query.any_of(table.workspace_field.as_str(), [0i64])
            } else {
                query.any_of(table.workspace_field.as_str(), [0, workspace.0])
            };
        }

        Ok(query)
    }

    /// Runs `query` and drops rows the current workspace does not see with
    /// this slug: delete placeholders, and live rows whose workspace version
    /// is deleted or carries another slug.
    async fn conflicting_records(&self, slug: &Slug, query: &RecordQuery) -> DomainResult<Vec<Record>> {
        let records = self.store.query(query).await?;
        if !self.config.workspace_enabled() {
            return Ok(records);
        }

        let table = &self.config.table;
        let workspace = self.config.workspace_id;
        let mut visible = Vec::with_capacity(records.len());
        for record in records {
            if is_delete_placeholder(&record, &table.version_state_field) {
                continue;
            }
            let is_live_row = record.int(&table.workspace_field).unwrap_or_default() == 0;
            if !workspace.is_live() && is_live_row {
                if let Some(uid) = record.uid() {
                    let overlay = RecordQuery::new(table)
                        .eq(table.live_pointer_field.as_str(), uid)
                        .eq(table.workspace_field.as_str(), workspace.0);
                    if let Some(version) = self.store.query(&overlay).await?.into_iter().next() {
                        if is_delete_placeholder(&version, &table.version_state_field)
                            || version.text(&self.config.field).as_deref() != Some(slug.as_str())
                        {
                            continue;
                        }
                    }
                }
            }
            visible.push(record);
        }
        Ok(visible)
    }

    /// A site root page is its own site; every other row is located by its parent.
    fn site_node_of(&self, record: &Record) -> ContainerId {
        if self.config.table.is_page_table() && record.is_site_root() {
            if let Some(uid) = record.uid() {
                return ContainerId(uid.into());
            }
        }
        record.pid()
    }
}

fn is_delete_placeholder(record: &Record, version_state_field: &str) -> bool {
    record.int(version_state_field) == Some(DELETE_PLACEHOLDER)
}

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::config::{DELETE_PLACEHOLDER, TableSchema};
use crate::domain::slug::record::Record;
use crate::domain::slug::repository::{
    ParentRecordLookup, RecordQuery, RecordStore, SiteResolver,
};
use crate::domain::slug::value_objects::{
    ContainerId, LanguageId, RecordId, TreeId, WorkspaceId,
};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Page tree view over a [`RecordStore`]: rootlines, translations and the
/// site root each page belongs to. The tree is made of live page rows, with
/// the current workspace's versions laid over them.
#[derive(Clone)]
pub struct PageTree {
    store: Arc<dyn RecordStore>,
    pages: TableSchema,
    workspace: WorkspaceId,
    language_fallbacks: HashMap<LanguageId, Vec<LanguageId>>,
}

impl PageTree {
    pub fn new(store: Arc<dyn RecordStore>, pages: TableSchema) -> Self {
        Self {
            store,
            pages,
            workspace: WorkspaceId::LIVE,
            language_fallbacks: HashMap::new(),
        }
    }

    /// Reads pages as `workspace` sees them.
    pub fn with_workspace(mut self, workspace: WorkspaceId) -> Self {
        self.workspace = workspace;
        self
    }

    /// Declares which languages stand in for `language` when a page has no
    /// translation in it, tried in order.
    pub fn with_language_fallbacks(
        mut self,
        language: LanguageId,
        fallbacks: impl IntoIterator<Item = LanguageId>,
    ) -> Self {
        self.language_fallbacks
            .insert(language, fallbacks.into_iter().collect());
        self
    }

    async fn page(&self, uid: i64) -> DomainResult<Option<Record>> {
        let mut query = RecordQuery::new(&self.pages).eq("uid", uid);
        if self.pages.workspace_aware {
            query = query.eq(self.pages.workspace_field.as_str(), 0);
        }
        let Some(live) = self.store.query(&query).await?.into_iter().next() else {
            return Ok(None);
        };
        self.overlay(live).await
    }

    /// Replaces a live page with its version in the current workspace. The
    /// version keeps the live uid so rootlines and site ids stay stable.
    async fn overlay(&self, live: Record) -> DomainResult<Option<Record>> {
        if !self.pages.workspace_aware || self.workspace.is_live() {
            return Ok(Some(live));
        }
        let Some(uid) = live.uid() else {
            return Ok(Some(live));
        };

        let query = RecordQuery::new(&self.pages)
            .eq(self.pages.live_pointer_field.as_str(), uid)
            .eq(self.pages.workspace_field.as_str(), self.workspace.0);
        match self.store.query(&query).await?.into_iter().next() {
            Some(version)
                if version.int(&self.pages.version_state_field) == Some(DELETE_PLACEHOLDER) =>
            {
                Ok(None)
            }
            Some(mut version) => {
                version.set("uid", uid);
                Ok(Some(version))
            }
            None => Ok(Some(live)),
        }
    }
}

#[async_trait]
impl ParentRecordLookup for PageTree {
    async fn root_line_of(&self, container: ContainerId) -> DomainResult<Vec<Record>> {
        let mut root_line = Vec::new();
        let mut visited = HashSet::new();
        let mut current = container.0;

        while current > 0 {
            if !visited.insert(current) {
                return Err(DomainError::CyclicContainment(current));
            }
            let Some(page) = self.page(current).await? else {
                break;
            };
            current = page.pid().0;
            root_line.push(page);
        }
        Ok(root_line)
    }

    async fn localized_variant(
        &self,
        table: &TableSchema,
        record: RecordId,
        language: LanguageId,
    ) -> DomainResult<Option<Record>> {
        let (Some(language_field), Some(parent_field)) =
            (&table.language_field, &table.translation_parent_field)
        else {
            return Ok(None);
        };

        let mut query = RecordQuery::new(table)
            .eq(parent_field.as_str(), record)
            .eq(language_field.as_str(), language);
        if table.workspace_aware {
            query = query.eq(table.workspace_field.as_str(), 0);
        }
        Ok(self.store.query(&query).await?.into_iter().next())
    }
}

#[async_trait]
impl SiteResolver for PageTree {
    async fn root_tree_for(&self, container: ContainerId) -> DomainResult<Option<TreeId>> {
        let root_line = self.root_line_of(container).await?;
        Ok(root_line
            .iter()
            .find(|page| page.is_site_root())
            .and_then(Record::uid)
            .map(|uid| TreeId(uid.into())))
    }

    async fn fallback_languages(
        &self,
        _container: ContainerId,
        language: LanguageId,
    ) -> DomainResult<Vec<LanguageId>> {
        Ok(self
            .language_fallbacks
            .get(&language)
            .cloned()
            .unwrap_or_default())
    }
}

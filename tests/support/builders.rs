// tests/support/builders.rs
use cms_slug::domain::slug::{FieldValue, Record};

/// A `pages` row with the column defaults of the bundled migration.
pub struct PageBuilder {
    record: Record,
}

impl PageBuilder {
    pub fn new(uid: i64, pid: i64) -> Self {
        let record = Record::new()
            .with("uid", uid)
            .with("pid", pid)
            .with("doktype", 1)
            .with("is_siteroot", 0)
            .with("title", "")
            .with("nav_title", "")
            .with("slug", "")
            .with("language_id", 0)
            .with("l10n_parent", 0)
            .with("deleted", 0)
            .with("workspace_id", 0)
            .with("live_uid", 0)
            .with("version_state", 0);
        Self { record }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.record.set("title", title);
        self
    }

    pub fn nav_title(mut self, nav_title: &str) -> Self {
        self.record.set("nav_title", nav_title);
        self
    }

    pub fn slug(mut self, slug: &str) -> Self {
        self.record.set("slug", slug);
        self
    }

    pub fn without_slug(mut self) -> Self {
        self.record.set("slug", FieldValue::Null);
        self
    }

    pub fn site_root(mut self) -> Self {
        self.record.set("is_siteroot", 1);
        self
    }

    pub fn doktype(mut self, doktype: i64) -> Self {
        self.record.set("doktype", doktype);
        self
    }

    pub fn translation_of(mut self, parent: i64, language: i64) -> Self {
        self.record.set("l10n_parent", parent);
        self.record.set("language_id", language);
        self
    }

    pub fn deleted(mut self) -> Self {
        self.record.set("deleted", 1);
        self
    }

    pub fn in_workspace(mut self, workspace: i64, live_uid: i64) -> Self {
        self.record.set("workspace_id", workspace);
        self.record.set("live_uid", live_uid);
        self
    }

    pub fn delete_placeholder(mut self) -> Self {
        self.record.set("version_state", 2);
        self
    }

    pub fn build(self) -> Record {
        self.record
    }
}

pub fn page(uid: i64, pid: i64) -> PageBuilder {
    PageBuilder::new(uid, pid)
}

use super::SlugCommandService;
use crate::{
    application::{dto::SlugDto, error::ApplicationResult},
    domain::slug::{Record, RecordRef, services::SlugContext},
};

/// Slug resolution as the save pipeline runs it for one record.
pub struct BuildSlugCommand {
    pub record_ref: RecordRef,
    pub record: Record,
    /// Value typed by an editor. Blank means "generate from the record".
    pub proposed: Option<String>,
}

impl SlugCommandService {
    pub async fn build_for_save(&self, command: BuildSlugCommand) -> ApplicationResult<SlugDto> {
        let BuildSlugCommand {
            record_ref,
            record,
            proposed,
        } = command;
        let pid = record.pid();

        let mut slug = match proposed.filter(|value| !value.trim().is_empty()) {
            Some(value) => self.normalizer.sanitize(&value),
            None => self.generator.generate(&record, pid).await?,
        };

        let language = record.language(self.config.table.language_field.as_deref());
        let context = SlugContext::new(record_ref, pid, language);
        for scope in self.config.scopes() {
            slug = self
                .uniqueness
                .build_unique_slug(slug.as_str(), &context, *scope)
                .await?;
        }

        tracing::debug!(
            table = %self.config.table.name,
            record = %context.record,
            slug = %slug,
            "slug resolved"
        );
        Ok(slug.into())
    }
}

use super::SlugCommandService;
use crate::{
    application::{dto::SlugDto, error::ApplicationResult},
    domain::slug::{ContainerId, Record},
};

pub struct GenerateSlugCommand {
    pub record: Record,
    /// Parent to generate under; defaults to the record's own `pid`.
    pub pid: Option<i64>,
}

impl SlugCommandService {
    pub async fn generate(&self, command: GenerateSlugCommand) -> ApplicationResult<SlugDto> {
        let pid = command
            .pid
            .map(ContainerId)
            .unwrap_or_else(|| command.record.pid());
        let slug = self.generator.generate(&command.record, pid).await?;
        Ok(slug.into())
    }
}

use super::{BuildSlugCommand, SlugCommandService};
use crate::{
    application::{
        dto::PopulateReportDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::slug::{FieldValue, RecordQuery, RecordRef},
};

#[derive(Debug, Clone, Default)]
pub struct PopulateSlugsCommand {
    /// Stop after this many rows; `None` processes the whole table.
    pub limit: Option<usize>,
}

impl SlugCommandService {
    /// Gives every live row with an empty slug column a unique slug.
    pub async fn populate_missing(
        &self,
        command: PopulateSlugsCommand,
    ) -> ApplicationResult<PopulateReportDto> {
        let table = &self.config.table;
        let mut query = RecordQuery::new(table).any_of(
            self.config.field.as_str(),
            [FieldValue::Text(String::new()), FieldValue::Null],
        );
        if table.workspace_aware {
            query = query.eq(table.workspace_field.as_str(), 0);
        }

        let mut rows = self.store.query(&query).await?;
        if let Some(limit) = command.limit {
            rows.truncate(limit);
        }

        let mut report = PopulateReportDto {
            table: table.name.clone(),
            ..PopulateReportDto::default()
        };
        for record in rows {
            report.examined += 1;
            let uid = record.uid().ok_or_else(|| {
                ApplicationError::validation(format!("{} row without uid", table.name))
            })?;

            let slug = self
                .build_for_save(BuildSlugCommand {
                    record_ref: RecordRef::Existing(uid),
                    record,
                    proposed: None,
                })
                .await?
                .slug;
            self.writer
                .update_field(&table.name, uid, &self.config.field, FieldValue::Text(slug.clone()))
                .await?;

            tracing::info!(table = %table.name, %uid, %slug, "slug populated");
            report.updated += 1;
        }

        Ok(report)
    }
}

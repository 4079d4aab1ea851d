use crate::domain::slug::Slug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlugDto {
    pub slug: String,
}

impl From<Slug> for SlugDto {
    fn from(slug: Slug) -> Self {
        Self { slug: slug.into() }
    }
}

/// Outcome of filling in empty slugs across a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulateReportDto {
    pub table: String,
    pub examined: u64,
    pub updated: u64,
}

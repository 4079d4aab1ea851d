pub mod slugs;

pub use slugs::{PopulateReportDto, SlugDto};

// src/application/commands/slugs/mod.rs
mod build;
mod generate;
mod populate;
mod service;

pub use build::BuildSlugCommand;
pub use generate::GenerateSlugCommand;
pub use populate::PopulateSlugsCommand;
pub use service::SlugCommandService;

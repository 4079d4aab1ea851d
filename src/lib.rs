//! Slug generation and scope-aware uniqueness resolution for CMS records.
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

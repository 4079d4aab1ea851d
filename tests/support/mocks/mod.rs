// tests/support/mocks/mod.rs
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod record_store;
pub mod util;

pub use record_store::{InMemoryRecordStore, SaturatedRecordStore};
pub use util::SuffixModifier;

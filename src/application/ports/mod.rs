// src/application/ports/mod.rs
pub mod util;

pub type TransliteratorPort = dyn util::Transliterator;

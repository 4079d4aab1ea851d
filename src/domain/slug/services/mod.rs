// src/domain/slug/services/mod.rs
pub mod generator;
pub mod normalizer;
pub mod uniqueness;

pub use generator::{PostModifierContext, SlugGeneratorService, SlugPostModifier};
pub use normalizer::SlugNormalizer;
pub use uniqueness::{MAX_COUNTER_ATTEMPTS, SlugContext, SlugUniquenessService};

/// Ten hex characters of a blake3 digest, used as a last-resort suffix.
pub fn short_hash(input: &str) -> String {
    blake3::hash(input.as_bytes()).to_hex().as_str()[..10].to_string()
}

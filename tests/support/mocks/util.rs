// tests/support/mocks/util.rs
use cms_slug::domain::slug::services::{PostModifierContext, SlugPostModifier};

/// Appends a fixed segment, e.g. to tag slugs of a record type.
pub struct SuffixModifier(pub &'static str);

impl SlugPostModifier for SuffixModifier {
    fn modify(&self, slug: String, _context: &PostModifierContext<'_>) -> String {
        format!("{slug}/{}", self.0)
    }
}

// src/domain/slug/services/normalizer.rs
use std::sync::Arc;

use once_cell::sync::Lazy;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;

use crate::application::ports::util::Transliterator;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::value_objects::Slug;

/// A tag starts with `<` directly followed by a name, `/`, `!` or `?`. An
/// unterminated tag is only dropped at the end of the input.
static MARKUP_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<[a-zA-Z/!?][^<>]*>|<[a-zA-Z/!?][^<>\s]*$").expect("markup tag pattern")
});

static SEPARATOR_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t\x{00A0}\-+_]+").expect("separator pattern"));

/// RFC 3986 unreserved characters plus `/` pass through untouched.
const PATH_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// Turns arbitrary label text into a slug made of lowercase ASCII letters,
/// digits, `/` and the fallback character.
pub struct SlugNormalizer {
    fallback: String,
    invalid_chars: Regex,
    fallback_run: Option<Regex>,
    transliterator: Arc<dyn Transliterator>,
}

impl SlugNormalizer {
    pub fn new(
        fallback: impl Into<String>,
        transliterator: Arc<dyn Transliterator>,
    ) -> DomainResult<Self> {
        let fallback = fallback.into();
        let escaped = regex::escape(&fallback);

        let invalid_chars = Regex::new(&format!(r"[^\p{{L}}\p{{M}}0-9/{escaped}]"))
            .map_err(|err| DomainError::Validation(format!("invalid fallback character: {err}")))?;
        let fallback_run = if fallback.is_empty() {
            None
        } else {
            let pattern = Regex::new(&format!("(?:{escaped}){{2,}}")).map_err(|err| {
                DomainError::Validation(format!("invalid fallback character: {err}"))
            })?;
            Some(pattern)
        };

        Ok(Self {
            fallback,
            invalid_chars,
            fallback_run,
            transliterator,
        })
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn sanitize(&self, raw: &str) -> Slug {
        let slug = raw.to_lowercase();
        let slug = MARKUP_TAG.replace_all(&slug, "");
        let slug = SEPARATOR_RUN.replace_all(&slug, regex::NoExpand(&self.fallback));
        let slug = self.transliterator.transliterate(&slug);
        let slug = self.invalid_chars.replace_all(&slug, "");
        let slug = match &self.fallback_run {
            Some(run) => run
                .replace_all(&slug, regex::NoExpand(&self.fallback))
                .into_owned(),
            None => slug.into_owned(),
        };
        let slug = self.percent_encode(&slug.to_lowercase());

        let payload = self
            .extract(&slug)
            .split('/')
            .map(|segment| self.trim_fallback(segment))
            .collect::<Vec<_>>()
            .join("/");

        Slug::from_payload(&payload)
    }

    /// Strips leading and trailing fallback characters and slashes.
    pub fn extract(&self, slug: &str) -> String {
        slug.trim_matches(|c: char| c == '/' || self.fallback.contains(c))
            .to_string()
    }

    fn trim_fallback<'a>(&self, segment: &'a str) -> &'a str {
        segment.trim_matches(|c: char| self.fallback.contains(c))
    }

    fn percent_encode(&self, value: &str) -> String {
        let encoded = utf8_percent_encode(value, PATH_SAFE).to_string();
        let encoded_fallback = utf8_percent_encode(&self.fallback, PATH_SAFE).to_string();
        if encoded_fallback == self.fallback {
            encoded
        } else {
            encoded.replace(&encoded_fallback, &self.fallback)
        }
    }
}

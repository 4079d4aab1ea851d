// src/application/ports/util.rs
pub trait Transliterator: Send + Sync {
    /// Folds `input` to ASCII. Characters without a mapping are dropped.
    fn transliterate(&self, input: &str) -> String;
}

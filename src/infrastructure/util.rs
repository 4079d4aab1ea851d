use crate::application::ports::util::Transliterator;

#[derive(Default, Clone)]
pub struct DeunicodeTransliterator;

impl Transliterator for DeunicodeTransliterator {
    fn transliterate(&self, input: &str) -> String {
        deunicode::deunicode_with_tofu(input, "")
    }
}

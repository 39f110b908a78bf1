pub mod core;
pub mod source;

// Re-export the main types for convenience
pub use core::{LanguageTag, WordList, WordListError};
pub use source::{RandomWordSource, ScriptedWordSource, WordSource};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_language_feeds_a_word_source() {
        let mut source = RandomWordSource::new(LanguageTag::default()).unwrap();

        let word = source.next_word(LanguageTag::En);
        assert!(!word.is_empty());
    }
}

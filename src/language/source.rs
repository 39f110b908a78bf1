use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashMap;

use super::core::{LanguageTag, WordList, WordListError};

/// Supplies words for the spawner
pub trait WordSource {
    fn next_word(&mut self, language: LanguageTag) -> String;
}

/// Uniform random draw from the bundled word lists.
///
/// Lists are loaded up front, so a missing or empty list is reported by the
/// constructor rather than mid-game.
#[derive(Debug)]
pub struct RandomWordSource {
    lists: HashMap<LanguageTag, WordList>,
    default_language: LanguageTag,
    rng: StdRng,
}

impl RandomWordSource {
    pub fn new(language: LanguageTag) -> Result<Self, WordListError> {
        Self::with_rng(language, StdRng::from_entropy())
    }

    pub fn with_rng(language: LanguageTag, rng: StdRng) -> Result<Self, WordListError> {
        let mut lists = HashMap::new();
        lists.insert(language, WordList::load(language)?);
        Ok(Self {
            lists,
            default_language: language,
            rng,
        })
    }

    pub fn from_list(language: LanguageTag, list: WordList, rng: StdRng) -> Self {
        let mut lists = HashMap::new();
        lists.insert(language, list);
        Self {
            lists,
            default_language: language,
            rng,
        }
    }

    /// Loads `language` on first use, falling back to the default list when
    /// it is unavailable. Returns the tag whose list should be drawn from.
    fn ensure_loaded(&mut self, language: LanguageTag) -> LanguageTag {
        if self.lists.contains_key(&language) {
            return language;
        }
        match WordList::load(language) {
            Ok(list) => {
                self.lists.insert(language, list);
                language
            }
            Err(e) => {
                tracing::warn!("{e}; using {} words", self.default_language);
                self.default_language
            }
        }
    }
}

impl WordSource for RandomWordSource {
    fn next_word(&mut self, language: LanguageTag) -> String {
        let tag = self.ensure_loaded(language);
        self.lists[&tag]
            .words
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_default()
    }
}

/// Hands out a fixed sequence of words, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedWordSource {
    words: Vec<String>,
    next: usize,
}

impl ScriptedWordSource {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
            next: 0,
        }
    }
}

impl WordSource for ScriptedWordSource {
    fn next_word(&mut self, _language: LanguageTag) -> String {
        if self.words.is_empty() {
            return String::new();
        }
        let word = self.words[self.next % self.words.len()].clone();
        self.next += 1;
        word
    }
}

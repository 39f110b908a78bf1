use include_dir::{include_dir, Dir};
use serde::{Deserialize, Serialize};
use serde_json::from_str;
use std::fmt;

static LANG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/lang");

/// Languages with an embedded word list
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LanguageTag {
    #[default]
    En,
    Fr,
}

impl LanguageTag {
    fn file_name(&self) -> String {
        format!("{self}.json")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordListError {
    NotFound { file: String },
    Malformed { file: String, reason: String },
    Empty { name: String },
}

impl fmt::Display for WordListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { file } => write!(f, "word list {file} is not bundled"),
            Self::Malformed { file, reason } => {
                write!(f, "word list {file} could not be parsed: {reason}")
            }
            Self::Empty { name } => write!(f, "word list {name} has no words"),
        }
    }
}

impl std::error::Error for WordListError {}

#[derive(Deserialize, Clone, Debug)]
pub struct WordList {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl WordList {
    /// Load the bundled list for `tag`. Empty lists are rejected here so
    /// that drawing a word later can never fail.
    pub fn load(tag: LanguageTag) -> Result<Self, WordListError> {
        let list = read_word_list(&tag.file_name())?;
        list.validated()
    }

    pub fn from_words(name: impl Into<String>, words: Vec<String>) -> Result<Self, WordListError> {
        Self {
            name: name.into(),
            size: words.len() as u32,
            words,
        }
        .validated()
    }

    /// Drops blank entries and makes `size` match what is left
    fn validated(mut self) -> Result<Self, WordListError> {
        self.words.retain(|w| !w.trim().is_empty());
        if self.words.is_empty() {
            return Err(WordListError::Empty { name: self.name });
        }
        let size = self.words.len() as u32;
        if size != self.size {
            tracing::debug!(
                "word list {} declares {} words, has {size}",
                self.name,
                self.size
            );
            self.size = size;
        }
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn read_word_list(file_name: &str) -> Result<WordList, WordListError> {
    let file = LANG_DIR
        .get_file(file_name)
        .ok_or_else(|| WordListError::NotFound {
            file: file_name.to_string(),
        })?;

    let file_as_str = file
        .contents_utf8()
        .ok_or_else(|| WordListError::Malformed {
            file: file_name.to_string(),
            reason: "not valid utf-8".to_string(),
        })?;

    from_str(file_as_str).map_err(|e| WordListError::Malformed {
        file: file_name.to_string(),
        reason: e.to_string(),
    })
}

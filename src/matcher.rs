use itertools::Itertools;

use crate::session::{FallingWord, Phase, SessionState};

const POINTS_PER_CHAR: f64 = 5.0;
/// Score at which each character is worth double
const PROGRESS_SCALE: f64 = 500.0;

/// A word the player typed out
#[derive(Debug, Clone, PartialEq)]
pub struct Cleared {
    pub word: FallingWord,
    pub points: u64,
}

/// Points for clearing a word of `word_len` characters at `score`
pub fn points_for(word_len: usize, score: u64) -> u64 {
    (word_len as f64 * POINTS_PER_CHAR * (1.0 + score as f64 / PROGRESS_SCALE)).floor() as u64
}

/// Store the lowercased input and clear the first active word (in spawn
/// order) that it spells exactly. Prefixes earn nothing.
pub fn apply_input(state: &mut SessionState, raw: &str) -> Option<Cleared> {
    if state.phase != Phase::Running {
        return None;
    }

    state.input_buffer = raw.to_lowercase();
    if state.input_buffer.is_empty() {
        return None;
    }

    let (idx, _) = state
        .active_words
        .iter()
        .find_position(|w| w.text.to_lowercase() == state.input_buffer)?;

    let word = state.active_words.remove(idx);
    let len = word.len();
    let points = points_for(len, state.score);

    state.score += points;
    state.typed_characters += len as u64;
    state.input_buffer.clear();

    Some(Cleared { word, points })
}

/// Length of the typed prefix `word` shares with the input, in chars.
/// Only used to highlight progress; scoring never looks at prefixes.
pub fn matched_prefix_len(word: &str, input: &str) -> usize {
    if input.is_empty() || !word.to_lowercase().starts_with(input) {
        return 0;
    }
    input.chars().count()
}

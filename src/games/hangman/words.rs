/// Word source for Hangman - a fixed, validated list
use rand::seq::IndexedRandom;
use rand::Rng;
use thiserror::Error;

/// Words shipped with the game.
pub const BUILTIN_WORDS: &[&str] = &[
    "aardvark", "baboon", "camel", "jazz", "grass", "follow", "castle", "cloud",
];

/// Configuration errors for a word list. Raised at construction, never mid-game.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WordListError {
    #[error("word list is empty")]
    Empty,
    #[error("invalid word #{index} {word:?}: words must be non-empty and only contain letters a-z")]
    InvalidWord { index: usize, word: String },
    #[error("invalid secret word {0:?}: it must be non-empty and only contain letters a-z")]
    InvalidSecret(String),
}

/// Lowercases and trims `word`, rejecting anything that is not plain a-z.
pub(crate) fn normalize_word(word: &str) -> Option<String> {
    let word = word.trim().to_ascii_lowercase();
    if !word.is_empty() && word.chars().all(|c| c.is_ascii_lowercase()) {
        Some(word)
    } else {
        None
    }
}

/// A non-empty list of lowercase words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    pub fn new<I, S>(words: I) -> Result<Self, WordListError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .enumerate()
            .map(|(index, word)| {
                let word = word.as_ref();
                normalize_word(word).ok_or_else(|| WordListError::InvalidWord {
                    index,
                    word: word.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if words.is_empty() {
            return Err(WordListError::Empty);
        }
        Ok(Self { words })
    }

    /// A list holding just `word`, e.g. for a word picked on the command line.
    pub fn single(word: &str) -> Result<Self, WordListError> {
        let word = normalize_word(word).ok_or_else(|| WordListError::InvalidSecret(word.to_string()))?;
        Ok(Self { words: vec![word] })
    }

    /// The built-in list. All entries are known-good lowercase words.
    pub fn builtin() -> Self {
        Self {
            words: BUILTIN_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Picks a word uniformly at random. The same word may come up twice in a row.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        // `new` guarantees at least one word
        self.words
            .choose(rng)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for WordList {
    fn default() -> Self {
        Self::builtin()
    }
}

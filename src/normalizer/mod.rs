//! Text normalization for the word index
//!
//! Raw page text becomes a sequence of stems in four steps:
//!
//! 1. every character that is neither a word character nor whitespace is removed
//! 2. the remainder is split on whitespace
//! 3. each token is lowercased; stopwords and tokens longer than
//!    [`MAX_TOKEN_LEN`] characters are dropped
//! 4. survivors are reduced to their Snowball English stem
//!
//! The index of a stem in the resulting sequence is the position recorded
//! for it in the index.

pub mod stopwords;

use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::borrow::Cow;
use std::sync::{LazyLock, OnceLock};

pub use stopwords::is_stop_word;

/// Longest token (in characters) that is still indexed
pub const MAX_TOKEN_LEN: usize = 50;

static STEMMER: LazyLock<Stemmer> = LazyLock::new(|| Stemmer::create(Algorithm::English));

/// Remove every character that is not a word character or whitespace
pub fn strip_punctuation(text: &str) -> Cow<'_, str> {
    static PUNCTUATION_RE: OnceLock<Regex> = OnceLock::new();

    let re = PUNCTUATION_RE.get_or_init(|| Regex::new(r"[^\w\s]").expect("Invalid regex pattern"));

    re.replace_all(text, "")
}

/// Reduce a lowercased token to its stem
pub fn stem(token: &str) -> String {
    STEMMER.stem(token).into_owned()
}

/// Whether a lowercased token survives filtering
fn is_indexable(token: &str) -> bool {
    !is_stop_word(token) && token.chars().count() <= MAX_TOKEN_LEN
}

/// Whether `stem` could have been produced by [`normalize`]
pub fn is_valid_stem(stem: &str) -> bool {
    !stem.is_empty()
        && stem.chars().count() <= MAX_TOKEN_LEN
        && !stem.chars().any(char::is_whitespace)
}

/// Normalize `text` into its sequence of stems.
///
/// The returned iterator yields stems lazily, in token order, and is
/// consumed once.
pub fn normalize<T: AsRef<str> + ?Sized>(text: &T) -> Stems {
    let tokens: Vec<String> = strip_punctuation(text.as_ref())
        .split_whitespace()
        .map(str::to_lowercase)
        .collect();

    Stems {
        tokens: tokens.into_iter(),
    }
}

/// Iterator over the stems of one text, see [`normalize`]
#[derive(Debug)]
pub struct Stems {
    tokens: std::vec::IntoIter<String>,
}

impl Iterator for Stems {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.tokens
            .find(|token| is_indexable(token))
            .map(|token| stem(&token))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.tokens.size_hint().1)
    }
}

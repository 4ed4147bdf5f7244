//! Spell checking for visible page text
//!
//! The checker is a capability behind the [`SpellCheck`] trait so the crawl
//! can run against any word source. [`Dictionary`] is the stock
//! implementation, backed by a word list compiled into the binary or loaded
//! from a file.

mod dictionary;

pub use dictionary::{Dictionary, DictionaryError};

use regex::Regex;
use std::collections::{BTreeMap, HashSet};
use std::sync::OnceLock;

/// A source of known words and correction suggestions
///
/// Implementations are shared by all concurrent page analyses.
pub trait SpellCheck: Send + Sync {
    /// Returns true if the word is spelled correctly
    fn is_known(&self, word: &str) -> bool;

    /// Returns the most likely correction, if any
    fn suggest(&self, word: &str) -> Option<String>;
}

fn word_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b[a-zA-Z]+\b").expect("word pattern is a valid regex"))
}

/// Splits text into maximal runs of ASCII letters
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    word_pattern().find_iter(text).map(|m| m.as_str())
}

/// Finds misspelled words in text
///
/// Each unknown word is reported once, keyed by its first spelling in the
/// text; later occurrences differing only in case are folded into it. The
/// value is the suggested correction, or `None` when nothing is close.
///
/// # Arguments
///
/// * `text` - Visible page text
/// * `checker` - The word source to check against
pub fn check_spelling(text: &str, checker: &dyn SpellCheck) -> BTreeMap<String, Option<String>> {
    let mut seen = HashSet::new();
    let mut issues = BTreeMap::new();

    for word in tokenize(text) {
        if !seen.insert(word.to_ascii_lowercase()) {
            continue;
        }
        if checker.is_known(word) {
            continue;
        }
        issues.insert(word.to_string(), checker.suggest(word));
    }

    issues
}

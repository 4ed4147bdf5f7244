//! Word-frequency dictionary with edit-distance suggestions

use super::SpellCheck;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Frequency-ranked English word list compiled into the binary
const BUNDLED_WORDS: &str = include_str!("words.txt");

/// Longest token for which edit-distance-2 candidates are explored
const MAX_DISTANCE_TWO_LEN: usize = 16;

/// Errors raised while loading a dictionary
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("Failed to read word list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Word list {0} contains no usable words")]
    Empty(PathBuf),
}

/// In-memory dictionary mapping lowercase words to a frequency
///
/// Word list files hold one entry per line, either `word` or `word count`.
/// Lines that are blank or contain non-alphabetic words are ignored, and a
/// word listed more than once accumulates its counts.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: HashMap<String, u64>,
}

impl Dictionary {
    /// Loads a dictionary from a word list file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the word list
    ///
    /// # Returns
    ///
    /// * `Ok(Dictionary)` - At least one word was loaded
    /// * `Err(DictionaryError)` - The file could not be read or held no words
    pub fn load(path: &Path) -> Result<Self, DictionaryError> {
        let content = std::fs::read_to_string(path).map_err(|source| DictionaryError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let dictionary = Self::parse(&content);
        if dictionary.is_empty() {
            return Err(DictionaryError::Empty(path.to_path_buf()));
        }

        tracing::debug!("Loaded {} words from {}", dictionary.len(), path.display());
        Ok(dictionary)
    }

    /// Dictionary built from the bundled English word list
    pub fn bundled() -> Self {
        Self::parse(BUNDLED_WORDS)
    }

    /// Parses word list content
    pub fn parse(content: &str) -> Self {
        let mut words = HashMap::new();

        for line in content.lines() {
            let mut parts = line.split_whitespace();
            let Some(word) = parts.next() else {
                continue;
            };
            if !word.chars().all(|c| c.is_ascii_alphabetic()) {
                continue;
            }
            let count = parts.next().and_then(|c| c.parse::<u64>().ok()).unwrap_or(1);
            *words.entry(word.to_ascii_lowercase()).or_insert(0) += count;
        }

        Self { words }
    }

    /// Builds a dictionary where every word has frequency 1
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = HashMap::new();
        for word in words {
            *map.entry(word.as_ref().to_ascii_lowercase()).or_insert(0) += 1;
        }
        Self { words: map }
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Keeps `candidate` in `best` if it is known and beats the current pick
    ///
    /// Higher frequency wins; ties go to the alphabetically first word.
    fn consider<'a>(&'a self, candidate: &str, best: &mut Option<(&'a str, u64)>) {
        let Some((word, &frequency)) = self.words.get_key_value(candidate) else {
            return;
        };
        let better = match *best {
            None => true,
            Some((current, current_frequency)) => {
                frequency > current_frequency
                    || (frequency == current_frequency && word.as_str() < current)
            }
        };
        if better {
            *best = Some((word.as_str(), frequency));
        }
    }
}

impl SpellCheck for Dictionary {
    fn is_known(&self, word: &str) -> bool {
        self.words.contains_key(&word.to_ascii_lowercase())
    }

    fn suggest(&self, word: &str) -> Option<String> {
        let lower = word.to_ascii_lowercase();
        if lower.is_empty() {
            return None;
        }

        let mut best = None;
        let mut first = Vec::new();
        for_each_edit(&lower, |candidate| {
            self.consider(candidate, &mut best);
            first.push(candidate.to_string());
        });

        if best.is_none() && lower.len() <= MAX_DISTANCE_TWO_LEN {
            for edit in &first {
                for_each_edit(edit, |candidate| self.consider(candidate, &mut best));
            }
        }

        best.map(|(known, _)| match_case(word, known))
    }
}

/// Visits every string one edit (delete, transpose, replace, insert) away
/// from `word`, reusing one buffer
fn for_each_edit<F>(word: &str, mut visit: F)
where
    F: FnMut(&str),
{
    let bytes = word.as_bytes();
    let n = bytes.len();
    let mut buf: Vec<u8> = Vec::with_capacity(n + 1);
    let mut emit = |buf: &[u8]| {
        if let Ok(candidate) = std::str::from_utf8(buf) {
            visit(candidate);
        }
    };

    for i in 0..n {
        buf.clear();
        buf.extend_from_slice(&bytes[..i]);
        buf.extend_from_slice(&bytes[i + 1..]);
        emit(&buf);
    }

    for i in 0..n.saturating_sub(1) {
        buf.clear();
        buf.extend_from_slice(bytes);
        buf.swap(i, i + 1);
        emit(&buf);
    }

    for i in 0..n {
        for &c in ALPHABET {
            if bytes[i] != c {
                buf.clear();
                buf.extend_from_slice(bytes);
                buf[i] = c;
                emit(&buf);
            }
        }
    }

    for i in 0..=n {
        for &c in ALPHABET {
            buf.clear();
            buf.extend_from_slice(&bytes[..i]);
            buf.push(c);
            buf.extend_from_slice(&bytes[i..]);
            emit(&buf);
        }
    }
}

/// Adapts the case of `suggestion` to the shape of `original`
///
/// `HELO` gives `HELLO`, `Helo` gives `Hello`, anything else stays lowercase.
fn match_case(original: &str, suggestion: &str) -> String {
    let letters: Vec<char> = original.chars().filter(|c| c.is_alphabetic()).collect();

    if letters.len() > 1 && letters.iter().all(|c| c.is_uppercase()) {
        return suggestion.to_uppercase();
    }

    if letters.first().is_some_and(|c| c.is_uppercase()) {
        let mut chars = suggestion.chars();
        return match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
    }

    suggestion.to_string()
}

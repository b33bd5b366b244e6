//! `dictionary`: the raw word source boundary.
//!
//! The solver core only ever asks one question of a dictionary: which words
//! match a given length + fixed-letter pattern. [`Dictionary`] captures that
//! contract; [`WordList`] is the bundled in-memory implementation, built from
//! any iterator of words or parsed from a text file in the common
//! `word;score` list format (scores are ignored; the solver does not rank).
//!
//! Iteration order must be deterministic: everything downstream (candidate
//! caching, lookahead ranking, hence the solution itself) inherits its
//! reproducibility from it. `WordList` sorts by length then alphabetically.

/// A read-only word source.
///
/// Implementations may be shared between concurrently running solver
/// sessions, hence the `Sync` bound; the solver only reads.
pub trait Dictionary: Sync {
    /// Words matching `pattern`, in a deterministic order.
    ///
    /// The pattern holds one character per cell: an ASCII uppercase letter for
    /// a fixed cell, `' '` for a free one. Matching words have exactly the
    /// pattern's length.
    fn lookup(&self, pattern: &str) -> Vec<String>;
}

/// Whether `word` fits a fixed-letter `pattern` (`b' '` = free cell).
pub(crate) fn matches_pattern(word: &str, pattern: &[u8]) -> bool {
    word.len() == pattern.len()
        && word.bytes().zip(pattern.iter().copied()).all(|(w, p)| p == b' ' || w == p)
}

/// An in-memory, normalized word list.
#[derive(Debug, Clone)]
pub struct WordList {
    /// Uppercase words, deduplicated, sorted by (length, alphabetical).
    words: Vec<String>,
}

impl WordList {
    /// Builds a list from raw words: non-ASCII-alphabetic entries are
    /// dropped, the rest uppercased, deduplicated and sorted.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words: Vec<String> = words
            .into_iter()
            .filter(|w| {
                let w = w.as_ref();
                !w.is_empty() && w.chars().all(|c| c.is_ascii_alphabetic())
            })
            .map(|w| w.as_ref().to_ascii_uppercase())
            .collect();
        words.sort_unstable_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        words.dedup();
        Self { words }
    }

    /// Parses a word-list file: one word per line, an optional `;score`
    /// suffix is stripped, blank lines are skipped.
    #[must_use]
    pub fn parse(contents: &str) -> Self {
        Self::new(
            contents
                .lines()
                .map(|line| line.split(';').next().unwrap_or("").trim())
                .filter(|entry| !entry.is_empty()),
        )
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Dictionary for WordList {
    fn lookup(&self, pattern: &str) -> Vec<String> {
        let pattern = pattern.as_bytes();
        self.words
            .iter()
            .filter(|w| matches_pattern(w, pattern))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_and_sorts() {
        let list = WordList::new(["cab", "abc", "ab", "abc", "x1z", ""]);
        assert_eq!(list.len(), 3);
        assert_eq!(list.lookup("   "), vec!["ABC", "CAB"]);
        assert_eq!(list.lookup("  "), vec!["AB"]);
    }

    #[test]
    fn lookup_respects_fixed_letters() {
        let list = WordList::new(["ABC", "ABD", "XBD", "AB"]);
        assert_eq!(list.lookup("A  "), vec!["ABC", "ABD"]);
        assert_eq!(list.lookup(" BD"), vec!["ABD", "XBD"]);
        assert_eq!(list.lookup("ABD"), vec!["ABD"]);
        assert!(list.lookup("Z  ").is_empty());
    }

    #[test]
    fn parse_strips_scores_and_blank_lines() {
        let list = WordList::parse("cat;50\n\ndog;80\nbird\n");
        assert_eq!(list.lookup("   "), vec!["CAT", "DOG"]);
        assert_eq!(list.lookup("    "), vec!["BIRD"]);
    }
}

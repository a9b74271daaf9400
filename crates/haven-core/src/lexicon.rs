//! Keyword lexicons for substring-based text classification
//!
//! A lexicon maps each semantic category (an emotion, a spending trigger) to
//! a set of lowercase keywords. Matching is plain substring search over the
//! lowercased input, so "stress" also matches inside "stressed". Categories
//! iterate in the key type's `Ord` order, which is the canonical tie-break
//! order for classification.

use std::collections::BTreeMap;

/// Immutable keyword table keyed by category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon<K: Ord> {
    entries: BTreeMap<K, Vec<String>>,
}

impl<K: Ord + Copy> Default for Lexicon<K> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Copy> Lexicon<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the keywords for a category
    ///
    /// Keywords are trimmed and lowercased; blanks and duplicates are dropped.
    pub fn set<I, S>(&mut self, key: K, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cleaned: Vec<String> = Vec::new();
        for keyword in keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if !keyword.is_empty() && !cleaned.contains(&keyword) {
                cleaned.push(keyword);
            }
        }
        self.entries.insert(key, cleaned);
    }

    /// Builder-style variant of [`Lexicon::set`]
    pub fn with<I, S>(mut self, key: K, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.set(key, keywords);
        self
    }

    pub fn keywords(&self, key: K) -> &[String] {
        self.entries.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Categories with their keywords, in canonical order
    pub fn entries(&self) -> impl Iterator<Item = (K, &[String])> {
        self.entries.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total keyword occurrences for a category in already-lowercased text
    ///
    /// Each keyword contributes its number of non-overlapping occurrences.
    pub fn count_matches(&self, key: K, lowered: &str) -> usize {
        self.keywords(key)
            .iter()
            .map(|kw| lowered.matches(kw.as_str()).count())
            .sum()
    }

    /// Keywords of a category that occur in already-lowercased text
    pub fn matched_keywords<'a>(&'a self, key: K, lowered: &'a str) -> impl Iterator<Item = &'a str> {
        self.keywords(key)
            .iter()
            .map(String::as_str)
            .filter(move |kw| lowered.contains(kw))
    }

    /// Whether any keyword of a category occurs in already-lowercased text
    pub fn any_match(&self, key: K, lowered: &str) -> bool {
        self.matched_keywords(key, lowered).next().is_some()
    }
}

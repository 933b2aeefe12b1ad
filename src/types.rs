//! Core types for keygraph
//!
//! This module defines the fundamental data structures used throughout the library:
//! terms, sentences and documents on the input side, keywords on the output side,
//! and the extraction configuration.

use crate::errors::{KeyGraphError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// ============================================================================
// Term
// ============================================================================

/// A lexical unit: its text plus an optional set of tags (e.g. POS tags
/// assigned by an upstream tagger).
///
/// Tags are kept in a sorted set, so two terms carrying the same tags in a
/// different order are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Term {
    /// The surface text
    pub text: String,
    /// Tags attached to this term
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
}

impl Term {
    /// Create an untagged term
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tags: BTreeSet::new(),
        }
    }

    /// Create a term with the given tags
    pub fn with_tags<I, S>(text: impl Into<String>, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            text: text.into(),
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Builder method: add a single tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Check if this term carries any tags
    pub fn is_tagged(&self) -> bool {
        !self.tags.is_empty()
    }

    /// The identity of this term under the configured equality mode.
    ///
    /// With `ignore_tags` the tags are dropped, so terms are compared on text alone.
    pub fn key(&self, ignore_tags: bool) -> Term {
        if ignore_tags {
            Term::new(self.text.clone())
        } else {
            self.clone()
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)?;
        if !self.tags.is_empty() {
            let tags: Vec<&str> = self.tags.iter().map(String::as_str).collect();
            write!(f, "[{}]", tags.join(","))?;
        }
        Ok(())
    }
}

impl From<&str> for Term {
    fn from(text: &str) -> Self {
        Term::new(text)
    }
}

impl From<String> for Term {
    fn from(text: String) -> Self {
        Term::new(text)
    }
}

// ============================================================================
// Sentence & Document
// ============================================================================

/// An ordered sequence of terms
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub terms: Vec<Term>,
}

impl Sentence {
    /// Create a sentence from terms
    pub fn new(terms: Vec<Term>) -> Self {
        Self { terms }
    }

    /// Create a sentence from anything convertible into terms
    pub fn from_words<I, T>(words: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        Self {
            terms: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of terms (including repeats)
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Check if the sentence has no terms
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Iterate over the terms in order
    pub fn iter(&self) -> std::slice::Iter<'_, Term> {
        self.terms.iter()
    }
}

/// A document: ordered sentences of already tokenized terms
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub sentences: Vec<Sentence>,
}

impl Document {
    /// Create a document from sentences
    pub fn new(sentences: Vec<Sentence>) -> Self {
        Self { sentences }
    }

    /// Create a document from nested word lists, one list per sentence
    pub fn from_word_lists<I, S, T>(sentences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        Self {
            sentences: sentences.into_iter().map(Sentence::from_words).collect(),
        }
    }

    /// Number of sentences
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    /// Check if the document has no sentences
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Total number of terms across all sentences
    pub fn term_count(&self) -> usize {
        self.sentences.iter().map(Sentence::len).sum()
    }
}

// ============================================================================
// Keyword
// ============================================================================

/// An extracted keyword with its score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    /// The term text
    pub text: String,
    /// Tags of the term (empty when tags are ignored)
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
    /// The KeyGraph score
    pub score: f64,
    /// The rank (1-indexed, based on score)
    pub rank: usize,
}

impl Keyword {
    /// Create a keyword from a term and its score
    pub fn new(term: &Term, score: f64) -> Self {
        Self {
            text: term.text.clone(),
            tags: term.tags.clone(),
            score,
            rank: 0,
        }
    }

    /// Rebuild the term this keyword was extracted for
    pub fn term(&self) -> Term {
        Term {
            text: self.text.clone(),
            tags: self.tags.clone(),
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for KeyGraph extraction
///
/// Every field is optional in JSON; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyGraphConfig {
    /// Number of most frequent terms forming the graph backbone (F)
    pub high_frequency_term_count: usize,
    /// Number of highest-keyness terms attached in the second phase (H)
    pub high_key_term_count: usize,
    /// Number of keywords to return (K)
    pub keyword_count: usize,
    /// Compare terms on text alone, ignoring their tags
    pub ignore_term_tags: bool,
}

impl Default for KeyGraphConfig {
    fn default() -> Self {
        Self {
            high_frequency_term_count: 30,
            high_key_term_count: 12,
            keyword_count: 10,
            ignore_term_tags: true,
        }
    }
}

impl KeyGraphConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.high_frequency_term_count == 0 {
            return Err(KeyGraphError::invalid_config(
                "high_frequency_term_count must be > 0",
            ));
        }

        if self.high_key_term_count == 0 {
            return Err(KeyGraphError::invalid_config(
                "high_key_term_count must be > 0",
            ));
        }

        if self.keyword_count == 0 {
            return Err(KeyGraphError::invalid_config("keyword_count must be > 0"));
        }

        Ok(())
    }

    /// Builder method: set the high-frequency term count
    pub fn with_high_frequency_term_count(mut self, count: usize) -> Self {
        self.high_frequency_term_count = count;
        self
    }

    /// Builder method: set the high-key term count
    pub fn with_high_key_term_count(mut self, count: usize) -> Self {
        self.high_key_term_count = count;
        self
    }

    /// Builder method: set the number of keywords to return
    pub fn with_keyword_count(mut self, count: usize) -> Self {
        self.keyword_count = count;
        self
    }

    /// Builder method: set the term equality mode
    pub fn with_ignore_term_tags(mut self, ignore: bool) -> Self {
        self.ignore_term_tags = ignore;
        self
    }
}

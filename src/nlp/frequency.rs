//! Per-sentence term frequency indexing
//!
//! Terms are interned in first-seen document order, so a [`TermId`] doubles
//! as the term's first-occurrence rank. Every tie-break in the library that
//! says "first seen" compares term IDs.

use crate::types::{Document, Term};
use rustc_hash::FxHashMap;

/// Dense identifier of a distinct term within one [`TermFrequencyIndex`]
pub type TermId = u32;

/// Occurrence counts of the terms of one sentence
#[derive(Debug, Clone, Default)]
pub struct TermFrequencyMap {
    /// Term ID -> occurrence count
    counts: FxHashMap<TermId, u32>,
    /// Distinct terms in first-occurrence order
    order: Vec<TermId>,
}

impl TermFrequencyMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    fn increment(&mut self, id: TermId) {
        let count = self.counts.entry(id).or_insert(0);
        if *count == 0 {
            self.order.push(id);
        }
        *count += 1;
    }

    /// Occurrence count of a term (0 when absent)
    pub fn get(&self, id: TermId) -> u32 {
        self.counts.get(&id).copied().unwrap_or(0)
    }

    /// Check if the term occurs in this sentence
    pub fn contains(&self, id: TermId) -> bool {
        self.counts.contains_key(&id)
    }

    /// Number of distinct terms
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the sentence had no terms
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate over `(term, count)` in first-occurrence order
    pub fn iter(&self) -> impl Iterator<Item = (TermId, u32)> + '_ {
        self.order.iter().map(move |&id| (id, self.counts[&id]))
    }
}

/// Frequency maps for every sentence of one document
#[derive(Debug, Clone)]
pub struct TermFrequencyIndex {
    /// Distinct (normalized) terms; index is the term ID
    vocabulary: Vec<Term>,
    /// Maps normalized term -> term ID
    term_to_id: FxHashMap<Term, TermId>,
    /// One map per sentence, by sentence position
    sentences: Vec<TermFrequencyMap>,
    /// Document-wide frequency per term ID
    totals: Vec<u64>,
    ignore_tags: bool,
}

impl TermFrequencyIndex {
    /// Count term occurrences per sentence.
    ///
    /// With `ignore_tags` terms are compared on text alone and the vocabulary
    /// holds untagged terms.
    pub fn index_sentences(document: &Document, ignore_tags: bool) -> Self {
        let mut index = Self {
            vocabulary: Vec::new(),
            term_to_id: FxHashMap::default(),
            sentences: Vec::with_capacity(document.sentences.len()),
            totals: Vec::new(),
            ignore_tags,
        };

        for sentence in &document.sentences {
            let mut frequencies = TermFrequencyMap::new();
            for term in sentence.iter() {
                let id = index.intern(term.key(ignore_tags));
                frequencies.increment(id);
                index.totals[id as usize] += 1;
            }
            index.sentences.push(frequencies);
        }

        index
    }

    fn intern(&mut self, term: Term) -> TermId {
        if let Some(&id) = self.term_to_id.get(&term) {
            return id;
        }

        let id = self.vocabulary.len() as TermId;
        self.term_to_id.insert(term.clone(), id);
        self.vocabulary.push(term);
        self.totals.push(0);
        id
    }

    /// All distinct terms in first-seen order
    pub fn vocabulary(&self) -> &[Term] {
        &self.vocabulary
    }

    /// Number of distinct terms
    pub fn term_count(&self) -> usize {
        self.vocabulary.len()
    }

    /// Check if the document contained no terms at all
    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }

    /// Get the term for an ID
    pub fn term(&self, id: TermId) -> Option<&Term> {
        self.vocabulary.get(id as usize)
    }

    /// Look up the ID of a term, applying this index's equality mode
    pub fn term_id(&self, term: &Term) -> Option<TermId> {
        if self.ignore_tags && term.is_tagged() {
            self.term_to_id.get(&term.key(true)).copied()
        } else {
            self.term_to_id.get(term).copied()
        }
    }

    /// Number of sentences (empty ones included)
    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    /// Frequency map of one sentence
    pub fn sentence(&self, idx: usize) -> Option<&TermFrequencyMap> {
        self.sentences.get(idx)
    }

    /// All sentence frequency maps in document order
    pub fn sentences(&self) -> &[TermFrequencyMap] {
        &self.sentences
    }

    /// Document-wide frequency of a term
    pub fn total_frequency(&self, id: TermId) -> u64 {
        self.totals.get(id as usize).copied().unwrap_or(0)
    }

    /// The `n` most frequent terms, highest total first.
    ///
    /// Equal totals are ordered by first occurrence in the document.
    /// Returns every distinct term when fewer than `n` exist.
    pub fn select_top_frequent(&self, n: usize) -> Vec<TermId> {
        let mut ids: Vec<TermId> = (0..self.vocabulary.len() as TermId).collect();
        ids.sort_by(|&a, &b| {
            self.totals[b as usize]
                .cmp(&self.totals[a as usize])
                .then(a.cmp(&b))
        });
        ids.truncate(n);
        ids
    }

    /// Sentence-summed minimum frequency of two terms:
    /// `Σ_s min(freq(a, s), freq(b, s))`.
    pub fn min_cooccurrence(&self, a: TermId, b: TermId) -> u64 {
        self.sentences
            .iter()
            .map(|s| s.get(a).min(s.get(b)) as u64)
            .sum()
    }
}

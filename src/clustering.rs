//! Cluster keyness scoring
//!
//! After pruning, each connected component of the backbone graph is a
//! cluster ("concept"). A term's keyness is the probability-like chance
//! that it is implied by at least one cluster:
//!
//! ```text
//! key(t) = 1 - Π_C (1 - based(t, C) / neighbours(C))
//! ```
//!
//! Both `based` and `neighbours` are built from the same per-sentence
//! contribution of a term `t` with frequency `f` to a cluster whose
//! members occur `cf` times in that sentence:
//!
//! ```text
//! t ∈ C  : f · (cf - f)
//! t ∉ C  : f · cf
//! ```

use crate::nlp::frequency::{TermFrequencyIndex, TermId};
use rustc_hash::FxHashSet;

/// A cluster of terms with its per-sentence member frequency
#[derive(Debug, Clone)]
pub struct TermCluster {
    members: Vec<TermId>,
    member_set: FxHashSet<TermId>,
    /// `cf(C, s)` for every sentence `s`
    sentence_freq: Vec<u64>,
}

impl TermCluster {
    /// Build a cluster and precompute its frequency in every sentence
    pub fn new(members: Vec<TermId>, index: &TermFrequencyIndex) -> Self {
        let sentence_freq = index
            .sentences()
            .iter()
            .map(|s| members.iter().map(|&id| s.get(id) as u64).sum())
            .collect();
        let member_set = members.iter().copied().collect();
        Self {
            members,
            member_set,
            sentence_freq,
        }
    }

    /// Member term IDs, in the order given at construction
    pub fn members(&self) -> &[TermId] {
        &self.members
    }

    /// Number of member terms
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if the cluster has no members
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Check if a term belongs to the cluster
    pub fn contains(&self, id: TermId) -> bool {
        self.member_set.contains(&id)
    }

    /// Total member frequency in one sentence
    pub fn sentence_frequency(&self, sentence: usize) -> u64 {
        self.sentence_freq.get(sentence).copied().unwrap_or(0)
    }

    fn contribution(&self, id: TermId, freq: u64, sentence: usize) -> u64 {
        let cf = self.sentence_freq[sentence];
        if self.contains(id) {
            freq * (cf - freq)
        } else {
            freq * cf
        }
    }

    /// Sum of every term's contribution over all sentences
    pub fn neighbour_value(&self, index: &TermFrequencyIndex) -> u64 {
        index
            .sentences()
            .iter()
            .enumerate()
            .map(|(s, frequencies)| {
                frequencies
                    .iter()
                    .map(|(id, freq)| self.contribution(id, freq as u64, s))
                    .sum::<u64>()
            })
            .sum()
    }

    /// Contribution of a single term over all sentences
    pub fn based_value(&self, index: &TermFrequencyIndex, id: TermId) -> u64 {
        index
            .sentences()
            .iter()
            .enumerate()
            .filter_map(|(s, frequencies)| match frequencies.get(id) {
                0 => None,
                freq => Some(self.contribution(id, freq as u64, s)),
            })
            .sum()
    }
}

/// Keyness of every vocabulary term, indexed by term ID.
///
/// A cluster whose neighbour value is zero implies nothing; its factor is
/// taken as 1 instead of dividing by zero.
pub fn keyness(index: &TermFrequencyIndex, clusters: &[TermCluster]) -> Vec<f64> {
    let neighbour_values: Vec<u64> = clusters.iter().map(|c| c.neighbour_value(index)).collect();

    (0..index.term_count() as TermId)
        .map(|id| {
            let miss: f64 = clusters
                .iter()
                .zip(&neighbour_values)
                .filter(|(_, &neighbours)| neighbours > 0)
                .map(|(cluster, &neighbours)| {
                    1.0 - cluster.based_value(index, id) as f64 / neighbours as f64
                })
                .product();
            1.0 - miss
        })
        .collect()
}

/// The `h` terms with highest keyness; equal keys keep first-occurrence order
pub fn select_high_key(keys: &[f64], h: usize) -> Vec<TermId> {
    let mut ids: Vec<TermId> = (0..keys.len() as TermId).collect();
    ids.sort_by(|&a, &b| {
        keys[b as usize]
            .total_cmp(&keys[a as usize])
            .then(a.cmp(&b))
    });
    ids.truncate(h);
    ids
}

//! Final keyword ranking
//!
//! Scores are compared descending; scores within [`SCORE_EPSILON`] are tied
//! and the node inserted into the graph first wins. The ordering is total,
//! so the ranking does not depend on hash seeds or platform.

use crate::types::{Keyword, Term};
use std::cmp::Ordering;

/// Two scores within this epsilon are considered tied.
pub const SCORE_EPSILON: f64 = 1e-10;

/// A graph node with its final score and graph insertion position
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredTerm {
    pub term: Term,
    pub score: f64,
    /// Position at which the node was added to the graph
    pub position: usize,
}

impl ScoredTerm {
    pub fn new(term: Term, score: f64, position: usize) -> Self {
        Self {
            term,
            score,
            position,
        }
    }

    /// Score descending, then insertion position ascending
    pub fn stable_cmp(&self, other: &Self) -> Ordering {
        let score_diff = self.score - other.score;
        if score_diff.abs() > SCORE_EPSILON {
            return if score_diff > 0.0 {
                Ordering::Less
            } else {
                Ordering::Greater
            };
        }

        self.position.cmp(&other.position)
    }
}

/// Top-K selection over scored graph nodes
#[derive(Debug, Clone, Copy)]
pub struct ResultRanker {
    top_k: usize,
}

impl ResultRanker {
    /// Create a ranker returning at most `top_k` keywords
    pub fn new(top_k: usize) -> Self {
        Self { top_k }
    }

    /// Sort, truncate to K and assign 1-based ranks
    pub fn rank(&self, mut scored: Vec<ScoredTerm>) -> Vec<Keyword> {
        scored.sort_by(|a, b| a.stable_cmp(b));
        scored.truncate(self.top_k);

        scored
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let mut keyword = Keyword::new(&s.term, s.score);
                keyword.rank = i + 1;
                keyword
            })
            .collect()
    }
}

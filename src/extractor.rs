//! KeyGraph keyword extraction
//!
//! KeyGraph finds the "concepts" of a document as clusters of frequent
//! terms and ranks terms by how tightly they tie into those concepts.
//!
//! Process:
//! 1. Count term frequencies per sentence
//! 2. Take the top-F frequent terms (HF) as graph nodes
//! 3. Weight every HF pair by `Σ_s min(freq)` and keep the F-1 heaviest
//! 4. Prune bridge edges; the connected components are the clusters
//! 5. Score every vocabulary term's keyness against the clusters
//! 6. Attach the top-H key terms (HK) to their best-matching member of each cluster
//! 7. Score each node by its co-occurrence with HF neighbours and rank

use crate::cancel::CancellationToken;
use crate::clustering::{keyness, select_high_key, TermCluster};
use crate::errors::{KeyGraphError, Result};
use crate::graph::CooccurrenceGraph;
use crate::nlp::frequency::{TermFrequencyIndex, TermId};
use crate::ranker::{ResultRanker, ScoredTerm};
use crate::types::{Document, KeyGraphConfig, Keyword, Term};
use rustc_hash::FxHashSet;
use serde::Serialize;

pub const STAGE_INDEX: &str = "index";
pub const STAGE_BACKBONE: &str = "backbone";
pub const STAGE_PRUNE: &str = "prune";
pub const STAGE_KEYNESS: &str = "keyness";
pub const STAGE_EXTEND: &str = "extend";
pub const STAGE_RANK: &str = "rank";

/// Enter a tracing span for an extraction stage; it closes at the end of
/// the enclosing block.
macro_rules! trace_stage {
    ($name:expr) => {
        let _span = tracing::info_span!("keygraph_stage", stage = $name).entered();
    };
}

/// The co-occurrence graph as used by KeyGraph: term IDs weighted by
/// min-frequency co-occurrence.
type TermGraph = CooccurrenceGraph<TermId, u64>;

/// Keywords plus the intermediate artifacts that produced them
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KeyGraphResult {
    /// Ranked keywords (at most `keyword_count`)
    pub keywords: Vec<Keyword>,
    /// The HF set, most frequent first
    pub high_frequency_terms: Vec<Term>,
    /// The HK set with keyness, highest first
    pub high_key_terms: Vec<(Term, f64)>,
    /// Clusters left after pruning
    pub clusters: Vec<Vec<Term>>,
    /// Edges in the backbone before pruning
    pub backbone_edges: usize,
    /// Bridge edges removed by pruning
    pub pruned_edges: usize,
}

/// KeyGraph implementation
#[derive(Debug, Clone, Default)]
pub struct KeyGraph {
    config: KeyGraphConfig,
}

impl KeyGraph {
    /// Create a new extractor with default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom config
    pub fn with_config(config: KeyGraphConfig) -> Self {
        Self { config }
    }

    /// The configuration in use
    pub fn config(&self) -> &KeyGraphConfig {
        &self.config
    }

    /// Extract ranked keywords from a document
    pub fn extract(&self, document: &Document) -> Result<Vec<Keyword>> {
        Ok(self.extract_with_info(document)?.keywords)
    }

    /// Extract keywords together with HF/HK sets and clusters
    pub fn extract_with_info(&self, document: &Document) -> Result<KeyGraphResult> {
        self.extract_with_info_cancellable(document, &CancellationToken::new())
    }

    /// Extract keywords, stopping between stages once `token` is cancelled
    pub fn extract_cancellable(
        &self,
        document: &Document,
        token: &CancellationToken,
    ) -> Result<Vec<Keyword>> {
        Ok(self.extract_with_info_cancellable(document, token)?.keywords)
    }

    /// Full extraction with diagnostics and cancellation checkpoints
    pub fn extract_with_info_cancellable(
        &self,
        document: &Document,
        token: &CancellationToken,
    ) -> Result<KeyGraphResult> {
        self.config.validate()?;

        let index = {
            trace_stage!(STAGE_INDEX);
            TermFrequencyIndex::index_sentences(document, self.config.ignore_term_tags)
        };
        token.checkpoint(STAGE_INDEX)?;

        if index.is_empty() {
            tracing::debug!(sentences = index.sentence_count(), "document has no terms");
            return Ok(KeyGraphResult::default());
        }

        let high_frequency = index.select_top_frequent(self.config.high_frequency_term_count);
        let mut graph = TermGraph::with_capacity(
            high_frequency.len() + self.config.high_key_term_count,
        );

        let backbone_edges = {
            trace_stage!(STAGE_BACKBONE);
            for &id in &high_frequency {
                graph.add_node(id);
            }
            let edges = backbone_edges(
                &index,
                &high_frequency,
                self.config.high_frequency_term_count.saturating_sub(1),
            );
            for &(a, b, weight) in &edges {
                graph.add_edge(&a, &b, weight)?;
            }
            tracing::debug!(
                high_frequency = high_frequency.len(),
                edges = edges.len(),
                "backbone built"
            );
            edges.len()
        };
        token.checkpoint(STAGE_BACKBONE)?;

        let pruned_edges = {
            trace_stage!(STAGE_PRUNE);
            let pruned = graph.prune_weak_edges();
            tracing::debug!(pruned, remaining = graph.edge_count(), "bridges pruned");
            pruned
        };
        token.checkpoint(STAGE_PRUNE)?;

        let (clusters, keys) = {
            trace_stage!(STAGE_KEYNESS);
            let clusters: Vec<TermCluster> = graph
                .connected_components()
                .into_iter()
                .map(|members| TermCluster::new(members.into_iter().copied().collect(), &index))
                .collect();
            let keys = keyness(&index, &clusters);
            tracing::debug!(clusters = clusters.len(), "keyness scored");
            (clusters, keys)
        };
        token.checkpoint(STAGE_KEYNESS)?;

        let high_key = select_high_key(&keys, self.config.high_key_term_count);
        {
            trace_stage!(STAGE_EXTEND);
            attach_high_key_terms(&mut graph, &index, &high_key, &clusters)?;
            tracing::debug!(
                high_key = high_key.len(),
                nodes = graph.node_count(),
                edges = graph.edge_count(),
                "high-key terms attached"
            );
        }

        let keywords = {
            trace_stage!(STAGE_RANK);
            let scored = score_nodes(&graph, &index, &high_frequency)?;
            ResultRanker::new(self.config.keyword_count).rank(scored)
        };
        token.checkpoint(STAGE_RANK)?;

        Ok(KeyGraphResult {
            keywords,
            high_frequency_terms: terms(&index, &high_frequency)?,
            high_key_terms: high_key
                .iter()
                .map(|&id| Ok((term(&index, id)?.clone(), keys[id as usize])))
                .collect::<Result<_>>()?,
            clusters: clusters
                .iter()
                .map(|c| terms(&index, c.members()))
                .collect::<Result<_>>()?,
            backbone_edges,
            pruned_edges,
        })
    }
}

/// The `limit` heaviest HF pairs.
///
/// Pairs are enumerated in HF order and the sort is stable, so equal
/// weights (zero included) keep that order.
fn backbone_edges(
    index: &TermFrequencyIndex,
    high_frequency: &[TermId],
    limit: usize,
) -> Vec<(TermId, TermId, u64)> {
    let mut pairs = Vec::new();
    for (i, &a) in high_frequency.iter().enumerate() {
        for &b in &high_frequency[i + 1..] {
            pairs.push((a, b, index.min_cooccurrence(a, b)));
        }
    }

    pairs.sort_by(|x, y| y.2.cmp(&x.2));
    pairs.truncate(limit);
    pairs
}

/// Link every HK term to the member of each cluster it co-occurs with most.
///
/// Ties go to the earliest member. A cluster the term never co-occurs with
/// still gets its zero-weight edge, which adds nothing to any score.
fn attach_high_key_terms(
    graph: &mut TermGraph,
    index: &TermFrequencyIndex,
    high_key: &[TermId],
    clusters: &[TermCluster],
) -> Result<()> {
    for &id in high_key {
        graph.add_node(id);
    }

    for &hk in high_key {
        for cluster in clusters {
            let mut best: Option<(TermId, u64)> = None;
            for &member in cluster.members() {
                if member == hk {
                    continue;
                }
                let column = index.min_cooccurrence(hk, member);
                if best.map_or(true, |(_, max)| column > max) {
                    best = Some((member, column));
                }
            }

            if let Some((member, column)) = best {
                graph.add_edge(&hk, &member, column)?;
            }
        }
    }

    Ok(())
}

/// Final score of every node: co-occurrence summed over its HF neighbours
fn score_nodes(
    graph: &TermGraph,
    index: &TermFrequencyIndex,
    high_frequency: &[TermId],
) -> Result<Vec<ScoredTerm>> {
    let hf_set: FxHashSet<TermId> = high_frequency.iter().copied().collect();

    graph
        .nodes()
        .enumerate()
        .map(|(position, &id)| {
            let score: u64 = graph
                .neighbors(&id)?
                .into_iter()
                .filter(|n| hf_set.contains(*n))
                .map(|&n| index.min_cooccurrence(id, n))
                .sum();
            Ok(ScoredTerm::new(term(index, id)?.clone(), score as f64, position))
        })
        .collect()
}

fn term(index: &TermFrequencyIndex, id: TermId) -> Result<&Term> {
    index
        .term(id)
        .ok_or_else(|| KeyGraphError::internal(format!("term id {} is not in the index", id)))
}

fn terms(index: &TermFrequencyIndex, ids: &[TermId]) -> Result<Vec<Term>> {
    ids.iter().map(|&id| term(index, id).cloned()).collect()
}

/// Convenience function
pub fn extract_keywords(document: &Document, config: &KeyGraphConfig) -> Result<Vec<Keyword>> {
    KeyGraph::with_config(config.clone()).extract(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(sentences: &[&[&str]]) -> Document {
        Document::from_word_lists(sentences.iter().map(|s| s.iter().copied()))
    }

    /// Backbone edge a-b is a bridge; c is attached as a high-key term.
    fn bridged_document() -> Document {
        doc(&[&["a", "b", "c"], &["a", "b", "c"], &["a", "d"], &["b", "e"]])
    }

    fn texts(keywords: &[Keyword]) -> Vec<&str> {
        keywords.iter().map(|k| k.text.as_str()).collect()
    }

    #[test]
    fn test_extract_with_attached_high_key_term() {
        let config = KeyGraphConfig::default()
            .with_high_frequency_term_count(2)
            .with_high_key_term_count(3);
        let result = KeyGraph::with_config(config)
            .extract_with_info(&bridged_document())
            .unwrap();

        assert_eq!(result.backbone_edges, 1);
        assert_eq!(result.pruned_edges, 1);
        assert_eq!(
            result.clusters,
            vec![vec![Term::new("a")], vec![Term::new("b")]]
        );

        // key(c) = 1 - (1 - 2/5)^2, key(a) = key(b) = 1 - 3/5
        let hk: Vec<&str> = result
            .high_key_terms
            .iter()
            .map(|(t, _)| t.text.as_str())
            .collect();
        assert_eq!(hk, vec!["c", "a", "b"]);
        assert!((result.high_key_terms[0].1 - 0.64).abs() < 1e-12);
        assert!((result.high_key_terms[1].1 - 0.4).abs() < 1e-12);

        assert_eq!(texts(&result.keywords), vec!["c", "a", "b"]);
        let scores: Vec<f64> = result.keywords.iter().map(|k| k.score).collect();
        assert_eq!(scores, vec![4.0, 2.0, 2.0]);
        let ranks: Vec<usize> = result.keywords.iter().map(|k| k.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn test_only_hf_neighbours_count() {
        let config = KeyGraphConfig::default()
            .with_high_frequency_term_count(2)
            .with_high_key_term_count(1);
        let keywords = KeyGraph::with_config(config)
            .extract(&bridged_document())
            .unwrap();

        // c links to a and b; a and b only neighbour c, which is not HF
        assert_eq!(texts(&keywords), vec!["c", "a", "b"]);
        assert_eq!(keywords[0].score, 4.0);
        assert_eq!(keywords[1].score, 0.0);
        assert_eq!(keywords[2].score, 0.0);
    }

    #[test]
    fn test_keyword_count_limits_output() {
        let config = KeyGraphConfig::default()
            .with_high_frequency_term_count(2)
            .with_high_key_term_count(3)
            .with_keyword_count(1);
        let keywords = extract_keywords(&bridged_document(), &config).unwrap();
        assert_eq!(texts(&keywords), vec!["c"]);
    }

    #[test]
    fn test_backbone_keeps_heaviest_pairs_in_order() {
        let index = TermFrequencyIndex::index_sentences(
            &doc(&[&["a", "b", "a", "b", "c"], &["b", "c"]]),
            true,
        );
        let hf = index.select_top_frequent(3);
        let edges = backbone_edges(&index, &hf, 2);

        // (a,b)=2, (b,c)=2, (a,c)=1; ties keep HF pair order
        let b = index.term_id(&Term::new("b")).unwrap();
        let a = index.term_id(&Term::new("a")).unwrap();
        let c = index.term_id(&Term::new("c")).unwrap();
        assert_eq!(hf, vec![b, a, c]);
        assert_eq!(edges, vec![(b, a, 2), (b, c, 2)]);
    }

    #[test]
    fn test_backbone_keeps_zero_weight_pairs() {
        let index = TermFrequencyIndex::index_sentences(&doc(&[&["a"], &["b"]]), true);
        let hf = index.select_top_frequent(2);
        let a = index.term_id(&Term::new("a")).unwrap();
        let b = index.term_id(&Term::new("b")).unwrap();

        assert_eq!(backbone_edges(&index, &hf, 1), vec![(a, b, 0)]);
        assert!(backbone_edges(&index, &hf, 0).is_empty());
    }

    #[test]
    fn test_backbone_size_follows_config_not_vocabulary() {
        // 4 distinct terms under the default F = 30: all 6 pairs are kept
        // and form a complete graph, so nothing is pruned.
        let result = KeyGraph::new()
            .extract_with_info(&doc(&[&["a", "b", "c", "d"]]))
            .unwrap();

        assert_eq!(result.backbone_edges, 6);
        assert_eq!(result.pruned_edges, 0);
        assert_eq!(
            result.clusters,
            vec![["a", "b", "c", "d"].iter().map(|t| Term::new(*t)).collect::<Vec<_>>()]
        );
        let scores: Vec<f64> = result.keywords.iter().map(|k| k.score).collect();
        assert_eq!(scores, vec![3.0; 4]);
    }

    #[test]
    fn test_high_key_tie_goes_to_first_cluster_member() {
        // q, r and p form a triangle; x co-occurs once with both q and r
        let index = TermFrequencyIndex::index_sentences(
            &doc(&[&["p", "q", "r"], &["p", "q", "r"], &["s", "s"], &["x", "q", "r"]]),
            true,
        );
        let id = |text: &str| index.term_id(&Term::new(text)).unwrap();
        let (p, q, r, s, x) = (id("p"), id("q"), id("r"), id("s"), id("x"));

        let mut graph = TermGraph::new();
        for node in [q, r, p, s] {
            graph.add_node(node);
        }
        let clusters = vec![
            TermCluster::new(vec![q, r, p], &index),
            TermCluster::new(vec![s], &index),
        ];
        attach_high_key_terms(&mut graph, &index, &[x], &clusters).unwrap();

        assert_eq!(index.min_cooccurrence(x, q), index.min_cooccurrence(x, r));
        assert_eq!(graph.edge_weight(&x, &q), Some(1));
        assert!(!graph.has_edge(&x, &r));
        assert!(!graph.has_edge(&x, &p));
        // One edge per cluster, even without co-occurrence
        assert_eq!(graph.edge_weight(&x, &s), Some(0));
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_high_key_tie_in_full_extraction() {
        let config = KeyGraphConfig::default()
            .with_high_frequency_term_count(4)
            .with_high_key_term_count(5);
        let result = KeyGraph::with_config(config)
            .extract_with_info(&doc(&[
                &["p", "q", "r"],
                &["p", "q", "r"],
                &["s", "s"],
                &["x", "q", "r"],
            ]))
            .unwrap();

        assert_eq!(result.backbone_edges, 3);
        assert_eq!(result.pruned_edges, 0);
        assert_eq!(
            result.clusters,
            vec![
                vec![Term::new("q"), Term::new("r"), Term::new("p")],
                vec![Term::new("s")],
            ]
        );

        let ranked: Vec<(&str, f64)> = result
            .keywords
            .iter()
            .map(|k| (k.text.as_str(), k.score))
            .collect();
        assert_eq!(
            ranked,
            vec![("q", 5.0), ("r", 5.0), ("p", 4.0), ("x", 1.0), ("s", 0.0)]
        );
    }

    #[test]
    fn test_empty_document() {
        let keywords = KeyGraph::new().extract(&Document::default()).unwrap();
        assert!(keywords.is_empty());

        let keywords = KeyGraph::new()
            .extract(&doc(&[&[], &[]]))
            .unwrap();
        assert!(keywords.is_empty());
    }

    #[test]
    fn test_single_term_document() {
        let keywords = KeyGraph::new().extract(&doc(&[&["x", "x"]])).unwrap();
        assert_eq!(texts(&keywords), vec!["x"]);
        assert_eq!(keywords[0].score, 0.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = KeyGraphConfig::default().with_keyword_count(0);
        let err = KeyGraph::with_config(config)
            .extract(&bridged_document())
            .unwrap_err();
        assert!(matches!(err, KeyGraphError::InvalidConfig { .. }));
    }

    #[test]
    fn test_cancelled_token_aborts() {
        let token = CancellationToken::new();
        token.cancel();
        let err = KeyGraph::new()
            .extract_cancellable(&bridged_document(), &token)
            .unwrap_err();
        assert_eq!(err, KeyGraphError::cancelled(STAGE_INDEX));
    }

    #[test]
    fn test_tag_sensitive_keywords_keep_tags() {
        let document = Document::new(vec![crate::types::Sentence::new(vec![
            Term::new("run").with_tag("NN"),
            Term::new("run").with_tag("VB"),
            Term::new("run").with_tag("NN"),
        ])]);

        let config = KeyGraphConfig::default().with_ignore_term_tags(false);
        let result = KeyGraph::with_config(config).extract_with_info(&document).unwrap();
        assert_eq!(result.high_frequency_terms.len(), 2);
        assert_eq!(result.high_frequency_terms[0], Term::new("run").with_tag("NN"));
        assert!(result.keywords.iter().all(|k| !k.tags.is_empty()));

        let result = KeyGraph::new().extract_with_info(&document).unwrap();
        assert_eq!(result.high_frequency_terms, vec![Term::new("run")]);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let document = bridged_document();
        let first = KeyGraph::new().extract_with_info(&document).unwrap();
        for _ in 0..5 {
            assert_eq!(KeyGraph::new().extract_with_info(&document).unwrap(), first);
        }
    }
}

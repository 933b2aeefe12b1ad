//! # keygraph
//!
//! KeyGraph keyword extraction for pre-tokenized documents.
//!
//! KeyGraph builds a co-occurrence graph over a document's most frequent
//! terms, prunes the bridge edges so only tightly knit clusters remain,
//! and ranks terms by how strongly the clusters imply them.
//!
//! ## Features
//!
//! - **Deterministic**: every tie is broken by first occurrence, never by hash order
//! - **Generic graph**: [`CooccurrenceGraph`] works over any hashable node type
//! - **Batch-friendly**: [`BatchExtractor`] runs documents in parallel and can be
//!   cancelled
//!
//! ## Example
//!
//! ```
//! use keygraph::{Document, KeyGraph, KeyGraphConfig};
//!
//! let doc = Document::from_word_lists([
//!     vec!["graph", "cluster", "term"],
//!     vec!["graph", "cluster", "bridge"],
//!     vec!["graph", "term", "keyword"],
//! ]);
//! let keywords = KeyGraph::with_config(KeyGraphConfig::default().with_keyword_count(3))
//!     .extract(&doc)
//!     .unwrap();
//! assert!(keywords.len() <= 3);
//! ```

pub mod batch;
pub mod cancel;
pub mod clustering;
pub mod errors;
pub mod extractor;
pub mod graph;
pub mod nlp;
pub mod ranker;
pub mod types;

// Re-export commonly used types
pub use errors::{KeyGraphError, Result};
pub use types::{Document, KeyGraphConfig, Keyword, Sentence, Term};

// Re-export main functionality
pub use batch::BatchExtractor;
pub use cancel::CancellationToken;
pub use clustering::TermCluster;
pub use extractor::{extract_keywords, KeyGraph, KeyGraphResult};
pub use graph::CooccurrenceGraph;
pub use nlp::frequency::{TermFrequencyIndex, TermFrequencyMap, TermId};
pub use ranker::{ResultRanker, ScoredTerm};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

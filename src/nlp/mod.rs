//! Natural Language Processing components
//!
//! This module provides term frequency indexing over pre-tokenized documents.

pub mod frequency;

pub use frequency::{TermFrequencyIndex, TermFrequencyMap, TermId};

//! Graph construction and analysis
//!
//! This module provides the generic co-occurrence graph used by KeyGraph,
//! with bridge pruning and connected-component extraction.

pub mod components;
pub mod cooccurrence;

pub use cooccurrence::CooccurrenceGraph;

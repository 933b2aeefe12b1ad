//! Parallel extraction over many documents
//!
//! Each document gets its own graph and frequency index, so documents are
//! processed independently on Rayon's pool (or a scoped pool when a thread
//! limit is set). Results come back in input order, one per document.
//!
//! [`BatchExtractor::extract_all`] checks one token shared by the whole batch;
//! [`BatchExtractor::extract_each`] takes a token per document so a driver can
//! abort a single extraction.

use crate::cancel::CancellationToken;
use crate::errors::{KeyGraphError, Result};
use crate::extractor::KeyGraph;
use crate::types::{Document, KeyGraphConfig, Keyword};
use rayon::prelude::*;

/// Runs KeyGraph over a batch of documents
#[derive(Debug, Clone, Default)]
pub struct BatchExtractor {
    extractor: KeyGraph,
    /// Thread limit; `None` uses the global Rayon pool
    max_threads: Option<usize>,
    token: CancellationToken,
}

impl BatchExtractor {
    /// Create a batch extractor with default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom config
    pub fn with_config(config: KeyGraphConfig) -> Self {
        Self {
            extractor: KeyGraph::with_config(config),
            ..Self::default()
        }
    }

    /// Limit the number of worker threads
    pub fn with_max_threads(mut self, threads: usize) -> Self {
        self.max_threads = Some(threads.max(1));
        self
    }

    /// Share a cancellation token with the caller
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    /// The token checked by every extraction of this batch
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.token
    }

    /// Extract keywords from every document.
    ///
    /// The outer `Result` fails only for an invalid config or an unusable
    /// thread pool; each document carries its own result, so one
    /// cancelled document does not discard the others.
    pub fn extract_all(&self, documents: &[Document]) -> Result<Vec<Result<Vec<Keyword>>>> {
        self.run(|| {
            documents
                .par_iter()
                .map(|doc| self.extractor.extract_cancellable(doc, &self.token))
                .collect()
        })
    }

    /// Extract keywords from every document, each checking its own token.
    ///
    /// The batch token is not consulted; hand out clones of one token to
    /// cancel several documents together.
    pub fn extract_each(
        &self,
        jobs: &[(Document, CancellationToken)],
    ) -> Result<Vec<Result<Vec<Keyword>>>> {
        self.run(|| {
            jobs.par_iter()
                .map(|(doc, token)| self.extractor.extract_cancellable(doc, token))
                .collect()
        })
    }

    fn run<F>(&self, job: F) -> Result<Vec<Result<Vec<Keyword>>>>
    where
        F: FnOnce() -> Vec<Result<Vec<Keyword>>> + Send,
    {
        self.extractor.config().validate()?;

        let results = match self.max_threads {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| {
                    KeyGraphError::internal(format!("failed to build thread pool: {}", e))
                })?
                .install(job),
            None => job(),
        };

        tracing::debug!(
            documents = results.len(),
            failed = results.iter().filter(|r| r.is_err()).count(),
            "batch extraction finished"
        );
        Ok(results)
    }
}

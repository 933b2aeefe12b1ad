//! Cooperative cancellation
//!
//! A [`CancellationToken`] is a cloneable flag shared between a driver and
//! the extractions it starts. Extraction polls it between phases and stops
//! with [`KeyGraphError::Cancelled`]; nothing is interrupted mid-phase.

use crate::errors::{KeyGraphError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Thread-safe cancellation flag
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token that is not cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of every extraction holding a clone of this token
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Check if cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Fail with [`KeyGraphError::Cancelled`] if cancellation was requested
    pub fn checkpoint(&self, stage: &str) -> Result<()> {
        if self.is_cancelled() {
            tracing::debug!(stage, "extraction cancelled");
            return Err(KeyGraphError::cancelled(stage));
        }
        Ok(())
    }
}

// crates/dbwire-providers/src/sink.rs
// ============================================================================
// Module: Export Sinks
// Description: Reference export sinks for file and in-memory publication.
// Purpose: Deliver export bundles and return deterministic receipts.
// Dependencies: dbwire-core, serde_json, std
// ============================================================================

//! ## Overview
//! Sinks publish export bundles and return receipts for auditing. Receipts
//! are returned only after successful publication and carry a canonical
//! content hash of the bundle plus a monotonic logical timestamp.
//! Invariants:
//! - Publication failures must not emit partial side effects.
//! - Receipt sequence numbers start at 1 and increase per sink instance.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use dbwire_core::DEFAULT_HASH_ALGORITHM;
use dbwire_core::ExportBundle;
use dbwire_core::ExportSink;
use dbwire_core::PublishReceipt;
use dbwire_core::SinkError;
use dbwire_core::Timestamp;
use dbwire_core::hashing::hash_canonical_json;

// ============================================================================
// SECTION: Receipt Helpers
// ============================================================================

/// Builds deterministic publish receipts for a named sink.
#[derive(Debug)]
struct ReceiptFactory {
    /// Sink identifier embedded in receipts.
    sink: String,
    /// Monotonic counter used for deterministic timestamps.
    counter: AtomicU64,
}

impl ReceiptFactory {
    /// Creates a receipt factory with the provided sink name.
    fn new(sink: impl Into<String>) -> Self {
        Self {
            sink: sink.into(),
            counter: AtomicU64::new(0),
        }
    }

    /// Returns the next receipt for the provided bundle.
    fn next(&self, bundle: &ExportBundle) -> Result<PublishReceipt, SinkError> {
        let content_hash = hash_canonical_json(DEFAULT_HASH_ALGORITHM, bundle)
            .map_err(|err| SinkError::PublishFailed(err.to_string()))?;
        let seq = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        Ok(PublishReceipt {
            sink: self.sink.clone(),
            content_hash,
            published_at: Timestamp::Logical(seq),
        })
    }
}

// ============================================================================
// SECTION: JSON File Sink
// ============================================================================

/// Export sink writing bundles as pretty-printed JSON files.
///
/// # Invariants
/// - The receipt is returned only after the file write succeeds.
/// - Each publication overwrites the target file atomically from the
///   caller's perspective; partial writes surface as errors.
#[derive(Debug)]
pub struct JsonExportSink {
    /// Target path the bundle is written to.
    path: PathBuf,
    /// Receipt factory for this sink.
    receipts: ReceiptFactory,
}

impl JsonExportSink {
    /// Creates a sink writing to the provided path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            receipts: ReceiptFactory::new("json-file"),
        }
    }
}

impl ExportSink for JsonExportSink {
    fn publish(&self, bundle: &ExportBundle) -> Result<PublishReceipt, SinkError> {
        let payload = serde_json::to_vec_pretty(bundle)
            .map_err(|err| SinkError::PublishFailed(err.to_string()))?;
        fs::write(&self.path, payload).map_err(|err| SinkError::PublishFailed(err.to_string()))?;
        self.receipts.next(bundle)
    }
}

// ============================================================================
// SECTION: Memory Sink
// ============================================================================

/// Export sink capturing bundles in memory.
///
/// # Invariants
/// - Bundles are retained in publication order.
#[derive(Debug)]
pub struct MemoryExportSink {
    /// Bundles published through this sink, in call order.
    published: Mutex<Vec<ExportBundle>>,
    /// Receipt factory for this sink.
    receipts: ReceiptFactory,
}

impl MemoryExportSink {
    /// Creates an empty memory sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            published: Mutex::new(Vec::new()),
            receipts: ReceiptFactory::new("memory"),
        }
    }

    /// Returns the bundles published so far, in publication order.
    #[must_use]
    pub fn published_bundles(&self) -> Vec<ExportBundle> {
        self.published.lock().map(|bundles| bundles.clone()).unwrap_or_default()
    }
}

impl Default for MemoryExportSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportSink for MemoryExportSink {
    fn publish(&self, bundle: &ExportBundle) -> Result<PublishReceipt, SinkError> {
        let receipt = self.receipts.next(bundle)?;
        if let Ok(mut published) = self.published.lock() {
            published.push(bundle.clone());
        }
        Ok(receipt)
    }
}

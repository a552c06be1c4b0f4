// crates/dbwire-core/src/core/time.rs
// ============================================================================
// Module: Time Model
// Description: Explicit timestamp values for publish receipts.
// Purpose: Keep receipts deterministic; the core never reads wall-clock time.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Receipts carry explicit time values so runs stay replayable. Hosts that
//! have real clocks supply epoch milliseconds; the reference sinks stamp
//! receipts with monotonic logical sequence numbers instead. Monotonicity is
//! the stamping party's responsibility.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Time Values
// ============================================================================

/// Timestamp embedded in dbwire publish receipts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Timestamp {
    /// Unix epoch milliseconds supplied by the host.
    UnixMillis(i64),
    /// Monotonic logical sequence value stamped by a sink.
    Logical(u64),
}

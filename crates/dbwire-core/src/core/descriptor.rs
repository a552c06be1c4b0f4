// crates/dbwire-core/src/core/descriptor.rs
// ============================================================================
// Module: Connection Descriptor
// Description: Typed decomposition of composite database connection strings.
// Purpose: Parse and validate `protocol/instance/host/port` descriptors.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! A connection descriptor is the four-field decomposition of a composite
//! cluster string supplied by the orchestrator. Parsing is strict: exactly
//! four non-empty `/`-separated segments, assigned positionally. Anything
//! else fails with the offending raw value and no partial result.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Separator between descriptor segments.
const SEGMENT_SEPARATOR: char = '/';

/// Number of segments in a well-formed descriptor.
const SEGMENT_COUNT: usize = 4;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while parsing a connection descriptor.
#[derive(Debug, Error)]
pub enum DescriptorError {
    /// Input did not split into exactly four non-empty segments.
    #[error("malformed connection descriptor: {0}")]
    Malformed(String),
}

// ============================================================================
// SECTION: Connection Descriptor
// ============================================================================

/// Decomposed representation of a composite connection string.
///
/// # Invariants
/// - Every field is non-empty.
/// - `port` is kept textual; the source format never guarantees an integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionDescriptor {
    /// Transport or protocol scheme segment.
    pub protocol: String,
    /// Logical backing-instance identifier.
    pub instance_name: String,
    /// Network host or address.
    pub host: String,
    /// Textual port or endpoint designator.
    pub port: String,
}

impl ConnectionDescriptor {
    /// Parses a composite cluster string into a descriptor.
    ///
    /// Segments are assigned positionally: `protocol/instance/host/port`.
    /// Leading, trailing, or doubled separators produce empty segments and
    /// are rejected; no partial descriptor is ever returned.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::Malformed`] carrying the offending raw
    /// value when the segment count is not exactly four or any segment is
    /// empty.
    pub fn parse(raw: &str) -> Result<Self, DescriptorError> {
        let segments: Vec<&str> = raw.split(SEGMENT_SEPARATOR).collect();
        if segments.len() != SEGMENT_COUNT || segments.iter().any(|segment| segment.is_empty()) {
            return Err(DescriptorError::Malformed(raw.to_string()));
        }
        Ok(Self {
            protocol: segments[0].to_string(),
            instance_name: segments[1].to_string(),
            host: segments[2].to_string(),
            port: segments[3].to_string(),
        })
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test fixtures use explicit asserts and unwraps for clarity."
    )]

    use super::*;

    #[test]
    fn parse_assigns_segments_positionally() {
        let descriptor = ConnectionDescriptor::parse("tcp/inst1/10.0.0.5/5432").unwrap();
        assert_eq!(descriptor.protocol, "tcp");
        assert_eq!(descriptor.instance_name, "inst1");
        assert_eq!(descriptor.host, "10.0.0.5");
        assert_eq!(descriptor.port, "5432");
    }

    #[test]
    fn parse_keeps_port_textual() {
        let descriptor = ConnectionDescriptor::parse("postgres/main/db.internal/primary").unwrap();
        assert_eq!(descriptor.port, "primary");
    }

    #[test]
    fn parse_rejects_too_few_segments() {
        for raw in ["", "tcp", "tcp/inst", "tcp/inst/host"] {
            let result = ConnectionDescriptor::parse(raw);
            assert!(result.is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn parse_rejects_too_many_segments() {
        let result = ConnectionDescriptor::parse("tcp/inst/host/5432/extra");
        assert!(result.is_err(), "five segments should be rejected");
    }

    #[test]
    fn parse_rejects_trailing_separator() {
        let result = ConnectionDescriptor::parse("a/b/c/");
        assert!(result.is_err(), "trailing separator yields an empty port");
    }

    #[test]
    fn parse_rejects_leading_separator() {
        let result = ConnectionDescriptor::parse("/b/c/d");
        assert!(result.is_err(), "leading separator yields an empty protocol");
    }

    #[test]
    fn parse_rejects_doubled_separator() {
        let result = ConnectionDescriptor::parse("a//c/d");
        assert!(result.is_err(), "doubled separator yields an empty segment");
    }

    #[test]
    fn malformed_error_carries_raw_value() {
        let error = ConnectionDescriptor::parse("a/b").unwrap_err();
        assert!(error.to_string().contains("a/b"));
    }
}

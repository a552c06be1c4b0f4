// crates/dbwire-core/src/core/hashing.rs
// ============================================================================
// Module: Canonical Hashing
// Description: Deterministic content digests for published export bundles.
// Purpose: Let receipt consumers verify what was published without re-reading the sink.
// Dependencies: serde, serde_jcs, sha2
// ============================================================================

//! ## Overview
//! Publish receipts embed a digest of the export bundle. The bundle is first
//! canonicalized as RFC 8785 JSON so the digest is stable regardless of
//! serializer field ordering, then hashed with SHA-256.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Lowercase hex alphabet used for digest encoding.
const HEX_ALPHABET: &[u8; 16] = b"0123456789abcdef";

/// Default hash algorithm for dbwire receipts.
pub const DEFAULT_HASH_ALGORITHM: HashAlgorithm = HashAlgorithm::Sha256;

// ============================================================================
// SECTION: Hash Types
// ============================================================================

/// Supported hash algorithms for dbwire receipts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashAlgorithm {
    /// SHA-256 hashing.
    Sha256,
}

/// Deterministic content hash representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashDigest {
    /// Hash algorithm identifier.
    pub algorithm: HashAlgorithm,
    /// Lowercase hex-encoded digest bytes.
    pub value: String,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when computing canonical hashes.
#[derive(Debug, Error)]
pub enum HashError {
    /// JSON canonicalization failed.
    #[error("failed to canonicalize json: {0}")]
    Canonicalization(String),
}

// ============================================================================
// SECTION: Hashing
// ============================================================================

/// Hashes a serializable value over its canonical JSON form.
///
/// # Errors
///
/// Returns [`HashError::Canonicalization`] when serialization fails.
pub fn hash_canonical_json<T: Serialize + ?Sized>(
    algorithm: HashAlgorithm,
    value: &T,
) -> Result<HashDigest, HashError> {
    let canonical =
        serde_jcs::to_vec(value).map_err(|err| HashError::Canonicalization(err.to_string()))?;
    Ok(match algorithm {
        HashAlgorithm::Sha256 => HashDigest {
            algorithm,
            value: hex_encode(&Sha256::digest(&canonical)),
        },
    })
}

/// Encodes bytes as a lowercase hex string.
fn hex_encode(bytes: &[u8]) -> String {
    let mut encoded = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        encoded.push(char::from(HEX_ALPHABET[usize::from(byte >> 4)]));
        encoded.push(char::from(HEX_ALPHABET[usize::from(byte & 0x0f)]));
    }
    encoded
}

// ============================================================================
// SECTION: Tests
// ============================================================================

// crates/dbwire-core/src/core/name.rs
// ============================================================================
// Module: Resource Name Normalization
// Description: Normalized resource names safe for use as resource identifiers.
// Purpose: Replace path separators deterministically before resource creation.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Requested resource names may contain path separators (environments are
//! addressed as `component/environment` paths upstream). Normalization
//! replaces every `/` with the literal two-character sequence `--`. It is a
//! plain substring replacement, not a path-aware transformation: `//`
//! normalizes to `----`. The transformation is total and never fails; empty
//! names are rejected by callers, not here.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Separator character replaced during normalization.
const PATH_SEPARATOR: char = '/';

/// Replacement sequence substituted for every separator occurrence.
const SEPARATOR_REPLACEMENT: &str = "--";

// ============================================================================
// SECTION: Resource Name
// ============================================================================

/// Normalized resource name.
///
/// # Invariants
/// - Contains no path-separator characters.
/// - Normalization is deterministic: equal inputs normalize to equal names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceName(String);

impl ResourceName {
    /// Normalizes a raw requested name into a resource-safe name.
    ///
    /// Every occurrence of `/` is replaced with `--`; all other characters
    /// pass through unchanged.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        Self(raw.replace(PATH_SEPARATOR, SEPARATOR_REPLACEMENT))
    }

    /// Returns the normalized name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true when the normalized name is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

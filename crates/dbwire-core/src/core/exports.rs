// crates/dbwire-core/src/core/exports.rs
// ============================================================================
// Module: Export Bundle
// Description: Composed output values published at the end of a provisioning run.
// Purpose: Assemble derived identifiers and URLs from a confirmed resource.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The export bundle is the run's observable output: composed identifiers and
//! URLs derived from the parsed descriptor and the resource name confirmed by
//! the creation collaborator. Assembly is pure formatting over validated
//! inputs and happens exactly once per run, after creation returns. The
//! confirmed name is authoritative; the locally normalized name is never used
//! in derived values because the external system may apply its own transform.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::descriptor::ConnectionDescriptor;

// ============================================================================
// SECTION: Export Bundle
// ============================================================================

/// Read-only bundle of named output values for one provisioning run.
///
/// # Invariants
/// - Assembled once per run, after resource confirmation; never mutated.
/// - `username` and `password` are intentionally empty; credentials are
///   managed out-of-band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportBundle {
    /// Composite identifier: `protocol/instance/name/host/port`.
    pub id: String,
    /// Confirmed resource name.
    pub name: String,
    /// Network host, passed through from the descriptor.
    pub host: String,
    /// Textual port, passed through from the descriptor.
    pub port: String,
    /// Empty credential placeholder.
    pub username: String,
    /// Empty credential placeholder.
    pub password: String,
    /// Protocol scheme, passed through from the descriptor.
    pub protocol: String,
    /// Connection URL: `protocol://host:port/name`.
    pub url: String,
}

impl ExportBundle {
    /// Assembles the bundle from a descriptor and the confirmed resource name.
    #[must_use]
    pub fn assemble(descriptor: &ConnectionDescriptor, confirmed_name: &str) -> Self {
        Self {
            id: format!(
                "{}/{}/{}/{}/{}",
                descriptor.protocol,
                descriptor.instance_name,
                confirmed_name,
                descriptor.host,
                descriptor.port
            ),
            name: confirmed_name.to_string(),
            host: descriptor.host.clone(),
            port: descriptor.port.clone(),
            username: String::new(),
            password: String::new(),
            protocol: descriptor.protocol.clone(),
            url: format!(
                "{}://{}:{}/{}",
                descriptor.protocol, descriptor.host, descriptor.port, confirmed_name
            ),
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

// crates/dbwire-core/src/interfaces/mod.rs
// ============================================================================
// Module: dbwire Interfaces
// Description: Backend-agnostic interfaces for service binding, resource creation, and export publication.
// Purpose: Define the contract surfaces used by the dbwire provisioner.
// Dependencies: crate::core, serde, thiserror
// ============================================================================

//! ## Overview
//! Interfaces define how dbwire integrates with external systems without
//! embedding backend-specific details. The project-service dependency is an
//! explicit ordering contract: [`ResourceCreator::create_database`] requires a
//! [`ServiceBinding`] minted by a [`ProjectServiceBinder`], so a creation
//! request cannot be issued before the dependency is satisfied. External
//! failures propagate unmodified; implementations must not retry or
//! substitute defaults on behalf of the caller.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::exports::ExportBundle;
use crate::core::hashing::HashDigest;
use crate::core::name::ResourceName;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Deletion Policy
// ============================================================================

/// Lifecycle policy applied when the resource leaves management.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletionPolicy {
    /// Leave the backing resource in place when management ends.
    #[default]
    Abandon,
    /// Delete the backing resource when management ends.
    Delete,
}

// ============================================================================
// SECTION: Project Service Binder
// ============================================================================

/// Proof that an upstream project service dependency is satisfied.
///
/// # Invariants
/// - Minted only by a [`ProjectServiceBinder`]; holding a binding means the
///   named service was established before any creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceBinding {
    /// Service identifier the binding was established for.
    pub service: String,
    /// Whether the service should be disabled when the binding is destroyed.
    pub disable_on_destroy: bool,
}

/// Project service errors.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The upstream service could not be established.
    #[error("project service unavailable: {0}")]
    Unavailable(String),
}

/// Establishes upstream project service dependencies.
pub trait ProjectServiceBinder {
    /// Ensures the named service is established and returns its binding.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] when the service cannot be established.
    fn ensure(
        &self,
        service: &str,
        disable_on_destroy: bool,
    ) -> Result<ServiceBinding, ServiceError>;
}

// ============================================================================
// SECTION: Resource Creator
// ============================================================================

/// Resource-creation request issued once per provisioning run.
///
/// # Invariants
/// - `name` is already normalized; it contains no path separators.
/// - `instance` is the parsed backing-instance identifier from the descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDatabaseRequest {
    /// Normalized requested resource name.
    pub name: ResourceName,
    /// Backing instance the database is created on.
    pub instance: String,
    /// Deletion policy declared on the resource.
    pub deletion_policy: DeletionPolicy,
}

/// Resource confirmation returned by the creation collaborator.
///
/// # Invariants
/// - `name` is authoritative; it may differ from the requested name when the
///   external system applies its own transformation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmedResource {
    /// Resource name as acknowledged by the external system.
    pub name: String,
}

/// Resource creation errors.
///
/// # Invariants
/// - Variants carry the external system's message unmodified; dbwire performs
///   no local recovery or retry.
#[derive(Debug, Error)]
pub enum CreateError {
    /// The backend rejected or failed the creation request.
    #[error("resource creation failed: {0}")]
    Backend(String),
    /// The requested name conflicts with an existing resource.
    #[error("resource name conflict: {0}")]
    NameConflict(String),
}

/// Backend-agnostic resource creation collaborator.
pub trait ResourceCreator {
    /// Issues a single database creation request.
    ///
    /// The `binding` parameter is the ordering precondition: callers must
    /// establish the project service dependency before creation.
    ///
    /// # Errors
    ///
    /// Returns [`CreateError`] when the external system rejects or fails the
    /// request.
    fn create_database(
        &self,
        request: &CreateDatabaseRequest,
        binding: &ServiceBinding,
    ) -> Result<ConfirmedResource, CreateError>;
}

// ============================================================================
// SECTION: Export Sink
// ============================================================================

/// Receipt returned after an export bundle is published.
///
/// # Invariants
/// - Returned only after successful publication.
/// - `content_hash` covers the canonical JSON form of the published bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishReceipt {
    /// Sink identifier that accepted the bundle.
    pub sink: String,
    /// Canonical content hash of the published bundle.
    pub content_hash: HashDigest,
    /// Publication timestamp supplied by the sink.
    pub published_at: Timestamp,
}

/// Export publication errors.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The sink failed to accept the bundle.
    #[error("export publication failed: {0}")]
    PublishFailed(String),
}

/// Publishes export bundles to the orchestrator's output store.
pub trait ExportSink {
    /// Publishes the bundle and returns a receipt.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] when publication fails. Failures must not emit
    /// partial side effects.
    fn publish(&self, bundle: &ExportBundle) -> Result<PublishReceipt, SinkError>;
}

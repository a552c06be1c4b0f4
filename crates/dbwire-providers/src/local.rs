// crates/dbwire-providers/src/local.rs
// ============================================================================
// Module: Local Collaborators
// Description: Deterministic in-process binder and resource creator.
// Purpose: Back the CLI, tests, and embedders without a cloud backend.
// Dependencies: dbwire-core, serde
// ============================================================================

//! ## Overview
//! The local collaborators confirm creation requests deterministically. The
//! binder records every ensured service; the creator enforces explicit
//! reserved-name and size limits and supports rename overrides so the
//! confirmed-name-differs path stays exercised without a cloud backend.
//! Both fail closed on violations.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::Mutex;

use dbwire_core::ConfirmedResource;
use dbwire_core::CreateDatabaseRequest;
use dbwire_core::CreateError;
use dbwire_core::ProjectServiceBinder;
use dbwire_core::ResourceCreator;
use dbwire_core::ServiceBinding;
use dbwire_core::ServiceError;
use serde::Deserialize;

// ============================================================================
// SECTION: Project Service Binder
// ============================================================================

/// In-process project service binder.
///
/// # Invariants
/// - `ensure` is deterministic: equal inputs yield equal bindings.
/// - Every ensured service is recorded, in call order.
#[derive(Debug, Default)]
pub struct LocalProjectServiceBinder {
    /// Services ensured through this binder, in call order.
    ensured: Mutex<Vec<String>>,
}

impl LocalProjectServiceBinder {
    /// Creates a binder with no ensured services.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the services ensured so far, in call order.
    #[must_use]
    pub fn ensured_services(&self) -> Vec<String> {
        self.ensured.lock().map(|services| services.clone()).unwrap_or_default()
    }
}

impl ProjectServiceBinder for LocalProjectServiceBinder {
    fn ensure(
        &self,
        service: &str,
        disable_on_destroy: bool,
    ) -> Result<ServiceBinding, ServiceError> {
        if service.is_empty() {
            return Err(ServiceError::Unavailable("service name is empty".to_string()));
        }
        if let Ok(mut ensured) = self.ensured.lock() {
            ensured.push(service.to_string());
        }
        Ok(ServiceBinding {
            service: service.to_string(),
            disable_on_destroy,
        })
    }
}

// ============================================================================
// SECTION: Creator Configuration
// ============================================================================

/// Configuration for the local resource creator.
///
/// # Invariants
/// - `reserved_names` rejects matching requests outright.
/// - `renames` take precedence over echoing the requested name.
/// - `max_name_bytes` is enforced as a hard upper bound.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LocalCreatorConfig {
    /// Names that always fail with a conflict.
    pub reserved_names: BTreeSet<String>,
    /// Requested-name to confirmed-name overrides.
    pub renames: BTreeMap<String, String>,
    /// Maximum bytes allowed for a requested name.
    pub max_name_bytes: usize,
}

impl Default for LocalCreatorConfig {
    fn default() -> Self {
        Self {
            reserved_names: BTreeSet::new(),
            renames: BTreeMap::new(),
            max_name_bytes: 255,
        }
    }
}

// ============================================================================
// SECTION: Resource Creator
// ============================================================================

/// Deterministic in-process resource creator.
///
/// # Invariants
/// - Confirms the requested name unless a rename override applies.
/// - Enforces reserved-name and size limits and fails closed on violations.
#[derive(Debug, Default)]
pub struct LocalResourceCreator {
    /// Creator configuration, including overrides and limits.
    config: LocalCreatorConfig,
    /// Requests accepted by this creator, in call order.
    accepted: Mutex<Vec<CreateDatabaseRequest>>,
}

impl LocalResourceCreator {
    /// Creates a new local creator with the given configuration.
    #[must_use]
    pub fn new(config: LocalCreatorConfig) -> Self {
        Self {
            config,
            accepted: Mutex::new(Vec::new()),
        }
    }

    /// Returns the requests accepted so far, in call order.
    #[must_use]
    pub fn accepted_requests(&self) -> Vec<CreateDatabaseRequest> {
        self.accepted.lock().map(|requests| requests.clone()).unwrap_or_default()
    }
}

impl ResourceCreator for LocalResourceCreator {
    fn create_database(
        &self,
        request: &CreateDatabaseRequest,
        _binding: &ServiceBinding,
    ) -> Result<ConfirmedResource, CreateError> {
        let requested = request.name.as_str();
        if requested.len() > self.config.max_name_bytes {
            return Err(CreateError::Backend("requested name exceeds limit".to_string()));
        }
        if request.instance.is_empty() {
            return Err(CreateError::Backend("instance name is empty".to_string()));
        }
        if self.config.reserved_names.contains(requested) {
            return Err(CreateError::NameConflict(requested.to_string()));
        }
        let confirmed = self
            .config
            .renames
            .get(requested)
            .cloned()
            .unwrap_or_else(|| requested.to_string());
        if let Ok(mut accepted) = self.accepted.lock() {
            accepted.push(request.clone());
        }
        Ok(ConfirmedResource {
            name: confirmed,
        })
    }
}

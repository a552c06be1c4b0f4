// crates/dbwire-providers/src/registry.rs
// ============================================================================
// Module: Creator Registry
// Description: Registry for resource creators keyed by creator identifier.
// Purpose: Route creation requests by backend identifier with policy checks.
// Dependencies: dbwire-core
// ============================================================================

//! ## Overview
//! The creator registry resolves creation requests by creator identifier and
//! enforces allowlist and denylist policies before any backend is invoked.
//! It implements the core [`dbwire_core::ResourceCreator`] interface so the
//! provisioner can route through a registry or a single backend
//! interchangeably.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use dbwire_core::ConfirmedResource;
use dbwire_core::CreateDatabaseRequest;
use dbwire_core::CreateError;
use dbwire_core::ResourceCreator;
use dbwire_core::ServiceBinding;

// ============================================================================
// SECTION: Access Policy
// ============================================================================

/// Access policy controlling which creators may be invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatorAccessPolicy {
    /// Optional allowlist of creator identifiers.
    pub allowlist: Option<BTreeSet<String>>,
    /// Explicit denylist of creator identifiers.
    pub denylist: BTreeSet<String>,
}

impl CreatorAccessPolicy {
    /// Returns a policy that permits all creators.
    #[must_use]
    pub const fn allow_all() -> Self {
        Self {
            allowlist: None,
            denylist: BTreeSet::new(),
        }
    }

    /// Returns true when the creator is allowed by policy.
    #[must_use]
    pub fn is_allowed(&self, creator_id: &str) -> bool {
        if self.denylist.contains(creator_id) {
            return false;
        }
        if let Some(allowlist) = &self.allowlist {
            return allowlist.contains(creator_id);
        }
        true
    }
}

impl Default for CreatorAccessPolicy {
    fn default() -> Self {
        Self::allow_all()
    }
}

// ============================================================================
// SECTION: Creator Registry
// ============================================================================

/// Resource creator registry with policy enforcement.
pub struct CreatorRegistry {
    /// Creator implementations keyed by creator identifier.
    creators: BTreeMap<String, Box<dyn ResourceCreator + Send + Sync>>,
    /// Access control policy for creator usage.
    policy: CreatorAccessPolicy,
    /// Identifier of the creator used by [`ResourceCreator::create_database`].
    selected: String,
}

impl CreatorRegistry {
    /// Creates a new registry with the provided policy and selected creator.
    #[must_use]
    pub fn new(policy: CreatorAccessPolicy, selected: impl Into<String>) -> Self {
        Self {
            creators: BTreeMap::new(),
            policy,
            selected: selected.into(),
        }
    }

    /// Registers a creator under the provided identifier.
    pub fn register(
        &mut self,
        creator_id: impl Into<String>,
        creator: Box<dyn ResourceCreator + Send + Sync>,
    ) {
        self.creators.insert(creator_id.into(), creator);
    }

    /// Returns the selected creator identifier.
    #[must_use]
    pub fn selected(&self) -> &str {
        &self.selected
    }

    /// Routes a creation request to the named creator.
    ///
    /// # Errors
    ///
    /// Returns [`CreateError::Backend`] when the creator is unknown or
    /// blocked by policy, and the creator's own error otherwise.
    pub fn create_with(
        &self,
        creator_id: &str,
        request: &CreateDatabaseRequest,
        binding: &ServiceBinding,
    ) -> Result<ConfirmedResource, CreateError> {
        if !self.policy.is_allowed(creator_id) {
            return Err(CreateError::Backend(format!("creator blocked by policy: {creator_id}")));
        }
        let creator = self
            .creators
            .get(creator_id)
            .ok_or_else(|| CreateError::Backend(format!("unknown creator: {creator_id}")))?;
        creator.create_database(request, binding)
    }
}

impl ResourceCreator for CreatorRegistry {
    fn create_database(
        &self,
        request: &CreateDatabaseRequest,
        binding: &ServiceBinding,
    ) -> Result<ConfirmedResource, CreateError> {
        self.create_with(&self.selected, request, binding)
    }
}

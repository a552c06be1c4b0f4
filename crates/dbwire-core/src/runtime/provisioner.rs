// crates/dbwire-core/src/runtime/provisioner.rs
// ============================================================================
// Module: Provisioner Engine
// Description: Linear provisioning pipeline over collaborator interfaces.
// Purpose: Resolve, create, and publish exactly once per run, fail-closed.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The provisioner runs the fixed pipeline for one provisioning run: parse
//! the cluster descriptor, normalize the requested name, establish the
//! project service dependency, issue the single creation request, assemble
//! exports from the confirmed name, and publish the bundle. The pipeline is
//! synchronous and run-to-completion with no retries, no loops, and no
//! persistent state; every error aborts the run and surfaces to the caller.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::descriptor::ConnectionDescriptor;
use crate::core::descriptor::DescriptorError;
use crate::core::exports::ExportBundle;
use crate::core::name::ResourceName;
use crate::interfaces::CreateDatabaseRequest;
use crate::interfaces::CreateError;
use crate::interfaces::DeletionPolicy;
use crate::interfaces::ExportSink;
use crate::interfaces::ProjectServiceBinder;
use crate::interfaces::PublishReceipt;
use crate::interfaces::ResourceCreator;
use crate::interfaces::ServiceError;
use crate::interfaces::SinkError;

// ============================================================================
// SECTION: Requests and Outcomes
// ============================================================================

/// Validated inputs for one provisioning run.
///
/// # Invariants
/// - Constructed once per run from configuration; immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionRequest {
    /// Composite cluster string, format `protocol/instance/host/port`.
    pub database_cluster: String,
    /// Raw requested resource name; may contain path separators.
    pub name: String,
    /// Deletion policy declared on the created resource.
    pub deletion_policy: DeletionPolicy,
    /// Project service that must be established before creation.
    pub service: String,
    /// Whether the project service is disabled on destroy.
    pub disable_on_destroy: bool,
}

/// Resolved pipeline inputs prior to any external call.
///
/// # Invariants
/// - `requested_name` is non-empty and contains no path separators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionPlan {
    /// Parsed connection descriptor.
    pub descriptor: ConnectionDescriptor,
    /// Normalized requested resource name.
    pub requested_name: ResourceName,
    /// Project service the creation request depends on.
    pub service: String,
    /// Deletion policy declared on the created resource.
    pub deletion_policy: DeletionPolicy,
}

impl ProvisionPlan {
    /// Resolves a request into pipeline inputs without side effects.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError::Descriptor`] when the cluster string is
    /// malformed and [`ProvisionError::EmptyResourceName`] when the requested
    /// name is empty before or after normalization.
    pub fn resolve(request: &ProvisionRequest) -> Result<Self, ProvisionError> {
        let descriptor = ConnectionDescriptor::parse(&request.database_cluster)?;
        let requested_name = ResourceName::normalize(&request.name);
        if requested_name.is_empty() {
            return Err(ProvisionError::EmptyResourceName);
        }
        Ok(Self {
            descriptor,
            requested_name,
            service: request.service.clone(),
            deletion_policy: request.deletion_policy,
        })
    }
}

/// Observable result of a completed provisioning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionOutcome {
    /// Parsed connection descriptor.
    pub descriptor: ConnectionDescriptor,
    /// Normalized name as requested from the creation collaborator.
    pub requested_name: ResourceName,
    /// Resource name confirmed by the creation collaborator.
    pub confirmed_name: String,
    /// Published export bundle.
    pub bundle: ExportBundle,
    /// Receipt returned by the export sink.
    pub receipt: PublishReceipt,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised by the provisioning pipeline.
///
/// # Invariants
/// - External collaborator failures pass through unmodified.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// Requested name resolved to an empty resource name.
    #[error("resource name is empty after normalization")]
    EmptyResourceName,
    /// Cluster string failed descriptor validation.
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
    /// Project service dependency could not be established.
    #[error(transparent)]
    Service(#[from] ServiceError),
    /// Resource creation collaborator failed.
    #[error(transparent)]
    Create(#[from] CreateError),
    /// Export sink failed to publish the bundle.
    #[error(transparent)]
    Sink(#[from] SinkError),
}

// ============================================================================
// SECTION: Provisioner Engine
// ============================================================================

/// Provisioner engine running the fixed per-run pipeline.
pub struct Provisioner<B, C, S> {
    /// Project service collaborator.
    binder: B,
    /// Resource creation collaborator.
    creator: C,
    /// Export publication collaborator.
    sink: S,
}

impl<B, C, S> Provisioner<B, C, S>
where
    B: ProjectServiceBinder,
    C: ResourceCreator,
    S: ExportSink,
{
    /// Creates a provisioner from its collaborators.
    #[must_use]
    pub const fn new(binder: B, creator: C, sink: S) -> Self {
        Self {
            binder,
            creator,
            sink,
        }
    }

    /// Runs one provisioning run to completion.
    ///
    /// At most one parse, one normalization, and one export assembly happen
    /// per run, in that fixed order. The confirmed name returned by the
    /// creation collaborator is authoritative for all derived exports.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError`] when any pipeline stage fails; there is no
    /// retry, no default-substitution, and no degraded mode.
    pub fn provision(&self, request: &ProvisionRequest) -> Result<ProvisionOutcome, ProvisionError> {
        let plan = ProvisionPlan::resolve(request)?;
        let binding = self.binder.ensure(&plan.service, request.disable_on_destroy)?;
        let create_request = CreateDatabaseRequest {
            name: plan.requested_name.clone(),
            instance: plan.descriptor.instance_name.clone(),
            deletion_policy: plan.deletion_policy,
        };
        let confirmed = self.creator.create_database(&create_request, &binding)?;
        let bundle = ExportBundle::assemble(&plan.descriptor, &confirmed.name);
        let receipt = self.sink.publish(&bundle)?;
        Ok(ProvisionOutcome {
            descriptor: plan.descriptor,
            requested_name: plan.requested_name,
            confirmed_name: confirmed.name,
            bundle,
            receipt,
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

    use std::cell::RefCell;

    use super::*;
    use crate::core::hashing::DEFAULT_HASH_ALGORITHM;
    use crate::core::hashing::hash_canonical_json;
    use crate::core::time::Timestamp;
    use crate::interfaces::ConfirmedResource;
    use crate::interfaces::ServiceBinding;

    /// Binder that records ensured services.
    struct RecordingBinder {
        /// Services passed to `ensure`, in call order.
        ensured: RefCell<Vec<String>>,
    }

    impl RecordingBinder {
        /// Creates an empty recording binder.
        fn new() -> Self {
            Self {
                ensured: RefCell::new(Vec::new()),
            }
        }
    }

    impl ProjectServiceBinder for RecordingBinder {
        fn ensure(
            &self,
            service: &str,
            disable_on_destroy: bool,
        ) -> Result<ServiceBinding, ServiceError> {
            self.ensured.borrow_mut().push(service.to_string());
            Ok(ServiceBinding {
                service: service.to_string(),
                disable_on_destroy,
            })
        }
    }

    /// Creator that echoes the requested name, optionally transformed.
    struct EchoCreator {
        /// Optional confirmed-name override returned instead of the request.
        confirm_as: Option<String>,
        /// Requests seen by the creator, in call order.
        requests: RefCell<Vec<CreateDatabaseRequest>>,
    }

    impl EchoCreator {
        /// Creates a creator confirming the requested name unchanged.
        fn new() -> Self {
            Self {
                confirm_as: None,
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl ResourceCreator for EchoCreator {
        fn create_database(
            &self,
            request: &CreateDatabaseRequest,
            _binding: &ServiceBinding,
        ) -> Result<ConfirmedResource, CreateError> {
            self.requests.borrow_mut().push(request.clone());
            let name = self
                .confirm_as
                .clone()
                .unwrap_or_else(|| request.name.as_str().to_string());
            Ok(ConfirmedResource {
                name,
            })
        }
    }

    /// Sink that captures published bundles.
    struct CaptureSink {
        /// Bundles published through this sink, in call order.
        published: RefCell<Vec<ExportBundle>>,
    }

    impl CaptureSink {
        /// Creates an empty capture sink.
        fn new() -> Self {
            Self {
                published: RefCell::new(Vec::new()),
            }
        }
    }

    impl ExportSink for CaptureSink {
        fn publish(&self, bundle: &ExportBundle) -> Result<PublishReceipt, SinkError> {
            self.published.borrow_mut().push(bundle.clone());
            let content_hash = hash_canonical_json(DEFAULT_HASH_ALGORITHM, bundle)
                .map_err(|err| SinkError::PublishFailed(err.to_string()))?;
            Ok(PublishReceipt {
                sink: "capture".to_string(),
                content_hash,
                published_at: Timestamp::Logical(1),
            })
        }
    }

    /// Returns the end-to-end scenario request.
    fn scenario_request() -> ProvisionRequest {
        ProvisionRequest {
            database_cluster: "postgres/main-instance/db.internal/5432".to_string(),
            name: "app/prod".to_string(),
            deletion_policy: DeletionPolicy::Abandon,
            service: "sqladmin.googleapis.com".to_string(),
            disable_on_destroy: false,
        }
    }

    #[test]
    fn provision_runs_full_scenario() {
        let provisioner = Provisioner::new(RecordingBinder::new(), EchoCreator::new(), CaptureSink::new());
        let outcome = provisioner.provision(&scenario_request()).unwrap();
        assert_eq!(outcome.requested_name.as_str(), "app--prod");
        assert_eq!(outcome.confirmed_name, "app--prod");
        assert_eq!(outcome.bundle.id, "postgres/main-instance/app--prod/db.internal/5432");
        assert_eq!(outcome.bundle.name, "app--prod");
        assert_eq!(outcome.bundle.host, "db.internal");
        assert_eq!(outcome.bundle.port, "5432");
        assert_eq!(outcome.bundle.protocol, "postgres");
        assert_eq!(outcome.bundle.url, "postgres://db.internal:5432/app--prod");
    }

    #[test]
    fn provision_establishes_service_before_creation() {
        let binder = RecordingBinder::new();
        let provisioner = Provisioner::new(binder, EchoCreator::new(), CaptureSink::new());
        provisioner.provision(&scenario_request()).unwrap();
        assert_eq!(
            provisioner.binder.ensured.borrow().as_slice(),
            ["sqladmin.googleapis.com".to_string()]
        );
    }

    #[test]
    fn provision_sends_normalized_name_and_parsed_instance() {
        let provisioner = Provisioner::new(RecordingBinder::new(), EchoCreator::new(), CaptureSink::new());
        provisioner.provision(&scenario_request()).unwrap();
        let requests = provisioner.creator.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].name.as_str(), "app--prod");
        assert_eq!(requests[0].instance, "main-instance");
        assert_eq!(requests[0].deletion_policy, DeletionPolicy::Abandon);
    }

    #[test]
    fn provision_uses_confirmed_name_for_exports() {
        let creator = EchoCreator {
            confirm_as: Some("app--prod-renamed".to_string()),
            requests: RefCell::new(Vec::new()),
        };
        let provisioner = Provisioner::new(RecordingBinder::new(), creator, CaptureSink::new());
        let outcome = provisioner.provision(&scenario_request()).unwrap();
        assert_eq!(outcome.confirmed_name, "app--prod-renamed");
        assert_eq!(outcome.bundle.name, "app--prod-renamed");
        assert_eq!(
            outcome.bundle.id,
            "postgres/main-instance/app--prod-renamed/db.internal/5432"
        );
        assert_eq!(outcome.bundle.url, "postgres://db.internal:5432/app--prod-renamed");
    }

    #[test]
    fn provision_rejects_malformed_cluster() {
        let provisioner = Provisioner::new(RecordingBinder::new(), EchoCreator::new(), CaptureSink::new());
        let mut request = scenario_request();
        request.database_cluster = "postgres/main-instance/db.internal".to_string();
        let error = provisioner.provision(&request).unwrap_err();
        assert!(matches!(error, ProvisionError::Descriptor(_)));
        assert!(provisioner.creator.requests.borrow().is_empty(), "no creation after parse failure");
    }

    #[test]
    fn provision_rejects_empty_name() {
        let provisioner = Provisioner::new(RecordingBinder::new(), EchoCreator::new(), CaptureSink::new());
        let mut request = scenario_request();
        request.name = String::new();
        let error = provisioner.provision(&request).unwrap_err();
        assert!(matches!(error, ProvisionError::EmptyResourceName));
    }

    #[test]
    fn plan_resolves_without_side_effects() {
        let plan = ProvisionPlan::resolve(&scenario_request()).unwrap();
        assert_eq!(plan.descriptor.protocol, "postgres");
        assert_eq!(plan.requested_name.as_str(), "app--prod");
        assert_eq!(plan.service, "sqladmin.googleapis.com");
    }
}

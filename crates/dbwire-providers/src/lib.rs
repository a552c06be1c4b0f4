// crates/dbwire-providers/src/lib.rs
// ============================================================================
// Module: dbwire Providers
// Description: Reference collaborator implementations and registry utilities.
// Purpose: Provide deterministic collaborators aligned with dbwire core.
// Dependencies: dbwire-core, serde, serde_json
// ============================================================================

//! ## Overview
//! This crate ships reference implementations of the dbwire collaborator
//! interfaces (project service binder, resource creator, export sinks) and a
//! registry that routes creation requests by creator identifier. The
//! implementations are deterministic and enforce strict validation and size
//! limits; cloud provider backends live outside this workspace and plug in
//! through the same interfaces.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod local;
pub mod registry;
pub mod sink;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use local::LocalCreatorConfig;
pub use local::LocalProjectServiceBinder;
pub use local::LocalResourceCreator;
pub use registry::CreatorAccessPolicy;
pub use registry::CreatorRegistry;
pub use sink::JsonExportSink;
pub use sink::MemoryExportSink;

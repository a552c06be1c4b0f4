//! Shared fixtures for dbwire-config integration tests.
// crates/dbwire-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Fixtures
// Description: Temp-file helpers for loading configuration under test.
// Purpose: Keep integration tests on the public load path.
// =============================================================================

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Fixture setup failures should abort the test."
)]

use std::path::PathBuf;

use dbwire_config::ConfigError;
use dbwire_config::ProvisionConfig;
use tempfile::TempDir;

/// Minimal valid configuration file contents.
pub const MINIMAL_TOML: &str = r#"
[database]
cluster = "postgres/main-instance/db.internal/5432"
name = "app/prod"
"#;

/// Writes `contents` to a config file inside a fresh temp dir and loads it.
///
/// Returns the temp dir alongside the result so the file outlives the load.
pub fn load_from_str(contents: &str) -> (TempDir, Result<ProvisionConfig, ConfigError>) {
    let dir = tempfile::tempdir().unwrap();
    let path: PathBuf = dir.path().join("dbwire.toml");
    std::fs::write(&path, contents).unwrap();
    let result = ProvisionConfig::load(Some(&path));
    (dir, result)
}

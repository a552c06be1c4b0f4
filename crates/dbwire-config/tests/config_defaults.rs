//! Config defaults and core validation tests for dbwire-config.
// crates/dbwire-config/tests/config_defaults.rs
// =============================================================================
// Module: Config Defaults and Core Validation Tests
// Description: Validate default behavior and config invariants via the load path.
// Purpose: Ensure minimal config is valid and critical invariants are enforced.
// =============================================================================

use dbwire_core::DeletionPolicy;

mod common;

type TestResult = Result<(), String>;

#[test]
fn minimal_config_loads_and_validates() -> TestResult {
    let (_dir, result) = common::load_from_str(common::MINIMAL_TOML);
    let config = result.map_err(|err| err.to_string())?;
    let request = config.to_request().map_err(|err| err.to_string())?;
    if request.database_cluster != "postgres/main-instance/db.internal/5432" {
        return Err("cluster should load verbatim".to_string());
    }
    if request.name != "app/prod" {
        return Err("name should load verbatim".to_string());
    }
    Ok(())
}

#[test]
fn service_defaults_to_sqladmin() -> TestResult {
    let (_dir, result) = common::load_from_str(common::MINIMAL_TOML);
    let config = result.map_err(|err| err.to_string())?;
    if config.service.name != "sqladmin.googleapis.com" {
        return Err("service.name should default to sqladmin.googleapis.com".to_string());
    }
    if config.service.disable_on_destroy {
        return Err("service.disable_on_destroy should default to false".to_string());
    }
    Ok(())
}

#[test]
fn deletion_policy_defaults_to_abandon() -> TestResult {
    let (_dir, result) = common::load_from_str(common::MINIMAL_TOML);
    let config = result.map_err(|err| err.to_string())?;
    if config.database.deletion_policy != DeletionPolicy::Abandon {
        return Err("deletion_policy should default to abandon".to_string());
    }
    Ok(())
}

#[test]
fn exports_path_defaults_to_none() -> TestResult {
    let (_dir, result) = common::load_from_str(common::MINIMAL_TOML);
    let config = result.map_err(|err| err.to_string())?;
    if config.exports.path.is_some() {
        return Err("exports.path should default to none".to_string());
    }
    Ok(())
}

#[test]
fn deletion_policy_parses_delete() -> TestResult {
    let toml = r#"
[database]
cluster = "postgres/main-instance/db.internal/5432"
name = "app/prod"
deletion_policy = "delete"
"#;
    let (_dir, result) = common::load_from_str(toml);
    let config = result.map_err(|err| err.to_string())?;
    if config.database.deletion_policy != DeletionPolicy::Delete {
        return Err("deletion_policy = \"delete\" should parse".to_string());
    }
    Ok(())
}

#[test]
fn missing_name_fails_load() -> TestResult {
    let toml = r#"
[database]
cluster = "postgres/main-instance/db.internal/5432"
"#;
    let (_dir, result) = common::load_from_str(toml);
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains("database.name") {
                Ok(())
            } else {
                Err(format!("error {message} should name database.name"))
            }
        }
        Ok(_) => Err("config without database.name should fail".to_string()),
    }
}

#[test]
fn load_rejects_missing_file() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("absent.toml");
    match dbwire_config::ProvisionConfig::load(Some(&path)) {
        Err(dbwire_config::ConfigError::Io(_)) => Ok(()),
        Err(other) => Err(format!("expected io error, got {other}")),
        Ok(_) => Err("loading an absent file should fail".to_string()),
    }
}

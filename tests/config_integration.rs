//! Integration tests for configuration management
//!
//! These tests validate that configuration is read from the documented
//! environment variables and that bad values are rejected.

use milvus_secure_init::config::{
    InitConfig, APP_USER_ENV, HOST_ENV, OUTPUT_DIR_ENV, PORT_ENV, REQUEST_TIMEOUT_ENV,
};
use milvus_secure_init::{Error, Result};
use std::env;
use std::path::PathBuf;
use std::sync::Mutex;

// Use a mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const ALL_VARS: [&str; 5] = [HOST_ENV, PORT_ENV, OUTPUT_DIR_ENV, APP_USER_ENV, REQUEST_TIMEOUT_ENV];

/// Restores the saved environment when dropped
struct EnvSnapshot(Vec<(&'static str, Option<String>)>);

impl EnvSnapshot {
    fn take() -> Self {
        let saved = ALL_VARS.iter().map(|name| (*name, env::var(name).ok())).collect();
        for name in ALL_VARS {
            env::remove_var(name);
        }
        Self(saved)
    }
}

impl Drop for EnvSnapshot {
    fn drop(&mut self) {
        for (name, value) in &self.0 {
            match value {
                Some(value) => env::set_var(name, value),
                None => env::remove_var(name),
            }
        }
    }
}

#[test]
fn test_config_defaults_integration() -> Result<()> {
    let _guard = ENV_MUTEX.lock().unwrap();
    let _env = EnvSnapshot::take();

    let config = InitConfig::from_env()?;
    assert_eq!(config.host, "localhost");
    assert_eq!(config.port, 19530);
    assert_eq!(config.output_dir, PathBuf::from("."));
    assert_eq!(config.app_username, "app_user");
    assert_eq!(config.request_timeout_seconds, 10);
    config.validate()?;

    Ok(())
}

#[test]
fn test_config_environment_integration() -> Result<()> {
    let _guard = ENV_MUTEX.lock().unwrap();
    let _env = EnvSnapshot::take();

    env::set_var(HOST_ENV, "milvus-standalone");
    env::set_var(PORT_ENV, "29530");
    env::set_var(OUTPUT_DIR_ENV, "/run/secrets");
    env::set_var(APP_USER_ENV, "rag_service");
    env::set_var(REQUEST_TIMEOUT_ENV, "30");

    let config = InitConfig::from_env()?;
    assert_eq!(config.host, "milvus-standalone");
    assert_eq!(config.port, 29530);
    assert_eq!(config.output_dir, PathBuf::from("/run/secrets"));
    assert_eq!(config.app_username, "rag_service");
    assert_eq!(config.request_timeout_seconds, 30);
    config.validate()?;

    // Only host and port come from the environment for the target
    assert_eq!(config.address(), "milvus-standalone:29530");

    Ok(())
}

#[test]
fn test_config_rejects_invalid_port() {
    let _guard = ENV_MUTEX.lock().unwrap();
    let _env = EnvSnapshot::take();

    for bad in ["invalid", "70000", "-1", ""] {
        env::set_var(PORT_ENV, bad);
        let result = InitConfig::from_env();
        assert!(matches!(result, Err(Error::Config(_))), "'{}' should be rejected", bad);
    }
}

#[test]
fn test_config_rejects_invalid_timeout() {
    let _guard = ENV_MUTEX.lock().unwrap();
    let _env = EnvSnapshot::take();

    env::set_var(REQUEST_TIMEOUT_ENV, "soon");
    assert!(InitConfig::from_env().is_err());

    env::set_var(REQUEST_TIMEOUT_ENV, "0");
    let config = InitConfig::from_env().unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_catches_bad_username_from_env() {
    let _guard = ENV_MUTEX.lock().unwrap();
    let _env = EnvSnapshot::take();

    env::set_var(APP_USER_ENV, "app-user");
    let config = InitConfig::from_env().unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("app_username"));
}

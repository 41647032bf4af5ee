use serial_test::serial;
use std::{env, panic};
use stellar_burgers::{
    AppConfig,
    config::{DEFAULT_API_URL, DEFAULT_BIND_ADDR, DEFAULT_CREDENTIALS_PATH, Env},
};

const CONFIG_VARS: [&str; 4] = ["APP_ENV", "BIND_ADDR", "BURGER_API_URL", "CREDENTIALS_PATH"];

// --- Setup/Teardown Utilities ---

/// Runs `test` with the config variables cleared, restoring them afterwards.
fn run_with_clean_env<T, R>(test: T) -> R
where
    T: FnOnce() -> R + panic::UnwindSafe,
{
    let originals: Vec<(&str, Option<String>)> = CONFIG_VARS
        .iter()
        .map(|&var| (var, env::var(var).ok()))
        .collect();

    unsafe {
        for var in CONFIG_VARS {
            env::remove_var(var);
        }
    }

    let result = panic::catch_unwind(test);

    for (key, original_value) in originals {
        unsafe {
            match original_value {
                Some(val) => env::set_var(key, val),
                None => env::remove_var(key),
            }
        }
    }

    match result {
        Ok(value) => value,
        Err(e) => panic::resume_unwind(e),
    }
}

// --- Tests ---

#[test]
#[serial]
fn test_app_config_local_env_defaults() {
    let config = run_with_clean_env(AppConfig::load);

    assert_eq!(config.env, Env::Local);
    assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
    assert_eq!(config.api_url, DEFAULT_API_URL);
    assert_eq!(config.credentials_path, DEFAULT_CREDENTIALS_PATH);
}

#[test]
#[serial]
fn test_app_config_local_env_overrides() {
    let config = run_with_clean_env(|| {
        unsafe {
            env::set_var("BIND_ADDR", "127.0.0.1:8080");
            env::set_var("BURGER_API_URL", "http://localhost:9999/api");
        }
        AppConfig::load()
    });

    assert_eq!(config.bind_addr, "127.0.0.1:8080");
    assert_eq!(config.api_url, "http://localhost:9999/api");
}

#[test]
#[serial]
fn test_app_config_production_fail_fast() {
    let result = run_with_clean_env(|| {
        panic::catch_unwind(|| {
            unsafe {
                env::set_var("APP_ENV", "production");
                env::set_var("BURGER_API_URL", "https://burgers.example.com/api");
            }
            // CREDENTIALS_PATH is missing
            AppConfig::load()
        })
    });

    assert!(
        result.is_err(),
        "Production config loading should panic on missing settings"
    );
}

#[test]
#[serial]
fn test_app_config_production_complete() {
    let config = run_with_clean_env(|| {
        unsafe {
            env::set_var("APP_ENV", "production");
            env::set_var("BURGER_API_URL", "https://burgers.example.com/api");
            env::set_var("CREDENTIALS_PATH", "/var/lib/burgers/credentials.json");
        }
        AppConfig::load()
    });

    assert_eq!(config.env, Env::Production);
    assert_eq!(config.credentials_path, "/var/lib/burgers/credentials.json");
}

#[test]
fn test_default_config_is_environment_independent() {
    let config = AppConfig::default();

    assert_eq!(config.env, Env::Local);
    assert_eq!(config.bind_addr, "127.0.0.1:0");
}

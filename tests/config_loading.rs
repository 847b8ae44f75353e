//! Configuration loading integration tests
//!
//! Covers the SESSION_GATE_CONFIG file lookup and environment precedence.

use session_gate::config::{ConfigLoader, loader::CONFIG_PATH_ENV, settings::API_URL_ENV};
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Environment variables are process-wide
static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

fn config_file(contents: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "{}", contents).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

/// Run `f` with `vars` set, restoring the previous values afterwards
fn with_env<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
    let originals: Vec<_> = vars
        .iter()
        .map(|(key, _)| (key.to_string(), std::env::var(key).ok()))
        .collect();

    unsafe {
        for (key, value) in vars {
            std::env::set_var(key, value);
        }
    }

    f();

    unsafe {
        for (key, original) in originals {
            match original {
                Some(value) => std::env::set_var(&key, value),
                None => std::env::remove_var(&key),
            }
        }
    }
}

#[test]
fn test_config_env_var_loading() {
    let _lock = ENV_TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

    let temp_file = config_file(
        r#"
[api]
base_url = "https://api.example.com/v1"
refresh_path = "/auth/refresh"

[session]
cookie_max_age = 3600
expiry_messages = ["jwt expired"]

[server]
host = "127.0.0.1"
port = 9999
        "#,
    );

    with_env(
        &[(CONFIG_PATH_ENV, temp_file.path().to_str().unwrap())],
        || {
            let config_path = ConfigLoader::get_config_path();
            assert_eq!(config_path.as_deref(), Some(temp_file.path()));

            let settings = ConfigLoader::new().load(config_path.as_deref()).unwrap();
            assert_eq!(settings.api.base_url, "https://api.example.com/v1");
            assert_eq!(settings.api.refresh_path, "/auth/refresh");
            assert_eq!(settings.session.cookie_max_age, 3600);
            assert_eq!(settings.session.expiry_messages, vec!["jwt expired"]);
            assert_eq!(settings.session.token_cookie, "nextauth.token");
            assert_eq!(settings.server.port, 9999);
        },
    );
}

#[test]
fn test_missing_config_file_falls_through() {
    let _lock = ENV_TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

    with_env(&[(CONFIG_PATH_ENV, "/nonexistent/session-gate.toml")], || {
        let config_path = ConfigLoader::get_config_path();
        assert_ne!(
            config_path.as_deref(),
            Some(std::path::Path::new("/nonexistent/session-gate.toml"))
        );
    });
}

#[test]
fn test_api_url_env_overrides_file() {
    let _lock = ENV_TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

    let temp_file = config_file(
        r#"
[api]
base_url = "https://from-file.example.com"
        "#,
    );

    with_env(&[(API_URL_ENV, "https://from-env.example.com")], || {
        let settings = ConfigLoader::new().load(Some(temp_file.path())).unwrap();
        assert_eq!(settings.api.base_url, "https://from-env.example.com");
        assert_eq!(
            settings.base_url().unwrap().host_str(),
            Some("from-env.example.com")
        );
    });
}

#[test]
fn test_invalid_config_is_rejected() {
    let _lock = ENV_TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

    let temp_file = config_file(
        r#"
[api]
refresh_path = "refresh-token"
        "#,
    );
    assert!(ConfigLoader::new().load(Some(temp_file.path())).is_err());

    let temp_file = config_file("invalid toml content [[[");
    assert!(ConfigLoader::new().load(Some(temp_file.path())).is_err());
}

#[test]
fn test_server_env_overrides() {
    let _lock = ENV_TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

    with_env(
        &[
            ("SESSION_GATE_HOST", "127.0.0.1"),
            ("SESSION_GATE_PORT", "8181"),
            ("LOG_LEVEL", "warn"),
        ],
        || {
            let settings = ConfigLoader::new().load(None).unwrap();
            assert_eq!(settings.server.host, "127.0.0.1");
            assert_eq!(settings.server.port, 8181);
            assert_eq!(settings.logging.level, "warn");
        },
    );
}

#[test]
fn test_env_matching_default_still_beats_file() {
    let _lock = ENV_TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

    let temp_file = config_file(
        r#"
[server]
port = 8080

[logging]
level = "error"
verbose = false
        "#,
    );

    with_env(
        &[
            ("SESSION_GATE_PORT", "3000"),
            ("LOG_LEVEL", "info"),
            ("VERBOSE", "true"),
        ],
        || {
            let settings = ConfigLoader::new().load(Some(temp_file.path())).unwrap();
            assert_eq!(settings.server.port, 3000);
            assert_eq!(settings.logging.level, "info");
            assert!(settings.logging.verbose);
        },
    );
}

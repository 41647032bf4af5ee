use std::env;

/// Public burger API used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "https://norma.nomoreparties.space/api";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_CREDENTIALS_PATH: &str = ".stellar-burgers/credentials.json";

/// AppConfig
///
/// Holds the application's configuration. Loaded once at startup and immutable
/// afterwards; handlers pull it from the shared state via `FromRef`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Selects the log format and how strict loading is.
    pub env: Env,
    // Address the HTTP shell listens on.
    pub bind_addr: String,
    // Base URL of the burger REST API, without a trailing slash.
    pub api_url: String,
    // Where the access/refresh token pair is persisted between runs.
    pub credentials_path: String,
}

/// Env
///
/// The runtime context: local development or a deployed instance.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// default
    ///
    /// Non-panicking configuration for test setup, independent of the environment.
    fn default() -> Self {
        Self {
            env: Env::Local,
            bind_addr: "127.0.0.1:0".to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            credentials_path: env::temp_dir()
                .join("stellar-burgers-test/credentials.json")
                .to_string_lossy()
                .into_owned(),
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables (after `.env` has been
    /// applied by the caller).
    ///
    /// # Panics
    /// In production, panics when `BURGER_API_URL` or `CREDENTIALS_PATH` is missing, so
    /// a deployment never silently talks to the public API or writes tokens to the
    /// working directory.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        match env {
            Env::Local => Self {
                env: Env::Local,
                bind_addr,
                api_url: env::var("BURGER_API_URL")
                    .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
                credentials_path: env::var("CREDENTIALS_PATH")
                    .unwrap_or_else(|_| DEFAULT_CREDENTIALS_PATH.to_string()),
            },
            Env::Production => Self {
                env: Env::Production,
                bind_addr,
                api_url: env::var("BURGER_API_URL")
                    .expect("FATAL: BURGER_API_URL must be set in production."),
                credentials_path: env::var("CREDENTIALS_PATH")
                    .expect("FATAL: CREDENTIALS_PATH must be set in production."),
            },
        }
    }
}

use async_trait::async_trait;
use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use crate::models::AuthTokens;

/// CredentialError
///
/// Failures of the persistent token store.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("credential file i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("credential file is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("credential store lock poisoned")]
    Poisoned,
}

// 1. CredentialStore Contract
/// CredentialStore
///
/// Persists the access/refresh token pair outside the in-memory application state,
/// so a restarted client can resume its session. The HTTP API client reads from it
/// on every authenticated call and writes to it after a token refresh; the user
/// slice writes to it on login/registration and clears it on logout.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// The stored pair, or `None` when signed out.
    async fn load(&self) -> Result<Option<AuthTokens>, CredentialError>;

    /// Replaces the stored pair.
    async fn save(&self, tokens: &AuthTokens) -> Result<(), CredentialError>;

    /// Forgets the stored pair. Clearing an empty store is not an error.
    async fn clear(&self) -> Result<(), CredentialError>;
}

/// CredentialState
///
/// The concrete type used to share the credential store across the application.
pub type CredentialState = Arc<dyn CredentialStore>;

// 2. The File Implementation
/// FileCredentialStore
///
/// Keeps the pair as a small JSON document. Parent directories are created on the
/// first save.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Result<Option<AuthTokens>, CredentialError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, tokens: &AuthTokens) -> Result<(), CredentialError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let bytes = serde_json::to_vec_pretty(tokens)?;
        tokio::fs::write(&self.path, bytes).await?;
        tracing::debug!(path = %self.path.display(), "credentials saved");
        Ok(())
    }

    async fn clear(&self) -> Result<(), CredentialError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "credentials cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// 3. The In-Memory Implementation (For Tests)
/// MemoryCredentialStore
///
/// Holds the pair in memory only. Used by tests and by callers that do not want the
/// session to outlive the process.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    tokens: Mutex<Option<AuthTokens>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens(tokens: AuthTokens) -> Self {
        Self {
            tokens: Mutex::new(Some(tokens)),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load(&self) -> Result<Option<AuthTokens>, CredentialError> {
        let guard = self.tokens.lock().map_err(|_| CredentialError::Poisoned)?;
        Ok(guard.clone())
    }

    async fn save(&self, tokens: &AuthTokens) -> Result<(), CredentialError> {
        let mut guard = self.tokens.lock().map_err(|_| CredentialError::Poisoned)?;
        *guard = Some(tokens.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), CredentialError> {
        let mut guard = self.tokens.lock().map_err(|_| CredentialError::Poisoned)?;
        *guard = None;
        Ok(())
    }
}

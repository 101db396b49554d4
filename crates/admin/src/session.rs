//! Session token storage for the dashboard.
//!
//! The token lives in memory and, when a path is configured, in a small
//! file so a restarted dashboard stays logged in until the server-side
//! expiry. Clearing the session removes both.

use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};

/// Shared handle to the dashboard's session token.
#[derive(Debug, Clone)]
pub struct Session {
    inner: std::sync::Arc<SessionInner>,
}

#[derive(Debug)]
struct SessionInner {
    token: RwLock<Option<String>>,
    path: Option<PathBuf>,
}

impl Session {
    /// A session that lives only in memory.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            inner: std::sync::Arc::new(SessionInner {
                token: RwLock::new(None),
                path: None,
            }),
        }
    }

    /// A session persisted to a token file.
    ///
    /// An existing token in the file is loaded; read errors just mean
    /// starting logged out.
    #[must_use]
    pub fn with_file(path: PathBuf) -> Self {
        let token = std::fs::read_to_string(&path)
            .ok()
            .map(|raw| raw.trim().to_string())
            .filter(|t| !t.is_empty());

        Self {
            inner: std::sync::Arc::new(SessionInner {
                token: RwLock::new(token),
                path: Some(path),
            }),
        }
    }

    /// The current token, if logged in.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.inner
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether a token is currently held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Store a freshly issued token, persisting it when configured.
    pub fn set_token(&self, token: String) {
        if let Some(path) = &self.inner.path {
            if let Err(err) = std::fs::write(path, &token) {
                tracing::warn!(path = %path.display(), error = %err, "Failed to persist session token");
            }
        }
        *self
            .inner
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    /// Forget the token, in memory and on disk.
    pub fn clear(&self) {
        if let Some(path) = &self.inner.path {
            if path.exists() {
                if let Err(err) = std::fs::remove_file(path) {
                    tracing::warn!(path = %path.display(), error = %err, "Failed to remove session token file");
                }
            }
        }
        *self
            .inner
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn scratch_file() -> PathBuf {
        std::env::temp_dir().join(format!("courtside-session-{}", Uuid::new_v4()))
    }

    #[test]
    fn test_in_memory_session_round_trip() {
        let session = Session::in_memory();
        assert!(!session.is_authenticated());

        session.set_token("abc123".to_string());
        assert_eq!(session.token().as_deref(), Some("abc123"));

        session.clear();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_file_session_persists_and_clears() {
        let path = scratch_file();

        let session = Session::with_file(path.clone());
        session.set_token("tok-1".to_string());

        // A second session over the same file picks the token up
        let reloaded = Session::with_file(path.clone());
        assert_eq!(reloaded.token().as_deref(), Some("tok-1"));

        reloaded.clear();
        assert!(!path.exists());

        let after_clear = Session::with_file(path);
        assert!(!after_clear.is_authenticated());
    }
}

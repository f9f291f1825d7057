//! Client-side session resolution.
//!
//! Components that need to know who is signed in take an
//! `Arc<dyn SessionProvider>` instead of reading persisted state themselves.
//! Changes are published through a single `watch` channel.

use std::path::{Path, PathBuf};

use tokio::sync::watch;

use crate::{
    config::Config,
    error::AppResult,
    models::{Session, UserId},
};

/// Source of the current signed-in user
pub trait SessionProvider: Send + Sync {
    /// The active session, if any
    fn current(&self) -> Option<Session>;

    /// Receiver that observes every sign-in and sign-out
    fn subscribe(&self) -> watch::Receiver<Option<Session>>;

    /// The active user's ID, if any
    fn current_user_id(&self) -> Option<UserId> {
        self.current().map(|session| session.user_id)
    }
}

/// Session holder persisted as a JSON file
///
/// Without a path the session only lives for the lifetime of the store.
pub struct SessionStore {
    path: Option<PathBuf>,
    current: watch::Sender<Option<Session>>,
}

impl SessionStore {
    /// Creates a store that keeps the session in memory only
    pub fn in_memory() -> Self {
        Self {
            path: None,
            current: watch::Sender::new(None),
        }
    }

    /// Opens the store at the configured `SESSION_PATH`
    pub async fn from_config(config: &Config) -> AppResult<Self> {
        Self::open(&config.session_path).await
    }

    /// Opens a file-backed store, restoring a previously saved session
    ///
    /// A missing file means nobody is signed in. An unreadable session file is
    /// logged and ignored so a corrupt file never locks the user out.
    pub async fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();

        let restored = match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice::<Session>(&bytes) {
                Ok(session) => Some(session),
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        path = %path.display(),
                        "Ignoring unreadable session file"
                    );
                    None
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        if let Some(session) = &restored {
            tracing::debug!(user_id = %session.user_id, "Restored session");
        }

        Ok(Self {
            path: Some(path),
            current: watch::Sender::new(restored),
        })
    }

    /// Persists and publishes a new session
    pub async fn sign_in(&self, session: Session) -> AppResult<()> {
        if let Some(path) = &self.path {
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            let json = serde_json::to_vec_pretty(&session)?;
            tokio::fs::write(path, json).await?;
        }

        tracing::info!(user_id = %session.user_id, "Session started");
        self.current.send_replace(Some(session));
        Ok(())
    }

    /// Clears the persisted session and publishes the sign-out
    pub async fn sign_out(&self) -> AppResult<()> {
        if let Some(path) = &self.path {
            match tokio::fs::remove_file(path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }

        if let Some(previous) = self.current.send_replace(None) {
            tracing::info!(user_id = %previous.user_id, "Session ended");
        }
        Ok(())
    }
}

impl SessionProvider for SessionStore {
    fn current(&self) -> Option<Session> {
        self.current.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.current.subscribe()
    }
}

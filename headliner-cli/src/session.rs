//! Session gate backed by a JSON file.
//!
//! The auth provider is external; the CLI only needs to know whether a session
//! exists and to hear about it changing. Presence of a readable session file
//! with a non-blank token is "signed in". Everything else is "signed out".

use chrono::{DateTime, Utc};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors from writing or watching the session file.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session file {path} has no parent directory")]
    NoParent { path: String },

    #[error("Session IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Session watcher error: {0}")]
    Watch(#[from] notify::Error),
}

/// A signed-in marker issued by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(access_token: impl Into<String>, email: Option<String>) -> Self {
        Self {
            access_token: access_token.into(),
            email,
            created_at: Utc::now(),
        }
    }
}

/// Reads, writes and watches the session file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/headliner/session.json`, when the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("headliner").join("session.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The current session, or `None` when signed out.
    ///
    /// A corrupt file counts as signed out and is reported at warn level.
    pub fn current(&self) -> Option<Session> {
        match self.load() {
            Ok(session) => session,
            Err(e) => {
                warn!("Ignoring unreadable session file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    /// Read the session file, keeping "absent" and "unreadable" apart.
    fn load(&self) -> Result<Option<Session>, SessionError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No session at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let session: Session = serde_json::from_str(&content)?;
        Ok(Some(session).filter(|s| !s.access_token.trim().is_empty()))
    }

    /// Replace the session file atomically.
    ///
    /// Watchers only ever see the old file or the complete new one.
    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        let parent = self.parent_dir()?;
        std::fs::create_dir_all(&parent)?;

        let mut tmp = NamedTempFile::new_in(&parent)?;
        serde_json::to_writer_pretty(&mut tmp, session)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    /// Remove the session file. Returns whether a file was there.
    pub fn clear(&self) -> Result<bool, SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Call `on_change` with the re-read session whenever the file changes.
    ///
    /// Notifications stop when the returned subscription is dropped.
    pub fn subscribe<F>(&self, on_change: F) -> Result<SessionSubscription, SessionError>
    where
        F: Fn(Option<Session>) + Send + 'static,
    {
        let parent = self.parent_dir()?;
        std::fs::create_dir_all(&parent)?;

        let file_name = self.path.file_name().map(|n| n.to_os_string());
        let store = self.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                let Ok(event) = res else {
                    return;
                };
                // Our own reads would otherwise feed back as access events.
                if matches!(event.kind, EventKind::Access(_)) {
                    return;
                }
                let touches_session = event
                    .paths
                    .iter()
                    .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name);
                if !touches_session {
                    return;
                }
                // A file that fails to parse is mid-replacement by another
                // writer, not a sign-out.
                match store.load() {
                    Ok(session) => on_change(session),
                    Err(e) => debug!("Skipping unreadable session change: {}", e),
                }
            },
            Config::default(),
        )?;
        watcher.watch(&parent, RecursiveMode::NonRecursive)?;
        debug!("Watching {} for session changes", self.path.display());

        Ok(SessionSubscription { _watcher: watcher })
    }

    fn parent_dir(&self) -> Result<PathBuf, SessionError> {
        match self.path.parent() {
            Some(p) if p.as_os_str().is_empty() => Ok(PathBuf::from(".")),
            Some(p) => Ok(p.to_path_buf()),
            None => Err(SessionError::NoParent {
                path: self.path.display().to_string(),
            }),
        }
    }
}

/// Live session-change listener. Dropping it unsubscribes.
pub struct SessionSubscription {
    _watcher: RecommendedWatcher,
}

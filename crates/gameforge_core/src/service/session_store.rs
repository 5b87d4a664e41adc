//! Login session persistence.
//!
//! # Responsibility
//! - Load, save and clear the session stored under the auth key.
//!
//! # Invariants
//! - Stored usernames and tokens are trimmed and never blank.
//! - A corrupt or unreadable session is treated as logged out.

use crate::model::session::AuthSession;
use crate::repo::kv_repo::{KeyValueStore, StorageError, AUTH_STORAGE_KEY};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from session operations.
#[derive(Debug)]
pub enum SessionError {
    /// Username is blank after trim.
    BlankUsername,
    /// Token is blank after trim.
    BlankToken,
    /// Gateway failure while saving or clearing.
    Storage(StorageError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankUsername => write!(f, "username must not be blank"),
            Self::BlankToken => write!(f, "github token must not be blank"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StorageError> for SessionError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Session facade over a key-value gateway.
pub struct SessionStore<S: KeyValueStore> {
    gateway: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(gateway: S) -> Self {
        Self { gateway }
    }

    /// Returns the stored session, or `None` when logged out.
    pub fn load(&self) -> Option<AuthSession> {
        let raw = match self.gateway.get(AUTH_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(
                    "event=session_load module=session status=error error_code=read_failed error={}",
                    err
                );
                return None;
            }
        };

        match serde_json::from_str::<AuthSession>(&raw) {
            Ok(session) if is_complete(&session) => Some(session),
            Ok(_) => {
                warn!("event=session_load module=session status=error error_code=incomplete");
                None
            }
            Err(err) => {
                warn!(
                    "event=session_load module=session status=error error_code=decode_failed error={}",
                    err
                );
                None
            }
        }
    }

    /// Validates and persists new credentials.
    pub fn login(
        &self,
        username: &str,
        github_token: &str,
    ) -> Result<AuthSession, SessionError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(SessionError::BlankUsername);
        }
        let github_token = github_token.trim();
        if github_token.is_empty() {
            return Err(SessionError::BlankToken);
        }

        let session = AuthSession {
            username: username.to_string(),
            github_token: github_token.to_string(),
        };
        let encoded = serde_json::to_string(&session).map_err(StorageError::from)?;
        self.gateway.set(AUTH_STORAGE_KEY, &encoded)?;
        info!("event=session_login module=session status=ok");
        Ok(session)
    }

    /// Clears stored credentials. Logging out twice is fine.
    pub fn logout(&self) -> Result<(), SessionError> {
        self.gateway.remove(AUTH_STORAGE_KEY)?;
        info!("event=session_logout module=session status=ok");
        Ok(())
    }
}

fn is_complete(session: &AuthSession) -> bool {
    !session.username.trim().is_empty() && !session.github_token.trim().is_empty()
}

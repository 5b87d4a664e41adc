//! Login session credentials persisted under the auth key.

use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};

/// Username and GitHub access token entered on the login screen.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub username: String,
    pub github_token: String,
}

// Tokens must not leak into logs through `{:?}`.
impl Debug for AuthSession {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("username", &self.username)
            .field("github_token", &"<redacted>")
            .finish()
    }
}

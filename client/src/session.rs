//! Session holder — the signed-in identity triple and its durable store.
//!
//! The platform's authentication is a stub: there is no credential, token,
//! or expiry. A successful login resolves the actor's numeric id from the
//! backend and persists `{email, role, id}` as three string values in a
//! local JSON file. Every protected command's first action is to read that
//! file back; absence means "not signed in", nothing more is checked.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::api::Backend;
use crate::errors::{ClientError, Result};

/// Actor role. Donors and beneficiaries sign in as `user`; reviewers as
/// `institution`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Institution,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Institution => "institution",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "user" => Some(Role::User),
            "institution" => Some(Role::Institution),
            _ => None,
        }
    }
}

/// The ambient identity consulted by every protected flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub email: String,
    pub role: Role,
    pub id: i64,
}

impl Session {
    /// Gate for institution-only operations.
    pub fn require_institution(&self) -> Result<()> {
        match self.role {
            Role::Institution => Ok(()),
            Role::User => Err(ClientError::NotInstitution),
        }
    }
}

/// On-disk form: exactly three string values under fixed keys.
#[derive(Serialize, Deserialize)]
struct StoredSession {
    email: String,
    role: String,
    id: String,
}

/// File-backed store for the identity triple.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        SessionStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read the current session, if any. A missing file means signed out;
    /// an unreadable or stale-format file is treated the same way.
    pub fn current(&self) -> Result<Option<Session>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let stored: StoredSession = match serde_json::from_str(&raw) {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Ignoring unreadable session file {:?}: {e}", self.path);
                return Ok(None);
            }
        };

        let (role, id) = match (Role::from_tag(&stored.role), stored.id.parse::<i64>()) {
            (Some(role), Ok(id)) => (role, id),
            _ => {
                warn!("Ignoring session file {:?} with stale format", self.path);
                return Ok(None);
            }
        };

        Ok(Some(Session {
            email: stored.email,
            role,
            id,
        }))
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        let stored = StoredSession {
            email: session.email.clone(),
            role: session.role.as_str().to_string(),
            id: session.id.to_string(),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&stored)?)?;
        Ok(())
    }

    /// Clear the stored triple. Idempotent: a missing file is success.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Require a signed-in session; the CLI analogue of redirect-to-login.
pub fn require_session(store: &SessionStore) -> Result<Session> {
    store.current()?.ok_or(ClientError::NoSession)
}

/// Sign in: resolve the actor's numeric id from the backend, then persist
/// the triple. Any resolution failure leaves the store untouched.
pub async fn login(
    backend: &Backend,
    store: &SessionStore,
    email: &str,
    role: Role,
) -> Result<Session> {
    let id = match role {
        Role::User => backend.user_by_email(email).await?.id,
        // No lookup-by-email endpoint exists for institutions; scan the
        // full listing for a case-sensitive exact match. O(n) in
        // institution count — workable only at small scale.
        Role::Institution => {
            let institutions = backend.institutions().await?;
            institutions
                .iter()
                .find(|inst| inst.email == email)
                .map(|inst| inst.id)
                .ok_or_else(|| {
                    ClientError::NotFound(format!("No institution registered with {email}"))
                })?
        }
    };

    let session = Session {
        email: email.to_string(),
        role,
        id,
    };
    store.save(&session)?;
    info!("Signed in as {} ({}, id {})", session.email, role.as_str(), id);
    Ok(session)
}

/// Sign out: clear the triple unconditionally.
pub fn logout(store: &SessionStore) -> Result<()> {
    store.clear()?;
    info!("Signed out");
    Ok(())
}

// ─────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────

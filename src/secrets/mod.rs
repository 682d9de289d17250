//! Scope-partitioned secret store client.
//!
//! Every operation addresses a secret by `(scope, name)`. The store owns all
//! state; implementations here are stateless round trips.
//!
//! # Architecture
//!
//! ```text
//! SecretStore (trait)
//!     │
//!     ├── StripeSecretStore   remote Apps Secret Store API
//!     │
//!     └── MemorySecretStore   in-process fake with the same contract
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let scope = Scope::user("usr_123");
//! store.create(&scope, "openai_api_key", "sk-abc", None).await?;
//! let secret = store.find(&scope, "openai_api_key").await?;
//! ```

pub mod http;
pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

pub use http::StripeSecretStore;
pub use memory::MemorySecretStore;

/// Unix timestamp in seconds.
pub type Timestamp = i64;

/// Partition a secret belongs to.
///
/// A secret is never visible outside its exact scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Scope {
    /// Visible only to one user of the account.
    User {
        /// User identifier supplied by the host.
        user: String,
    },
    /// Visible to every user of the account.
    Account,
}

impl Scope {
    /// Scope for a single user.
    pub fn user(user_id: impl Into<String>) -> Self {
        Self::User {
            user: user_id.into(),
        }
    }

    /// Form/query parameters encoding this scope on the wire.
    pub(crate) fn wire_params(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::User { user } => vec![
                ("scope[type]", "user".to_string()),
                ("scope[user]", user.clone()),
            ],
            Self::Account => vec![("scope[type]", "account".to_string())],
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User { user } => write!(f, "user:{user}"),
            Self::Account => write!(f, "account"),
        }
    }
}

/// A named secret within a scope.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret {
    /// Store-assigned identifier.
    pub id: String,
    /// Partition the secret lives in.
    pub scope: Scope,
    /// Name, unique within `scope`.
    pub name: String,
    /// Opaque credential material. `None` unless requested or just set.
    pub payload: Option<String>,
    /// Expiry as Unix seconds, if any.
    pub expires_at: Option<Timestamp>,
    /// Creation time as Unix seconds.
    pub created: Timestamp,
    /// Set on the secret returned by a delete.
    pub deleted: bool,
}

// Payloads must never reach logs.
impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secret")
            .field("id", &self.id)
            .field("scope", &self.scope)
            .field("name", &self.name)
            .field("payload", &self.payload.as_ref().map(|_| "<redacted>"))
            .field("expires_at", &self.expires_at)
            .field("created", &self.created)
            .field("deleted", &self.deleted)
            .finish()
    }
}

impl Secret {
    /// Returns `true` if the secret has expired at `now`.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// Client for a remote scope-partitioned secret store.
///
/// Reads are idempotent; writes are not and are never retried here.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Creates `(scope, name)`, replacing any existing secret with that key.
    async fn create(
        &self,
        scope: &Scope,
        name: &str,
        payload: &str,
        expires_at: Option<Timestamp>,
    ) -> Result<Secret, StoreError>;

    /// Finds `(scope, name)` with its payload.
    ///
    /// Returns [`StoreError::NotFound`] when nothing matches.
    async fn find(&self, scope: &Scope, name: &str) -> Result<Secret, StoreError>;

    /// Deletes `(scope, name)` and returns the removed secret.
    ///
    /// Returns [`StoreError::NotFound`] when nothing matches.
    async fn delete_where(&self, scope: &Scope, name: &str) -> Result<Secret, StoreError>;

    /// Lists every secret in `scope`, without payloads.
    async fn list(&self, scope: &Scope) -> Result<Vec<Secret>, StoreError>;
}

/// Renders an expiry for diagnostic display.
pub fn format_expiry(expires_at: Option<Timestamp>) -> String {
    match expires_at {
        None => "never".to_string(),
        Some(secs) => DateTime::<Utc>::from_timestamp(secs, 0)
            .map_or_else(|| secs.to_string(), |at| at.to_rfc3339()),
    }
}

/// Log line for a created secret.
pub fn describe_created(secret: &Secret) -> String {
    format!("Created secret {}", secret.name)
}

/// Log line for a found secret. The payload is masked.
pub fn describe_found(secret: &Secret) -> String {
    let payload = match secret.payload.as_deref() {
        Some(payload) => mask(payload),
        None => "<none>".to_string(),
    };
    format!(
        "Secret '{}' has value: '{}', expiration: {}",
        secret.name,
        payload,
        format_expiry(secret.expires_at)
    )
}

/// Log line for a deleted secret.
pub fn describe_deleted(secret: &Secret) -> String {
    format!("Secret '{}' has been deleted", secret.name)
}

/// Log lines for a listing: a count followed by one line per secret.
pub fn describe_list(secrets: &[Secret]) -> Vec<String> {
    let mut lines = vec![format!("{} secret(s) found", secrets.len())];
    lines.extend(secrets.iter().enumerate().map(|(i, secret)| {
        format!(
            "Secret {} name: '{}', expiration: {}",
            i + 1,
            secret.name,
            format_expiry(secret.expires_at)
        )
    }));
    lines
}

/// Keeps the first four characters of a credential.
fn mask(payload: &str) -> String {
    let visible: String = payload.chars().take(4).collect();
    if visible.len() == payload.len() {
        "*".repeat(payload.chars().count())
    } else {
        format!("{visible}...")
    }
}

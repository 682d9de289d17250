//! In-process [`SecretStore`] with the same contract as the remote store.
//!
//! Substituted for the HTTP store in tests. Expired secrets behave as if
//! they were never created and are purged on access.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use super::{Scope, Secret, SecretStore, Timestamp};
use crate::error::StoreError;

#[derive(Debug, Default)]
struct Inner {
    /// Live secrets in creation order.
    secrets: Vec<Secret>,
    next_id: u64,
}

impl Inner {
    fn purge_expired(&mut self, now: Timestamp) {
        self.secrets.retain(|s| !s.is_expired_at(now));
    }

    fn position(&self, scope: &Scope, name: &str) -> Option<usize> {
        self.secrets
            .iter()
            .position(|s| &s.scope == scope && s.name == name)
    }
}

/// Secret store held in memory.
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    inner: Mutex<Inner>,
}

impl MemorySecretStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live secrets across all scopes.
    pub fn len(&self) -> usize {
        let mut inner = self.lock();
        inner.purge_expired(Utc::now().timestamp());
        inner.secrets.len()
    }

    /// Returns `true` if no live secret exists in any scope.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl SecretStore for MemorySecretStore {
    async fn create(
        &self,
        scope: &Scope,
        name: &str,
        payload: &str,
        expires_at: Option<Timestamp>,
    ) -> Result<Secret, StoreError> {
        let now = Utc::now().timestamp();
        let mut inner = self.lock();
        inner.purge_expired(now);

        inner.next_id += 1;
        let secret = Secret {
            id: format!("appsecret_mem_{}", inner.next_id),
            scope: scope.clone(),
            name: name.to_string(),
            payload: Some(payload.to_string()),
            expires_at,
            created: now,
            deleted: false,
        };

        // Same key replaces the old secret.
        if let Some(index) = inner.position(scope, name) {
            inner.secrets.remove(index);
        }
        inner.secrets.push(secret.clone());
        Ok(secret)
    }

    async fn find(&self, scope: &Scope, name: &str) -> Result<Secret, StoreError> {
        let mut inner = self.lock();
        inner.purge_expired(Utc::now().timestamp());

        inner
            .position(scope, name)
            .map(|index| inner.secrets[index].clone())
            .ok_or(StoreError::NotFound)
    }

    async fn delete_where(&self, scope: &Scope, name: &str) -> Result<Secret, StoreError> {
        let mut inner = self.lock();
        inner.purge_expired(Utc::now().timestamp());

        let index = inner.position(scope, name).ok_or(StoreError::NotFound)?;
        let mut secret = inner.secrets.remove(index);
        secret.deleted = true;
        secret.payload = None;
        Ok(secret)
    }

    async fn list(&self, scope: &Scope) -> Result<Vec<Secret>, StoreError> {
        let mut inner = self.lock();
        inner.purge_expired(Utc::now().timestamp());

        Ok(inner
            .secrets
            .iter()
            .filter(|s| &s.scope == scope)
            .map(|s| Secret {
                payload: None,
                ..s.clone()
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAME: &str = "openai_api_key";

    #[tokio::test]
    async fn test_create_then_find_round_trips_payload() {
        let store = MemorySecretStore::new();
        let scope = Scope::user("usr_1");

        store.create(&scope, NAME, "sk-abc", None).await.unwrap();
        let found = store.find(&scope, NAME).await.unwrap();

        assert_eq!(found.payload.as_deref(), Some("sk-abc"));
        assert_eq!(found.scope, scope);
    }

    #[tokio::test]
    async fn test_find_never_created_is_not_found() {
        let store = MemorySecretStore::new();
        let err = store.find(&Scope::user("usr_1"), NAME).await.unwrap_err();
        assert_eq!(err, StoreError::NotFound);
    }

    #[tokio::test]
    async fn test_scopes_are_isolated() {
        let store = MemorySecretStore::new();
        store
            .create(&Scope::user("usr_1"), NAME, "sk-one", None)
            .await
            .unwrap();

        assert!(store
            .find(&Scope::user("usr_2"), NAME)
            .await
            .unwrap_err()
            .is_not_found());
        assert!(store
            .find(&Scope::Account, NAME)
            .await
            .unwrap_err()
            .is_not_found());
        assert!(store.list(&Scope::user("usr_2")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_replaces_existing_key() {
        let store = MemorySecretStore::new();
        let scope = Scope::user("usr_1");

        store.create(&scope, NAME, "sk-old", None).await.unwrap();
        store.create(&scope, NAME, "sk-new", None).await.unwrap();

        assert_eq!(store.len(), 1);
        let found = store.find(&scope, NAME).await.unwrap();
        assert_eq!(found.payload.as_deref(), Some("sk-new"));
    }

    #[tokio::test]
    async fn test_delete_then_find_is_not_found() {
        let store = MemorySecretStore::new();
        let scope = Scope::user("usr_1");
        store.create(&scope, NAME, "sk-abc", None).await.unwrap();

        let deleted = store.delete_where(&scope, NAME).await.unwrap();
        assert!(deleted.deleted);
        assert_eq!(deleted.name, NAME);

        assert!(store.find(&scope, NAME).await.unwrap_err().is_not_found());
        assert!(store
            .delete_where(&scope, NAME)
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn test_expired_secret_is_not_found() {
        let store = MemorySecretStore::new();
        let scope = Scope::user("usr_1");
        store.create(&scope, NAME, "sk-abc", Some(1)).await.unwrap();

        assert!(store.find(&scope, NAME).await.unwrap_err().is_not_found());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_list_preserves_order_and_omits_payloads() {
        let store = MemorySecretStore::new();
        let scope = Scope::user("usr_1");
        store.create(&scope, "first", "p1", None).await.unwrap();
        store.create(&scope, "second", "p2", None).await.unwrap();

        let listed = store.list(&scope).await.unwrap();
        let names: Vec<&str> = listed.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert!(listed.iter().all(|s| s.payload.is_none()));
    }
}

//! Secret store backed by the Stripe Apps Secret Store API.
//!
//! | op           | method | path                      |
//! |--------------|--------|---------------------------|
//! | create       | POST   | `/v1/apps/secrets`        |
//! | find         | GET    | `/v1/apps/secrets/find`   |
//! | delete_where | POST   | `/v1/apps/secrets/delete` |
//! | list         | GET    | `/v1/apps/secrets`        |

use async_trait::async_trait;
use serde::Deserialize;

use super::{Scope, Secret, SecretStore, Timestamp};
use crate::error::StoreError;
use crate::stripe::StripeClient;

const SECRETS_PATH: &str = "/v1/apps/secrets";
const FIND_PATH: &str = "/v1/apps/secrets/find";
const DELETE_PATH: &str = "/v1/apps/secrets/delete";

/// Page size requested when listing.
const LIST_PAGE_LIMIT: u32 = 100;

/// Upper bound on pages fetched by one `list` call.
const MAX_LIST_PAGES: usize = 100;

/// Secret as returned on the wire. `scope` may be omitted by the store.
#[derive(Deserialize)]
struct SecretResource {
    #[serde(default)]
    id: String,
    name: String,
    #[serde(default)]
    scope: Option<Scope>,
    #[serde(default)]
    payload: Option<String>,
    #[serde(default)]
    expires_at: Option<Timestamp>,
    #[serde(default)]
    created: Timestamp,
    #[serde(default)]
    deleted: bool,
}

impl SecretResource {
    fn into_secret(self, requested: &Scope) -> Secret {
        Secret {
            id: self.id,
            scope: self.scope.unwrap_or_else(|| requested.clone()),
            name: self.name,
            payload: self.payload,
            expires_at: self.expires_at,
            created: self.created,
            deleted: self.deleted,
        }
    }
}

#[derive(Deserialize)]
struct SecretList {
    data: Vec<SecretResource>,
    #[serde(default)]
    has_more: bool,
}

/// [`SecretStore`] over HTTP.
#[derive(Debug, Clone)]
pub struct StripeSecretStore {
    api: StripeClient,
}

impl StripeSecretStore {
    /// Wraps an authenticated API client.
    pub fn new(api: StripeClient) -> Self {
        Self { api }
    }
}

fn keyed_params(scope: &Scope, name: &str) -> Vec<(&'static str, String)> {
    let mut params = scope.wire_params();
    params.push(("name", name.to_string()));
    params
}

#[async_trait]
impl SecretStore for StripeSecretStore {
    async fn create(
        &self,
        scope: &Scope,
        name: &str,
        payload: &str,
        expires_at: Option<Timestamp>,
    ) -> Result<Secret, StoreError> {
        let mut params = keyed_params(scope, name);
        params.push(("payload", payload.to_string()));
        if let Some(expires_at) = expires_at {
            params.push(("expires_at", expires_at.to_string()));
        }

        let resource: SecretResource = self
            .api
            .send(self.api.post(SECRETS_PATH).form(&params))
            .await?;

        log::info!("Created secret '{}' in scope {}", name, scope);
        let mut secret = resource.into_secret(scope);
        if secret.payload.is_none() {
            secret.payload = Some(payload.to_string());
        }
        Ok(secret)
    }

    async fn find(&self, scope: &Scope, name: &str) -> Result<Secret, StoreError> {
        let mut params = keyed_params(scope, name);
        params.push(("expand[]", "payload".to_string()));

        let resource: SecretResource = self
            .api
            .send(self.api.get(FIND_PATH).query(&params))
            .await?;

        log::debug!("Found secret '{}' in scope {}", name, scope);
        Ok(resource.into_secret(scope))
    }

    async fn delete_where(&self, scope: &Scope, name: &str) -> Result<Secret, StoreError> {
        let params = keyed_params(scope, name);

        let resource: SecretResource = self
            .api
            .send(self.api.post(DELETE_PATH).form(&params))
            .await?;

        log::info!("Deleted secret '{}' from scope {}", name, scope);
        let mut secret = resource.into_secret(scope);
        secret.deleted = true;
        Ok(secret)
    }

    async fn list(&self, scope: &Scope) -> Result<Vec<Secret>, StoreError> {
        let mut secrets = Vec::new();
        let mut starting_after: Option<String> = None;

        for _ in 0..MAX_LIST_PAGES {
            let mut params = scope.wire_params();
            params.push(("limit", LIST_PAGE_LIMIT.to_string()));
            if let Some(cursor) = &starting_after {
                params.push(("starting_after", cursor.clone()));
            }

            let page: SecretList = self
                .api
                .send(self.api.get(SECRETS_PATH).query(&params))
                .await?;

            let cursor = page.data.last().map(|s| s.id.clone());
            if cursor.is_some() && cursor == starting_after {
                log::warn!("Secret list repeated cursor in scope {}, stopping", scope);
                break;
            }
            secrets.extend(page.data.into_iter().map(|r| r.into_secret(scope)));

            if !page.has_more || cursor.is_none() {
                break;
            }
            starting_after = cursor;
        }

        log::debug!("Listed {} secret(s) in scope {}", secrets.len(), scope);
        Ok(secrets)
    }
}

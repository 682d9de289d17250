//! Business record store (products).
//!
//! Only two calls are needed: retrieve by id and update the description.
//! Both are opaque remote calls; failures surface to the caller unchanged.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::stripe::StripeClient;

/// A product record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Record identifier.
    pub id: String,
    /// Display name, used as the generation subject.
    #[serde(default)]
    pub name: String,
    /// Current description.
    #[serde(default)]
    pub description: Option<String>,
    /// Creation time as Unix seconds.
    #[serde(default)]
    pub created: i64,
}

/// Remote store holding business records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Retrieves the record with `id`.
    async fn retrieve(&self, id: &str) -> Result<Record, StoreError>;

    /// Replaces the description of record `id` and returns the updated record.
    async fn update_description(&self, id: &str, description: &str)
        -> Result<Record, StoreError>;
}

/// [`RecordStore`] over the Stripe products API.
#[derive(Debug, Clone)]
pub struct StripeProductStore {
    api: StripeClient,
}

impl StripeProductStore {
    /// Wraps an authenticated API client.
    pub fn new(api: StripeClient) -> Self {
        Self { api }
    }
}

fn product_path(id: &str) -> String {
    format!("/v1/products/{id}")
}

#[async_trait]
impl RecordStore for StripeProductStore {
    async fn retrieve(&self, id: &str) -> Result<Record, StoreError> {
        self.api.send(self.api.get(&product_path(id))).await
    }

    async fn update_description(
        &self,
        id: &str,
        description: &str,
    ) -> Result<Record, StoreError> {
        let record: Record = self
            .api
            .send(
                self.api
                    .post(&product_path(id))
                    .form(&[("description", description)]),
            )
            .await?;
        log::info!("Updated description of product {}", id);
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deserializes_stripe_product() {
        let json = r#"{
            "id": "prod_123",
            "object": "product",
            "name": "Widget",
            "description": null,
            "created": 1700000000,
            "active": true
        }"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "prod_123");
        assert_eq!(record.name, "Widget");
        assert!(record.description.is_none());
        assert_eq!(record.created, 1_700_000_000);
    }

    #[test]
    fn test_product_path() {
        assert_eq!(product_path("prod_1"), "/v1/products/prod_1");
    }
}

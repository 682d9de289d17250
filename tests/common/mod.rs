//! Shared fixtures for integration tests.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use descriptify::notifications::{NotificationSink, RecordingSink};
use descriptify::{
    NotificationScheduler, OpenAiGenerator, Orchestrator, Record, RecordStore, SecretStore,
    StoreError, StripeClient, TextGenerator,
};

/// Platform key the mock store expects.
pub const PLATFORM_KEY: &str = "sk_test_platform";

/// Stripe client pointed at a mock server.
pub fn stripe_client(base_url: &str) -> StripeClient {
    StripeClient::new(base_url, PLATFORM_KEY, Duration::from_secs(5)).expect("client")
}

/// Generator pointed at a mock server.
pub fn generator(base_url: &str) -> OpenAiGenerator {
    OpenAiGenerator::new(base_url, "gpt-3.5-turbo", 100, Duration::from_secs(5)).expect("client")
}

/// Product with a fixed id and name.
pub fn widget() -> Record {
    Record {
        id: "prod_widget".to_string(),
        name: "Widget".to_string(),
        description: None,
        created: 1_700_000_000,
    }
}

/// Record store that keeps one product in memory.
#[derive(Debug)]
pub struct FakeRecordStore {
    record: Mutex<Option<Record>>,
    fail_updates: bool,
}

impl FakeRecordStore {
    pub fn with(record: Record) -> Self {
        Self {
            record: Mutex::new(Some(record)),
            fail_updates: false,
        }
    }

    pub fn failing(record: Record) -> Self {
        Self {
            record: Mutex::new(Some(record)),
            fail_updates: true,
        }
    }

    pub fn description(&self) -> Option<String> {
        self.record
            .lock()
            .unwrap()
            .as_ref()
            .and_then(|r| r.description.clone())
    }
}

#[async_trait]
impl RecordStore for FakeRecordStore {
    async fn retrieve(&self, id: &str) -> Result<Record, StoreError> {
        self.record
            .lock()
            .unwrap()
            .clone()
            .filter(|r| r.id == id)
            .ok_or(StoreError::NotFound)
    }

    async fn update_description(&self, id: &str, description: &str) -> Result<Record, StoreError> {
        if self.fail_updates {
            return Err(StoreError::Remote("500: Internal Server Error".to_string()));
        }
        let mut guard = self.record.lock().unwrap();
        let record = guard
            .as_mut()
            .filter(|r| r.id == id)
            .ok_or(StoreError::NotFound)?;
        record.description = Some(description.to_string());
        Ok(record.clone())
    }
}

/// Orchestrator wired to the given collaborators plus a recording sink.
pub fn orchestrator(
    secrets: Arc<dyn SecretStore>,
    generator: Arc<dyn TextGenerator>,
    records: Arc<dyn RecordStore>,
) -> (Orchestrator, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::new());
    let scheduler = NotificationScheduler::new(Arc::clone(&sink) as Arc<dyn NotificationSink>);
    (
        Orchestrator::new(secrets, generator, records, scheduler),
        sink,
    )
}

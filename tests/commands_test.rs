//! Host command output tests.

mod common;

use std::sync::Arc;

use common::{generator, orchestrator, widget, FakeRecordStore};
use descriptify::commands::{home, product};
use descriptify::constants::CREDENTIAL_SECRET_NAME;
use descriptify::{HostContext, MemorySecretStore, Scope, SecretStore};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn output(buf: Vec<u8>) -> String {
    String::from_utf8(buf).unwrap()
}

#[tokio::test]
async fn status_shows_banner_without_credential() {
    let server = MockServer::start().await;
    let (orchestrator, _sink) = orchestrator(
        Arc::new(MemorySecretStore::new()),
        Arc::new(generator(&server.uri())),
        Arc::new(FakeRecordStore::with(widget())),
    );

    let mut out = Vec::new();
    home::status(&orchestrator, &HostContext::new("usr_1", "Ada"), &mut out)
        .await
        .unwrap();

    let text = output(out);
    assert!(text.starts_with("Hi, Ada\n"));
    assert!(text.contains("add your OpenAI API key"));
    assert!(text.contains("com.example.descriptify"));
}

#[tokio::test]
async fn status_without_banner_when_credential_present() {
    let server = MockServer::start().await;
    let secrets = Arc::new(MemorySecretStore::new());
    secrets
        .create(&Scope::user("usr_1"), CREDENTIAL_SECRET_NAME, "sk-user", None)
        .await
        .unwrap();
    let (orchestrator, _sink) = orchestrator(
        secrets,
        Arc::new(generator(&server.uri())),
        Arc::new(FakeRecordStore::with(widget())),
    );

    let mut out = Vec::new();
    home::status(&orchestrator, &HostContext::new("usr_1", "Ada"), &mut out)
        .await
        .unwrap();

    let text = output(out);
    assert!(text.contains("OpenAI API key found."));
    assert!(!text.contains("[!]"));
}

#[tokio::test]
async fn generate_then_save_flow() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": " A great widget. "}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let secrets = Arc::new(MemorySecretStore::new());
    secrets
        .create(&Scope::user("usr_1"), CREDENTIAL_SECRET_NAME, "sk-user", None)
        .await
        .unwrap();
    let records = Arc::new(FakeRecordStore::with(widget()));
    let (orchestrator, _sink) = orchestrator(
        secrets,
        Arc::new(generator(&server.uri())),
        Arc::clone(&records) as Arc<dyn descriptify::RecordStore>,
    );
    let ctx = HostContext::new("usr_1", "Ada").with_object("prod_widget");

    let mut out = Vec::new();
    product::generate(&orchestrator, &ctx, "waterproof, red", &mut out)
        .await
        .unwrap();
    assert_eq!(output(out), "Description suggestion:\nA great widget.\n");

    // Generation alone never touches the record.
    assert!(records.description().is_none());

    let mut out = Vec::new();
    product::save(&orchestrator, &ctx, "A great widget, edited.", &mut out)
        .await
        .unwrap();
    assert!(output(out).contains("Description: A great widget, edited."));
    assert_eq!(
        records.description().as_deref(),
        Some("A great widget, edited.")
    );
}

#[tokio::test]
async fn generate_without_selection() {
    let server = MockServer::start().await;
    let (orchestrator, _sink) = orchestrator(
        Arc::new(MemorySecretStore::new()),
        Arc::new(generator(&server.uri())),
        Arc::new(FakeRecordStore::with(widget())),
    );

    let mut out = Vec::new();
    product::generate(&orchestrator, &HostContext::new("usr_1", "Ada"), "red", &mut out)
        .await
        .unwrap();
    assert_eq!(output(out), "No product selected.\n");
}

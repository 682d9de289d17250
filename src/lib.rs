//! Descriptify - user-scoped credentials and product description generation.
//!
//! This crate lets a user store one credential in a scope-partitioned
//! remote secret store and use it to drive a single text-generation call
//! whose result is reviewed, edited, and saved onto a product record.
//!
//! # Architecture
//!
//! - **SecretStore** - Typed client over the remote secret API, one call per verb
//! - **Orchestrator** - Credential lookup, then one generation call, then save
//! - **NotificationScheduler** - Pending/Resolved/Dismissed state machine per action
//! - **RecordStore** - Retrieve and update product records
//!
//! # Modules
//!
//! - [`secrets`] - Secret store trait, HTTP and in-memory implementations
//! - [`generation`] - Prompt building and the chat-completions client
//! - [`orchestrator`] - User-triggered actions
//! - [`notifications`] - Notification handles and sinks
//! - [`config`] - Configuration loading

// Library modules
pub mod commands;
pub mod generation;
pub mod notifications;
pub mod orchestrator;
pub mod records;
pub mod secrets;

pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod stripe;

// Re-export commonly used types
pub use config::Config;
pub use context::{HostContext, UserContext};
pub use error::{ActionError, StoreError};
pub use generation::{GenerationOutcome, GenerationRequest, OpenAiGenerator, TextGenerator};
pub use notifications::{NotificationHandle, NotificationScheduler, NotificationState, Severity};
pub use orchestrator::Orchestrator;
pub use records::{Record, RecordStore, StripeProductStore};
pub use secrets::{MemorySecretStore, Scope, Secret, SecretStore, StripeSecretStore};
pub use stripe::StripeClient;

//! Orchestration of the user-triggered actions.
//!
//! A generate action looks up the user's credential, then issues one
//! generation call, all under a single notification handle:
//!
//! ```text
//! start(Pending) ─► fetch_credential ─┬─ None ──► resolve(Caution, "OpenAI key missing")
//!                                     └─ Some ──► generate_description ─┬─ Success ─► resolve(Success)
//!                                                                       └─ Failure ─► resolve(Caution)
//! ```
//!
//! The generated text is returned to the caller for review and editing.
//! Persisting it is a separate [`Orchestrator::save_description`] action.
//!
//! Clients are injected at construction; nothing here is a global.

use std::sync::Arc;

use crate::constants::{
    CREDENTIAL_SECRET_NAME, MSG_CREDENTIAL_MISSING, MSG_GENERATED, MSG_GENERATING,
    MSG_GENERATION_FAILED, MSG_RECORD_LOAD_FAILED, MSG_RECORD_MISSING, MSG_RECORD_UPDATED,
    MSG_RECORD_UPDATE_FAILED, MSG_SAVING,
};
use crate::context::HostContext;
use crate::error::{ActionError, StoreError};
use crate::generation::{parse_features, GenerationOutcome, GenerationRequest, TextGenerator};
use crate::notifications::{NotificationScheduler, Severity};
use crate::records::{Record, RecordStore};
use crate::secrets::{Scope, SecretStore};

/// Runs credential lookup, generation and save actions for one session.
#[derive(Clone)]
pub struct Orchestrator {
    secrets: Arc<dyn SecretStore>,
    generator: Arc<dyn TextGenerator>,
    records: Arc<dyn RecordStore>,
    notifications: NotificationScheduler,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("notifications", &self.notifications)
            .finish_non_exhaustive()
    }
}

impl Orchestrator {
    /// Wires the orchestrator to its collaborators.
    pub fn new(
        secrets: Arc<dyn SecretStore>,
        generator: Arc<dyn TextGenerator>,
        records: Arc<dyn RecordStore>,
        notifications: NotificationScheduler,
    ) -> Self {
        Self {
            secrets,
            generator,
            records,
            notifications,
        }
    }

    /// Scheduler used for this session's notifications.
    pub fn notifications(&self) -> &NotificationScheduler {
        &self.notifications
    }

    /// Looks up the user's credential payload.
    ///
    /// Never fails: a missing secret, an empty payload, and a store error all
    /// yield `None`, with the cause logged.
    pub async fn fetch_credential(&self, user_id: &str) -> Option<String> {
        log::debug!("Fetching credential for user {}", user_id);

        match self
            .secrets
            .find(&Scope::user(user_id), CREDENTIAL_SECRET_NAME)
            .await
        {
            Ok(secret) => {
                let payload = secret.payload.filter(|p| !p.is_empty());
                if payload.is_none() {
                    log::warn!("Credential for user {} has no payload", user_id);
                }
                payload
            }
            Err(StoreError::NotFound) => {
                log::info!("No credential stored for user {}", user_id);
                None
            }
            Err(e) => {
                log::error!("Error fetching the credential for user {}: {}", user_id, e);
                None
            }
        }
    }

    /// Returns `true` if the user has a usable credential stored.
    pub async fn credential_status(&self, user_id: &str) -> bool {
        self.fetch_credential(user_id).await.is_some()
    }

    /// Issues one generation call for `subject_name` with `features`.
    pub async fn generate_description(
        &self,
        credential: &str,
        subject_name: &str,
        features: &[String],
    ) -> GenerationOutcome {
        let request = GenerationRequest::new(subject_name, features.to_vec());
        self.generator.generate(credential, &request).await
    }

    /// Generates a description for `record` from comma-separated `raw_tags`.
    ///
    /// The generation endpoint is never called when the credential is absent.
    pub async fn generate_for_record(
        &self,
        ctx: &HostContext,
        record: &Record,
        raw_tags: &str,
    ) -> Result<String, ActionError> {
        let mut pending = self.notifications.start(MSG_GENERATING);

        let Some(credential) = self.fetch_credential(&ctx.user.id).await else {
            log::error!("Credential not found for user {}", ctx.user.id);
            pending.resolve(Severity::Caution, MSG_CREDENTIAL_MISSING);
            return Err(ActionError::CredentialMissing);
        };

        let features = parse_features(raw_tags);
        match self
            .generate_description(&credential, &record.name, &features)
            .await
        {
            GenerationOutcome::Success(text) => {
                pending.resolve(Severity::Success, MSG_GENERATED);
                Ok(text)
            }
            GenerationOutcome::Failure(reason) => {
                log::error!("Failed to generate description for {}: {}", record.id, reason);
                pending.resolve(Severity::Caution, MSG_GENERATION_FAILED);
                Err(ActionError::Generation(reason))
            }
        }
    }

    /// Loads the record selected in `ctx`, if any.
    pub async fn load_record(&self, ctx: &HostContext) -> Result<Option<Record>, ActionError> {
        let Some(id) = ctx.object_id.as_deref() else {
            return Ok(None);
        };

        match self.records.retrieve(id).await {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                log::error!("Failed to load product {}: {}", id, e);
                self.notifications.notify(Severity::Caution, MSG_RECORD_LOAD_FAILED);
                Err(e.into())
            }
        }
    }

    /// Persists `description` onto `record`.
    ///
    /// Fails with [`ActionError::InputMissing`] before any remote call when
    /// the record is absent or the description is blank.
    pub async fn save_description(
        &self,
        record: Option<&Record>,
        description: &str,
    ) -> Result<Record, ActionError> {
        let record = match record {
            Some(record) if !description.trim().is_empty() => record,
            other => {
                let field = if other.is_none() { "record" } else { "description" };
                log::error!("Product or description is missing ({})", field);
                self.notifications.notify(Severity::Caution, MSG_RECORD_MISSING);
                return Err(ActionError::InputMissing(field));
            }
        };

        let mut pending = self.notifications.start(MSG_SAVING);
        match self.records.update_description(&record.id, description).await {
            Ok(updated) => {
                log::info!("Product description updated successfully");
                pending.resolve(Severity::Success, MSG_RECORD_UPDATED);
                Ok(updated)
            }
            Err(e) => {
                log::error!("Failed to update product description: {}", e);
                pending.resolve(Severity::Caution, MSG_RECORD_UPDATE_FAILED);
                Err(e.into())
            }
        }
    }
}

//! Application-wide constants for descriptify.
//!
//! Centralizes endpoint defaults, timeouts, and the user-facing messages
//! shown by the notification layer.
//!
//! # Categories
//!
//! - **Secrets**: Well-known secret name and store API version
//! - **Generation**: Model defaults and response ceiling
//! - **Timeouts**: Network request timeouts
//! - **Messages**: Notification text shown to the user

use std::time::Duration;

// ============================================================================
// Secrets
// ============================================================================

/// Name of the single credential this application stores per user.
pub const CREDENTIAL_SECRET_NAME: &str = "openai_api_key";

/// Stripe API version pinned on every secret-store and record-store call.
pub const STRIPE_API_VERSION: &str = "2020-08-27";

/// Default base URL for the Stripe REST API.
pub const DEFAULT_STRIPE_API_BASE: &str = "https://api.stripe.com";

/// Settings page where users add their credential.
pub const SETTINGS_URL: &str = "https://dashboard.stripe.com/apps/com.example.descriptify";

// ============================================================================
// Generation
// ============================================================================

/// Default base URL for the chat-completions endpoint.
pub const DEFAULT_GENERATION_API_BASE: &str = "https://api.openai.com/v1";

/// Default model used for description generation.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Response-size ceiling sent as `max_tokens`.
pub const DEFAULT_MAX_TOKENS: u32 = 100;

// ============================================================================
// Timeouts
// ============================================================================

/// Timeout for secret-store and record-store calls.
pub const STORE_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for the generation call.
///
/// Completions take noticeably longer than store round trips, so this is
/// kept separate from [`STORE_REQUEST_TIMEOUT`].
pub const GENERATION_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// Messages
// ============================================================================

/// Pending indicator while the generation call is in flight.
pub const MSG_GENERATING: &str = "Generating description...";

/// Success toast after a description was generated.
pub const MSG_GENERATED: &str = "Description generated successfully!";

/// Caution toast when the generation call failed.
pub const MSG_GENERATION_FAILED: &str = "Failed to generate description.";

/// Caution toast when the user has no stored credential.
pub const MSG_CREDENTIAL_MISSING: &str = "OpenAI key missing";

/// Pending indicator while a description is saved.
pub const MSG_SAVING: &str = "Saving description...";

/// Success toast after the record was updated.
pub const MSG_RECORD_UPDATED: &str = "Product Updated";

/// Caution toast when the record or description is missing on save.
pub const MSG_RECORD_MISSING: &str = "Product missing";

/// Caution toast when the record store rejected the update.
pub const MSG_RECORD_UPDATE_FAILED: &str = "Failed to update product";

/// Caution toast when the selected record could not be loaded.
pub const MSG_RECORD_LOAD_FAILED: &str = "Failed to load product";

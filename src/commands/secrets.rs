//! Secret settings commands.
//!
//! Each command manages the user's single well-known credential and writes
//! one log line per outcome. Store failures are written as `ERROR: ...`
//! lines instead of being returned.
//!
//! # Examples
//!
//! ```bash
//! descriptify secret --user usr_123 create --payload sk-abc --expires-at 1893456000
//! descriptify secret --user usr_123 find
//! descriptify secret --user usr_123 delete
//! descriptify secret --user usr_123 list
//! ```

use std::io::Write;

use anyhow::Result;

use crate::constants::CREDENTIAL_SECRET_NAME;
use crate::context::HostContext;
use crate::error::StoreError;
use crate::secrets::{
    describe_created, describe_deleted, describe_found, describe_list, SecretStore, Timestamp,
};

/// Stores `payload` as the user's credential.
pub async fn create(
    store: &dyn SecretStore,
    ctx: &HostContext,
    payload: &str,
    expires_at: Option<Timestamp>,
    out: &mut impl Write,
) -> Result<()> {
    let result = store
        .create(&ctx.user_scope(), CREDENTIAL_SECRET_NAME, payload, expires_at)
        .await;
    match result {
        Ok(secret) => writeln!(out, "{}", describe_created(&secret))?,
        Err(e) => report(out, &e)?,
    }
    Ok(())
}

/// Shows the user's credential with a masked payload.
pub async fn find(store: &dyn SecretStore, ctx: &HostContext, out: &mut impl Write) -> Result<()> {
    match store.find(&ctx.user_scope(), CREDENTIAL_SECRET_NAME).await {
        Ok(secret) => writeln!(out, "{}", describe_found(&secret))?,
        Err(e) => report(out, &e)?,
    }
    Ok(())
}

/// Deletes the user's credential.
pub async fn delete(
    store: &dyn SecretStore,
    ctx: &HostContext,
    out: &mut impl Write,
) -> Result<()> {
    match store
        .delete_where(&ctx.user_scope(), CREDENTIAL_SECRET_NAME)
        .await
    {
        Ok(secret) => writeln!(out, "{}", describe_deleted(&secret))?,
        Err(e) => report(out, &e)?,
    }
    Ok(())
}

/// Lists every secret in the user's scope.
pub async fn list(store: &dyn SecretStore, ctx: &HostContext, out: &mut impl Write) -> Result<()> {
    match store.list(&ctx.user_scope()).await {
        Ok(secrets) => {
            for line in describe_list(&secrets) {
                writeln!(out, "{line}")?;
            }
        }
        Err(e) => report(out, &e)?,
    }
    Ok(())
}

fn report(out: &mut impl Write, err: &StoreError) -> Result<()> {
    log::error!("Secret store call failed: {}", err);
    writeln!(out, "ERROR: {err}")?;
    Ok(())
}

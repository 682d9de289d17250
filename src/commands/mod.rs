//! CLI subcommand implementations for descriptify.
//!
//! The binary stands in for the hosting runtime. Commands are organized by
//! the surface they replace:
//!
//! - [`secrets`] - Secret settings page (create, find, delete, list)
//! - [`home`] - Landing view with the credential status banner
//! - [`product`] - Product view (show, generate, save)
//!
//! Output goes to the writer passed in; notifications go to the
//! [`ConsoleSink`]. Remote failures are reported, never returned, so a
//! failed action still exits cleanly.
//!
//! # Usage
//!
//! ```ignore
//! use descriptify::commands;
//!
//! commands::secrets::list(store.as_ref(), &ctx, &mut std::io::stdout()).await?;
//! commands::product::generate(&orchestrator, &ctx, "waterproof, red", &mut stdout).await?;
//! ```

pub mod home;
pub mod product;
pub mod secrets;

use crate::notifications::{NotificationId, NotificationSink, Toast, ToastKind};

/// Sink that prints notifications to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn show(&self, id: NotificationId, toast: &Toast) {
        let marker = match toast.kind {
            ToastKind::Pending => "...",
            ToastKind::Success => "[ok]",
            ToastKind::Caution => "[!]",
        };
        log::debug!("notification {} -> {:?}", id, toast.kind);
        eprintln!("{marker} {}", toast.message);
    }

    fn clear(&self, id: NotificationId) {
        log::debug!("notification {} cleared", id);
    }
}

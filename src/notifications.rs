//! User-visible notifications for long-running actions.
//!
//! Each action opens a [`NotificationHandle`] that walks a small state
//! machine:
//!
//! ```text
//! Pending ──resolve──► Resolved(Success | Caution) ──dismiss──► Dismissed
//!    │                                                             ▲
//!    └───────────────────────────dismiss───────────────────────────┘
//! ```
//!
//! Resolved and Dismissed are terminal. A second `resolve` on a terminal
//! handle is ignored (first resolution wins) and reported by returning
//! `false`. `dismiss` is idempotent. A handle dropped while still Pending
//! dismisses itself, so no exit path can leave a spinner behind.
//!
//! Rendering is delegated to a [`NotificationSink`]; dismissing a handle
//! only clears the indicator and never cancels the underlying work.
//!
//! # Example
//!
//! ```ignore
//! let scheduler = NotificationScheduler::new(Arc::new(LogSink));
//! let mut handle = scheduler.start("Generating description...");
//! match do_work().await {
//!     Ok(_) => handle.resolve(Severity::Success, "Done"),
//!     Err(_) => handle.resolve(Severity::Caution, "Failed"),
//! };
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Identifier of one notification within a scheduler.
pub type NotificationId = u64;

/// Severity of a resolved notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The action succeeded.
    Success,
    /// The action failed or needs user attention.
    Caution,
}

impl Severity {
    /// Returns the string representation used by toast surfaces.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Caution => "caution",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Visual kind of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    /// Indeterminate progress indicator.
    Pending,
    /// Success message.
    Success,
    /// Caution message.
    Caution,
}

impl From<Severity> for ToastKind {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Success => ToastKind::Success,
            Severity::Caution => ToastKind::Caution,
        }
    }
}

/// What a sink is asked to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Visual kind.
    pub kind: ToastKind,
    /// Text shown to the user.
    pub message: String,
}

/// Lifecycle state of a handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationState {
    /// Action in flight.
    Pending,
    /// Action finished; message shown with `severity`.
    Resolved {
        /// Outcome severity.
        severity: Severity,
        /// Final message.
        message: String,
    },
    /// Indicator removed by the user or the owner.
    Dismissed,
}

impl NotificationState {
    /// Returns `true` for Resolved and Dismissed.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, NotificationState::Pending)
    }
}

/// Rendering surface for notifications.
pub trait NotificationSink: Send + Sync + std::fmt::Debug {
    /// Shows `toast` for `id`, replacing whatever `id` showed before.
    fn show(&self, id: NotificationId, toast: &Toast);

    /// Removes whatever `id` shows.
    fn clear(&self, id: NotificationId);
}

/// Sink that renders through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn show(&self, id: NotificationId, toast: &Toast) {
        match toast.kind {
            ToastKind::Pending => log::info!("[notification {}] pending: {}", id, toast.message),
            ToastKind::Success => log::info!("[notification {}] success: {}", id, toast.message),
            ToastKind::Caution => log::warn!("[notification {}] caution: {}", id, toast.message),
        }
    }

    fn clear(&self, id: NotificationId) {
        log::debug!("[notification {}] cleared", id);
    }
}

/// Event observed by a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    /// A toast was shown.
    Show(NotificationId, Toast),
    /// A toast was cleared.
    Clear(NotificationId),
}

/// Sink that records every call, for tests and headless hosts.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<SinkEvent>>,
}

impl RecordingSink {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every event in arrival order.
    pub fn events(&self) -> Vec<SinkEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Every toast shown, in order.
    pub fn toasts(&self) -> Vec<Toast> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                SinkEvent::Show(_, toast) => Some(toast),
                SinkEvent::Clear(_) => None,
            })
            .collect()
    }

    /// Toasts currently on screen, keyed by id, in order of first appearance.
    pub fn visible(&self) -> Vec<(NotificationId, Toast)> {
        let mut visible: Vec<(NotificationId, Toast)> = Vec::new();
        for event in self.events() {
            match event {
                SinkEvent::Show(id, toast) => {
                    if let Some(entry) = visible.iter_mut().find(|(shown, _)| *shown == id) {
                        entry.1 = toast;
                    } else {
                        visible.push((id, toast));
                    }
                }
                SinkEvent::Clear(id) => visible.retain(|(shown, _)| *shown != id),
            }
        }
        visible
    }

    fn push(&self, event: SinkEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl NotificationSink for RecordingSink {
    fn show(&self, id: NotificationId, toast: &Toast) {
        self.push(SinkEvent::Show(id, toast.clone()));
    }

    fn clear(&self, id: NotificationId) {
        self.push(SinkEvent::Clear(id));
    }
}

/// Issues notification handles bound to one sink.
///
/// Cheap to clone; clones share the id sequence and the sink.
#[derive(Debug, Clone)]
pub struct NotificationScheduler {
    sink: Arc<dyn NotificationSink>,
    next_id: Arc<AtomicU64>,
}

impl NotificationScheduler {
    /// Creates a scheduler rendering into `sink`.
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            sink,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Opens a Pending handle showing `message`.
    pub fn start(&self, message: impl Into<String>) -> NotificationHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.sink.show(
            id,
            &Toast {
                kind: ToastKind::Pending,
                message: message.into(),
            },
        );
        NotificationHandle {
            id,
            state: NotificationState::Pending,
            sink: Arc::clone(&self.sink),
        }
    }

    /// Shows a one-shot message; the returned handle is already resolved.
    pub fn notify(&self, severity: Severity, message: impl Into<String>) -> NotificationHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let message = message.into();
        self.sink.show(
            id,
            &Toast {
                kind: severity.into(),
                message: message.clone(),
            },
        );
        NotificationHandle {
            id,
            state: NotificationState::Resolved { severity, message },
            sink: Arc::clone(&self.sink),
        }
    }
}

/// Lifecycle token for one user-visible action.
///
/// Owned by the call site that opened it.
#[derive(Debug)]
pub struct NotificationHandle {
    id: NotificationId,
    state: NotificationState,
    sink: Arc<dyn NotificationSink>,
}

impl NotificationHandle {
    /// Identifier within the scheduler.
    pub fn id(&self) -> NotificationId {
        self.id
    }

    /// Current state.
    pub fn state(&self) -> &NotificationState {
        &self.state
    }

    /// Returns `true` once resolved or dismissed.
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Resolves a Pending handle, replacing the indicator with `message`.
    ///
    /// Returns `false` and changes nothing if the handle is already terminal.
    pub fn resolve(&mut self, severity: Severity, message: impl Into<String>) -> bool {
        let message = message.into();
        if self.state.is_terminal() {
            log::debug!(
                "Ignoring resolve({}, {:?}) on terminal notification {}",
                severity,
                message,
                self.id
            );
            return false;
        }

        self.sink.show(
            self.id,
            &Toast {
                kind: severity.into(),
                message: message.clone(),
            },
        );
        self.state = NotificationState::Resolved { severity, message };
        true
    }

    /// Removes the indicator. No-op if already dismissed.
    pub fn dismiss(&mut self) {
        if self.state == NotificationState::Dismissed {
            return;
        }
        self.sink.clear(self.id);
        self.state = NotificationState::Dismissed;
    }
}

impl Drop for NotificationHandle {
    fn drop(&mut self) {
        if self.state == NotificationState::Pending {
            log::debug!("Notification {} dropped while pending, dismissing", self.id);
            self.dismiss();
        }
    }
}

//! De-duplicated user messages.

use tracing::debug;

use crate::host::{MeshHost, Severity};

/// Forwards messages to the host, dropping a message identical to the one
/// before it.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    last: Option<String>,
}

impl MessageLog {
    /// Create an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Show `text` unless it equals the previous message.
    ///
    /// Returns whether the message reached the host.
    pub fn show<H: MeshHost + ?Sized>(
        &mut self,
        host: &mut H,
        text: &str,
        severity: Severity,
    ) -> bool {
        if self.last.as_deref() == Some(text) {
            debug!(text, "Suppressed repeated message");
            return false;
        }
        self.last = Some(text.to_owned());
        host.display_message(text, severity);
        true
    }

    /// The most recent message shown.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }

    /// Forget the previous message so the next one always shows.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

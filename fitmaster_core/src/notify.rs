//! Best-effort local notifications.
//!
//! The rest timer calls through [`Notifier`] so it never touches the
//! environment directly. Delivery failures are logged and otherwise ignored.

use crate::Result;

/// Capability for showing a local alert
pub trait Notifier {
    /// Ask for permission to show alerts; returns whether it was granted
    fn request_permission(&mut self) -> bool;

    fn notify(&mut self, title: &str, body: &str) -> Result<()>;
}

/// Notifier that writes alerts to the log
#[derive(Clone, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn request_permission(&mut self) -> bool {
        true
    }

    fn notify(&mut self, title: &str, body: &str) -> Result<()> {
        tracing::info!("{}: {}", title, body);
        Ok(())
    }
}

/// Notifier that drops every alert
#[derive(Clone, Debug, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn request_permission(&mut self) -> bool {
        false
    }

    fn notify(&mut self, _title: &str, _body: &str) -> Result<()> {
        Ok(())
    }
}

/// Send a notification, swallowing any failure
pub fn notify_best_effort(notifier: &mut dyn Notifier, title: &str, body: &str) {
    if let Err(e) = notifier.notify(title, body) {
        tracing::warn!("Notification '{}' not delivered: {}", title, e);
    }
}

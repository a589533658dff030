//! Notifier that writes user-facing messages to the tracing log
//!
//! Used by headless hosts (the MCP server) where there is no toast area.

use crate::domain::ports::{Notification, Notifier, Severity};

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Error => tracing::error!(
                placement = ?notification.placement,
                "{}",
                notification.text
            ),
            Severity::Warning => tracing::warn!(
                placement = ?notification.placement,
                "{}",
                notification.text
            ),
        }
    }
}

//! Console notification dispatcher for development. Logs transition events
//! to tracing output instead of delivering them.

use async_trait::async_trait;
use civicdesk_application::{NotificationDispatcher, ReportNotification};
use civicdesk_core::AppResult;
use tracing::info;

/// Development dispatcher that logs notifications to the console.
#[derive(Clone)]
pub struct ConsoleNotificationDispatcher;

impl ConsoleNotificationDispatcher {
    /// Creates a new console notification dispatcher.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleNotificationDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationDispatcher for ConsoleNotificationDispatcher {
    async fn dispatch(&self, notification: ReportNotification) -> AppResult<()> {
        info!(
            event_type = notification.event_type(),
            report_id = %notification.report_id(),
            "--- NOTIFICATION (console) --- {notification:?}"
        );

        Ok(())
    }
}

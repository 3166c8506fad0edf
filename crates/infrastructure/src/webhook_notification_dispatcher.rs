use std::time::Duration;

use async_trait::async_trait;
use civicdesk_application::{NotificationDispatcher, ReportNotification};
use civicdesk_core::{AppError, AppResult};

/// Webhook-based notification dispatcher.
///
/// Posts one JSON envelope per transition event to a configured endpoint,
/// retrying transient failures with linear backoff. Callers treat delivery
/// as best-effort; exhausted retries surface as an internal error for the
/// orchestrator to log.
pub struct WebhookNotificationDispatcher {
    http_client: reqwest::Client,
    endpoint: String,
    max_attempts: u8,
    retry_backoff_ms: u64,
}

impl WebhookNotificationDispatcher {
    /// Creates a new webhook dispatcher.
    #[must_use]
    pub fn new(
        http_client: reqwest::Client,
        endpoint: String,
        max_attempts: u8,
        retry_backoff_ms: u64,
    ) -> Self {
        Self {
            http_client,
            endpoint,
            max_attempts: max_attempts.max(1),
            retry_backoff_ms: retry_backoff_ms.max(50),
        }
    }
}

#[async_trait]
impl NotificationDispatcher for WebhookNotificationDispatcher {
    async fn dispatch(&self, notification: ReportNotification) -> AppResult<()> {
        let body = serde_json::json!({
            "event": notification.event_type(),
            "report_id": notification.report_id(),
            "payload": &notification,
        });

        let mut attempt = 0_u8;
        let mut last_error: Option<String> = None;

        while attempt < self.max_attempts {
            attempt = attempt.saturating_add(1);

            let response = self
                .http_client
                .post(&self.endpoint)
                .header("X-Civicdesk-Event", notification.event_type())
                .json(&body)
                .send()
                .await;

            match response {
                Ok(response) if response.status().is_success() => return Ok(()),
                Ok(response)
                    if response.status().is_server_error()
                        || response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS =>
                {
                    last_error = Some(format!(
                        "transient HTTP status {} delivering '{}'",
                        response.status(),
                        notification.event_type()
                    ));
                }
                Ok(response) => {
                    return Err(AppError::Internal(format!(
                        "notification delivery failed with status {}",
                        response.status()
                    )));
                }
                Err(error) => {
                    last_error = Some(format!("notification transport error: {error}"));
                }
            }

            if attempt < self.max_attempts {
                let delay = self.retry_backoff_ms.saturating_mul(u64::from(attempt));
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }
        }

        Err(AppError::Internal(last_error.unwrap_or_else(|| {
            "notification delivery exhausted retries".to_owned()
        })))
    }
}

//! Sales notifications
//!
//! Forwards escalations to a chat webhook (Slack-style `{"text": ...}`),
//! or logs them when no webhook is configured.

use serde_json::{json, Value};
use std::time::Duration;

const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct SalesNotifier {
    client: reqwest::Client,
    webhook_url: Option<String>,
}

impl SalesNotifier {
    pub fn new(webhook_url: Option<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(WEBHOOK_TIMEOUT).build()?;
        Ok(Self {
            client,
            webhook_url,
        })
    }

    /// Deliver in the background; the caller never waits on the webhook.
    pub fn notify(&self, payload: Value) {
        let notifier = self.clone();
        tokio::spawn(async move {
            if let Err(e) = notifier.deliver(&payload).await {
                tracing::warn!(error = %e, "Sales notification failed");
            }
        });
    }

    pub async fn deliver(&self, payload: &Value) -> Result<(), reqwest::Error> {
        let Some(url) = self.webhook_url.as_deref() else {
            tracing::info!(target: "sales_notify", payload = %payload, "Sales notification");
            return Ok(());
        };

        self.client
            .post(url)
            .json(&json!({ "text": payload.to_string() }))
            .send()
            .await?
            .error_for_status()?;
        tracing::debug!("Sales notification delivered");
        Ok(())
    }
}

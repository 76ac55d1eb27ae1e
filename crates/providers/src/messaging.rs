//! TwilioMessenger - WhatsApp notifications through the Twilio REST API

use contracts::{MonitorError, NotifyConfig, NotifyProvider, PublicReference};
use tracing::{debug, warn};

const TWILIO_ENDPOINT: &str = "https://api.twilio.com";

/// Notify provider posting to the Twilio Messages API.
///
/// The snapshot URL rides along as `MediaUrl`, so the recipient gets the
/// image inline rather than a bare link.
pub struct TwilioMessenger {
    client: reqwest::Client,
    account_sid: String,
    from: String,
    to: String,
    template: String,
    auth_token: Option<String>,
    endpoint: String,
}

impl TwilioMessenger {
    /// Build the messenger; the auth token is read from the environment
    /// variable named in the config.
    pub fn new(config: &NotifyConfig) -> Self {
        let auth_token = std::env::var(&config.auth_token_env).ok();
        if auth_token.is_none() {
            warn!(
                env = %config.auth_token_env,
                "messaging auth token not set; notifications will be rejected"
            );
        }

        Self {
            client: reqwest::Client::new(),
            account_sid: config.account_sid.clone(),
            from: config.from.clone(),
            to: config.to.clone(),
            template: config.template.clone(),
            auth_token,
            endpoint: TWILIO_ENDPOINT.to_string(),
        }
    }

    /// Override the API endpoint (test servers).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.endpoint, self.account_sid
        )
    }

    fn message_body(&self, timestamp: &str) -> String {
        format!("{}{}", self.template, timestamp)
    }
}

impl NotifyProvider for TwilioMessenger {
    async fn notify(
        &self,
        reference: &PublicReference,
        timestamp: &str,
    ) -> Result<(), MonitorError> {
        let body = self.message_body(timestamp);
        let params = [
            ("Body", body.as_str()),
            ("From", self.from.as_str()),
            ("To", self.to.as_str()),
            ("MediaUrl", reference.as_str()),
        ];
        debug!(to = %self.to, url = %reference, "sending notification");

        let mut request = self.client.post(self.messages_url()).form(&params);
        if let Some(token) = &self.auth_token {
            request = request.basic_auth(&self.account_sid, Some(token));
        }

        let response = request
            .send()
            .await
            .map_err(|e| MonitorError::notify(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let err_text = response.text().await.unwrap_or_default();
            return Err(MonitorError::notify(format!(
                "message send failed with {status}: {err_text}"
            )));
        }

        Ok(())
    }
}

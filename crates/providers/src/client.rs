//! HTTP delivery client.
//!
//! One pre-configured `reqwest` client serves all three integrations.
//! Each dispatch is exactly one awaited HTTP call; failures come back as
//! [`DeliveryError`] for the caller to record, never as panics.

use std::time::Duration;

use tavolo_core::channels::Channel;
use tavolo_core::phone::normalize_phone;

use crate::error::DeliveryError;
use crate::provider::Provider;

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A tenant's resolved provider account: which integration to call and
/// with what credentials/settings.
#[derive(Debug, Clone)]
pub struct ProviderAccount {
    pub provider: Provider,
    pub api_key: String,
    /// Provider-specific settings document (`source`, `from`,
    /// `base_url`, ...).
    pub settings: serde_json::Value,
}

impl ProviderAccount {
    fn setting(&self, key: &str) -> Option<&str> {
        self.settings.get(key).and_then(|v| v.as_str())
    }

    fn base_url(&self) -> String {
        self.setting("base_url")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| self.provider.default_base_url().to_string())
    }
}

/// One personalized message bound for one recipient contact.
#[derive(Debug, Clone)]
pub struct Delivery<'a> {
    pub channel: Channel,
    /// Raw contact value from the recipient row (phone, email address,
    /// or push token, per channel).
    pub to: &'a str,
    pub message: &'a str,
    /// Required for the email channel, ignored elsewhere.
    pub subject: Option<&'a str>,
}

/// Dispatches deliveries to the configured third-party provider.
pub struct ProviderClient {
    client: reqwest::Client,
}

impl ProviderClient {
    /// Create a client with a pre-configured HTTP transport.
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client }
    }

    /// Attempt one delivery and normalize the result.
    ///
    /// No retries, no rate limiting: a single HTTP call, awaited.
    pub async fn dispatch(
        &self,
        account: &ProviderAccount,
        delivery: &Delivery<'_>,
    ) -> Result<(), DeliveryError> {
        if !account.provider.supports(delivery.channel) {
            return Err(DeliveryError::Unsupported {
                channel: delivery.channel,
                provider: account.provider,
            });
        }

        match account.provider {
            Provider::Gupshup | Provider::Wati => self.send_gateway(account, delivery).await,
            Provider::Resend => self.send_email(account, delivery).await,
        }
    }

    /// Message-gateway integration (Gupshup and Wati share this shape).
    async fn send_gateway(
        &self,
        account: &ProviderAccount,
        delivery: &Delivery<'_>,
    ) -> Result<(), DeliveryError> {
        let source = account.setting("source").ok_or_else(|| {
            DeliveryError::Config("Gateway providers require a 'source' setting".into())
        })?;
        let destination = normalize_phone(delivery.to)
            .map_err(|e| DeliveryError::Contact(e.to_string()))?;

        let payload = gateway_payload(delivery.channel, source, &destination, delivery.message);
        let url = format!("{}/v2/msg", account.base_url());

        let response = self
            .client
            .post(&url)
            .header("apikey", &account.api_key)
            .json(&payload)
            .send()
            .await?;

        check_status(response, account.provider, delivery.channel)
    }

    /// Transactional-email integration (Resend).
    async fn send_email(
        &self,
        account: &ProviderAccount,
        delivery: &Delivery<'_>,
    ) -> Result<(), DeliveryError> {
        let from = account.setting("from").ok_or_else(|| {
            DeliveryError::Config("Email provider requires a 'from' setting".into())
        })?;
        let subject = delivery.subject.ok_or_else(|| {
            DeliveryError::Config("Email delivery requires a subject".into())
        })?;

        let payload = email_payload(from, delivery.to, subject, delivery.message);
        let url = format!("{}/emails", account.base_url());

        let response = self
            .client
            .post(&url)
            .bearer_auth(&account.api_key)
            .json(&payload)
            .send()
            .await?;

        check_status(response, account.provider, delivery.channel)
    }
}

impl Default for ProviderClient {
    fn default() -> Self {
        Self::new()
    }
}

fn check_status(
    response: reqwest::Response,
    provider: Provider,
    channel: Channel,
) -> Result<(), DeliveryError> {
    let status = response.status();
    if !status.is_success() {
        tracing::warn!(%provider, %channel, status = status.as_u16(), "Provider rejected delivery");
        return Err(DeliveryError::HttpStatus(status.as_u16()));
    }
    tracing::debug!(%provider, %channel, "Delivery accepted by provider");
    Ok(())
}

fn gateway_payload(
    channel: Channel,
    source: &str,
    destination: &str,
    message: &str,
) -> serde_json::Value {
    serde_json::json!({
        "channel": channel.as_str(),
        "source": source,
        "destination": destination,
        "message": message,
    })
}

fn email_payload(from: &str, to: &str, subject: &str, text: &str) -> serde_json::Value {
    serde_json::json!({
        "from": from,
        "to": to,
        "subject": subject,
        "text": text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn account(provider: Provider, settings: serde_json::Value) -> ProviderAccount {
        ProviderAccount {
            provider,
            api_key: "key".into(),
            settings,
        }
    }

    #[test]
    fn new_does_not_panic() {
        let _client = ProviderClient::new();
    }

    #[test]
    fn gateway_payload_carries_normalized_destination() {
        let payload = gateway_payload(Channel::Whatsapp, "15550001", "+5215512345678", "hi");
        assert_eq!(
            payload,
            json!({
                "channel": "whatsapp",
                "source": "15550001",
                "destination": "+5215512345678",
                "message": "hi",
            })
        );
    }

    #[test]
    fn email_payload_shape() {
        let payload = email_payload("team@tavolo.app", "ana@example.com", "Hello", "body");
        assert_eq!(
            payload,
            json!({
                "from": "team@tavolo.app",
                "to": "ana@example.com",
                "subject": "Hello",
                "text": "body",
            })
        );
    }

    #[test]
    fn base_url_prefers_setting_override() {
        let acct = account(Provider::Gupshup, json!({ "base_url": "http://localhost:9999/" }));
        assert_eq!(acct.base_url(), "http://localhost:9999");

        let acct = account(Provider::Resend, json!({}));
        assert_eq!(acct.base_url(), "https://api.resend.com");
    }

    #[tokio::test]
    async fn unsupported_pair_is_a_typed_failure() {
        let client = ProviderClient::new();
        let acct = account(Provider::Resend, json!({ "from": "team@tavolo.app" }));
        let delivery = Delivery {
            channel: Channel::Push,
            to: "token",
            message: "hi",
            subject: None,
        };
        let err = client.dispatch(&acct, &delivery).await.unwrap_err();
        assert_matches!(err, DeliveryError::Unsupported { .. });
    }

    #[tokio::test]
    async fn missing_gateway_source_is_a_config_failure() {
        let client = ProviderClient::new();
        let acct = account(Provider::Gupshup, json!({}));
        let delivery = Delivery {
            channel: Channel::Sms,
            to: "5215512345678",
            message: "hi",
            subject: None,
        };
        let err = client.dispatch(&acct, &delivery).await.unwrap_err();
        assert_matches!(err, DeliveryError::Config(_));
    }
}

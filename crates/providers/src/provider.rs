//! The closed set of third-party delivery providers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tavolo_core::channels::Channel;
use tavolo_core::error::CoreError;

/// A third-party delivery provider.
///
/// Gupshup and Wati are message gateways sharing one HTTP request shape
/// and serve the phone channels; Resend is the transactional-email
/// provider. No provider serves push.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Gupshup,
    Wati,
    Resend,
}

impl Provider {
    /// The canonical lowercase name stored in provider configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Gupshup => "gupshup",
            Provider::Wati => "wati",
            Provider::Resend => "resend",
        }
    }

    /// Whether this provider has an integration for the given channel.
    pub fn supports(&self, channel: Channel) -> bool {
        match self {
            Provider::Gupshup | Provider::Wati => {
                matches!(channel, Channel::Whatsapp | Channel::Sms)
            }
            Provider::Resend => matches!(channel, Channel::Email),
        }
    }

    /// Default API base URL; overridable via the `base_url` setting.
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Provider::Gupshup => "https://api.gupshup.io",
            Provider::Wati => "https://live-mt-server.wati.io",
            Provider::Resend => "https://api.resend.com",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gupshup" => Ok(Provider::Gupshup),
            "wati" => Ok(Provider::Wati),
            "resend" => Ok(Provider::Resend),
            other => Err(CoreError::Validation(format!(
                "Unknown provider: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_provider_name() {
        for provider in [Provider::Gupshup, Provider::Wati, Provider::Resend] {
            let parsed: Provider = provider.as_str().parse().unwrap();
            assert_eq!(parsed, provider);
        }
    }

    #[test]
    fn rejects_unknown_provider() {
        assert!("twilio".parse::<Provider>().is_err());
    }

    #[test]
    fn gateway_providers_serve_phone_channels_only() {
        for provider in [Provider::Gupshup, Provider::Wati] {
            assert!(provider.supports(Channel::Whatsapp));
            assert!(provider.supports(Channel::Sms));
            assert!(!provider.supports(Channel::Email));
            assert!(!provider.supports(Channel::Push));
        }
    }

    #[test]
    fn resend_serves_email_only() {
        assert!(Provider::Resend.supports(Channel::Email));
        assert!(!Provider::Resend.supports(Channel::Whatsapp));
        assert!(!Provider::Resend.supports(Channel::Push));
    }
}

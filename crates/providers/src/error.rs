use tavolo_core::channels::Channel;

use crate::provider::Provider;

/// Error type for a single delivery attempt.
///
/// Every variant is a typed failure the dispatch loop records on the
/// outcome row; none of them abort a campaign.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("Provider returned HTTP {0}")]
    HttpStatus(u16),

    /// The (channel, provider) pair has no integration.
    #[error("No integration for channel {channel} via provider {provider}")]
    Unsupported {
        channel: Channel,
        provider: Provider,
    },

    /// The provider configuration is missing a required setting.
    #[error("Provider configuration error: {0}")]
    Config(String),

    /// The recipient contact value is unusable.
    #[error("Invalid contact: {0}")]
    Contact(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_names_the_pair() {
        let err = DeliveryError::Unsupported {
            channel: Channel::Push,
            provider: Provider::Resend,
        };
        assert_eq!(
            err.to_string(),
            "No integration for channel push via provider resend"
        );
    }

    #[test]
    fn http_status_display() {
        let err = DeliveryError::HttpStatus(502);
        assert_eq!(err.to_string(), "Provider returned HTTP 502");
    }
}

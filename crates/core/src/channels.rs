//! Messaging channels over which campaigns are delivered.
//!
//! The channel set is closed: every campaign names exactly one of these,
//! and the provider layer routes each to a hard-coded integration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A delivery channel for campaign messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Whatsapp,
    Sms,
    Email,
    Push,
}

impl Channel {
    /// Every supported channel, in display order.
    pub const ALL: [Channel; 4] = [
        Channel::Whatsapp,
        Channel::Sms,
        Channel::Email,
        Channel::Push,
    ];

    /// The canonical lowercase name stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Whatsapp => "whatsapp",
            Channel::Sms => "sms",
            Channel::Email => "email",
            Channel::Push => "push",
        }
    }

    /// Name of the recipient contact field this channel delivers to.
    ///
    /// Used in skip reasons so an outcome row records which field was
    /// missing.
    pub fn contact_field(&self) -> &'static str {
        match self {
            Channel::Whatsapp | Channel::Sms => "phone",
            Channel::Email => "email",
            Channel::Push => "push_token",
        }
    }

    /// Name of the per-recipient consent flag gating this channel.
    pub fn consent_field(&self) -> &'static str {
        match self {
            Channel::Whatsapp => "whatsapp_opt_in",
            Channel::Sms => "sms_opt_in",
            Channel::Email => "email_opt_in",
            Channel::Push => "push_opt_in",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "whatsapp" => Ok(Channel::Whatsapp),
            "sms" => Ok(Channel::Sms),
            "email" => Ok(Channel::Email),
            "push" => Ok(Channel::Push),
            other => Err(CoreError::Validation(format!(
                "Unknown channel: {other}"
            ))),
        }
    }
}

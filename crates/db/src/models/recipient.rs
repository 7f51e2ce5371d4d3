//! Loyalty recipient entity model.

use serde::Serialize;
use sqlx::FromRow;
use tavolo_core::channels::Channel;
use tavolo_core::types::{DbId, Timestamp};

/// A row from the `recipients` table: one loyalty-program member.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Recipient {
    pub id: DbId,
    pub tenant_id: DbId,
    pub display_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub push_token: Option<String>,
    pub points_balance: i64,
    pub last_visit_at: Option<Timestamp>,
    pub whatsapp_opt_in: bool,
    pub sms_opt_in: bool,
    pub email_opt_in: bool,
    pub push_opt_in: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Recipient {
    /// Whether this recipient has opted in to the given channel.
    pub fn consents_to(&self, channel: Channel) -> bool {
        match channel {
            Channel::Whatsapp => self.whatsapp_opt_in,
            Channel::Sms => self.sms_opt_in,
            Channel::Email => self.email_opt_in,
            Channel::Push => self.push_opt_in,
        }
    }

    /// The contact value the channel delivers to, if present and
    /// non-empty.
    pub fn contact_for(&self, channel: Channel) -> Option<&str> {
        let value = match channel {
            Channel::Whatsapp | Channel::Sms => self.phone.as_deref(),
            Channel::Email => self.email.as_deref(),
            Channel::Push => self.push_token.as_deref(),
        };
        value.filter(|v| !v.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn recipient() -> Recipient {
        Recipient {
            id: 1,
            tenant_id: 1,
            display_name: "Ana".into(),
            phone: Some("+5215512345678".into()),
            email: None,
            push_token: Some("  ".into()),
            points_balance: 120,
            last_visit_at: None,
            whatsapp_opt_in: true,
            sms_opt_in: false,
            email_opt_in: false,
            push_opt_in: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn consent_follows_channel_flag() {
        let r = recipient();
        assert!(r.consents_to(Channel::Whatsapp));
        assert!(!r.consents_to(Channel::Sms));
    }

    #[test]
    fn missing_contact_is_none() {
        let r = recipient();
        assert_eq!(r.contact_for(Channel::Whatsapp), Some("+5215512345678"));
        assert_eq!(r.contact_for(Channel::Email), None);
        // Whitespace-only values count as missing.
        assert_eq!(r.contact_for(Channel::Push), None);
    }
}

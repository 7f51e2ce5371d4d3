//! The campaign dispatch loop.
//!
//! One run resolves the campaign's audience, channel integration, and
//! template, then walks the recipients sequentially: consent check,
//! contact check, personalize, dispatch, record. Each provider call is
//! awaited before the next recipient; per-recipient failures are
//! recorded and never abort the loop. There is no retry, batching, or
//! concurrency fan-out; the only summary is written back onto the
//! campaign row.

use chrono::Utc;
use tavolo_core::audience::AudienceFilter;
use tavolo_core::channels::Channel;
use tavolo_core::error::CoreError;
use tavolo_core::personalize::render_message;
use tavolo_core::types::DbId;
use tavolo_db::models::campaign::{Campaign, DispatchSummary};
use tavolo_db::models::recipient::Recipient;
use tavolo_db::models::send_outcome::OutcomeStatus;
use tavolo_db::models::tenant::Tenant;
use tavolo_db::repositories::{
    CampaignRepo, OutcomeRepo, ProviderConfigRepo, RecipientRepo, TenantRepo,
};
use tavolo_providers::{Delivery, Provider, ProviderAccount};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Options for one dispatch run.
#[derive(Debug, Clone, Copy, Default)]
pub struct DispatchOptions {
    /// Test mode: target a single synthetic recipient built from the
    /// tenant's own contact details instead of the real audience.
    pub test: bool,
}

/// Execute one campaign dispatch run and return its summary.
pub async fn run_dispatch(
    state: &AppState,
    auth: &AuthUser,
    campaign_id: DbId,
    options: DispatchOptions,
) -> AppResult<DispatchSummary> {
    let campaign = CampaignRepo::find_by_id(&state.pool, campaign_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Campaign",
            id: campaign_id,
        }))?;

    if campaign.tenant_id != auth.tenant_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Campaign belongs to another tenant".into(),
        )));
    }

    let channel: Channel = campaign.channel.parse()?;

    if campaign.message_template.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Campaign has no message template".into(),
        )));
    }
    if channel == Channel::Email
        && campaign
            .subject
            .as_deref()
            .is_none_or(|s| s.trim().is_empty())
    {
        return Err(AppError::Core(CoreError::Validation(
            "Email campaigns require a subject".into(),
        )));
    }

    let config = ProviderConfigRepo::find_active(&state.pool, campaign.tenant_id, channel.as_str())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "No active provider configuration for channel {channel}"
            )))
        })?;
    let provider: Provider = config.provider.parse()?;
    let account = ProviderAccount {
        provider,
        api_key: config.api_key,
        settings: config.settings,
    };

    let recipients = if options.test {
        vec![synthetic_test_recipient(state, &campaign).await?]
    } else {
        let filter = AudienceFilter::from_parts(&campaign.audience_type, &campaign.audience_filter)?;
        RecipientRepo::resolve_audience(&state.pool, campaign.tenant_id, &filter).await?
    };

    tracing::info!(
        campaign_id,
        %channel,
        %provider,
        recipients = recipients.len(),
        test = options.test,
        "Starting campaign dispatch"
    );

    let mut summary = DispatchSummary {
        total: recipients.len() as i64,
        ..Default::default()
    };

    for recipient in &recipients {
        // Synthetic test recipients have no row to reference.
        let recipient_id = (!options.test).then_some(recipient.id);

        let contact = match preflight(recipient, channel) {
            Ok(contact) => contact,
            Err(skip_reason) => {
                OutcomeRepo::record(
                    &state.pool,
                    campaign.id,
                    recipient_id,
                    channel.as_str(),
                    OutcomeStatus::Skipped,
                    Some(&skip_reason),
                )
                .await?;
                summary.skipped += 1;
                continue;
            }
        };

        let message = render_message(
            &campaign.message_template,
            &recipient.display_name,
            recipient.points_balance,
            Some(&campaign.variables),
        );
        let delivery = Delivery {
            channel,
            to: contact,
            message: &message,
            subject: campaign.subject.as_deref(),
        };

        match state.providers.dispatch(&account, &delivery).await {
            Ok(()) => {
                OutcomeRepo::record(
                    &state.pool,
                    campaign.id,
                    recipient_id,
                    channel.as_str(),
                    OutcomeStatus::Sent,
                    None,
                )
                .await?;
                summary.sent += 1;
            }
            Err(e) => {
                tracing::warn!(
                    campaign_id,
                    recipient_id = recipient.id,
                    error = %e,
                    "Delivery failed for recipient"
                );
                OutcomeRepo::record(
                    &state.pool,
                    campaign.id,
                    recipient_id,
                    channel.as_str(),
                    OutcomeStatus::Failed,
                    Some(&e.to_string()),
                )
                .await?;
                summary.failed += 1;
            }
        }
    }

    CampaignRepo::update_dispatch_summary(&state.pool, campaign.id, &summary).await?;

    tracing::info!(
        campaign_id,
        total = summary.total,
        sent = summary.sent,
        failed = summary.failed,
        skipped = summary.skipped,
        "Campaign dispatch complete"
    );

    Ok(summary)
}

/// Decide whether a recipient can be delivered to on this channel.
///
/// Returns the contact value to use, or the skip reason recorded on the
/// outcome row. A skip is never a failure: missing consent and missing
/// contact details both fall through to the next recipient.
fn preflight(recipient: &Recipient, channel: Channel) -> Result<&str, String> {
    if !recipient.consents_to(channel) {
        return Err(format!("no_consent:{}", channel.consent_field()));
    }
    recipient
        .contact_for(channel)
        .ok_or_else(|| format!("missing_contact:{}", channel.contact_field()))
}

/// Build the single synthetic recipient used by test-mode dispatch.
async fn synthetic_test_recipient(state: &AppState, campaign: &Campaign) -> AppResult<Recipient> {
    let tenant = TenantRepo::find_by_id(&state.pool, campaign.tenant_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Tenant",
            id: campaign.tenant_id,
        }))?;
    Ok(synthetic_recipient_from(tenant))
}

/// The synthetic recipient carries the tenant's own contact phone and
/// email, is opted in to every channel, and has no database row.
fn synthetic_recipient_from(tenant: Tenant) -> Recipient {
    let now = Utc::now();
    Recipient {
        id: 0,
        tenant_id: tenant.id,
        display_name: tenant.name,
        phone: tenant.contact_phone,
        email: tenant.contact_email,
        push_token: None,
        points_balance: 0,
        last_visit_at: None,
        whatsapp_opt_in: true,
        sms_opt_in: true,
        email_opt_in: true,
        push_opt_in: true,
        created_at: now,
        updated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipient(opt_in: bool, phone: Option<&str>) -> Recipient {
        let now = Utc::now();
        Recipient {
            id: 9,
            tenant_id: 7,
            display_name: "Ana".into(),
            phone: phone.map(Into::into),
            email: None,
            push_token: None,
            points_balance: 120,
            last_visit_at: None,
            whatsapp_opt_in: opt_in,
            sms_opt_in: opt_in,
            email_opt_in: false,
            push_opt_in: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn tenant() -> Tenant {
        let now = Utc::now();
        Tenant {
            id: 7,
            name: "La Cocina de Ana".into(),
            contact_phone: Some("+5215512345678".into()),
            contact_email: Some("ana@lacocina.mx".into()),
            currency: "MXN".into(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn preflight_skips_without_consent() {
        let r = recipient(false, Some("+5215512345678"));
        let reason = preflight(&r, Channel::Whatsapp).unwrap_err();
        assert_eq!(reason, "no_consent:whatsapp_opt_in");
    }

    #[test]
    fn preflight_skips_without_contact() {
        let r = recipient(true, None);
        let reason = preflight(&r, Channel::Sms).unwrap_err();
        assert_eq!(reason, "missing_contact:phone");
    }

    #[test]
    fn preflight_consent_check_runs_before_contact_check() {
        // Both are missing: the recorded reason is the consent miss.
        let r = recipient(false, None);
        let reason = preflight(&r, Channel::Whatsapp).unwrap_err();
        assert!(reason.starts_with("no_consent:"));
    }

    #[test]
    fn preflight_passes_through_the_contact_value() {
        let r = recipient(true, Some("+5215512345678"));
        assert_eq!(preflight(&r, Channel::Whatsapp), Ok("+5215512345678"));
    }

    #[test]
    fn synthetic_recipient_uses_tenant_contact_details() {
        let synthetic = synthetic_recipient_from(tenant());
        assert_eq!(synthetic.id, 0);
        assert_eq!(synthetic.phone.as_deref(), Some("+5215512345678"));
        assert_eq!(synthetic.email.as_deref(), Some("ana@lacocina.mx"));
        // Opted in everywhere so test sends are never consent-skipped.
        assert!(synthetic.whatsapp_opt_in);
        assert!(synthetic.sms_opt_in);
        assert!(synthetic.email_opt_in);
        assert!(synthetic.push_opt_in);
    }
}

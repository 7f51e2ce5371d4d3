//! Subscription and invoice lifecycle, plus receipt rendering.
//!
//! The billing collaborator reports subscription transitions over a
//! webhook; [`subscription::apply_subscription_event`] validates the
//! event, derives the billing period, upserts the subscription, and
//! (for billable statuses) generates the period invoice idempotently.
//! [`receipt`] renders one invoice as a fixed-layout PDF.

pub mod error;
pub mod invoice;
pub mod receipt;
pub mod subscription;

pub use error::BillingError;
pub use invoice::generate_invoice;
pub use receipt::{render_receipt, ReceiptData};
pub use subscription::{
    apply_subscription_event, backfill_invoices, BackfillSummary, SubscriptionEvent,
    SubscriptionEventResult,
};

//! Invoice entity models.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use tavolo_core::types::{DbId, Timestamp};

/// A row from the `invoices` table, unique per (subscription,
/// period_start).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Invoice {
    pub id: DbId,
    pub subscription_id: DbId,
    pub tenant_id: DbId,
    pub invoice_number: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub amount_cents: i64,
    pub currency: String,
    pub status: String,
    pub paid_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `invoice_line_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InvoiceLineItem {
    pub id: DbId,
    pub invoice_id: DbId,
    pub description: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub amount_cents: i64,
    pub created_at: Timestamp,
}

//! Repository for the `invoices` and `invoice_line_items` tables.
//!
//! Invoice generation is idempotent: inserts land on the
//! `uq_invoices_subscription_period` constraint, and a repeat for the
//! same (subscription, period) only refreshes status and paid_at.

use chrono::NaiveDate;
use sqlx::PgPool;
use tavolo_core::types::{DbId, Timestamp};

use crate::models::invoice::{Invoice, InvoiceLineItem};

/// Column list for `invoices` queries.
const COLUMNS: &str = "id, subscription_id, tenant_id, invoice_number, period_start, period_end, \
     amount_cents, currency, status, paid_at, created_at, updated_at";

/// Column list for `invoice_line_items` queries.
const LINE_ITEM_COLUMNS: &str =
    "id, invoice_id, description, quantity, unit_price_cents, amount_cents, created_at";

/// Input for [`InvoiceRepo::upsert_for_period`].
#[derive(Debug, Clone)]
pub struct UpsertInvoice<'a> {
    pub subscription_id: DbId,
    pub tenant_id: DbId,
    pub invoice_number: &'a str,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub amount_cents: i64,
    pub currency: &'a str,
    pub status: &'a str,
    pub paid_at: Option<Timestamp>,
}

pub struct InvoiceRepo;

impl InvoiceRepo {
    /// Insert the invoice for a subscription period, or refresh
    /// status/paid_at when it already exists. Returns the invoice id.
    ///
    /// An existing paid_at stamp survives a later non-paid refresh.
    pub async fn upsert_for_period(
        pool: &PgPool,
        input: &UpsertInvoice<'_>,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO invoices \
                 (subscription_id, tenant_id, invoice_number, period_start, period_end, \
                  amount_cents, currency, status, paid_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             ON CONFLICT (subscription_id, period_start) \
             DO UPDATE SET status = EXCLUDED.status, \
                 paid_at = COALESCE(EXCLUDED.paid_at, invoices.paid_at), \
                 updated_at = NOW() \
             RETURNING id",
        )
        .bind(input.subscription_id)
        .bind(input.tenant_id)
        .bind(input.invoice_number)
        .bind(input.period_start)
        .bind(input.period_end)
        .bind(input.amount_cents)
        .bind(input.currency)
        .bind(input.status)
        .bind(input.paid_at)
        .fetch_one(pool)
        .await
    }

    /// Insert a line item; a repeat insert for the same description
    /// no-ops on the uniqueness constraint.
    pub async fn insert_line_item(
        pool: &PgPool,
        invoice_id: DbId,
        description: &str,
        quantity: i64,
        unit_price_cents: i64,
        amount_cents: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO invoice_line_items \
                 (invoice_id, description, quantity, unit_price_cents, amount_cents) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (invoice_id, description) DO NOTHING",
        )
        .bind(invoice_id)
        .bind(description)
        .bind(quantity)
        .bind(unit_price_cents)
        .bind(amount_cents)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Fetch an invoice by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Invoice>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM invoices WHERE id = $1");
        sqlx::query_as::<_, Invoice>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a tenant's invoices, newest first.
    pub async fn list_for_tenant(
        pool: &PgPool,
        tenant_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Invoice>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM invoices \
             WHERE tenant_id = $1 \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(tenant_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List an invoice's line items in insertion order.
    pub async fn list_line_items(
        pool: &PgPool,
        invoice_id: DbId,
    ) -> Result<Vec<InvoiceLineItem>, sqlx::Error> {
        let query = format!(
            "SELECT {LINE_ITEM_COLUMNS} FROM invoice_line_items \
             WHERE invoice_id = $1 \
             ORDER BY id"
        );
        sqlx::query_as::<_, InvoiceLineItem>(&query)
            .bind(invoice_id)
            .fetch_all(pool)
            .await
    }
}

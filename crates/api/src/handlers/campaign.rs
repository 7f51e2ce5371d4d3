//! Handlers for the `/campaigns` resource.
//!
//! All endpoints require authentication via [`AuthUser`] and scope to
//! the caller's tenant.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use tavolo_core::error::CoreError;
use tavolo_core::types::DbId;
use tavolo_db::models::campaign::Campaign;
use tavolo_db::repositories::{CampaignRepo, OutcomeRepo};

use crate::engine::{run_dispatch, DispatchOptions};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum page size for listings.
const MAX_LIMIT: i64 = 100;

/// Default page size for listings.
const DEFAULT_LIMIT: i64 = 50;

/// Query parameters shared by the list endpoints.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<i64>,
}

impl PageQuery {
    pub(crate) fn clamp(&self) -> (i64, i64) {
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = self.offset.unwrap_or(0).max(0);
        (limit, offset)
    }
}

/// Body for `POST /campaigns/{id}/dispatch`.
#[derive(Debug, Default, Deserialize)]
pub struct DispatchRequest {
    /// Send only to a synthetic recipient built from the tenant's own
    /// contact details.
    #[serde(default)]
    pub test: bool,
}

/// Verify that a campaign exists and belongs to the caller's tenant.
async fn ensure_campaign_owned(
    pool: &sqlx::PgPool,
    auth: &AuthUser,
    id: DbId,
) -> AppResult<Campaign> {
    let campaign = CampaignRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Campaign",
            id,
        }))?;
    if campaign.tenant_id != auth.tenant_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Campaign belongs to another tenant".into(),
        )));
    }
    Ok(campaign)
}

/// GET /api/v1/campaigns
///
/// List the tenant's campaigns, newest first.
pub async fn list_campaigns(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PageQuery>,
) -> AppResult<Json<DataResponse<Vec<Campaign>>>> {
    let (limit, offset) = params.clamp();
    let campaigns =
        CampaignRepo::list_for_tenant(&state.pool, auth.tenant_id, limit, offset).await?;
    Ok(Json(DataResponse { data: campaigns }))
}

/// GET /api/v1/campaigns/{id}
pub async fn get_campaign(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(campaign_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Campaign>>> {
    let campaign = ensure_campaign_owned(&state.pool, &auth, campaign_id).await?;
    Ok(Json(DataResponse { data: campaign }))
}

/// POST /api/v1/campaigns/{id}/dispatch
///
/// Run the dispatch loop for this campaign and return the summary.
/// Pass `{ "test": true }` to target the synthetic test recipient
/// instead of the real audience; `{}` dispatches for real.
pub async fn dispatch_campaign(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(campaign_id): Path<DbId>,
    Json(request): Json<DispatchRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let options = DispatchOptions { test: request.test };

    let summary = run_dispatch(&state, &auth, campaign_id, options).await?;

    Ok(Json(serde_json::json!({ "data": summary })))
}

/// GET /api/v1/campaigns/{id}/outcomes
///
/// List the campaign's delivery outcome rows, newest first.
pub async fn list_outcomes(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(campaign_id): Path<DbId>,
    Query(params): Query<PageQuery>,
) -> AppResult<Json<serde_json::Value>> {
    ensure_campaign_owned(&state.pool, &auth, campaign_id).await?;

    let (limit, offset) = params.clamp();
    let outcomes = OutcomeRepo::list_for_campaign(&state.pool, campaign_id, limit, offset).await?;

    Ok(Json(serde_json::json!({ "data": outcomes })))
}

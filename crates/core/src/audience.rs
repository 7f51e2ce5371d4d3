//! Campaign audience targeting.
//!
//! A campaign row stores a discriminant (`audience_type`) plus a JSON
//! filter document. Exactly one filter strategy applies per campaign;
//! filters are never combined. Parsing is strict about the discriminant
//! and lenient about optional fields, which carry documented defaults.

use serde::Deserialize;

use crate::error::CoreError;
use crate::types::DbId;

/// Default inactivity window for recency targeting, in days.
pub const DEFAULT_INACTIVE_DAYS: i64 = 30;

/// One audience selection strategy, parsed from a campaign row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudienceFilter {
    /// Recipients carrying at least one of the given tags.
    Tags { tag_ids: Vec<DbId> },
    /// Recipients whose last visit is older than the inactivity window.
    Recency { inactive_days: i64 },
    /// Recipients whose point balance falls in `[min, max]`; `max` of
    /// `None` means unbounded above.
    PointRange {
        min_points: i64,
        max_points: Option<i64>,
    },
}

#[derive(Deserialize)]
struct TagsParams {
    tag_ids: Vec<DbId>,
}

#[derive(Deserialize)]
struct RecencyParams {
    inactive_days: Option<i64>,
}

#[derive(Deserialize)]
struct PointRangeParams {
    min_points: Option<i64>,
    max_points: Option<i64>,
}

impl AudienceFilter {
    /// Parse a filter from the campaign's discriminant and JSON document.
    ///
    /// An empty result set downstream is not an error; a filter that can
    /// never be well-formed (unknown discriminant, malformed parameters,
    /// inverted ranges) is.
    pub fn from_parts(
        audience_type: &str,
        filter: &serde_json::Value,
    ) -> Result<Self, CoreError> {
        match audience_type {
            "tags" => {
                let params: TagsParams = parse_params(filter)?;
                if params.tag_ids.is_empty() {
                    return Err(CoreError::Validation(
                        "Tag audience requires at least one tag id".into(),
                    ));
                }
                Ok(AudienceFilter::Tags {
                    tag_ids: params.tag_ids,
                })
            }
            "recency" => {
                let params: RecencyParams = parse_params(filter)?;
                let inactive_days = params.inactive_days.unwrap_or(DEFAULT_INACTIVE_DAYS);
                if inactive_days <= 0 {
                    return Err(CoreError::Validation(
                        "Recency audience requires a positive day count".into(),
                    ));
                }
                Ok(AudienceFilter::Recency { inactive_days })
            }
            "point_range" => {
                let params: PointRangeParams = parse_params(filter)?;
                let min_points = params.min_points.unwrap_or(0);
                if let Some(max) = params.max_points {
                    if max < min_points {
                        return Err(CoreError::Validation(format!(
                            "Point range is inverted: min {min_points}, max {max}"
                        )));
                    }
                }
                Ok(AudienceFilter::PointRange {
                    min_points,
                    max_points: params.max_points,
                })
            }
            other => Err(CoreError::Validation(format!(
                "Unknown audience type: {other}"
            ))),
        }
    }
}

fn parse_params<T: serde::de::DeserializeOwned>(
    filter: &serde_json::Value,
) -> Result<T, CoreError> {
    serde_json::from_value(filter.clone())
        .map_err(|e| CoreError::Validation(format!("Malformed audience filter: {e}")))
}

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;
use mercato_order::repository::RevenueScope;
use mercato_order::revenue::RevenueReport;

#[derive(Debug, Deserialize)]
pub struct RevenueQuery {
    /// "site" or "platform".
    pub scope: String,
    pub site_id: Option<Uuid>,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// GET /v1/revenue?scope=site&site_id=...&from=...&to=...
/// Daily series plus range total; the total is always the sum of the series.
pub async fn revenue_report(
    State(state): State<AppState>,
    Query(query): Query<RevenueQuery>,
) -> Result<Json<RevenueReport>, ApiError> {
    if query.from > query.to {
        return Err(ApiError::BadRequest(
            "`from` must not be after `to`".to_string(),
        ));
    }

    let scope = match query.scope.as_str() {
        "site" => {
            let site_id = query
                .site_id
                .ok_or_else(|| ApiError::BadRequest("site scope needs site_id".to_string()))?;
            RevenueScope::Site(site_id)
        }
        "platform" => RevenueScope::Platform,
        other => {
            return Err(ApiError::BadRequest(format!(
                "unknown revenue scope: {other}"
            )))
        }
    };

    let report = state.attributor.report(scope, query.from, query.to).await?;
    Ok(Json(report))
}

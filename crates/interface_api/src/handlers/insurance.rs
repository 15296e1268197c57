//! Insurance handlers
//!
//! Every handler runs behind the auth middleware, which supplies the caller's
//! `UserName` as a request extension.

use axum::{
    extract::{rejection::{JsonRejection, QueryRejection}, Query, State},
    http::StatusCode,
    Extension, Json,
};

use core_kernel::UserName;
use crate::{AppState, error::ApiError};
use crate::dto::insurance::*;

/// Lists the caller's policies
pub async fn list_insurances(
    State(state): State<AppState>,
    Extension(user): Extension<UserName>,
) -> Result<Json<Vec<InsuranceResponse>>, ApiError> {
    let insurances = state.service.list_insurances(&user).await?;
    Ok(Json(insurances.into_iter().map(InsuranceResponse::from).collect()))
}

/// Buys a policy for the caller
pub async fn buy_insurance(
    State(state): State<AppState>,
    Extension(user): Extension<UserName>,
    request: Result<Json<BuyInsuranceRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) = request?;
    state
        .service
        .buy_insurance(&user, request.into_quote(&user))
        .await?;
    Ok(StatusCode::OK)
}

/// Quotes a product for the caller
pub async fn calculate_quote(
    State(state): State<AppState>,
    Extension(user): Extension<UserName>,
    query: Result<Query<QuoteQuery>, QueryRejection>,
) -> Result<Json<QuoteResponse>, ApiError> {
    let Query(query) = query?;
    let quote = state.service.calculate_quote(&user, query.insurance_type);
    Ok(Json(quote.into()))
}

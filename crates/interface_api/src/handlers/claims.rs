//! Claims handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::warn;

use crate::dto::claims::{parse_claim_id, ClaimResponse, SubmitClaimRequest, SubmitClaimResponse};
use crate::{error::ApiError, AppState};

/// Submits a claim for adjudication
///
/// Responds `201 Created` with the new claim id and its decided status.
pub async fn submit_claim(
    State(state): State<AppState>,
    payload: Result<Json<SubmitClaimRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmitClaimResponse>), ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Rejected claim payload");
        ApiError::from(rejection)
    })?;

    let submission = request.into_submission().map_err(|e| {
        warn!(error = %e, "Claim submission failed validation");
        e
    })?;

    let claim = state.claims.submit(submission).await?;

    Ok((StatusCode::CREATED, Json(SubmitClaimResponse::from(&claim))))
}

/// Gets a claim by ID
pub async fn get_claim(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim_id = match parse_claim_id(&raw_id) {
        Some(id) => id,
        None => return Err(state.claims.unknown_reference(&raw_id).into()),
    };

    let claim = state.claims.lookup(claim_id).await?;
    Ok(Json(ClaimResponse::from(&claim)))
}

//! Claims DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use core_kernel::ClaimId;
use domain_claims::claim::MAX_CLAIM_AMOUNT;
use domain_claims::{Claim, ClaimSubmission};

use crate::error::ApiError;

/// Body of `POST /claims`
///
/// The amount is accepted either as a JSON number or as a numeric string.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitClaimRequest {
    #[validate(length(min = 1, max = 32, message = "must be between 1 and 32 characters"))]
    pub member_id: String,
    #[validate(length(min = 1, max = 32, message = "must be between 1 and 32 characters"))]
    pub provider_id: String,
    #[validate(length(min = 1, max = 32, message = "must be between 1 and 32 characters"))]
    pub diagnosis_code: String,
    #[validate(length(min = 1, max = 32, message = "must be between 1 and 32 characters"))]
    pub procedure_code: String,
    #[validate(custom(function = "validate_claim_amount"))]
    pub claim_amount: Decimal,
}

fn validate_claim_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if *amount <= Decimal::ZERO {
        let mut err = ValidationError::new("claim_amount_range");
        err.message = Some("must be greater than 0".into());
        return Err(err);
    }
    if *amount >= MAX_CLAIM_AMOUNT {
        let mut err = ValidationError::new("claim_amount_range");
        err.message = Some(format!("must be less than {}", MAX_CLAIM_AMOUNT).into());
        return Err(err);
    }
    Ok(())
}

impl SubmitClaimRequest {
    /// Copy with surrounding whitespace stripped from every code
    ///
    /// Length checks run on the trimmed values so `"   "` counts as empty.
    pub fn normalized(self) -> Self {
        Self {
            member_id: self.member_id.trim().to_string(),
            provider_id: self.provider_id.trim().to_string(),
            diagnosis_code: self.diagnosis_code.trim().to_string(),
            procedure_code: self.procedure_code.trim().to_string(),
            claim_amount: self.claim_amount,
        }
    }

    /// Validates the request and converts it into a domain submission
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` listing every offending field
    pub fn into_submission(self) -> Result<ClaimSubmission, ApiError> {
        let request = self.normalized();
        request.validate()?;

        Ok(ClaimSubmission::new(
            &request.member_id,
            &request.provider_id,
            &request.diagnosis_code,
            &request.procedure_code,
            request.claim_amount,
        )?)
    }
}

/// Body returned by `POST /claims`
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitClaimResponse {
    pub claim_id: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<&Claim> for SubmitClaimResponse {
    fn from(claim: &Claim) -> Self {
        Self {
            claim_id: claim.claim_id().to_string(),
            status: claim.status().to_string(),
            reason: claim.reason().map(str::to_string),
        }
    }
}

/// Body returned by `GET /claims/{claim_id}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ClaimResponse {
    pub claim_id: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub member_id: String,
    pub procedure_code: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub claim_amount: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<&Claim> for ClaimResponse {
    fn from(claim: &Claim) -> Self {
        Self {
            claim_id: claim.claim_id().to_string(),
            status: claim.status().to_string(),
            reason: claim.reason().map(str::to_string),
            member_id: claim.member_id().to_string(),
            procedure_code: claim.procedure_code().to_string(),
            claim_amount: claim.claim_amount(),
            created_at: claim.created_at(),
        }
    }
}

/// Parses the path segment of a claim lookup
pub fn parse_claim_id(raw: &str) -> Option<ClaimId> {
    raw.trim().parse().ok()
}

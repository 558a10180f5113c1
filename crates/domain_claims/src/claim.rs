//! Claim entity and the validated submission it is built from

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::ClaimId;
use crate::adjudication::Adjudication;
use crate::error::ClaimError;

/// Longest accepted member, provider, diagnosis or procedure code
pub const MAX_CODE_LENGTH: usize = 32;

/// Claims at or above this amount are refused at intake
pub const MAX_CLAIM_AMOUNT: Decimal = dec!(1000000);

/// Final status of a claim
///
/// The labels are persisted and returned over the API exactly as spelled here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimStatus {
    /// Paid in full
    Approved,
    /// Exceeds the benefit limit, only partially covered
    Partial,
    /// Held for review as possible fraud
    Flagged,
    /// Member not eligible
    Rejected,
}

impl ClaimStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Approved => "Approved",
            ClaimStatus::Partial => "Partial",
            ClaimStatus::Flagged => "Flagged",
            ClaimStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Approved" => Ok(ClaimStatus::Approved),
            "Partial" => Ok(ClaimStatus::Partial),
            "Flagged" => Ok(ClaimStatus::Flagged),
            "Rejected" => Ok(ClaimStatus::Rejected),
            other => Err(ClaimError::UnknownStatus(other.to_string())),
        }
    }
}

/// Trims a code and upper-cases it
///
/// Member, provider and procedure codes are compared case-insensitively by
/// storing them in one canonical form.
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// A claim submission that has passed input validation
///
/// Holding a `ClaimSubmission` means every identifier is non-empty and at
/// most [`MAX_CODE_LENGTH`] characters, and the amount lies in
/// `(0, MAX_CLAIM_AMOUNT)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimSubmission {
    member_id: String,
    provider_id: String,
    diagnosis_code: String,
    procedure_code: String,
    claim_amount: Decimal,
}

impl ClaimSubmission {
    /// Validates and normalizes raw submission fields
    ///
    /// # Errors
    ///
    /// Returns `ClaimError::Validation` naming the first offending field
    pub fn new(
        member_id: &str,
        provider_id: &str,
        diagnosis_code: &str,
        procedure_code: &str,
        claim_amount: Decimal,
    ) -> Result<Self, ClaimError> {
        let member_id = require_code("member_id", normalize_code(member_id))?;
        let provider_id = require_code("provider_id", normalize_code(provider_id))?;
        let diagnosis_code = require_code("diagnosis_code", diagnosis_code.trim().to_string())?;
        let procedure_code = require_code("procedure_code", normalize_code(procedure_code))?;

        if claim_amount <= Decimal::ZERO {
            return Err(ClaimError::validation("claim_amount", "must be greater than 0"));
        }
        if claim_amount >= MAX_CLAIM_AMOUNT {
            return Err(ClaimError::validation(
                "claim_amount",
                format!("must be less than {}", MAX_CLAIM_AMOUNT),
            ));
        }

        Ok(Self {
            member_id,
            provider_id,
            diagnosis_code,
            procedure_code,
            claim_amount,
        })
    }

    pub fn member_id(&self) -> &str {
        &self.member_id
    }

    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }

    pub fn diagnosis_code(&self) -> &str {
        &self.diagnosis_code
    }

    pub fn procedure_code(&self) -> &str {
        &self.procedure_code
    }

    pub fn claim_amount(&self) -> Decimal {
        self.claim_amount
    }
}

fn require_code(field: &str, value: String) -> Result<String, ClaimError> {
    if value.is_empty() {
        return Err(ClaimError::validation(field, "must not be empty"));
    }
    if value.chars().count() > MAX_CODE_LENGTH {
        return Err(ClaimError::validation(
            field,
            format!("must be at most {} characters", MAX_CODE_LENGTH),
        ));
    }
    Ok(value)
}

/// A stored claim
///
/// Fields are private: a claim is created once from a submission and its
/// adjudication, then only read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Claim {
    claim_id: ClaimId,
    member_id: String,
    provider_id: String,
    diagnosis_code: String,
    procedure_code: String,
    claim_amount: Decimal,
    status: ClaimStatus,
    reason: Option<String>,
    created_at: DateTime<Utc>,
}

impl Claim {
    /// Creates a new claim with a freshly generated identifier
    pub fn new(submission: ClaimSubmission, adjudication: Adjudication) -> Self {
        Self {
            claim_id: ClaimId::new(),
            member_id: submission.member_id,
            provider_id: submission.provider_id,
            diagnosis_code: submission.diagnosis_code,
            procedure_code: submission.procedure_code,
            claim_amount: submission.claim_amount,
            status: adjudication.status,
            reason: adjudication.reason.map(|r| r.to_string()),
            created_at: Utc::now(),
        }
    }

    /// Reassembles a claim read back from storage
    #[allow(clippy::too_many_arguments)]
    pub fn rehydrate(
        claim_id: ClaimId,
        member_id: String,
        provider_id: String,
        diagnosis_code: String,
        procedure_code: String,
        claim_amount: Decimal,
        status: ClaimStatus,
        reason: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            claim_id,
            member_id,
            provider_id,
            diagnosis_code,
            procedure_code,
            claim_amount,
            status,
            reason,
            created_at,
        }
    }

    pub fn claim_id(&self) -> ClaimId {
        self.claim_id
    }

    pub fn member_id(&self) -> &str {
        &self.member_id
    }

    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }

    pub fn diagnosis_code(&self) -> &str {
        &self.diagnosis_code
    }

    pub fn procedure_code(&self) -> &str {
        &self.procedure_code
    }

    pub fn claim_amount(&self) -> Decimal {
        self.claim_amount
    }

    pub fn status(&self) -> ClaimStatus {
        self.status
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

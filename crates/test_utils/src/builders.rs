//! Test Data Builders
//!
//! Provides a builder for claim submissions with sensible defaults. Tests
//! set only the fields they care about and render either a domain
//! [`ClaimSubmission`] or a JSON request body.

use rust_decimal::Decimal;
use serde_json::{json, Value};

use domain_claims::{ClaimError, ClaimSubmission};

use crate::fixtures::{AmountFixtures, CodeFixtures, MemberFixtures};

/// Builder for claim submissions
#[derive(Debug, Clone)]
pub struct ClaimSubmissionBuilder {
    member_id: String,
    provider_id: String,
    diagnosis_code: String,
    procedure_code: String,
    claim_amount: Decimal,
}

impl Default for ClaimSubmissionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimSubmissionBuilder {
    /// Creates a new builder for a routine claim by the active member
    pub fn new() -> Self {
        Self {
            member_id: MemberFixtures::active().to_string(),
            provider_id: CodeFixtures::provider().to_string(),
            diagnosis_code: CodeFixtures::diagnosis().to_string(),
            procedure_code: CodeFixtures::procedure().to_string(),
            claim_amount: AmountFixtures::routine(),
        }
    }

    /// Sets the member ID
    pub fn with_member_id(mut self, id: impl Into<String>) -> Self {
        self.member_id = id.into();
        self
    }

    /// Sets the provider ID
    pub fn with_provider_id(mut self, id: impl Into<String>) -> Self {
        self.provider_id = id.into();
        self
    }

    /// Sets the diagnosis code
    pub fn with_diagnosis_code(mut self, code: impl Into<String>) -> Self {
        self.diagnosis_code = code.into();
        self
    }

    /// Sets the procedure code
    pub fn with_procedure_code(mut self, code: impl Into<String>) -> Self {
        self.procedure_code = code.into();
        self
    }

    /// Sets the claimed amount
    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.claim_amount = amount;
        self
    }

    /// Builds the validated domain submission
    pub fn build(self) -> Result<ClaimSubmission, ClaimError> {
        ClaimSubmission::new(
            &self.member_id,
            &self.provider_id,
            &self.diagnosis_code,
            &self.procedure_code,
            self.claim_amount,
        )
    }

    /// Renders the `POST /claims` body
    ///
    /// The amount is sent as a JSON number, as clients usually do.
    pub fn to_json(&self) -> Value {
        json!({
            "member_id": self.member_id,
            "provider_id": self.provider_id,
            "diagnosis_code": self.diagnosis_code,
            "procedure_code": self.procedure_code,
            "claim_amount": decimal_to_json_number(self.claim_amount),
        })
    }
}

fn decimal_to_json_number(amount: Decimal) -> Value {
    serde_json::from_str(&amount.normalize().to_string()).unwrap_or(Value::Null)
}

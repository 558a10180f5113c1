//! Claims domain services
//!
//! [`ClaimService`] implements the two use cases of the service: submitting a
//! claim and looking one up.

use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use core_kernel::ClaimId;
use crate::adjudication::BenefitRules;
use crate::claim::{Claim, ClaimSubmission};
use crate::error::ClaimError;
use crate::ports::{ClaimStore, MemberDirectory};

/// Service orchestrating claim intake and lookup
///
/// Collaborators are injected at construction so tests can swap the member
/// directory and the store for in-memory fakes.
#[derive(Clone)]
pub struct ClaimService {
    members: Arc<dyn MemberDirectory>,
    store: Arc<dyn ClaimStore>,
    rules: BenefitRules,
}

impl ClaimService {
    /// Creates a new claim service
    ///
    /// # Arguments
    ///
    /// * `members` - Source of member eligibility
    /// * `store` - Claim storage, also used for the procedure cost history
    /// * `rules` - Benefit limit and fraud multiplier
    pub fn new(
        members: Arc<dyn MemberDirectory>,
        store: Arc<dyn ClaimStore>,
        rules: BenefitRules,
    ) -> Self {
        Self {
            members,
            store,
            rules,
        }
    }

    /// Adjudicates and stores a validated submission
    ///
    /// This method:
    /// 1. Looks up the member's eligibility
    /// 2. Looks up the historical average for the procedure
    /// 3. Runs the adjudication rules
    /// 4. Stores the claim under a new identifier
    ///
    /// # Errors
    ///
    /// Returns `ClaimError::Storage` if a lookup or the insert fails. Nothing
    /// is written in that case.
    #[instrument(
        skip(self, submission),
        fields(
            member_id = %submission.member_id(),
            procedure_code = %submission.procedure_code(),
        )
    )]
    pub async fn submit(&self, submission: ClaimSubmission) -> Result<Claim, ClaimError> {
        let member_is_active = self
            .members
            .is_active(submission.member_id())
            .await
            .map_err(|e| {
                error!(error = %e, "Member lookup failed");
                ClaimError::from(e)
            })?;

        let historical_average = self
            .store
            .average_amount_for_procedure(submission.procedure_code())
            .await
            .map_err(|e| {
                error!(error = %e, "Procedure history lookup failed");
                ClaimError::from(e)
            })?;

        let adjudication = self.rules.adjudicate(
            submission.claim_amount(),
            member_is_active,
            historical_average,
        );

        let claim = Claim::new(submission, adjudication);

        self.store.insert(&claim).await.map_err(|e| {
            error!(claim_id = %claim.claim_id(), error = %e, "Failed to store claim");
            ClaimError::from(e)
        })?;

        info!(
            claim_id = %claim.claim_id(),
            status = %claim.status(),
            reason = claim.reason().unwrap_or(""),
            amount = %claim.claim_amount(),
            "Claim created"
        );

        Ok(claim)
    }

    /// Retrieves a stored claim
    ///
    /// # Errors
    ///
    /// Returns `ClaimError::ClaimNotFound` if no claim has the given id
    #[instrument(skip(self, claim_id), fields(claim_id = %claim_id))]
    pub async fn lookup(&self, claim_id: ClaimId) -> Result<Claim, ClaimError> {
        let found = self.store.find_by_id(claim_id).await.map_err(|e| {
            error!(error = %e, "Failed to read claim");
            ClaimError::from(e)
        })?;

        match found {
            Some(claim) => Ok(claim),
            None => {
                warn!("Claim not found");
                Err(ClaimError::ClaimNotFound(claim_id.to_string()))
            }
        }
    }

    /// Reports a lookup for an identifier that could not even be parsed
    ///
    /// Such an id can never match a stored claim, so it is treated exactly
    /// like an unknown one.
    pub fn unknown_reference(&self, raw_id: &str) -> ClaimError {
        warn!(claim_id = %raw_id, "Claim not found");
        ClaimError::ClaimNotFound(raw_id.to_string())
    }
}

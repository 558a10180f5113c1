//! Claims domain ports
//!
//! The service reads member eligibility and claim history through these
//! traits and writes claims through [`ClaimStore`]. Adapters live in
//! `infra_db`.

use async_trait::async_trait;
use rust_decimal::Decimal;

use core_kernel::{ClaimId, DomainPort, PortError};
use crate::claim::Claim;

/// Read-only view of the member registry
#[async_trait]
pub trait MemberDirectory: DomainPort {
    /// Returns whether the member may currently claim
    ///
    /// Members unknown to the directory are reported as inactive rather
    /// than as an error.
    async fn is_active(&self, member_id: &str) -> Result<bool, PortError>;
}

/// Durable storage for claims
#[async_trait]
pub trait ClaimStore: DomainPort {
    /// Persists a new claim in a single atomic write
    async fn insert(&self, claim: &Claim) -> Result<(), PortError>;

    /// Looks up a claim by id
    async fn find_by_id(&self, claim_id: ClaimId) -> Result<Option<Claim>, PortError>;

    /// Average amount of all stored claims for a procedure
    ///
    /// Returns `None` when no claim for the procedure has been stored yet.
    async fn average_amount_for_procedure(
        &self,
        procedure_code: &str,
    ) -> Result<Option<Decimal>, PortError>;
}

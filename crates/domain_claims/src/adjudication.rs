//! Claim adjudication logic
//!
//! Rules are evaluated in a fixed order and the first one that matches
//! decides the claim:
//!
//! 1. Member inactive → `Rejected`
//! 2. Amount above the benefit limit → `Partial`
//! 3. Amount above `fraud_multiplier` × the procedure's historical average → `Flagged`
//! 4. Otherwise → `Approved`
//!
//! Both amount comparisons are strict, so a claim sitting exactly on the
//! limit or exactly on the multiple passes that rule.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::claim::ClaimStatus;

/// Default benefit limit per claim
pub const DEFAULT_BENEFIT_LIMIT: Decimal = dec!(40000);

/// Default ratio to the historical average above which a claim is flagged
pub const DEFAULT_FRAUD_MULTIPLIER: Decimal = dec!(2);

/// Thresholds used by the adjudication rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitRules {
    /// Claims above this amount are only partially covered
    pub benefit_limit: Decimal,
    /// Claims above this multiple of the procedure average are flagged
    pub fraud_multiplier: Decimal,
}

impl Default for BenefitRules {
    fn default() -> Self {
        Self {
            benefit_limit: DEFAULT_BENEFIT_LIMIT,
            fraud_multiplier: DEFAULT_FRAUD_MULTIPLIER,
        }
    }
}

/// Reason attached to a non-approved decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdjudicationReason {
    /// Member is not active (or not known to the directory)
    MemberInactive,
    /// Amount is zero or negative
    InvalidAmount,
    /// Amount exceeds the benefit limit
    ExceedsBenefitLimit,
    /// Amount exceeds the configured multiple of the historical average
    SuspectedFraud { multiplier: Decimal },
}

impl fmt::Display for AdjudicationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdjudicationReason::MemberInactive => f.write_str("member inactive"),
            AdjudicationReason::InvalidAmount => f.write_str("invalid claim amount"),
            AdjudicationReason::ExceedsBenefitLimit => f.write_str("exceeds benefit limit"),
            AdjudicationReason::SuspectedFraud { multiplier } => write!(
                f,
                "amount exceeds {}x historical average - possible fraud",
                multiplier.normalize()
            ),
        }
    }
}

/// Outcome of adjudicating a claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adjudication {
    pub status: ClaimStatus,
    pub reason: Option<AdjudicationReason>,
}

impl Adjudication {
    fn approved() -> Self {
        Self {
            status: ClaimStatus::Approved,
            reason: None,
        }
    }

    fn decided(status: ClaimStatus, reason: AdjudicationReason) -> Self {
        Self {
            status,
            reason: Some(reason),
        }
    }
}

impl BenefitRules {
    pub fn new(benefit_limit: Decimal, fraud_multiplier: Decimal) -> Self {
        Self {
            benefit_limit,
            fraud_multiplier,
        }
    }

    /// Decides the status of a claim
    ///
    /// Pure and deterministic: the same inputs always give the same result.
    ///
    /// # Arguments
    ///
    /// * `claim_amount` - Amount claimed
    /// * `member_is_active` - Whether the member is currently eligible
    /// * `historical_average` - Average amount of earlier claims for the same
    ///   procedure, or `None` when there is no history
    pub fn adjudicate(
        &self,
        claim_amount: Decimal,
        member_is_active: bool,
        historical_average: Option<Decimal>,
    ) -> Adjudication {
        if !member_is_active {
            return Adjudication::decided(ClaimStatus::Rejected, AdjudicationReason::MemberInactive);
        }

        if claim_amount <= Decimal::ZERO {
            return Adjudication::decided(ClaimStatus::Rejected, AdjudicationReason::InvalidAmount);
        }

        if claim_amount > self.benefit_limit {
            return Adjudication::decided(
                ClaimStatus::Partial,
                AdjudicationReason::ExceedsBenefitLimit,
            );
        }

        if let Some(average) = historical_average {
            // overflow leaves the claim unflagged
            let exceeds = average
                .checked_mul(self.fraud_multiplier)
                .map_or(false, |threshold| claim_amount > threshold);
            if exceeds {
                return Adjudication::decided(
                    ClaimStatus::Flagged,
                    AdjudicationReason::SuspectedFraud {
                        multiplier: self.fraud_multiplier,
                    },
                );
            }
        }

        Adjudication::approved()
    }
}

//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating claim inputs that satisfy
//! the intake validation rules.

use proptest::prelude::*;
use rust_decimal::Decimal;

use domain_claims::ClaimSubmission;

/// Strategy for valid member, provider and procedure codes
pub fn code_strategy() -> impl Strategy<Value = String> {
    "[A-Z][A-Z0-9]{0,11}"
}

/// Strategy for amounts accepted at intake, with two decimal places
pub fn claim_amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for amounts within the default benefit limit
pub fn covered_amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=4_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for non-positive amounts, all refused at intake
pub fn non_positive_amount_strategy() -> impl Strategy<Value = Decimal> {
    (-100_000_000i64..=0i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for complete valid submissions
pub fn submission_strategy() -> impl Strategy<Value = ClaimSubmission> {
    (
        code_strategy(),
        code_strategy(),
        code_strategy(),
        code_strategy(),
        claim_amount_strategy(),
    )
        .prop_filter_map("valid submission", |(member, provider, diagnosis, procedure, amount)| {
            ClaimSubmission::new(&member, &provider, &diagnosis, &procedure, amount).ok()
        })
}

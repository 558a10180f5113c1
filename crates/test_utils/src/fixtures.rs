//! Pre-built Test Fixtures
//!
//! Identifiers and amounts shared by the API and repository tests. They line
//! up with the default configuration, where only `M123` is an active member.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fixture for member identifiers
pub struct MemberFixtures;

impl MemberFixtures {
    /// Member listed as active in the default configuration
    pub fn active() -> &'static str {
        "M123"
    }

    /// Member absent from the directory
    pub fn inactive() -> &'static str {
        "M999"
    }
}

/// Fixture for provider, diagnosis and procedure codes
pub struct CodeFixtures;

impl CodeFixtures {
    pub fn provider() -> &'static str {
        "PR1"
    }

    pub fn diagnosis() -> &'static str {
        "D10"
    }

    /// Procedure used by the fraud history scenarios
    pub fn procedure() -> &'static str {
        "P001"
    }

    pub fn other_procedure() -> &'static str {
        "P002"
    }
}

/// Fixture for claim amounts relative to the default benefit rules
pub struct AmountFixtures;

impl AmountFixtures {
    /// Comfortably inside the benefit limit
    pub fn routine() -> Decimal {
        dec!(5000)
    }

    /// Exactly the benefit limit, still fully covered
    pub fn at_limit() -> Decimal {
        dec!(40000)
    }

    /// Just above the benefit limit
    pub fn over_limit() -> Decimal {
        dec!(40000.01)
    }

    /// Well above the benefit limit
    pub fn large() -> Decimal {
        dec!(50000)
    }
}

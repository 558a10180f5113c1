//! Claims Intake Domain
//!
//! This crate holds the business side of claim intake: the validated
//! submission type, the adjudication rules that decide a claim's status, the
//! port traits the rules read from, and the service that ties them together.
//!
//! # Claim Lifecycle
//!
//! ```text
//! Submission -> Adjudication -> Approved | Partial | Flagged | Rejected (final)
//! ```
//!
//! A claim receives its status exactly once, when it is created. Nothing in
//! this crate can change it afterwards.

pub mod claim;
pub mod adjudication;
pub mod ports;
pub mod services;
pub mod error;

pub use claim::{Claim, ClaimStatus, ClaimSubmission};
pub use adjudication::{Adjudication, AdjudicationReason, BenefitRules};
pub use ports::{ClaimStore, MemberDirectory};
pub use services::ClaimService;
pub use error::ClaimError;

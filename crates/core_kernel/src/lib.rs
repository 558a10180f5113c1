//! Core Kernel - Foundational types for the claims service
//!
//! This crate provides the building blocks shared by the domain, the
//! database layer and the HTTP layer:
//! - Strongly-typed identifiers
//! - Port error types and adapter health reporting

pub mod identifiers;
pub mod ports;

pub use identifiers::ClaimId;
pub use ports::{
    AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};

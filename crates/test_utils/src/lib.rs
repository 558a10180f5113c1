//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! claims intake test suite.
//!
//! # Modules
//!
//! - `fixtures`: Known member ids, codes and amounts
//! - `builders`: Builder for claim submissions and request bodies
//! - `database`: In-memory SQLite databases with the claims schema
//! - `assertions`: Assertion helpers for API response bodies
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;

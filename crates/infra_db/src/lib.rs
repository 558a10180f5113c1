//! Infrastructure Database Layer
//!
//! This crate provides the storage side of the claims service: a pooled
//! SQLite database holding a single `claims` table, and the adapters that
//! implement the domain's ports on top of it.
//!
//! # Architecture
//!
//! The crate follows the repository pattern. [`ClaimsRepository`] implements
//! `domain_claims::ClaimStore`, and [`StaticMemberDirectory`] implements
//! `domain_claims::MemberDirectory` from configured reference data.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, ensure_schema, ClaimsRepository, DatabaseConfig};
//!
//! let pool = create_pool(DatabaseConfig::new("sqlite://claims.db")).await?;
//! ensure_schema(&pool).await?;
//! let repo = ClaimsRepository::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod schema;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, DatabaseConfig};
pub use error::DatabaseError;
pub use schema::ensure_schema;
pub use repositories::ClaimsRepository;
pub use adapters::StaticMemberDirectory;

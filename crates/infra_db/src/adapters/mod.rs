//! Adapters for reference data the service does not own

pub mod members;

pub use members::StaticMemberDirectory;

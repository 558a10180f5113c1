//! Strongly-typed identifiers for domain entities
//!
//! Wrapping UUIDs in a newtype keeps claim identifiers from being mixed up
//! with the caller-supplied member, provider and procedure codes, which are
//! plain strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

const CLAIM_PREFIX: &str = "CLM";

/// Identifier of a stored claim
///
/// Rendered as `CLM-<uuid>`. Parsing accepts both the prefixed form and a
/// bare UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClaimId(Uuid);

impl ClaimId {
    /// Creates a new random identifier
    ///
    /// UUID v4 needs no coordination between concurrent writers, so two
    /// requests racing on the same table never produce the same id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ClaimId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", CLAIM_PREFIX, self.0)
    }
}

impl FromStr for ClaimId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid_str = s
            .strip_prefix(CLAIM_PREFIX)
            .and_then(|rest| rest.strip_prefix('-'))
            .unwrap_or(s);
        Ok(Self(Uuid::parse_str(uuid_str)?))
    }
}

impl From<Uuid> for ClaimId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<ClaimId> for Uuid {
    fn from(id: ClaimId) -> Uuid {
        id.0
    }
}

// Serialized in the display form so API payloads and stored rows agree.
impl Serialize for ClaimId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClaimId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

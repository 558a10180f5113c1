//! Static member directory
//!
//! Member records belong to an external registry. Until that registry is
//! reachable from this service, eligibility comes from a configured list of
//! active member ids. Anyone not on the list is treated as inactive.

use async_trait::async_trait;
use std::collections::HashSet;
use tracing::debug;

use core_kernel::{DomainPort, PortError};
use domain_claims::claim::normalize_code;
use domain_claims::MemberDirectory;

/// Member directory backed by an in-memory set of active member ids
#[derive(Debug, Clone, Default)]
pub struct StaticMemberDirectory {
    active: HashSet<String>,
}

impl StaticMemberDirectory {
    /// Creates a directory from the ids of active members
    ///
    /// Ids are normalized the same way submissions are, so configuration
    /// may list them in any case.
    pub fn new<I, S>(active_members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let active = active_members
            .into_iter()
            .map(|id| normalize_code(id.as_ref()))
            .filter(|id| !id.is_empty())
            .collect();
        Self { active }
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

impl DomainPort for StaticMemberDirectory {}

#[async_trait]
impl MemberDirectory for StaticMemberDirectory {
    async fn is_active(&self, member_id: &str) -> Result<bool, PortError> {
        let active = self.active.contains(member_id);
        debug!(member_id, active, "Member eligibility looked up");
        Ok(active)
    }
}

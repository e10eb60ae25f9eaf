//! Authorization gate
//!
//! Capability checks are answered by a [`CapabilityProvider`] queried with an
//! explicit user and module context; nothing here reads ambient session state.

use std::collections::HashSet;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::ModuleContext;

/// Capabilities the podcast module checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// Post new episodes and edit your own within the editing window
    #[serde(rename = "mod/pcast:write")]
    Write,
    /// Edit any episode at any time
    #[serde(rename = "mod/pcast:manage")]
    Manage,
    /// Episodes you submit are approved immediately
    #[serde(rename = "mod/pcast:approve")]
    Approve,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Write => "mod/pcast:write",
            Capability::Manage => "mod/pcast:manage",
            Capability::Approve => "mod/pcast:approve",
        }
    }
}

impl Display for Capability {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mod/pcast:write" => Ok(Capability::Write),
            "mod/pcast:manage" => Ok(Capability::Manage),
            "mod/pcast:approve" => Ok(Capability::Approve),
            _ => Err(anyhow::anyhow!("Unknown capability: {}", s)),
        }
    }
}

/// Resolves whether a user holds a capability in a module context.
///
/// Implementors only provide `has_capability`; the per-check helpers are what
/// the workflow calls.
pub trait CapabilityProvider: Send + Sync {
    fn has_capability(&self, user_id: i64, capability: Capability, context: &ModuleContext)
        -> bool;

    fn can_write(&self, user_id: i64, context: &ModuleContext) -> bool {
        self.has_capability(user_id, Capability::Write, context)
    }

    fn can_manage(&self, user_id: i64, context: &ModuleContext) -> bool {
        self.has_capability(user_id, Capability::Manage, context)
    }

    fn can_approve(&self, user_id: i64, context: &ModuleContext) -> bool {
        self.has_capability(user_id, Capability::Approve, context)
    }
}

/// Fixed capability set, granted in every context.
#[derive(Debug, Clone, Default)]
pub struct StaticCapabilities {
    granted: HashSet<Capability>,
}

impl StaticCapabilities {
    pub fn new(granted: impl IntoIterator<Item = Capability>) -> Self {
        Self {
            granted: granted.into_iter().collect(),
        }
    }

    pub fn none() -> Self {
        Self::default()
    }
}

impl CapabilityProvider for StaticCapabilities {
    fn has_capability(
        &self,
        _user_id: i64,
        capability: Capability,
        _context: &ModuleContext,
    ) -> bool {
        self.granted.contains(&capability)
    }
}

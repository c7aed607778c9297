//! Inventory type definitions
//!
//! Mirrors the JSON document expected by Ansible's dynamic inventory
//! protocol: one key per group plus a reserved `_meta` section.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::record::META_KEY;
use crate::value::VariableValue;

/// Group every host without a `groups` field lands in
pub const UNGROUPED: &str = "ungrouped";

/// Variables keyed by name
pub type Variables = BTreeMap<String, VariableValue>;

// ============================================================================
// Groups
// ============================================================================

/// A single inventory group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupEntry {
    /// Member hosts, in record order; duplicates are kept
    #[serde(default)]
    pub hosts: Vec<String>,
    /// Group variables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vars: Option<Variables>,
    /// Child groups, in record order; duplicates are kept
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<String>>,
}

impl GroupEntry {
    /// Create an empty group
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a group variable
    #[must_use]
    pub fn var(&self, name: &str) -> Option<&VariableValue> {
        self.vars.as_ref().and_then(|vars| vars.get(name))
    }
}

// ============================================================================
// Inventory
// ============================================================================

/// Reserved `_meta` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// Per-host variables, only for hosts that declared some
    #[serde(default)]
    pub hostvars: BTreeMap<String, Variables>,
}

/// Complete inventory document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    /// Groups keyed by name
    #[serde(flatten)]
    pub groups: BTreeMap<String, GroupEntry>,
    /// Host variables
    #[serde(rename = "_meta", default)]
    pub meta: Meta,
}

impl Inventory {
    /// Inventory with no groups and an empty `_meta.hostvars`
    ///
    /// This is also the answer to `--host`: host variables are already part
    /// of the `--list` output.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Look up a group
    #[must_use]
    pub fn group(&self, name: &str) -> Option<&GroupEntry> {
        self.groups.get(name)
    }

    /// Get a group, creating it with no hosts if absent
    pub fn ensure_group(&mut self, name: &str) -> &mut GroupEntry {
        debug_assert_ne!(name, META_KEY);
        self.groups.entry(name.to_string()).or_default()
    }

    /// Variables declared for a host
    #[must_use]
    pub fn hostvars(&self, hostname: &str) -> Option<&Variables> {
        self.meta.hostvars.get(hostname)
    }

    /// Get a host's variables, creating an empty map if absent
    pub fn ensure_hostvars(&mut self, hostname: &str) -> &mut Variables {
        self.meta
            .hostvars
            .entry(hostname.to_string())
            .or_default()
    }

    /// Number of groups
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of distinct hosts across all groups
    #[must_use]
    pub fn host_count(&self) -> usize {
        let mut hosts: Vec<&str> = self
            .groups
            .values()
            .flat_map(|g| g.hosts.iter().map(String::as_str))
            .collect();
        hosts.sort_unstable();
        hosts.dedup();
        hosts.len()
    }

    /// Whether the inventory has no groups and no host variables
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.meta.hostvars.is_empty()
    }
}

//! Typed inventory records
//!
//! A decoded [`FieldMap`] is classified into a host record, a group record,
//! or an ignored record. All list splitting and variable parsing happens here
//! so that assembly only ever sees validated data.

use std::fmt;

use crate::error::DecodeIssue;
use crate::fields::{FieldMap, decode_with_issues};
use crate::value::{VarList, parse_var_list_with_issues};

/// Field carrying a host name
pub const HOSTNAME: &str = "hostname";
/// Field carrying a host's comma-separated groups
pub const GROUPS: &str = "groups";
/// Field carrying a host's `name:value` variables
pub const HOSTVARS: &str = "hostvars";
/// Field carrying a group name
pub const GROUP: &str = "group";
/// Field carrying a group's `name:value` variables
pub const VARS: &str = "vars";
/// Field carrying a group's comma-separated child groups
pub const CHILDREN: &str = "children";

/// Top-level key reserved for host variables in the inventory document
pub const META_KEY: &str = "_meta";

/// A host declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRecord {
    /// Host name, as written in the record
    pub hostname: String,
    /// Groups the host belongs to; `None` when the host is ungrouped
    pub groups: Option<Vec<String>>,
    /// Host variables; `Some` whenever the record has a `hostvars` field
    pub hostvars: Option<VarList>,
}

/// A group declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRecord {
    /// Group name
    pub name: String,
    /// Group variables; `Some` whenever the record has a `vars` field
    pub vars: Option<VarList>,
    /// Child groups; `Some` whenever the record has a `children` field
    pub children: Option<Vec<String>>,
}

/// Why a record contributes nothing to the inventory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// `group=` without `vars` or `children`
    BareGroup(String),
    /// `hostname` or `group` present but empty
    EmptyName(&'static str),
    /// `group=_meta`
    ReservedGroup,
    /// Neither `hostname` nor `group`
    Unrecognized,
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IgnoreReason::BareGroup(name) => {
                write!(f, "group `{name}` declares neither vars nor children")
            }
            IgnoreReason::EmptyName(field) => write!(f, "`{field}` is empty"),
            IgnoreReason::ReservedGroup => write!(f, "group name `{META_KEY}` is reserved"),
            IgnoreReason::Unrecognized => {
                write!(f, "record has neither `{HOSTNAME}` nor `{GROUP}`")
            }
        }
    }
}

/// Classified inventory record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// Host membership and host variables
    Host(HostRecord),
    /// Group variables and children
    Group(GroupRecord),
    /// Record that does not change the inventory
    Ignored(IgnoreReason),
}

impl Record {
    /// Classify a decoded field map
    ///
    /// Returns the record together with every item that had to be skipped.
    #[must_use]
    pub fn classify(fields: &FieldMap) -> (Self, Vec<DecodeIssue>) {
        let mut issues = Vec::new();

        if let Some(hostname) = fields.get(HOSTNAME) {
            if hostname.is_empty() {
                return (Record::Ignored(IgnoreReason::EmptyName(HOSTNAME)), issues);
            }

            // A `groups` field that yields no usable name leaves the host ungrouped
            let groups = fields
                .get(GROUPS)
                .map(|list| split_names(list, &mut issues))
                .filter(|names| !names.is_empty());
            let hostvars = fields
                .get(HOSTVARS)
                .map(|list| collect_vars(list, &mut issues));

            let record = HostRecord {
                hostname: hostname.to_string(),
                groups,
                hostvars,
            };
            return (Record::Host(record), issues);
        }

        if let Some(name) = fields.get(GROUP) {
            if name.is_empty() {
                return (Record::Ignored(IgnoreReason::EmptyName(GROUP)), issues);
            }
            if name == META_KEY {
                return (Record::Ignored(IgnoreReason::ReservedGroup), issues);
            }
            if !fields.contains_key(VARS) && !fields.contains_key(CHILDREN) {
                return (
                    Record::Ignored(IgnoreReason::BareGroup(name.to_string())),
                    issues,
                );
            }

            let vars = fields.get(VARS).map(|list| collect_vars(list, &mut issues));
            let children = fields
                .get(CHILDREN)
                .map(|list| split_names(list, &mut issues));

            let record = GroupRecord {
                name: name.to_string(),
                vars,
                children,
            };
            return (Record::Group(record), issues);
        }

        (Record::Ignored(IgnoreReason::Unrecognized), issues)
    }

    /// Whether the record will leave the inventory untouched
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        matches!(self, Record::Ignored(_))
    }
}

/// A raw TXT record after decoding and classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRecord {
    /// Normalized record text
    pub raw: String,
    /// Classified record
    pub record: Record,
    /// Items skipped while decoding, in the order they were found
    pub issues: Vec<DecodeIssue>,
}

impl DecodedRecord {
    /// Decode and classify a single normalized TXT record
    #[must_use]
    pub fn decode(raw: &str) -> Self {
        let (fields, mut issues) = decode_with_issues(raw);
        let (record, classify_issues) = Record::classify(&fields);
        issues.extend(classify_issues);

        Self {
            raw: raw.to_string(),
            record,
            issues,
        }
    }

    /// Whether anything was skipped while decoding
    #[must_use]
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}

/// Split a comma-separated group list, dropping empty and reserved names
fn split_names(list: &str, issues: &mut Vec<DecodeIssue>) -> Vec<String> {
    list.split(',')
        .filter(|name| !name.is_empty())
        .filter(|name| {
            if *name == META_KEY {
                issues.push(DecodeIssue::ReservedName((*name).to_string()));
                false
            } else {
                true
            }
        })
        .map(str::to_string)
        .collect()
}

fn collect_vars(list: &str, issues: &mut Vec<DecodeIssue>) -> VarList {
    let (vars, var_issues) = parse_var_list_with_issues(list);
    issues.extend(var_issues);
    vars
}

//! Variable values and `name:value` list parsing

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DecodeIssue;

/// Value of a host or group variable
///
/// Serialized untagged: a scalar becomes a JSON string, a list a JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    /// Plain string value
    Scalar(String),
    /// Bracketed `[a|b|c]` value
    List(Vec<String>),
}

impl VariableValue {
    /// Coerce a raw value, turning `[a|b|c]` into a list
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            Some(inner) => VariableValue::List(inner.split('|').map(str::to_string).collect()),
            None => VariableValue::Scalar(raw.to_string()),
        }
    }

    /// Scalar contents, if this is a scalar
    #[must_use]
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            VariableValue::Scalar(s) => Some(s),
            VariableValue::List(_) => None,
        }
    }

    /// List contents, if this is a list
    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            VariableValue::Scalar(_) => None,
            VariableValue::List(items) => Some(items),
        }
    }
}

impl From<&str> for VariableValue {
    fn from(s: &str) -> Self {
        VariableValue::Scalar(s.to_string())
    }
}

impl From<Vec<String>> for VariableValue {
    fn from(items: Vec<String>) -> Self {
        VariableValue::List(items)
    }
}

impl fmt::Display for VariableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableValue::Scalar(s) => f.write_str(s),
            VariableValue::List(items) => write!(f, "[{}]", items.join("|")),
        }
    }
}

/// Ordered `(name, value)` pairs decoded from a `vars` or `hostvars` field
pub type VarList = Vec<(String, VariableValue)>;

/// Parse `name:value,name:value`, dropping malformed pairs
#[must_use]
pub fn parse_var_list(s: &str) -> VarList {
    parse_var_list_with_issues(s).0
}

/// Parse `name:value,name:value` and report every skipped pair
///
/// Pairs are split on `,`, then on the first `:`. Empty pairs are dropped
/// without an issue.
#[must_use]
pub fn parse_var_list_with_issues(s: &str) -> (VarList, Vec<DecodeIssue>) {
    let mut vars = Vec::new();
    let mut issues = Vec::new();

    for pair in s.split(',') {
        if pair.is_empty() {
            continue;
        }

        match pair.split_once(':') {
            Some((name, raw)) => vars.push((name.to_string(), VariableValue::parse(raw))),
            None => issues.push(DecodeIssue::MalformedVariable(pair.to_string())),
        }
    }

    (vars, issues)
}

//! Flat `key=value;key=value` decoding of a single TXT record

use std::fmt;

use crate::error::DecodeIssue;

/// Ordered mapping of field name to raw field value
///
/// Keeps first-insertion order. Inserting an existing key overwrites its value
/// in place, so the last occurrence in a record wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(String, String)>,
}

impl FieldMap {
    /// Create an empty field map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, returning the previous value if the key was present
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Look up a field value
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Check whether a field is present
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of distinct fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no field was decoded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for FieldMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}

/// Decode a record into its fields, dropping malformed segments
#[must_use]
pub fn decode(raw: &str) -> FieldMap {
    decode_with_issues(raw).0
}

/// Decode a record into its fields and report every skipped segment
///
/// Segments are split on `;`, then on the first `=`. Empty segments (from a
/// trailing or doubled `;`) are dropped without an issue.
#[must_use]
pub fn decode_with_issues(raw: &str) -> (FieldMap, Vec<DecodeIssue>) {
    let mut fields = FieldMap::new();
    let mut issues = Vec::new();

    for segment in raw.split(';') {
        if segment.is_empty() {
            continue;
        }

        match segment.split_once('=') {
            Some((key, value)) => {
                fields.insert(key, value);
            }
            None => issues.push(DecodeIssue::MalformedSegment(segment.to_string())),
        }
    }

    (fields, issues)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_host_record() {
        let fields = decode("hostname=tomcat.example.com;groups=tomcat,webserver,texas");

        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get("hostname"), Some("tomcat.example.com"));
        assert_eq!(fields.get("groups"), Some("tomcat,webserver,texas"));
    }

    #[test]
    fn test_decode_is_lossless() {
        let raw = "group=webserver;vars=foo_var:foo,bar_var:bar;children=east,west";
        assert_eq!(decode(raw).to_string(), raw);
    }

    #[test]
    fn test_decode_splits_on_first_equals() {
        let fields = decode("hostname=a.example.com;hostvars=opts:a=b");
        assert_eq!(fields.get("hostvars"), Some("opts:a=b"));
    }

    #[test]
    fn test_duplicate_key_last_wins_in_place() {
        let fields = decode("hostname=a;groups=x;hostname=b");

        assert_eq!(fields.get("hostname"), Some("b"));
        assert_eq!(fields.to_string(), "hostname=b;groups=x");
    }

    #[test]
    fn test_malformed_segment_is_reported_and_skipped() {
        let (fields, issues) = decode_with_issues("hostname=a.example.com;junk;groups=lab");

        assert_eq!(fields.get("groups"), Some("lab"));
        assert_eq!(fields.len(), 2);
        assert_eq!(issues, vec![DecodeIssue::MalformedSegment("junk".to_string())]);
    }

    #[test]
    fn test_trailing_separator_is_not_an_issue() {
        let (fields, issues) = decode_with_issues("hostname=a.example.com;");

        assert_eq!(fields.len(), 1);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_insert_returns_previous() {
        let mut fields = FieldMap::new();
        assert_eq!(fields.insert("group", "a"), None);
        assert_eq!(fields.insert("group", "b"), Some("a".to_string()));
        assert!(fields.contains_key("group"));
        assert!(!fields.contains_key("vars"));
    }
}

//! TXT record normalization and ordering

/// Strip quotes and whitespace from a TXT record
///
/// `"group=db;vars=ansible_port:22" ",bar_var:bar"` becomes
/// `group=db;vars=ansible_port:22,bar_var:bar`.
#[must_use]
pub fn normalize_txt(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != '"' && !c.is_whitespace())
        .collect()
}

/// Sort records in descending lexicographic order
pub fn sort_records(records: &mut [String]) {
    records.sort_unstable_by(|a, b| b.cmp(a));
}

/// Normalize every record and sort them for assembly
#[must_use]
pub fn prepare_records<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut records: Vec<String> = raw.into_iter().map(|r| normalize_txt(r.as_ref())).collect();
    sort_records(&mut records);
    records
}

//! Inventory assembly
//!
//! Folds an ordered sequence of records into an [`Inventory`]. Order matters:
//! hosts and children are appended, and variables are overwritten, in the
//! order the records arrive.

use tracing::{debug, info, instrument, warn};

use crate::error::InventoryError;
use crate::record::{DecodedRecord, GroupRecord, HostRecord, Record};
use crate::types::{Inventory, UNGROUPED};

/// How decode issues are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    /// Skip malformed items and keep going
    #[default]
    Lenient,
    /// Fail on the first malformed item
    Strict,
}

/// Incremental inventory builder
///
/// Owns the inventory under construction until [`Assembler::finish`].
#[derive(Debug, Default)]
pub struct Assembler {
    inventory: Inventory,
}

impl Assembler {
    /// Create a builder over an empty inventory
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one record
    pub fn apply(&mut self, record: &Record) {
        match record {
            Record::Host(host) => self.apply_host(host),
            Record::Group(group) => self.apply_group(group),
            Record::Ignored(_) => {}
        }
    }

    /// Hand over the finished inventory
    #[must_use]
    pub fn finish(self) -> Inventory {
        self.inventory
    }

    fn apply_host(&mut self, host: &HostRecord) {
        match &host.groups {
            Some(groups) => {
                for group in groups {
                    self.inventory
                        .ensure_group(group)
                        .hosts
                        .push(host.hostname.clone());
                }
            }
            None => {
                self.inventory
                    .ensure_group(UNGROUPED)
                    .hosts
                    .push(host.hostname.clone());
            }
        }

        if let Some(hostvars) = &host.hostvars {
            let vars = self.inventory.ensure_hostvars(&host.hostname);
            for (name, value) in hostvars {
                vars.insert(name.clone(), value.clone());
            }
        }
    }

    fn apply_group(&mut self, group: &GroupRecord) {
        let entry = self.inventory.ensure_group(&group.name);

        if let Some(vars) = &group.vars {
            let target = entry.vars.get_or_insert_default();
            for (name, value) in vars {
                target.insert(name.clone(), value.clone());
            }
        }

        if let Some(children) = &group.children {
            entry
                .children
                .get_or_insert_default()
                .extend(children.iter().cloned());

            for child in children {
                self.inventory.ensure_group(child);
            }
        }
    }
}

/// Assemble records in the order given
#[must_use]
pub fn assemble<'a, I>(records: I) -> Inventory
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .fold(Assembler::new(), |mut assembler, record| {
            assembler.apply(record);
            assembler
        })
        .finish()
}

/// Result of building an inventory from raw TXT records
#[derive(Debug, Clone)]
pub struct Assembly {
    /// The assembled inventory
    pub inventory: Inventory,
    /// Records seen
    pub records: usize,
    /// Records that left the inventory untouched
    pub ignored: usize,
    /// Items skipped inside otherwise usable records
    pub issues: usize,
}

/// Decode, classify and assemble normalized TXT records
///
/// Records are processed in the order given; callers sort them first.
///
/// # Errors
/// Returns [`InventoryError::Malformed`] for the first record with a decode
/// issue when `mode` is [`DecodeMode::Strict`]. Lenient mode never fails.
#[instrument(skip(raw_records), fields(records = raw_records.len()))]
pub fn build_inventory(
    raw_records: &[String],
    mode: DecodeMode,
) -> Result<Assembly, InventoryError> {
    let mut assembler = Assembler::new();
    let mut ignored = 0;
    let mut issues = 0;

    for raw in raw_records {
        let decoded = DecodedRecord::decode(raw);

        if mode == DecodeMode::Strict {
            if let Some(issue) = decoded.issues.first() {
                return Err(InventoryError::Malformed {
                    record: decoded.raw.clone(),
                    issue: issue.clone(),
                });
            }
        }

        for issue in &decoded.issues {
            warn!(record = %decoded.raw, %issue, "skipping malformed item");
        }
        issues += decoded.issues.len();

        if let Record::Ignored(reason) = &decoded.record {
            debug!(record = %decoded.raw, %reason, "ignoring record");
            ignored += 1;
        }

        assembler.apply(&decoded.record);
    }

    let inventory = assembler.finish();

    info!(
        groups = inventory.group_count(),
        hosts = inventory.host_count(),
        ignored,
        issues,
        "inventory assembled"
    );

    Ok(Assembly {
        inventory,
        records: raw_records.len(),
        ignored,
        issues,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::VariableValue;

    fn build(records: &[&str]) -> Inventory {
        let records: Vec<Record> = records
            .iter()
            .map(|raw| DecodedRecord::decode(raw).record)
            .collect();
        assemble(&records)
    }

    #[test]
    fn test_host_is_appended_to_each_group() {
        let inventory = build(&["hostname=tomcat.example.com;groups=tomcat,webserver,texas"]);

        for group in ["tomcat", "webserver", "texas"] {
            assert_eq!(
                inventory.group(group).map(|g| g.hosts.clone()),
                Some(vec!["tomcat.example.com".to_string()])
            );
        }
        assert!(inventory.group(UNGROUPED).is_none());
        assert!(inventory.meta.hostvars.is_empty());
    }

    #[test]
    fn test_group_vars_accumulate_across_records() {
        let inventory = build(&[
            "group=web;vars=a:1,b:2",
            "group=web;vars=b:3,c:[x|y]",
        ]);

        let web = inventory.group("web").unwrap();
        assert_eq!(web.var("a"), Some(&VariableValue::from("1")));
        assert_eq!(web.var("b"), Some(&VariableValue::from("3")));
        assert_eq!(
            web.var("c"),
            Some(&VariableValue::List(vec!["x".to_string(), "y".to_string()]))
        );
    }

    #[test]
    fn test_hostvars_accumulate_and_last_write_wins() {
        let inventory = build(&[
            "hostname=h;hostvars=a:1,a:2",
            "hostname=h;groups=g;hostvars=b:3",
        ]);

        let vars = inventory.hostvars("h").unwrap();
        assert_eq!(vars.get("a"), Some(&VariableValue::from("2")));
        assert_eq!(vars.get("b"), Some(&VariableValue::from("3")));
    }

    #[test]
    fn test_children_are_appended_and_created() {
        let inventory = build(&[
            "group=dc;children=east,west",
            "group=dc;children=east",
        ]);

        assert_eq!(
            inventory.group("dc").and_then(|g| g.children.clone()),
            Some(vec![
                "east".to_string(),
                "west".to_string(),
                "east".to_string()
            ])
        );
        assert!(inventory.group("east").is_some_and(|g| g.hosts.is_empty()));
        assert!(inventory.group("west").is_some());
    }

    #[test]
    fn test_empty_vars_field_still_creates_map() {
        let inventory = build(&["group=web;vars=broken"]);
        assert_eq!(inventory.group("web").unwrap().vars, Some(Default::default()));
    }

    #[test]
    fn test_duplicate_hosts_are_kept() {
        let inventory = build(&["hostname=h;groups=g", "hostname=h;groups=g"]);
        assert_eq!(inventory.group("g").unwrap().hosts, vec!["h", "h"]);
    }

    #[test]
    fn test_ignored_records_do_not_mutate() {
        let inventory = build(&["group=orphan", "nothing=here"]);
        assert_eq!(inventory, Inventory::empty());
    }

    #[test]
    fn test_build_inventory_counts() {
        let raw = vec![
            "hostname=h;groups=g;hostvars=bad".to_string(),
            "group=orphan".to_string(),
        ];

        let assembly = build_inventory(&raw, DecodeMode::Lenient).unwrap();
        assert_eq!(assembly.records, 2);
        assert_eq!(assembly.ignored, 1);
        assert_eq!(assembly.issues, 1);
        assert_eq!(assembly.inventory.group("g").unwrap().hosts, vec!["h"]);
        assert_eq!(assembly.inventory.hostvars("h"), Some(&Default::default()));
    }

    #[test]
    fn test_strict_mode_rejects_malformed_record() {
        let raw = vec!["hostname=h;junk".to_string()];

        let err = build_inventory(&raw, DecodeMode::Strict).unwrap_err();
        assert_eq!(err.record(), "hostname=h;junk");
        assert!(err.to_string().contains("junk"));
    }

    #[test]
    fn test_strict_mode_allows_bare_group() {
        let raw = vec!["group=orphan".to_string()];

        let assembly = build_inventory(&raw, DecodeMode::Strict).unwrap();
        assert_eq!(assembly.ignored, 1);
        assert!(assembly.inventory.is_empty());
    }
}

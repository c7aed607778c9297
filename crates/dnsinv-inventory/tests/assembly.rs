use dnsinv_inventory::*;
use serde_json::json;

fn lenient(records: &[&str]) -> Inventory {
    let raw: Vec<String> = records.iter().map(|r| (*r).to_string()).collect();
    build_inventory(&raw, DecodeMode::Lenient)
        .expect("lenient mode never fails")
        .inventory
}

#[test]
fn test_host_with_groups_and_no_ungrouped() {
    let inventory = lenient(&["hostname=tomcat.example.com;groups=tomcat,webserver,texas"]);

    assert_eq!(
        serde_json::to_value(&inventory).unwrap(),
        json!({
            "tomcat": {"hosts": ["tomcat.example.com"]},
            "webserver": {"hosts": ["tomcat.example.com"]},
            "texas": {"hosts": ["tomcat.example.com"]},
            "_meta": {"hostvars": {}}
        })
    );
}

#[test]
fn test_grouped_host_with_hostvars() {
    let inventory = lenient(&["hostname=lab7.example.com;groups=lab;hostvars=foo_var:foo"]);

    assert_eq!(
        serde_json::to_value(&inventory).unwrap(),
        json!({
            "lab": {"hosts": ["lab7.example.com"]},
            "_meta": {"hostvars": {"lab7.example.com": {"foo_var": "foo"}}}
        })
    );
}

#[test]
fn test_ungrouped_host_with_hostvars() {
    let inventory = lenient(&["hostname=mysql.example.com;hostvars=foo_var:foo,bar_var:bar"]);

    assert_eq!(
        serde_json::to_value(&inventory).unwrap(),
        json!({
            "ungrouped": {"hosts": ["mysql.example.com"]},
            "_meta": {
                "hostvars": {
                    "mysql.example.com": {"foo_var": "foo", "bar_var": "bar"}
                }
            }
        })
    );
}

#[test]
fn test_group_vars_and_membership_union_in_either_order() {
    let group = "group=webserver;vars=foo_var:foo,bar_var:bar";
    let host = "hostname=tomcat.example.com;groups=webserver";

    let expected = json!({
        "webserver": {
            "hosts": ["tomcat.example.com"],
            "vars": {"foo_var": "foo", "bar_var": "bar"}
        },
        "_meta": {"hostvars": {}}
    });

    assert_eq!(serde_json::to_value(lenient(&[group, host])).unwrap(), expected);
    assert_eq!(serde_json::to_value(lenient(&[host, group])).unwrap(), expected);
}

#[test]
fn test_bare_group_creates_nothing() {
    let inventory = lenient(&["group=orphan"]);
    assert!(inventory.group("orphan").is_none());
    assert!(inventory.is_empty());
}

#[test]
fn test_bare_group_referenced_elsewhere_exists() {
    let by_host = lenient(&["group=orphan", "hostname=h;groups=orphan"]);
    assert_eq!(by_host.group("orphan").unwrap().hosts, vec!["h"]);

    let by_parent = lenient(&["group=orphan", "group=parent;children=orphan"]);
    assert!(by_parent.group("orphan").is_some_and(|g| g.hosts.is_empty()));
}

#[test]
fn test_list_values_for_hosts_and_groups() {
    let inventory = lenient(&[
        "hostname=h;groups=g;hostvars=dns:[1.1.1.1|8.8.8.8]",
        "group=g;vars=ntp:[a|b|c],tz:UTC",
    ]);

    assert_eq!(
        serde_json::to_value(&inventory).unwrap(),
        json!({
            "g": {
                "hosts": ["h"],
                "vars": {"ntp": ["a", "b", "c"], "tz": "UTC"}
            },
            "_meta": {"hostvars": {"h": {"dns": ["1.1.1.1", "8.8.8.8"]}}}
        })
    );
}

#[test]
fn test_multi_host_order_is_record_order() {
    let inventory = lenient(&[
        "hostname=web2.example.com;groups=web",
        "hostname=web1.example.com;groups=web",
        "hostname=web2.example.com;groups=web",
    ]);

    assert_eq!(
        inventory.group("web").unwrap().hosts,
        vec!["web2.example.com", "web1.example.com", "web2.example.com"]
    );
}

#[test]
fn test_malformed_items_do_not_drop_the_record() {
    let inventory = lenient(&["hostname=h;garbage;groups=g;hostvars=ok:1,nope"]);

    assert_eq!(inventory.group("g").unwrap().hosts, vec!["h"]);
    assert_eq!(
        inventory.hostvars("h").and_then(|v| v.get("ok")),
        Some(&VariableValue::from("1"))
    );
    assert_eq!(inventory.hostvars("h").map(|v| v.len()), Some(1));
}

#[test]
fn test_strict_mode_fails_on_first_issue() {
    let raw = vec![
        "hostname=good;groups=g".to_string(),
        "hostname=bad;groups=g;hostvars=nope".to_string(),
    ];

    let err = build_inventory(&raw, DecodeMode::Strict).unwrap_err();
    assert!(matches!(
        err,
        InventoryError::Malformed {
            issue: DecodeIssue::MalformedVariable(ref pair),
            ..
        } if pair == "nope"
    ));
}

#[test]
fn test_decode_round_trip_well_formed() {
    for raw in [
        "hostname=tomcat.example.com;groups=tomcat,webserver,texas",
        "group=db;vars=ansible_port:22,bar_var:bar",
        "hostname=lab7.example.com;groups=lab;hostvars=foo_var:foo",
    ] {
        assert_eq!(decode(raw).to_string(), raw);
    }
}

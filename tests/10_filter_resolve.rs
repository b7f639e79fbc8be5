mod common;

use std::collections::HashMap;

use anyhow::Result;
use chrono::{TimeZone, Utc};
use gateway_admin_api::filter::{FilterError, FilterOp, FilterValue};
use serde_json::json;

use common::{query, resolver};

#[test]
fn exact_string_match() -> Result<()> {
    let filter = resolver().resolve("listUsers", query(&[("status", "active")]))?;
    assert_eq!(filter.to_json(), json!({ "status": { "equals": "active" } }));
    Ok(())
}

#[test]
fn mapped_key_expands_to_or_over_paths() -> Result<()> {
    let filter = resolver().resolve("listUsers", query(&[("name", "john")]))?;

    assert_eq!(
        filter.to_json(),
        json!({
            "OR": [
                { "profile.firstName": { "like": "john" } },
                { "profile.lastName": { "like": "john" } }
            ]
        })
    );
    assert_eq!(filter.len(), 1);
    assert_eq!(filter.paths().len(), 2);
    let predicate = filter.predicate("name").expect("name predicate");
    assert_eq!(predicate.targets, vec!["profile.firstName", "profile.lastName"]);
    assert_eq!(predicate.conditions.get(&FilterOp::Like).and_then(FilterValue::as_text), Some("john"));
    Ok(())
}

#[test]
fn mapped_string_key_uses_equals() -> Result<()> {
    let filter = resolver().resolve("listTeams", query(&[("member", "ana@example.com")]))?;
    assert_eq!(
        filter.condition("members.username").and_then(|c| c.get(&FilterOp::Equals)),
        Some(&FilterValue::Text("ana@example.com".into()))
    );
    Ok(())
}

#[test]
fn date_range_suffix() -> Result<()> {
    let filter = resolver().resolve("listUsers", query(&[("createdAt_gt", "2024-01-01T00:00:00Z")]))?;

    let expected = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(
        filter.condition("createdAt").and_then(|c| c.get(&FilterOp::Gt)),
        Some(&FilterValue::DateTime(expected))
    );
    assert_eq!(filter.to_json(), json!({ "createdAt": { "gt": "2024-01-01T00:00:00Z" } }));
    Ok(())
}

#[test]
fn range_bounds_merge_on_one_path() -> Result<()> {
    let filter = resolver().resolve("listTeams", query(&[("size_gte", "3"), ("size_lt", "10.5")]))?;
    assert_eq!(filter.len(), 1);
    assert_eq!(filter.to_json(), json!({ "size": { "gte": 3, "lt": 10.5 } }));
    Ok(())
}

#[test]
fn one_entry_per_distinct_path() -> Result<()> {
    let filter = resolver().resolve(
        "listUsers",
        query(&[
            ("status", "active"),
            ("name", "jo"),
            ("isVerified", "TRUE"),
            ("createdAt_gte", "2024-01-01"),
            ("createdAt_lt", "2024-02-01"),
        ]),
    )?;

    let paths: Vec<&str> = filter.paths().into_iter().collect();
    assert_eq!(paths, vec!["createdAt", "isVerified", "profile.firstName", "profile.lastName", "status"]);
    assert_eq!(filter.condition("isVerified").and_then(|c| c.get(&FilterOp::Equals)), Some(&FilterValue::Bool(true)));
    Ok(())
}

#[test]
fn empty_query_is_empty_filter() -> Result<()> {
    let filter = resolver().resolve("listRoles", Vec::<(String, String)>::new())?;
    assert!(filter.is_empty());
    assert_eq!(filter.to_json(), json!({}));
    Ok(())
}

#[test]
fn accepts_hash_map_queries() -> Result<()> {
    let mut raw = HashMap::new();
    raw.insert("enabled".to_string(), "false".to_string());
    raw.insert("port_lte".to_string(), "8080".to_string());
    let filter = resolver().resolve("listServices", &raw)?;
    assert_eq!(filter.to_json(), json!({ "enabled": { "equals": false }, "port": { "lte": 8080 } }));
    Ok(())
}

#[test]
fn unknown_key_fails_for_every_table() {
    let resolver = resolver();
    for table in resolver.registry().names() {
        let err = resolver.resolve(table, query(&[("bogusKey", "x")])).unwrap_err();
        assert!(
            matches!(err, FilterError::UnknownFilterKey { ref key, .. } if key == "bogusKey"),
            "{}: {:?}",
            table,
            err
        );
    }
}

#[test]
fn unknown_key_with_range_suffix_reports_base_key() {
    let err = resolver().resolve("listUsers", query(&[("bogus_gt", "1")])).unwrap_err();
    assert!(matches!(err, FilterError::UnknownFilterKey { ref key, .. } if key == "bogus"));
}

#[test]
fn range_on_string_is_invalid_range_operator() {
    let err = resolver().resolve("listUsers", query(&[("status_gt", "active")])).unwrap_err();
    assert!(matches!(
        err,
        FilterError::InvalidRangeOperator { ref key, ref operator, .. } if key == "status" && operator == "gt"
    ));
}

#[test]
fn range_on_boolean_and_like_is_rejected() {
    let resolver = resolver();
    assert!(matches!(
        resolver.resolve("listUsers", query(&[("isVerified_lte", "true")])),
        Err(FilterError::InvalidRangeOperator { .. })
    ));
    assert!(matches!(
        resolver.resolve("listUsers", query(&[("email_gte", "a")])),
        Err(FilterError::InvalidRangeOperator { .. })
    ));
}

#[test]
fn malformed_values_are_invalid_filter_value() {
    let resolver = resolver();
    for (table, key, value) in [
        ("listUsers", "createdAt", "last tuesday"),
        ("listUsers", "loginAttempts", "many"),
        ("listUsers", "isVerified", "yes"),
        ("listRoles", "tier_gt", "NaN"),
    ] {
        let err = resolver.resolve(table, query(&[(key, value)])).unwrap_err();
        assert!(matches!(err, FilterError::InvalidFilterValue { .. }), "{}={} gave {:?}", key, value, err);
    }
}

#[test]
fn unknown_table_is_unknown_resource() {
    let err = resolver().resolve("listWidgets", query(&[("status", "active")])).unwrap_err();
    assert!(matches!(err, FilterError::UnknownResource(ref name) if name == "listWidgets"));
}

#[test]
fn first_error_wins() {
    let err = resolver()
        .resolve("listUsers", query(&[("status", "active"), ("nope", "1"), ("createdAt", "bad")]))
        .unwrap_err();
    assert!(matches!(err, FilterError::UnknownFilterKey { ref key, .. } if key == "nope"));
}

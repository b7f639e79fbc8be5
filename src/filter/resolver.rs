use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;

use super::error::FilterError;
use super::query_key::QueryKey;
use super::registry::FilterRegistry;
use super::table::FilterTable;
use super::types::{FieldRule, FilterOp, FilterValue, ResolvedFilter, ValueType};

/// Turns raw query-string pairs into a `ResolvedFilter` using the registered tables
#[derive(Debug, Clone)]
pub struct FilterResolver {
    registry: FilterRegistry,
}

impl FilterResolver {
    pub fn new(registry: FilterRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &FilterRegistry {
        &self.registry
    }

    /// Resolve `raw_query` against the table for `table_name`. Fails on the
    /// first unknown key or uncoercible value.
    pub fn resolve<I, K, V>(&self, table_name: &str, raw_query: I) -> Result<ResolvedFilter, FilterError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let table = self.registry.get(table_name)?;
        let filter = table.resolve(raw_query)?;

        if crate::config::CONFIG.filter.debug_logging && tracing::enabled!(tracing::Level::DEBUG) {
            tracing::debug!("Resolved {} filter predicates for {}: {}", filter.len(), table_name, filter.to_json());
        }
        Ok(filter)
    }
}

impl FilterTable {
    pub fn resolve<I, K, V>(&self, raw_query: I) -> Result<ResolvedFilter, FilterError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut filter = ResolvedFilter::new();
        for (key, value) in raw_query {
            let query_key = QueryKey::parse(key.as_ref());
            let rule = self.rule(query_key.base).ok_or_else(|| FilterError::UnknownFilterKey {
                table: self.name().to_string(),
                key: query_key.base.to_string(),
            })?;

            let op = match query_key.range {
                Some(range) if rule.value_type.is_ranged() => FilterOp::from(range),
                Some(range) => {
                    return Err(FilterError::InvalidRangeOperator {
                        key: rule.key.clone(),
                        operator: range.as_str().to_string(),
                        value_type: rule.value_type,
                    })
                }
                None if rule.value_type == ValueType::StringLike => FilterOp::Like,
                None => FilterOp::Equals,
            };

            let value = coerce(rule, value.as_ref())?;
            filter.insert(&rule.key, rule.targets(), op, value);
        }
        Ok(filter)
    }
}

/// Coerce a raw string into the rule's value type
pub fn coerce(rule: &FieldRule, raw: &str) -> Result<FilterValue, FilterError> {
    let invalid = || FilterError::InvalidFilterValue {
        key: rule.key.clone(),
        value: raw.to_string(),
        value_type: rule.value_type,
    };

    match rule.value_type {
        ValueType::String | ValueType::StringLike => Ok(FilterValue::Text(raw.to_string())),
        ValueType::Boolean => parse_bool(raw).map(FilterValue::Bool).ok_or_else(invalid),
        ValueType::Number => parse_decimal(raw).map(FilterValue::Number).ok_or_else(invalid),
        ValueType::Date => parse_datetime(raw).map(FilterValue::DateTime).ok_or_else(invalid),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Finite decimal within `Decimal`'s range (magnitude up to about 7.9e28)
fn parse_decimal(raw: &str) -> Option<Decimal> {
    let s = raw.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E')) {
        return None;
    }
    if s.contains(|c: char| c == 'e' || c == 'E') {
        Decimal::from_scientific(s).ok()
    } else {
        Decimal::from_str(s).ok()
    }
}

/// RFC 3339 (seconds optional), naive `YYYY-MM-DDTHH:MM[:SS[.f]]` (UTC), or a
/// bare date (midnight UTC)
fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M%:z") {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = s.strip_suffix('Z').or_else(|| s.strip_suffix('z')).unwrap_or(s);
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, format) {
            return Some(dt.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

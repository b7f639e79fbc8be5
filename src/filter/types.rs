use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{json, Map, Value};

/// Value type declared by a field rule; drives coercion and comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueType {
    Date,
    String,
    StringLike,
    Number,
    Boolean,
}

impl ValueType {
    /// Only ordered types accept range operators
    pub fn is_ranged(&self) -> bool {
        matches!(self, ValueType::Date | ValueType::Number)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Date => "date",
            ValueType::String => "string",
            ValueType::StringLike => "stringLike",
            ValueType::Number => "number",
            ValueType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeOp {
    Gt,
    Gte,
    Lt,
    Lte,
}

impl RangeOp {
    pub const ALL: [RangeOp; 4] = [RangeOp::Gt, RangeOp::Gte, RangeOp::Lt, RangeOp::Lte];

    pub fn as_str(&self) -> &'static str {
        match self {
            RangeOp::Gt => "gt",
            RangeOp::Gte => "gte",
            RangeOp::Lt => "lt",
            RangeOp::Lte => "lte",
        }
    }

    pub fn from_suffix(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == s)
    }
}

/// Comparator stored in a resolved filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOp {
    Equals,
    Like,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl FilterOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOp::Equals => "equals",
            FilterOp::Like => "like",
            FilterOp::Gt => "gt",
            FilterOp::Gte => "gte",
            FilterOp::Lt => "lt",
            FilterOp::Lte => "lte",
        }
    }

    /// SQL comparison operator
    pub fn to_sql(&self) -> &'static str {
        match self {
            FilterOp::Equals => "=",
            FilterOp::Like => "ILIKE",
            FilterOp::Gt => ">",
            FilterOp::Gte => ">=",
            FilterOp::Lt => "<",
            FilterOp::Lte => "<=",
        }
    }
}

impl From<RangeOp> for FilterOp {
    fn from(op: RangeOp) -> Self {
        match op {
            RangeOp::Gt => FilterOp::Gt,
            RangeOp::Gte => FilterOp::Gte,
            RangeOp::Lt => FilterOp::Lt,
            RangeOp::Lte => FilterOp::Lte,
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One permitted filter key for a resource operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRule {
    pub key: String,
    pub value_type: ValueType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maps_to: Option<Vec<String>>,
}

impl FieldRule {
    pub fn new(key: impl Into<String>, value_type: ValueType) -> Self {
        Self { key: key.into(), value_type, maps_to: None }
    }

    pub fn mapped<I, S>(key: impl Into<String>, value_type: ValueType, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: key.into(),
            value_type,
            maps_to: Some(paths.into_iter().map(Into::into).collect()),
        }
    }

    /// Internal field paths this key expands to
    pub fn targets(&self) -> Vec<String> {
        match &self.maps_to {
            Some(paths) => paths.clone(),
            None => vec![self.key.clone()],
        }
    }
}

/// A coerced filter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Number(Decimal),
    Bool(bool),
    DateTime(DateTime<Utc>),
}

impl FilterValue {
    /// Numbers that a JSON number cannot hold exactly are emitted as decimal strings
    pub fn to_json(&self) -> Value {
        match self {
            FilterValue::Text(s) => Value::String(s.clone()),
            FilterValue::Number(d) => {
                let exact = d.normalize().to_string();
                match exact.parse::<serde_json::Number>() {
                    Ok(n) if n.to_string() == exact => Value::Number(n),
                    _ => Value::String(exact),
                }
            }
            FilterValue::Bool(b) => Value::Bool(*b),
            FilterValue::DateTime(dt) => Value::String(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FilterValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl Serialize for FilterValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Text(s) => f.write_str(s),
            FilterValue::Number(d) => write!(f, "{}", d.normalize()),
            FilterValue::Bool(b) => write!(f, "{}", b),
            FilterValue::DateTime(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        }
    }
}

/// Conditions contributed by one query key. A row matches when any target
/// path satisfies every condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Predicate {
    pub key: String,
    pub targets: Vec<String>,
    pub conditions: BTreeMap<FilterOp, FilterValue>,
}

impl Predicate {
    pub fn is_multi_target(&self) -> bool {
        self.targets.len() > 1
    }

    fn conditions_json(&self) -> Value {
        let mut obj = Map::new();
        for (op, value) in &self.conditions {
            obj.insert(op.as_str().to_string(), value.to_json());
        }
        Value::Object(obj)
    }
}

/// Typed, path-expanded filter built per request. Predicates are ANDed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolvedFilter {
    predicates: BTreeMap<String, Predicate>,
}

impl ResolvedFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a condition for `key`, creating its predicate on first use
    pub(crate) fn insert(&mut self, key: &str, targets: Vec<String>, op: FilterOp, value: FilterValue) {
        self.predicates
            .entry(key.to_string())
            .or_insert_with(|| Predicate {
                key: key.to_string(),
                targets,
                conditions: BTreeMap::new(),
            })
            .conditions
            .insert(op, value);
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Number of predicates, one per query key. A mapped key counts once
    /// however many paths it targets; use `paths().len()` to count paths.
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn predicates(&self) -> impl Iterator<Item = &Predicate> {
        self.predicates.values()
    }

    pub fn predicate(&self, key: &str) -> Option<&Predicate> {
        self.predicates.get(key)
    }

    /// Distinct internal paths referenced by any predicate
    pub fn paths(&self) -> BTreeSet<&str> {
        self.predicates
            .values()
            .flat_map(|p| p.targets.iter().map(String::as_str))
            .collect()
    }

    /// Conditions applied to `path` by the first predicate (in key order)
    /// targeting it. Use `conditions` when several keys share a path.
    pub fn condition(&self, path: &str) -> Option<&BTreeMap<FilterOp, FilterValue>> {
        self.conditions(path).into_iter().next()
    }

    /// Conditions from every predicate targeting `path`, in key order
    pub fn conditions(&self, path: &str) -> Vec<&BTreeMap<FilterOp, FilterValue>> {
        self.predicates
            .values()
            .filter(|p| p.targets.iter().any(|t| t == path))
            .map(|p| &p.conditions)
            .collect()
    }

    /// Prisma-style where object: `{ path: { op: value } }`, `{ "OR": [...] }`
    /// for multi-path keys, and an `"AND"` list for anything that would
    /// collide on the same slot.
    pub fn to_json(&self) -> Value {
        let mut root = Map::new();
        let mut and: Vec<Value> = vec![];

        for predicate in self.predicates.values() {
            let conditions = predicate.conditions_json();
            let (slot, value) = if predicate.is_multi_target() {
                let branches = predicate
                    .targets
                    .iter()
                    .map(|t| json!({ t.as_str(): conditions.clone() }))
                    .collect::<Vec<_>>();
                ("OR".to_string(), Value::Array(branches))
            } else {
                (predicate.targets[0].clone(), conditions)
            };

            if root.contains_key(&slot) || slot == "AND" {
                and.push(json!({ slot: value }));
            } else {
                root.insert(slot, value);
            }
        }

        if !and.is_empty() {
            root.insert("AND".to_string(), Value::Array(and));
        }
        Value::Object(root)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<Value>,
}

use serde_json::Value;

use super::types::{FilterOp, FilterValue, Predicate, ResolvedFilter, SqlResult};

/// Renders a `ResolvedFilter` as a parameterised WHERE clause
pub struct FilterWhere {
    param_values: Vec<Value>,
    param_index: usize,
}

impl FilterWhere {
    pub fn new(starting_param_index: usize) -> Self {
        Self {
            param_values: vec![],
            param_index: starting_param_index,
        }
    }

    pub fn generate(filter: &ResolvedFilter, starting_param_index: usize) -> SqlResult {
        let mut filter_where = Self::new(starting_param_index);
        filter_where.build(filter)
    }

    fn build(&mut self, filter: &ResolvedFilter) -> SqlResult {
        let sql_conditions: Vec<String> = filter
            .predicates()
            .map(|predicate| self.build_predicate(predicate))
            .collect();

        let query = if sql_conditions.is_empty() { "1=1".to_string() } else { sql_conditions.join(" AND ") };
        SqlResult { query, params: std::mem::take(&mut self.param_values) }
    }

    fn build_predicate(&mut self, predicate: &Predicate) -> String {
        let branches: Vec<String> = predicate
            .targets
            .iter()
            .map(|path| {
                let column = quote_path(path);
                let parts: Vec<String> = predicate
                    .conditions
                    .iter()
                    .map(|(op, value)| self.build_condition(&column, *op, value))
                    .collect();
                if parts.len() > 1 { format!("({})", parts.join(" AND ")) } else { parts.join("") }
            })
            .collect();

        if branches.len() > 1 { format!("({})", branches.join(" OR ")) } else { branches.join("") }
    }

    fn build_condition(&mut self, column: &str, op: FilterOp, value: &FilterValue) -> String {
        match op {
            FilterOp::Like => {
                let pattern = format!("%{}%", escape_like(&value.to_string()));
                format!("{} ILIKE {}", column, self.param(Value::String(pattern)))
            }
            _ => match value {
                // Bound as text and cast so the database sees the exact decimal
                FilterValue::Number(d) => {
                    let placeholder = self.param(Value::String(d.normalize().to_string()));
                    format!("{} {} {}::numeric", column, op.to_sql(), placeholder)
                }
                _ => format!("{} {} {}", column, op.to_sql(), self.param(value.to_json())),
            },
        }
    }

    fn param(&mut self, value: Value) -> String {
        self.param_values.push(value);
        self.param_index += 1;
        format!("${}", self.param_index)
    }
}

/// `user.profile.firstName` -> `"user"."profile"."firstName"`
fn quote_path(path: &str) -> String {
    path.split('.').map(|segment| format!("\"{}\"", segment)).collect::<Vec<_>>().join(".")
}

fn escape_like(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

use std::collections::HashSet;

use super::error::FilterError;
use super::query_key::has_range_suffix;
use super::types::FieldRule;

/// Validated field rules for one resource operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterTable {
    name: String,
    rules: Vec<FieldRule>,
}

impl FilterTable {
    pub fn new(name: impl Into<String>, rules: Vec<FieldRule>) -> Result<Self, FilterError> {
        let name = name.into();
        Self::validate_rules(&name, &rules)?;
        Ok(Self { name, rules })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    pub fn rule(&self, key: &str) -> Option<&FieldRule> {
        self.rules.iter().find(|r| r.key == key)
    }

    fn validate_rules(table: &str, rules: &[FieldRule]) -> Result<(), FilterError> {
        let mut seen = HashSet::new();
        for rule in rules {
            Self::validate_rule(table, rule)?;
            if !seen.insert(rule.key.as_str()) {
                return Err(FilterError::DuplicateFieldRule { table: table.to_string(), key: rule.key.clone() });
            }
        }
        Ok(())
    }

    fn validate_rule(table: &str, rule: &FieldRule) -> Result<(), FilterError> {
        let invalid = |reason: String| FilterError::InvalidFieldRule {
            table: table.to_string(),
            key: rule.key.clone(),
            reason,
        };

        if rule.key.is_empty() {
            return Err(invalid("Key cannot be empty".to_string()));
        }
        if !is_identifier(&rule.key) {
            return Err(invalid("Key must be an identifier".to_string()));
        }
        if has_range_suffix(&rule.key) {
            return Err(invalid("Key cannot end with a range operator suffix".to_string()));
        }

        if let Some(paths) = &rule.maps_to {
            if paths.is_empty() {
                return Err(invalid("mapsTo cannot be empty".to_string()));
            }
            for path in paths {
                if !is_field_path(path) {
                    return Err(invalid(format!("Invalid field path: {}", path)));
                }
            }
        }
        Ok(())
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Dotted identifier chain such as `user.profile.firstName`
pub(crate) fn is_field_path(path: &str) -> bool {
    !path.is_empty() && path.split('.').all(is_identifier)
}

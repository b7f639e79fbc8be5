use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use super::error::FilterError;
use super::table::FilterTable;
use super::types::{FieldRule, ValueType};
use crate::config::FilterConfig;

/// All filter tables known to the application, keyed by resource operation
#[derive(Debug, Clone, Default)]
pub struct FilterRegistry {
    tables: HashMap<String, FilterTable>,
}

impl FilterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in tables, overlaid with the YAML file named in the config
    pub fn from_config(config: &FilterConfig) -> Result<Self, FilterError> {
        let mut registry = Self::builtin()?;
        if let Some(path) = &config.tables_path {
            let loaded = Self::load_file(path)?;
            tracing::info!("Loaded {} filter tables from {}", loaded.len(), path);
            registry.extend(loaded);
        }
        Ok(registry)
    }

    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, FilterError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| FilterError::TableSource(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml_str(&source)
    }

    /// Parse `{ tableName: [ { key, valueType, mapsTo? }, ... ] }`
    pub fn from_yaml_str(source: &str) -> Result<Self, FilterError> {
        let raw: BTreeMap<String, Vec<FieldRule>> = serde_yaml::from_str(source)?;
        let mut registry = Self::new();
        for (name, rules) in raw {
            registry.insert(FilterTable::new(name, rules)?);
        }
        Ok(registry)
    }

    /// Registers a table, replacing any table with the same name
    pub fn insert(&mut self, table: FilterTable) -> Option<FilterTable> {
        self.tables.insert(table.name().to_string(), table)
    }

    pub fn extend(&mut self, other: FilterRegistry) {
        for (name, table) in other.tables {
            if self.tables.insert(name.clone(), table).is_some() {
                tracing::debug!("Filter table {} overridden", name);
            }
        }
    }

    pub fn get(&self, name: &str) -> Result<&FilterTable, FilterError> {
        self.tables.get(name).ok_or_else(|| FilterError::UnknownResource(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Table names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn builtin() -> Result<Self, FilterError> {
        let mut registry = Self::new();

        registry.insert(FilterTable::new(
            "listUsers",
            vec![
                FieldRule::new("status", ValueType::String),
                FieldRule::new("email", ValueType::StringLike),
                FieldRule::mapped("name", ValueType::StringLike, ["profile.firstName", "profile.lastName"]),
                FieldRule::mapped("role", ValueType::String, ["role.name"]),
                FieldRule::new("isVerified", ValueType::Boolean),
                FieldRule::new("twoFactorEnabled", ValueType::Boolean),
                FieldRule::new("loginAttempts", ValueType::Number),
                FieldRule::new("lastLoginAt", ValueType::Date),
                FieldRule::new("createdAt", ValueType::Date),
            ],
        )?);

        registry.insert(FilterTable::new(
            "listAuditLogs",
            vec![
                FieldRule::new("action", ValueType::String),
                FieldRule::new("entity", ValueType::String),
                FieldRule::new("entityId", ValueType::String),
                FieldRule::mapped("userId", ValueType::String, ["user.id"]),
                FieldRule::mapped("user", ValueType::StringLike, ["user.email", "user.profile.firstName", "user.profile.lastName"]),
                FieldRule::new("ipAddress", ValueType::String),
                FieldRule::new("createdAt", ValueType::Date),
            ],
        )?);

        registry.insert(FilterTable::new(
            "listRoles",
            vec![
                FieldRule::new("name", ValueType::StringLike),
                FieldRule::new("isSystem", ValueType::Boolean),
                FieldRule::new("tier", ValueType::Number),
                FieldRule::mapped("permission", ValueType::String, ["permissions.name"]),
                FieldRule::new("createdAt", ValueType::Date),
            ],
        )?);

        registry.insert(FilterTable::new(
            "listServices",
            vec![
                FieldRule::new("name", ValueType::StringLike),
                FieldRule::new("host", ValueType::StringLike),
                FieldRule::new("protocol", ValueType::String),
                FieldRule::new("port", ValueType::Number),
                FieldRule::new("enabled", ValueType::Boolean),
                FieldRule::mapped("owner", ValueType::StringLike, ["owner.email"]),
                FieldRule::new("createdAt", ValueType::Date),
            ],
        )?);

        registry.insert(FilterTable::new(
            "listConsumers",
            vec![
                FieldRule::mapped("search", ValueType::StringLike, ["username", "customId"]),
                FieldRule::new("username", ValueType::String),
                FieldRule::mapped("service", ValueType::String, ["service.name"]),
                FieldRule::new("rateLimit", ValueType::Number),
                FieldRule::new("createdAt", ValueType::Date),
            ],
        )?);

        Ok(registry)
    }
}

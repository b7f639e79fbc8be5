use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

use crate::auth::{PasswordPolicy, DEFAULT_CODE_LENGTH};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub filter: FilterConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// YAML file with extra or overriding filter tables
    pub tables_path: Option<String>,
    pub max_limit: Option<u32>,
    pub debug_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub otp_length: usize,
    pub code_length: usize,
    pub password_min_length: usize,
}

impl SecurityConfig {
    pub fn password_policy(&self) -> PasswordPolicy {
        PasswordPolicy::default().with_min_length(self.password_min_length)
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Filter overrides
        if let Ok(v) = env::var("FILTER_TABLES_PATH") {
            self.filter.tables_path = if v.trim().is_empty() { None } else { Some(v) };
        }
        if let Ok(v) = env::var("FILTER_MAX_LIMIT") {
            self.filter.max_limit = v.parse().ok();
        }
        if let Ok(v) = env::var("FILTER_DEBUG_LOGGING") {
            self.filter.debug_logging = v.parse().unwrap_or(self.filter.debug_logging);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_OTP_LENGTH") {
            self.security.otp_length = v.parse::<usize>().ok().filter(|n| *n > 0).unwrap_or(self.security.otp_length);
        }
        if let Ok(v) = env::var("SECURITY_CODE_LENGTH") {
            self.security.code_length = v.parse::<usize>().ok().filter(|n| *n > 0).unwrap_or(self.security.code_length);
        }
        if let Ok(v) = env::var("SECURITY_PASSWORD_MIN_LENGTH") {
            self.security.password_min_length = v.parse().unwrap_or(self.security.password_min_length);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            filter: FilterConfig {
                tables_path: None,
                max_limit: Some(1000),
                debug_logging: true,
            },
            security: SecurityConfig {
                otp_length: DEFAULT_CODE_LENGTH,
                code_length: DEFAULT_CODE_LENGTH,
                password_min_length: 8,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            filter: FilterConfig {
                tables_path: None,
                max_limit: Some(500),
                debug_logging: false,
            },
            security: SecurityConfig {
                otp_length: DEFAULT_CODE_LENGTH,
                code_length: DEFAULT_CODE_LENGTH,
                password_min_length: 10,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            filter: FilterConfig {
                tables_path: None,
                max_limit: Some(100),
                debug_logging: false,
            },
            security: SecurityConfig {
                otp_length: DEFAULT_CODE_LENGTH,
                code_length: 8,
                password_min_length: 12,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}

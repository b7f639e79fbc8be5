use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single rule a password failed
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum PasswordViolation {
    #[error("Password must be at least {min} characters")]
    TooShort { min: usize },

    #[error("Password must be at most {max} characters")]
    TooLong { max: usize },

    #[error("Password must contain an uppercase letter")]
    MissingUppercase,

    #[error("Password must contain a lowercase letter")]
    MissingLowercase,

    #[error("Password must contain a digit")]
    MissingDigit,

    #[error("Password must contain a symbol")]
    MissingSymbol,

    #[error("Password cannot contain whitespace")]
    ContainsWhitespace,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub max_length: usize,
    pub require_uppercase: bool,
    pub require_lowercase: bool,
    pub require_digit: bool,
    pub require_symbol: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            max_length: 128,
            require_uppercase: true,
            require_lowercase: true,
            require_digit: true,
            require_symbol: true,
        }
    }
}

impl PasswordPolicy {
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// Check every rule and report all failures, not just the first
    pub fn validate(&self, password: &str) -> Result<(), Vec<PasswordViolation>> {
        let mut violations = vec![];
        let length = password.chars().count();

        if length < self.min_length {
            violations.push(PasswordViolation::TooShort { min: self.min_length });
        }
        if length > self.max_length {
            violations.push(PasswordViolation::TooLong { max: self.max_length });
        }
        if self.require_uppercase && !password.chars().any(char::is_uppercase) {
            violations.push(PasswordViolation::MissingUppercase);
        }
        if self.require_lowercase && !password.chars().any(char::is_lowercase) {
            violations.push(PasswordViolation::MissingLowercase);
        }
        if self.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
            violations.push(PasswordViolation::MissingDigit);
        }
        if self.require_symbol && !password.chars().any(|c| !c.is_alphanumeric() && !c.is_whitespace()) {
            violations.push(PasswordViolation::MissingSymbol);
        }
        if password.chars().any(char::is_whitespace) {
            violations.push(PasswordViolation::ContainsWhitespace);
        }

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strong_password_passes() {
        assert!(PasswordPolicy::default().validate("Tr0ub4dor&3").is_ok());
    }

    #[test]
    fn reports_every_violation() {
        let errors = PasswordPolicy::default().validate("abc").unwrap_err();
        assert_eq!(
            errors,
            vec![
                PasswordViolation::TooShort { min: 8 },
                PasswordViolation::MissingUppercase,
                PasswordViolation::MissingDigit,
                PasswordViolation::MissingSymbol,
            ]
        );
    }

    #[test]
    fn rejects_whitespace_and_length() {
        let policy = PasswordPolicy { max_length: 10, ..PasswordPolicy::default() };
        let errors = policy.validate("Abc 123!xyz_long").unwrap_err();
        assert!(errors.contains(&PasswordViolation::TooLong { max: 10 }));
        assert!(errors.contains(&PasswordViolation::ContainsWhitespace));
    }

    #[test]
    fn relaxed_policy() {
        let policy = PasswordPolicy {
            require_symbol: false,
            require_uppercase: false,
            ..PasswordPolicy::default()
        }
        .with_min_length(4);
        assert!(policy.validate("abc1").is_ok());
    }
}

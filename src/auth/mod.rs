pub mod codes;
pub mod password;

pub use codes::{generate_otp, generate_random_code, DEFAULT_CODE_LENGTH};
pub use password::{PasswordPolicy, PasswordViolation};

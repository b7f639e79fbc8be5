pub mod code;
pub mod filter;
pub mod page;
pub mod password;

pub mod types;
pub mod error;
pub mod query_key;
pub mod table;
pub mod registry;
pub mod resolver;
pub mod filter_where;

pub use types::*;
pub use error::FilterError;
pub use query_key::QueryKey;
pub use table::FilterTable;
pub use registry::FilterRegistry;
pub use resolver::FilterResolver;
pub use filter_where::FilterWhere;

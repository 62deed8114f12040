//! String helpers shared by search and the console tables.

pub mod format;

// Re-export commonly used functions at module level
pub use format::{compact, format_date, format_optional, truncate_string};

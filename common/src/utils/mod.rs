//! Utility functions and helpers.

pub mod id_generator;
pub mod sql_normalizer;

// Re-export commonly used types
pub use id_generator::IdGenerator;
pub use sql_normalizer::{ParsedSql, SqlNormalizer, SqlParserNormalizer};

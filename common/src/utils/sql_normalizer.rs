//! SQL statement normalizer.
//!
//! Turns free-form SQL into its canonical rendering. Parsing is best effort:
//! callers treat `None` as "leave the text alone".

use sqlparser::ast::Statement;
use sqlparser::dialect::{Dialect, GenericDialect, MySqlDialect, PostgreSqlDialect, SQLiteDialect};
use sqlparser::parser::Parser;

use crate::config::{AppConfig, SqlDialect};

/// Structured form of a piece of SQL text.
pub type ParsedSql = Vec<Statement>;

/// Parses SQL text and renders the parsed form back to text.
pub trait SqlNormalizer: Send + Sync {
    /// Parses `text`, returning `None` when it is not valid SQL.
    fn parse(&self, text: &str) -> Option<ParsedSql>;

    /// Renders a parsed statement list.
    fn transform(&self, parsed: &ParsedSql) -> String;
}

/// [`SqlNormalizer`] backed by `sqlparser`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlParserNormalizer {
    dialect: SqlDialect,
}

impl SqlParserNormalizer {
    /// Creates a normalizer for the given dialect.
    pub fn new(dialect: SqlDialect) -> Self {
        Self { dialect }
    }

    /// Creates a normalizer for the configured dialect.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.sql_dialect)
    }

    fn dialect(&self) -> Box<dyn Dialect> {
        match self.dialect {
            SqlDialect::Generic => Box::new(GenericDialect {}),
            SqlDialect::MySql => Box::new(MySqlDialect {}),
            SqlDialect::Postgres => Box::new(PostgreSqlDialect {}),
            SqlDialect::SQLite => Box::new(SQLiteDialect {}),
        }
    }
}

impl SqlNormalizer for SqlParserNormalizer {
    fn parse(&self, text: &str) -> Option<ParsedSql> {
        let dialect = self.dialect();
        match Parser::parse_sql(dialect.as_ref(), text) {
            // Blank or comment-only input parses to nothing; there is nothing to normalize.
            Ok(statements) if statements.is_empty() => None,
            Ok(statements) => Some(statements),
            Err(e) => {
                tracing::trace!(error = %e, "sql did not parse");
                None
            }
        }
    }

    fn transform(&self, parsed: &ParsedSql) -> String {
        parsed
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(";\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_transform_canonicalises_keywords() {
        let normalizer = SqlParserNormalizer::default();
        let parsed = normalizer.parse("select * from users where id = 1").unwrap();
        assert_eq!(normalizer.transform(&parsed), "SELECT * FROM users WHERE id = 1");
    }

    #[test]
    fn test_multiple_statements_are_joined() {
        let normalizer = SqlParserNormalizer::default();
        let parsed = normalizer.parse("select 1; select 2").unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(normalizer.transform(&parsed), "SELECT 1;\nSELECT 2");
    }

    #[test]
    fn test_invalid_sql_is_none() {
        let normalizer = SqlParserNormalizer::default();
        assert!(normalizer.parse("selec * frm users").is_none());
    }

    #[test]
    fn test_configured_dialect_drives_parsing() {
        let mut config = AppConfig::default();
        config.sql_dialect = SqlDialect::MySql;
        let mysql = SqlParserNormalizer::from_config(&config);
        assert!(mysql.parse("SELECT `id` FROM users").is_some());

        config.sql_dialect = SqlDialect::Postgres;
        let postgres = SqlParserNormalizer::from_config(&config);
        assert!(postgres.parse("SELECT `id` FROM users").is_none());
    }

    #[test]
    fn test_blank_input_is_none() {
        let normalizer = SqlParserNormalizer::new(SqlDialect::MySql);
        assert!(normalizer.parse("").is_none());
        assert!(normalizer.parse("   ").is_none());
    }
}

// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use tracing::debug;

use super::DatabaseDialect;
use crate::orm_error::OrmError;

/// Dialects by url key. Registration order matters only for duplicate keys, where the dialect
/// registered last wins.
#[derive(Debug, Clone)]
pub struct DialectRegistry {
    dialects: Vec<DatabaseDialect>,
}

impl DialectRegistry {
    /// A registry holding every built-in dialect
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for dialect in [
            DatabaseDialect::generic(),
            DatabaseDialect::mysql(),
            DatabaseDialect::mariadb(),
            DatabaseDialect::postgres(),
            DatabaseDialect::sqlite(),
            DatabaseDialect::h2(),
            DatabaseDialect::hsqldb(),
            DatabaseDialect::derby(),
            DatabaseDialect::sqlserver(),
            DatabaseDialect::oracle(),
            DatabaseDialect::db2(),
            DatabaseDialect::netezza(),
        ] {
            registry.register(dialect);
        }
        registry
    }

    pub fn empty() -> Self {
        Self {
            dialects: Vec::new(),
        }
    }

    pub fn register(&mut self, dialect: DatabaseDialect) {
        self.dialects.push(dialect);
    }

    pub fn for_key(&self, key: &str) -> Option<&DatabaseDialect> {
        self.dialects
            .iter()
            .rev()
            .find(|dialect| dialect.url_keys.iter().any(|k| k.eq_ignore_ascii_case(key)))
    }

    /// Find the dialect for a url such as `jdbc:postgresql://localhost/app`. The key is the second
    /// `:`-separated segment; urls without a driver prefix (`postgres://...`) fall back to the
    /// first.
    pub fn for_url(&self, url: &str) -> Result<&DatabaseDialect, OrmError> {
        let mut segments = url.split(':');
        let first = segments.next();
        let second = segments.next();

        let dialect = second
            .and_then(|key| self.for_key(key))
            .or_else(|| first.and_then(|key| self.for_key(key)))
            .ok_or_else(|| OrmError::UnknownDialect {
                url: url.to_string(),
            })?;

        debug!(dialect = dialect.name, "Resolved database dialect");
        Ok(dialect)
    }
}

impl Default for DialectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_lookup() {
        let registry = DialectRegistry::new();

        assert_eq!(
            registry.for_url("jdbc:postgresql://localhost/app").unwrap().name,
            "Postgres"
        );
        assert_eq!(
            registry.for_url("jdbc:jtds:sqlserver://host/db").unwrap().name,
            "SQL Server"
        );
        assert_eq!(registry.for_url("sqlite::memory:").unwrap().name, "SQLite");
        assert_eq!(registry.for_url("postgres://localhost/app").unwrap().name, "Postgres");
        assert!(matches!(
            registry.for_url("jdbc:nosuchdb://localhost"),
            Err(OrmError::UnknownDialect { .. })
        ));
        assert!(registry.for_url("").is_err());
    }

    #[test]
    fn later_registration_wins() {
        let mut registry = DialectRegistry::new();
        registry.register(DatabaseDialect {
            name: "Custom Postgres",
            ..DatabaseDialect::postgres()
        });

        assert_eq!(registry.for_key("postgresql").unwrap().name, "Custom Postgres");
        assert_eq!(registry.for_key("MYSQL").unwrap().name, "MySQL");
        assert!(DialectRegistry::empty().for_key("mysql").is_none());
    }
}
